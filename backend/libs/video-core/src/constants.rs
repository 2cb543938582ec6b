//! Catalog constants

/// Fixed set of category labels offered by the catalog.
///
/// Stored categories are expected to come from this list but it is not
/// enforced; filtering compares labels case-insensitively.
pub const CATEGORIES: &[&str] = &[
    "JAV",
    "Amateur",
    "Professional",
    "Office",
    "Student",
    "Teacher",
    "Fetish",
    "Featured",
    "Trending",
];

/// Number of records returned by the popular ranking
pub const POPULAR_LIMIT: usize = 12;

/// Number of records returned by the latest ranking
pub const LATEST_LIMIT: usize = 8;

/// Largest page a client may request from the paginated listing
pub const MAX_PAGE_SIZE: i64 = 100;

/// Returns true when `category` matches one of [`CATEGORIES`], ignoring case.
pub fn is_known_category(category: &str) -> bool {
    CATEGORIES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(category))
}
