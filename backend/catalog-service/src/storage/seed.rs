//! Demo catalog loaded into fresh stores
//!
//! View counts and creation times are randomized at start-up so the
//! popular and latest rankings look plausible; nothing depends on them.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use video_core::NewVideo;

const SEED_WINDOW_DAYS: i64 = 30;

fn entry(title: &str, embed_url: &str, thumbnail: &str, tags: &[&str], category: &str) -> NewVideo {
    NewVideo {
        title: title.to_string(),
        embed_url: embed_url.to_string(),
        thumbnail: thumbnail.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        category: category.to_string(),
    }
}

/// The nine sample records shipped with the demo store.
pub fn sample_videos() -> Vec<NewVideo> {
    vec![
        entry(
            "Tokyo Classroom Drama",
            "https://streamtape.com/e/AbcXYZ123456/",
            "https://images.unsplash.com/photo-1544717297-fa95b6ee9643?w=400&h=250&fit=crop",
            &["JAV", "teacher", "drama"],
            "JAV",
        ),
        entry(
            "Office Lady After Hours",
            "https://streamtape.com/e/DefGHI789012/",
            "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?w=400&h=250&fit=crop",
            &["office", "professional", "after-hours"],
            "Office",
        ),
        entry(
            "Student Study Session",
            "https://streamtape.com/e/JklMNO345678/",
            "https://images.unsplash.com/photo-1523050854058-8df90110c9f1?w=400&h=250&fit=crop",
            &["student", "study", "campus"],
            "Student",
        ),
        entry(
            "Amateur Home Video",
            "https://streamtape.com/e/PqrSTU901234/",
            "https://images.unsplash.com/photo-1560472355-536de3962603?w=400&h=250&fit=crop",
            &["amateur", "home", "real"],
            "Amateur",
        ),
        entry(
            "Professional Model Photoshoot",
            "https://streamtape.com/e/VwxYZA567890/",
            "https://images.unsplash.com/photo-1594736797933-d0401ba2fe65?w=400&h=250&fit=crop",
            &["professional", "model", "photoshoot"],
            "Professional",
        ),
        entry(
            "Featured Content Special",
            "https://streamtape.com/e/BcdEFG123789/",
            "https://images.unsplash.com/photo-1517841905240-472988babdf9?w=400&h=250&fit=crop",
            &["featured", "special", "premium"],
            "Featured",
        ),
        entry(
            "Premium Vidoza Content",
            "https://vidoza.net/embed-jyitcgfvw7l1.html",
            "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?w=400&h=250&fit=crop",
            &["vidoza", "premium", "hd"],
            "Professional",
        ),
        entry(
            "StreamTape Premium Content",
            "https://streamtape.com/e/8VPYkkpPr4UoRJr/",
            "https://images.unsplash.com/photo-1611605698335-8b1569810432?w=400&h=250&fit=crop",
            &["streamtape", "premium", "hd"],
            "Featured",
        ),
        entry(
            "Sample YouTube Video",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://images.unsplash.com/photo-1598300042247-d088f8ab3a91?w=400&h=250&fit=crop",
            &["youtube", "test", "working"],
            "Amateur",
        ),
    ]
}

/// Random view count (100..10100) and a creation time within the last 30 days.
pub fn demo_stats<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> (i32, DateTime<Utc>) {
    let views = rng.gen_range(100..10_100);
    let age_secs = rng.gen_range(0..SEED_WINDOW_DAYS * 24 * 60 * 60);
    (views, now - Duration::seconds(age_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_samples_are_valid() {
        let samples = sample_videos();
        assert_eq!(samples.len(), 9);
        for sample in &samples {
            assert!(sample.validate().is_ok(), "invalid sample: {}", sample.title);
            assert!(video_core::constants::is_known_category(&sample.category));
        }
    }

    #[test]
    fn test_demo_stats_bounds() {
        let mut rng = rand::thread_rng();
        let now = Utc::now();
        for _ in 0..100 {
            let (views, created_at) = demo_stats(&mut rng, now);
            assert!((100..10_100).contains(&views));
            assert!(created_at <= now);
            assert!(created_at >= now - Duration::days(SEED_WINDOW_DAYS));
        }
    }
}
