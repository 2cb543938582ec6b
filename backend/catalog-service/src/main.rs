use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{anyhow, Context};
use catalog_service::config::{Config, StorageBackend};
use catalog_service::middleware::{AdminAuth, MetricsMiddleware};
use catalog_service::storage::{
    InMemoryVideoStore, MeteredVideoStore, PgVideoStore, SharedStore,
};
use catalog_service::{metrics, routes};
use db_pool::{create_pool as create_pg_pool, DbConfig as DbPoolConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Probe the local health endpoint; used as the container health check.
async fn run_healthcheck() -> anyhow::Result<()> {
    let port = std::env::var("CATALOG_SERVICE_PORT").unwrap_or_else(|_| "5000".to_string());
    let url = format!("http://127.0.0.1:{}/api/health", port);

    let resp = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .with_context(|| format!("healthcheck request to {} failed", url))?;

    if resp.status().is_success() {
        Ok(())
    } else {
        Err(anyhow!("healthcheck HTTP status: {}", resp.status()))
    }
}

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

async fn build_store(config: &Config) -> anyhow::Result<SharedStore> {
    let store: SharedStore = match config.storage.backend {
        StorageBackend::Memory => {
            if config.storage.seed_sample_data {
                Arc::new(InMemoryVideoStore::with_sample_data().await)
            } else {
                Arc::new(InMemoryVideoStore::new())
            }
        }
        StorageBackend::Postgres => {
            let db_cfg = DbPoolConfig::from_env(
                "catalog-service",
                &config.database.url,
                config.database.max_connections,
            );
            db_cfg.log_config();

            let pool = create_pg_pool(db_cfg)
                .await
                .context("Failed to create database pool")?;
            let store = PgVideoStore::new(pool);

            store
                .run_migrations()
                .await
                .context("Failed to run database migrations")?;

            if config.storage.seed_sample_data {
                let seeded = store
                    .seed_if_empty()
                    .await
                    .context("Failed to seed sample videos")?;
                if seeded > 0 {
                    tracing::info!("Seeded {} sample videos", seeded);
                }
            }

            Arc::new(store)
        }
    };

    Ok(Arc::new(MeteredVideoStore::new(store)))
}

/// Catalog Service
///
/// REST API over a catalog of embeddable video records.
///
/// # Routes
///
/// - `/api/videos/*` - list, search, rank, create, update, delete videos
/// - `/api/categories` - fixed categories with record counts
/// - `/api/health*` - health probes
/// - `/metrics` - Prometheus metrics
///
/// Storage is in-memory by default; set `CATALOG_STORAGE_BACKEND=postgres`
/// and `DATABASE_URL` to persist records in PostgreSQL.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Support container healthchecks via CLI subcommand
    if let Some(cmd) = std::env::args().nth(1) {
        if cmd == "healthcheck" {
            return run_healthcheck().await;
        }
    }

    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting catalog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Storage backend: {}", config.storage.backend);

    let store = build_store(&config).await?;
    let store_data = web::Data::new(store);

    let admin_auth = web::Data::new(AdminAuth::new(config.admin.api_token.clone()));
    if !admin_auth.is_enabled() {
        tracing::warn!("ADMIN_API_TOKEN not set; catalog mutations are unauthenticated");
    }

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin.is_empty() {
                continue;
            }
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(store_data.clone())
            .app_data(admin_auth.clone())
            .wrap(MetricsMiddleware)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .configure(routes::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    tokio::select! {
        result = &mut server_task => {
            result
                .context("HTTP server task panicked")?
                .context("HTTP server failed")?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            server_task
                .await
                .context("HTTP server task panicked")?
                .context("HTTP server failed")?;
        }
    }

    tracing::info!("Catalog-service shutting down");
    Ok(())
}
