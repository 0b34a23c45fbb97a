use actix_cors::Cors;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use once_cell::sync::Lazy;
use tracing_actix_web::TracingLogger;

use school_registry::{
    constants::START_TIME,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    repositories::sqlx_repo::SqlxPersonRepo,
    routes::configure_routes,
    settings::AppConfig,
    telemetry::init_tracing,
    AppState,
};

fn cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();
    let base = if origins.iter().any(|o| o == "*") {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };
    base.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Configuration error")?;
    init_tracing(&config);
    Lazy::force(&START_TIME);

    tracing::info!("Loaded configuration: {:?}", config);

    let pool = create_pool(&config)
        .await
        .context("Failed to create database connection pool")?;

    run_migrations(&pool).await?;

    let app_state = web::Data::new(AppState::from_pool(pool.clone()));

    let server_addr = config.server_addr();
    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .wrap(cors(&server_config))
            .wrap(NormalizePath::trim())
            .configure(configure_routes::<SqlxPersonRepo>)
    })
    .workers(config.worker_count)
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run();

    let handle = server.handle();

    tokio::select! {
        res = server => res.context("Server error")?,
        reason = shutdown_signal() => {
            tracing::info!("Stopping server after {}", reason);
            handle.stop(true).await;
        }
    }

    pool.close().await;
    tracing::info!("Shutdown complete.");
    Ok(())
}
