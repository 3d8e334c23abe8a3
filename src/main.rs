use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use citabot::config::AppConfig;
use citabot::db;
use citabot::handlers;
use citabot::services::messaging::telegram::TelegramProvider;
use citabot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    anyhow::ensure!(
        !config.telegram_token.is_empty(),
        "TELEGRAM_TOKEN must be set"
    );
    anyhow::ensure!(
        !config.telegram_chat_id.is_empty(),
        "TELEGRAM_CHAT_ID must be set"
    );
    let messaging = TelegramProvider::new(
        config.telegram_token.clone(),
        config.telegram_chat_id.clone(),
    );

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        messaging: Box::new(messaging),
    });

    // The booking page posts cross-origin, hence the permissive CORS layer.
    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/citas",
            post(handlers::bookings::create_booking)
                .fallback(handlers::bookings::method_not_allowed),
        )
        .route("/webhook/telegram", post(handlers::webhook::telegram_webhook))
        .route("/api/admin/citas", get(handlers::admin::get_bookings))
        .route("/api/admin/citas/:id", get(handlers::admin::get_booking))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
