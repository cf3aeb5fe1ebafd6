use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use noms_server::config::Config;
use noms_server::email::gmail::GmailMailer;
use noms_server::email::{LogMailer, Mailer};
use noms_server::geocode::GeocodeClient;
use noms_server::routes::create_routes;
use noms_server::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    let mailer: Arc<dyn Mailer> = match config.gmail.clone() {
        Some(credentials) => Arc::new(GmailMailer::new(credentials)),
        None => {
            tracing::warn!("Gmail credentials not configured, emails will be logged instead of sent");
            Arc::new(LogMailer)
        }
    };

    let geocoder = config
        .geocoding_api_key
        .clone()
        .map(|key| Arc::new(GeocodeClient::new(key)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app: Router = create_routes(AppState {
        pool,
        config: Arc::new(config),
        mailer,
        geocoder,
    });

    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
