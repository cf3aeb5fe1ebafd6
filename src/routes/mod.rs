use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{apply_security_headers, create_cors_layer};
use crate::handlers::{digest, geocode, health_check, posts, users};
use crate::AppState;

pub fn create_routes(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/users", post(users::subscribe))
        .route("/users/:email", delete(users::unsubscribe))
        .route("/digest/run", post(digest::run_daily_digest))
        .route("/geocode", post(geocode::geocode_location))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer());

    apply_security_headers(router)
}
