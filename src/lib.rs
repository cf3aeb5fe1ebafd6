pub mod config;
pub mod email;
pub mod geocode;
pub mod handlers;
pub mod models;
pub mod ranking;
pub mod routes;
pub mod store;
pub mod utils;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::email::Mailer;
use crate::geocode::GeocodeClient;

/// Everything a request handler needs, cloned per request. External
/// collaborators are injected here at startup instead of being reached
/// through process-wide singletons.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub mailer: Arc<dyn Mailer>,
    pub geocoder: Option<Arc<GeocodeClient>>,
}
