use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::utils::error::AppError;
use crate::utils::response::success;
use crate::AppState;

#[derive(Deserialize)]
pub struct GeocodeRequest {
    pub location: String,
}

/// Resolve a location written in words to coordinates, so the posting form
/// can pin events on a map without holding an API key of its own.
pub async fn geocode_location(
    State(state): State<AppState>,
    Json(body): Json<GeocodeRequest>,
) -> Result<Response, AppError> {
    let location = body.location.trim();
    if location.is_empty() {
        return Err(AppError::Validation("location must not be empty".into()));
    }

    let Some(geocoder) = &state.geocoder else {
        return Err(AppError::ExternalService("geocoding is not configured".into()));
    };

    let coordinates = geocoder.lookup(location).await?;
    Ok(success(coordinates, "Location resolved").into_response())
}
