use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::email::{templates, WELCOME_SUBJECT};
use crate::models::SubscribeRequest;
use crate::store;
use crate::utils::error::AppError;
use crate::utils::response::empty_success;
use crate::AppState;

/// Subscribe (or re-subscribe, updating name and college) and greet the
/// new reader.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Response, AppError> {
    let subscriber = body.validate()?;

    store::users::upsert(&state.pool, &subscriber).await?;

    let html = templates::welcome(&subscriber.name);
    if let Err(error) = state.mailer.send(&subscriber.email, WELCOME_SUBJECT, &html).await {
        tracing::warn!(email = %subscriber.email, %error, "failed to send welcome email");
    }

    tracing::info!(email = %subscriber.email, college_id = %subscriber.college_id, "subscribed");
    Ok(empty_success("Subscribed").into_response())
}

pub async fn unsubscribe(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    let email = email.to_ascii_lowercase();
    if !store::users::delete_by_email(&state.pool, &email).await? {
        tracing::warn!(%email, "unsubscribe requested for an address that was never subscribed");
        return Err(AppError::NotFound(format!("No subscription for '{email}'")));
    }

    tracing::info!(%email, "unsubscribed");
    Ok(empty_success("Unsubscribed").into_response())
}
