use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::email::{templates, DAILY_DIGEST_SUBJECT};
use crate::ranking;
use crate::store;
use crate::utils::error::AppError;
use crate::utils::response::success;
use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestSummary {
    pub colleges_with_events: usize,
    pub digests_sent: usize,
}

/// The daily digest run, triggered by an external scheduler. For each
/// college with posts: sweep out expired rows, rank today's events, and
/// mail the top of the list to every subscriber there.
pub async fn run_daily_digest(State(state): State<AppState>) -> Result<Response, AppError> {
    let now = state.config.now();
    let mut summary = DigestSummary {
        colleges_with_events: 0,
        digests_sent: 0,
    };

    for college_id in store::posts::college_ids(&state.pool).await? {
        let active = store::posts::sweep_active_today(&state.pool, &college_id, now).await?;
        let top = ranking::top_ranked(active, state.config.digest_size);
        if top.is_empty() {
            continue;
        }
        summary.colleges_with_events += 1;

        let html = templates::daily_digest(&top);
        for subscriber in store::users::for_college(&state.pool, &college_id).await? {
            match state.mailer.send(&subscriber.email, DAILY_DIGEST_SUBJECT, &html).await {
                Ok(()) => summary.digests_sent += 1,
                Err(error) => {
                    tracing::warn!(email = %subscriber.email, %error, "failed to send daily digest");
                }
            }
        }
    }

    tracing::info!(
        colleges = summary.colleges_with_events,
        sent = summary.digests_sent,
        "daily digest run complete"
    );
    Ok(success(summary, "Daily digest run complete").into_response())
}
