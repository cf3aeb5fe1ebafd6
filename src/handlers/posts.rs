use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::email::{templates, NEW_POST_SUBJECT};
use crate::models::{self, NewPostRequest};
use crate::store;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeQuery {
    pub college_id: String,
}

/// Today's posts for a college. The same pass deletes whatever has
/// expired, so reading the feed keeps the store clean.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<CollegeQuery>,
) -> Result<Response, AppError> {
    models::validate_college_id(&query.college_id)?;

    let now = state.config.now();
    let posts = store::posts::sweep_active_today(&state.pool, &query.college_id, now).await?;

    Ok(success(posts, "Posts for today").into_response())
}

/// Validate, rank, persist, then tell everyone subscribed at the college.
/// A failed notification is the recipient's loss, not the poster's: the
/// request still succeeds.
pub async fn create_post(
    State(state): State<AppState>,
    Query(query): Query<CollegeQuery>,
    Json(body): Json<NewPostRequest>,
) -> Result<Response, AppError> {
    let now = state.config.now();
    let post = body.validate(&query.college_id, now)?;

    store::posts::insert(&state.pool, &post).await?;

    let subscribers = store::users::for_college(&state.pool, &post.college_id).await?;
    let html = templates::new_post(&post);
    for subscriber in &subscribers {
        if let Err(error) = state.mailer.send(&subscriber.email, NEW_POST_SUBJECT, &html).await {
            tracing::warn!(email = %subscriber.email, %error, "failed to send new-post notification");
        }
    }

    tracing::info!(
        post_id = %post.id,
        college_id = %post.college_id,
        notified = subscribers.len(),
        "post created"
    );

    Ok(created(post, "Post created").into_response())
}
