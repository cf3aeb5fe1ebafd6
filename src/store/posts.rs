use chrono::DateTime;
use chrono_tz::Tz;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::post::Post;
use crate::ranking::{self, PostStatus};
use crate::utils::error::AppError;

pub async fn insert(pool: &PgPool, post: &Post) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO posts (id, college_id, organization_name, month, day, year, \
         start_hour, start_minute, end_hour, end_minute, location, lat, lng, \
         people_fed, type_of_food, description, time_sort, rank, image_url, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)",
    )
    .bind(post.id)
    .bind(&post.college_id)
    .bind(&post.organization_name)
    .bind(post.month)
    .bind(post.day)
    .bind(post.year)
    .bind(post.start_hour)
    .bind(post.start_minute)
    .bind(post.end_hour)
    .bind(post.end_minute)
    .bind(&post.location)
    .bind(post.lat)
    .bind(post.lng)
    .bind(post.people_fed)
    .bind(&post.type_of_food)
    .bind(&post.description)
    .bind(post.time_sort)
    .bind(post.rank)
    .bind(&post.image_url)
    .bind(post.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Every post stored for a college, soonest start first.
pub async fn for_college(pool: &PgPool, college_id: &str) -> Result<Vec<Post>, AppError> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT * FROM posts WHERE college_id = $1 ORDER BY time_sort ASC",
    )
    .bind(college_id)
    .fetch_all(pool)
    .await?;
    Ok(posts)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// One read pass over a college's posts: expired rows are deleted on the
/// spot and only today's events come back. Reads double as garbage
/// collection; there is no separate sweeper.
pub async fn sweep_active_today(
    pool: &PgPool,
    college_id: &str,
    now: DateTime<Tz>,
) -> Result<Vec<Post>, AppError> {
    let mut active = Vec::new();
    for post in for_college(pool, college_id).await? {
        match ranking::classify(&post, now) {
            PostStatus::Expired => {
                if let Some(url) = &post.image_url {
                    tracing::debug!(post_id = %post.id, image_url = %url,
                        "dropping attachment reference with expired post");
                }
                delete(pool, post.id).await?;
            }
            PostStatus::ActiveToday => active.push(post),
            PostStatus::Upcoming => {}
        }
    }
    Ok(active)
}

/// Colleges that currently have posts; the digest run iterates these.
pub async fn college_ids(pool: &PgPool) -> Result<Vec<String>, AppError> {
    let ids = sqlx::query_scalar::<_, String>("SELECT DISTINCT college_id FROM posts")
        .fetch_all(pool)
        .await?;
    Ok(ids)
}
