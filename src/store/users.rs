use sqlx::PgPool;

use crate::models::user::{NewSubscriber, Subscriber};
use crate::utils::error::AppError;

/// Subscribing twice updates the name and college on the existing row.
pub async fn upsert(pool: &PgPool, subscriber: &NewSubscriber) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO subscribers (email, name, college_id) VALUES ($1, $2, $3) \
         ON CONFLICT (email) DO UPDATE \
         SET name = EXCLUDED.name, college_id = EXCLUDED.college_id, updated_at = now()",
    )
    .bind(&subscriber.email)
    .bind(&subscriber.name)
    .bind(&subscriber.college_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns false when no such subscription existed.
pub async fn delete_by_email(pool: &PgPool, email: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM subscribers WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn for_college(pool: &PgPool, college_id: &str) -> Result<Vec<Subscriber>, AppError> {
    let subscribers = sqlx::query_as::<_, Subscriber>(
        "SELECT * FROM subscribers WHERE college_id = $1 ORDER BY email ASC",
    )
    .bind(college_id)
    .fetch_all(pool)
    .await?;
    Ok(subscribers)
}
