use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::error::AppError;
use crate::utils::patterns;

const NAME_MAX_LEN: usize = 75;

/// A stored subscription, keyed by email. Upserted on subscribe, deleted
/// on unsubscribe.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub email: String,
    pub name: String,
    pub college_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Untrusted subscribe submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub name: String,
    pub email: String,
    pub college_id: String,
}

/// A validated subscription ready to persist; timestamps are assigned by
/// the database.
#[derive(Debug, Clone)]
pub struct NewSubscriber {
    pub name: String,
    pub email: String,
    pub college_id: String,
}

impl SubscribeRequest {
    pub fn validate(self) -> Result<NewSubscriber, AppError> {
        if !patterns::PERSON_NAME.is_match(&self.name) || self.name.len() > NAME_MAX_LEN {
            return Err(AppError::Validation("name is not a valid person name".into()));
        }
        if !patterns::EMAIL.is_match(&self.email) {
            return Err(AppError::Validation("email is not a valid address".into()));
        }
        super::validate_college_id(&self.college_id)?;

        Ok(NewSubscriber {
            name: self.name,
            email: self.email.to_ascii_lowercase(),
            college_id: self.college_id,
        })
    }
}
