pub mod post;
pub mod user;

pub use post::{NewPostRequest, Post};
pub use user::{NewSubscriber, SubscribeRequest, Subscriber};

use crate::utils::error::AppError;
use crate::utils::patterns;

/// College ids partition both posts and subscribers; every entry point that
/// takes one runs it through the same check.
pub fn validate_college_id(value: &str) -> Result<(), AppError> {
    if !patterns::COLLEGE_ID.is_match(value) {
        return Err(AppError::Validation("collegeId must be a numeric id".into()));
    }
    Ok(())
}
