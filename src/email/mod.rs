//! Outbound notification email: a narrow delivery trait plus the HTML
//! bodies the service sends through it.

pub mod gmail;
pub mod templates;

use async_trait::async_trait;

use crate::utils::error::AppError;

pub const WELCOME_SUBJECT: &str = "⭐ noms: welcome to your free food finder!";
pub const NEW_POST_SUBJECT: &str = "⭐ noms: new free food near you!";
pub const DAILY_DIGEST_SUBJECT: &str = "⭐ noms: today's top free food events";

/// Delivery seam. Handlers never talk to a mail provider directly; they
/// hold whichever implementation was injected at startup.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

/// Stands in when Gmail credentials are not configured, so local runs
/// still exercise the full notification path.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<(), AppError> {
        tracing::info!(%to, %subject, "mail credentials not configured, logging instead of sending");
        Ok(())
    }
}
