//! Email delivery through the Gmail REST API using a long-lived OAuth2
//! refresh token.

use async_trait::async_trait;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use super::Mailer;
use crate::utils::error::AppError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

#[derive(Debug, Clone)]
pub struct GmailCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    /// From-address of the authorized mailbox; Gmail also accepts the
    /// literal "me".
    pub sender: String,
}

pub struct GmailMailer {
    http: reqwest::Client,
    credentials: GmailCredentials,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GmailMailer {
    pub fn new(credentials: GmailCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    /// Access tokens live for an hour; exchange the refresh token for a
    /// fresh one before each send rather than caching across that window.
    async fn access_token(&self) -> Result<String, AppError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", self.credentials.refresh_token.as_str()),
        ];

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("token refresh failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "token refresh returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("malformed token response: {e}")))?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl Mailer for GmailMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        let access_token = self.access_token().await?;
        let raw = encode_message(&self.credentials.sender, to, subject, html_body);

        let response = self
            .http
            .post(SEND_URL)
            .bearer_auth(access_token)
            .json(&json!({ "raw": raw }))
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("mail send failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "mail send returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Assemble an RFC 2822 message and encode it the way the Gmail API wants
/// its `raw` field: url-safe base64 without padding. The subject goes
/// through an encoded-word so it may carry non-ASCII characters.
pub fn encode_message(from: &str, to: &str, subject: &str, html_body: &str) -> String {
    let message = format!(
        "From: {from}\r\n\
         To: {to}\r\n\
         Subject: =?utf-8?B?{}?=\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: text/html; charset=utf-8\r\n\
         \r\n\
         {html_body}",
        STANDARD.encode(subject)
    );
    URL_SAFE_NO_PAD.encode(message)
}
