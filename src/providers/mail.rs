//! Resend-backed contact-form mail delivery.

use async_trait::async_trait;
use serde::Serialize;

use super::MailProvider;
use crate::config::ContactConfig;
use crate::error::EngineError;

const RESEND_URL: &str = "https://api.resend.com/emails";

/// Resend mail client for contact-form submissions.
#[derive(Debug, Clone)]
pub struct ResendMail {
    http: reqwest::Client,
    to_email: String,
    from_email: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

impl ResendMail {
    /// Creates a client with the configured routing addresses.
    pub fn new(http: reqwest::Client, config: &ContactConfig, api_key: Option<String>) -> Self {
        Self {
            http,
            to_email: config.to_email.clone(),
            from_email: config.from_email.clone(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

#[async_trait]
impl MailProvider for ResendMail {
    async fn send_contact(
        &self,
        user_name: &str,
        user_email: &str,
        message: &str,
    ) -> Result<(), EngineError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(EngineError::upstream("RESEND_API_KEY is not configured"));
        };
        if self.to_email.trim().is_empty() || self.from_email.trim().is_empty() {
            return Err(EngineError::upstream(
                "contact mail routing is not configured",
            ));
        }

        let body = SendEmailRequest {
            from: format!("Rooftop Energy Contact Form <{}>", self.from_email),
            to: vec![self.to_email.clone()],
            subject: format!("New Message from {user_name}"),
            html: format!(
                "<p>You have received a new message from the Solar Potential Explorer \
                 contact form.</p>\
                 <p><strong>Name:</strong> {user_name}</p>\
                 <p><strong>Email:</strong> {user_email}</p>\
                 <p><strong>Message:</strong></p>\
                 <p>{message}</p>"
            ),
        };

        let response = self
            .http
            .post(RESEND_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::upstream(format!("resend request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::upstream(format!("resend returned {status}")));
        }
        Ok(())
    }
}
