//! Best-effort "new lead" notifications.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use db::models::listing_request::ListingRequest;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use utils::{config::NotificationConfig, text::escape_markup};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("invalid api key")]
    InvalidApiKey,
}

impl NotificationError {
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout | Self::RateLimited => true,
            Self::Http { status, .. } => (500..=599).contains(status),
            Self::InvalidApiKey => false,
        }
    }
}

/// Receives each stored lead. Failures are logged by the caller and never reach the submitter.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn notify_new_lead(&self, lead: &ListingRequest) -> Result<(), NotificationError>;
}

/// Pick the mail-backed notifier when an API key is configured, otherwise just log.
pub fn notifier_from_config(
    config: &NotificationConfig,
) -> Result<Arc<dyn LeadNotifier>, NotificationError> {
    match &config.resend_api_key {
        Some(key) => Ok(Arc::new(ResendNotifier::new(
            key.clone(),
            config.from.clone(),
            config.to.clone(),
        )?)),
        None => {
            info!("RESEND_API_KEY not set; lead notifications will only be logged");
            Ok(Arc::new(LogNotifier))
        }
    }
}

/// Records the lead in the service log instead of sending mail.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl LeadNotifier for LogNotifier {
    async fn notify_new_lead(&self, lead: &ListingRequest) -> Result<(), NotificationError> {
        info!(
            lead_id = %lead.id,
            business = %lead.business_name,
            email = %lead.email,
            "New listing request"
        );
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
}

/// Sends the lead summary through the Resend email API.
#[derive(Debug, Clone)]
pub struct ResendNotifier {
    http: Client,
    api_key: SecretString,
    from: String,
    to: String,
}

impl ResendNotifier {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(api_key: SecretString, from: String, to: String) -> Result<Self, NotificationError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("best-sea-to-sky/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            from,
            to,
        })
    }

    async fn send(&self, email: &EmailRequest<'_>) -> Result<(), NotificationError> {
        let res = self
            .http
            .post(RESEND_API_URL)
            .bearer_auth(self.api_key.expose_secret())
            .json(email)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(NotificationError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(NotificationError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(NotificationError::Http { status, body })
            }
        }
    }
}

#[async_trait]
impl LeadNotifier for ResendNotifier {
    async fn notify_new_lead(&self, lead: &ListingRequest) -> Result<(), NotificationError> {
        let email = EmailRequest {
            from: &self.from,
            to: [&self.to],
            subject: lead_subject(lead),
            html: lead_email_html(lead),
        };

        (|| async { self.send(&email).await })
            .retry(
                &ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(500))
                    .with_max_delay(Duration::from_secs(5))
                    .with_max_times(2)
                    .with_jitter(),
            )
            .when(|e: &NotificationError| e.should_retry())
            .notify(|e, dur| {
                warn!(
                    "Lead notification failed, retrying after {:.2}s: {}",
                    dur.as_secs_f64(),
                    e
                )
            })
            .await
    }
}

pub fn lead_subject(lead: &ListingRequest) -> String {
    format!("New Listing Request: {}", lead.business_name)
}

/// Two-column table of the submitted fields. Optional fields are left out when absent.
pub fn lead_email_html(lead: &ListingRequest) -> String {
    let mut rows = vec![
        table_row("Business", &lead.business_name),
        table_row("Contact", &lead.contact_name),
        table_row("Email", &lead.email),
    ];
    for (label, value) in [
        ("Phone", &lead.phone),
        ("Website", &lead.website),
        ("Message", &lead.message),
    ] {
        if let Some(value) = value {
            rows.push(table_row(label, value));
        }
    }

    format!(
        "<h2>New Listing Request</h2>\n<table style=\"border-collapse:collapse;font-family:sans-serif;\">\n{}\n</table>",
        rows.join("\n")
    )
}

fn table_row(label: &str, value: &str) -> String {
    format!(
        "<tr><td style=\"padding:6px 12px;font-weight:bold;\">{label}</td><td style=\"padding:6px 12px;\">{}</td></tr>",
        escape_markup(value)
    )
}

fn map_reqwest_error(e: reqwest::Error) -> NotificationError {
    if e.is_timeout() {
        NotificationError::Timeout
    } else {
        NotificationError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use db::models::listing_request::ListingRequestStatus;
    use uuid::Uuid;

    use super::*;

    fn lead() -> ListingRequest {
        ListingRequest {
            id: Uuid::new_v4(),
            business_name: "Howe Sound <Brewing>".to_string(),
            contact_name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            phone: None,
            website: Some("howesound.com".to_string()),
            category_id: None,
            town_id: None,
            message: None,
            status: ListingRequestStatus::New,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_email_body_escapes_and_skips_missing_fields() {
        let html = lead_email_html(&lead());
        assert!(html.contains("Howe Sound &lt;Brewing&gt;"));
        assert!(html.contains(">Website</td>"));
        assert!(!html.contains(">Phone</td>"));
        assert!(!html.contains(">Message</td>"));
    }

    #[test]
    fn test_subject_uses_business_name() {
        assert_eq!(lead_subject(&lead()), "New Listing Request: Howe Sound <Brewing>");
    }

    #[test]
    fn test_retry_classification() {
        assert!(NotificationError::Timeout.should_retry());
        assert!(
            NotificationError::Http {
                status: 503,
                body: String::new()
            }
            .should_retry()
        );
        assert!(!NotificationError::InvalidApiKey.should_retry());
        assert!(
            !NotificationError::Http {
                status: 422,
                body: String::new()
            }
            .should_retry()
        );
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_to_logging() {
        let notifier = notifier_from_config(&NotificationConfig::default()).unwrap();
        assert!(notifier.notify_new_lead(&lead()).await.is_ok());
    }
}
