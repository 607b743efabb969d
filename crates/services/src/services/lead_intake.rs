//! "Get listed" lead submissions: validation, storage and the follow-up notification.

use std::sync::Arc;

use db::models::listing_request::{CreateListingRequest, ListingRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{error, info};
use ts_rs::TS;
use utils::text::non_blank;
use uuid::Uuid;

use super::notification::LeadNotifier;

// Local part, "@", and a domain containing a dot.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("Business name, contact name, and email are required.")]
    MissingRequiredFields,
    #[error("Please provide a valid email address.")]
    InvalidEmail,
    #[error("Invalid request.")]
    InvalidReference,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Raw form body. Every field is optional here so that blank and missing values get the
/// same validation message.
#[derive(Debug, Clone, Default, Deserialize, Serialize, TS)]
#[serde(default)]
pub struct ListingRequestSubmission {
    pub business_name: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub category_id: Option<String>,
    pub town_id: Option<String>,
    pub message: Option<String>,
}

impl ListingRequestSubmission {
    /// Trim every field, require the three contact fields and check the email shape.
    pub fn validate(&self) -> Result<CreateListingRequest, LeadError> {
        let business_name = non_blank(self.business_name.as_deref());
        let contact_name = non_blank(self.contact_name.as_deref());
        let email = non_blank(self.email.as_deref());

        let (Some(business_name), Some(contact_name), Some(email)) =
            (business_name, contact_name, email)
        else {
            return Err(LeadError::MissingRequiredFields);
        };

        if !EMAIL_PATTERN.is_match(&email) {
            return Err(LeadError::InvalidEmail);
        }

        Ok(CreateListingRequest {
            business_name,
            contact_name,
            email,
            phone: non_blank(self.phone.as_deref()),
            website: non_blank(self.website.as_deref()),
            category_id: parse_reference(self.category_id.as_deref())?,
            town_id: parse_reference(self.town_id.as_deref())?,
            message: non_blank(self.message.as_deref()),
        })
    }
}

/// Blank means "not chosen"; anything else must be a well-formed id.
fn parse_reference(raw: Option<&str>) -> Result<Option<Uuid>, LeadError> {
    match non_blank(raw) {
        Some(raw) => Uuid::parse_str(&raw)
            .map(Some)
            .map_err(|_| LeadError::InvalidReference),
        None => Ok(None),
    }
}

pub struct LeadIntake;

impl LeadIntake {
    /// Store a valid submission with status `new`, then notify in the background.
    /// The returned lead does not depend on the notification outcome.
    pub async fn submit(
        pool: &SqlitePool,
        notifier: Arc<dyn LeadNotifier>,
        submission: &ListingRequestSubmission,
    ) -> Result<ListingRequest, LeadError> {
        let data = submission.validate()?;
        let lead = ListingRequest::create(pool, Uuid::new_v4(), &data).await?;
        info!(lead_id = %lead.id, business = %lead.business_name, "Stored listing request");

        let notified = lead.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify_new_lead(&notified).await {
                error!(lead_id = %notified.id, error = %e, "Lead notification failed");
            }
        });

        Ok(lead)
    }
}
