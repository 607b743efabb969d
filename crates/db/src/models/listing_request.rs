use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// Back-office review state of a lead. New submissions always start as `New`.
#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "listing_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ListingRequestStatus {
    #[default]
    New,
    Contacted,
    Approved,
    Rejected,
}

/// A prospective advertiser's "get listed" submission.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct ListingRequest {
    pub id: Uuid,
    pub business_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub category_id: Option<Uuid>,
    pub town_id: Option<Uuid>,
    pub message: Option<String>,
    pub status: ListingRequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated, trimmed lead ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateListingRequest {
    pub business_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub category_id: Option<Uuid>,
    pub town_id: Option<Uuid>,
    pub message: Option<String>,
}

impl ListingRequest {
    pub async fn create(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateListingRequest,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ListingRequest>(
            r#"INSERT INTO listing_requests
                   (id, business_name, contact_name, email, phone, website,
                    category_id, town_id, message, status)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING id, business_name, contact_name, email, phone, website,
                         category_id, town_id, message, status, created_at"#,
        )
        .bind(id)
        .bind(&data.business_name)
        .bind(&data.contact_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.website)
        .bind(data.category_id)
        .bind(data.town_id)
        .bind(&data.message)
        .bind(ListingRequestStatus::New)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ListingRequest>(
            r#"SELECT id, business_name, contact_name, email, phone, website,
                      category_id, town_id, message, status, created_at
               FROM listing_requests
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    #[tokio::test]
    async fn test_create_starts_as_new() {
        let db = DBService::new_in_memory().await.unwrap();
        let data = CreateListingRequest {
            business_name: "Howe Sound Brewing".to_string(),
            contact_name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            phone: None,
            website: Some("howesound.com".to_string()),
            category_id: None,
            town_id: None,
            message: None,
        };

        let id = Uuid::new_v4();
        let created = ListingRequest::create(&db.pool, id, &data).await.unwrap();
        assert_eq!(created.status, ListingRequestStatus::New);

        let stored = ListingRequest::find_by_id(&db.pool, id).await.unwrap().unwrap();
        assert_eq!(stored.business_name, "Howe Sound Brewing");
        assert_eq!(stored.website.as_deref(), Some("howesound.com"));
    }
}
