use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

use super::publish_status::PublishStatus;

const SEO_PAGE_COLUMNS: &str = r#"id, slug, title, meta_description, h1_text, intro_content,
    category_id, tag_id, town_id, schema_json, canonical_url, status"#;

/// A curated "best of" guide. Each optional foreign key narrows the listings it shows;
/// a missing key places no restriction on that axis.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS, Default, PartialEq)]
pub struct SeoPage {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub meta_description: Option<String>,
    pub h1_text: Option<String>,
    pub intro_content: Option<String>,
    pub category_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
    pub town_id: Option<Uuid>,
    pub schema_json: Option<String>,
    pub canonical_url: Option<String>,
    pub status: PublishStatus,
}

impl SeoPage {
    pub fn heading(&self) -> &str {
        self.h1_text
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(&self.title)
    }

    pub fn parsed_schema(&self) -> Option<serde_json::Value> {
        self.schema_json
            .as_deref()
            .filter(|json| !json.trim().is_empty())
            .and_then(|json| serde_json::from_str(json).ok())
    }

    pub async fn find_published(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, SeoPage>(&format!(
            "SELECT {SEO_PAGE_COLUMNS} FROM seo_pages WHERE status = $1 ORDER BY title"
        ))
        .bind(PublishStatus::Published)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, SeoPage>(&format!(
            "SELECT {SEO_PAGE_COLUMNS} FROM seo_pages WHERE slug = $1 AND status = $2"
        ))
        .bind(slug)
        .bind(PublishStatus::Published)
        .fetch_optional(pool)
        .await
    }
}
