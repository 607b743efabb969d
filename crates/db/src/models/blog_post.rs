use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

use super::publish_status::PublishStatus;

const BLOG_POST_COLUMNS: &str = r#"id, slug, title, meta_description, featured_image, excerpt,
    content, author, status, published_at, created_at, updated_at"#;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS, Default, PartialEq)]
pub struct BlogPost {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub meta_description: Option<String>,
    pub featured_image: Option<String>,
    pub excerpt: Option<String>,
    pub content: String, // rich text (HTML)
    pub author: Option<String>,
    pub status: PublishStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Published posts, newest first.
    pub async fn find_published(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BlogPost>(&format!(
            r#"SELECT {BLOG_POST_COLUMNS}
               FROM blog_posts
               WHERE status = $1
               ORDER BY published_at IS NULL, published_at DESC"#
        ))
        .bind(PublishStatus::Published)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {BLOG_POST_COLUMNS} FROM blog_posts WHERE slug = $1 AND status = $2"
        ))
        .bind(slug)
        .bind(PublishStatus::Published)
        .fetch_optional(pool)
        .await
    }
}
