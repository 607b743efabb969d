use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// A category-scoped label attached to listings through `listing_tags`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS, Default, PartialEq, Eq)]
pub struct Tag {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub category_id: Uuid,
}

#[derive(FromRow)]
struct ListingTagRow {
    listing_id: Uuid,
    id: Uuid,
    slug: String,
    name: String,
    category_id: Uuid,
}

impl Tag {
    pub async fn find_by_category(
        pool: &SqlitePool,
        category_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            r#"SELECT id, slug, name, category_id
               FROM tags
               WHERE category_id = $1
               ORDER BY name"#,
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }

    /// Tags for each of `listing_ids`, keyed by listing id, each set ordered by name.
    pub async fn find_for_listings(
        pool: &SqlitePool,
        listing_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Tag>>, sqlx::Error> {
        if listing_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new(
            r#"SELECT lt.listing_id, t.id, t.slug, t.name, t.category_id
               FROM listing_tags lt
               JOIN tags t ON t.id = lt.tag_id
               WHERE lt.listing_id IN ("#,
        );
        let mut ids = qb.separated(", ");
        for id in listing_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(") ORDER BY t.name");

        let rows: Vec<ListingTagRow> = qb.build_query_as().fetch_all(pool).await?;

        let mut by_listing: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for row in rows {
            by_listing.entry(row.listing_id).or_default().push(Tag {
                id: row.id,
                slug: row.slug,
                name: row.name,
                category_id: row.category_id,
            });
        }
        Ok(by_listing)
    }
}
