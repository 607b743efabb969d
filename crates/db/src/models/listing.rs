use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

use super::{publish_status::PublishStatus, tag::Tag};

const LISTING_COLUMNS: &str = r#"
    l.id, l.slug, l.name, l.description, l.short_description,
    l.category_id, l.town_id, l.address, l.latitude, l.longitude,
    l.phone, l.email, l.website, l.price_level,
    l.google_rating, l.google_review_count,
    l.meta_title, l.meta_description, l.schema_type, l.schema_json,
    l.featured_image_url, l.status, l.featured, l.created_at, l.updated_at,
    c.slug AS category_slug, c.name AS category_name,
    t.slug AS town_slug, t.name AS town_name"#;

const LISTING_FROM: &str = r#"
    FROM listings l
    LEFT JOIN categories c ON c.id = l.category_id
    LEFT JOIN towns t ON t.id = l.town_id"#;

// Unrated listings sink to the bottom, where Postgres `DESC` would put NULLs first.
// Name keeps the order stable.
const BY_RATING: &str = r#"
    ORDER BY l.google_rating IS NULL,
             l.google_rating DESC,
             COALESCE(l.google_review_count, 0) DESC,
             l.name ASC"#;

/// A business/place record, with its category and town denormalized and its tags attached.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS, Default, PartialEq)]
pub struct Listing {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub category_id: Uuid,
    pub town_id: Option<Uuid>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub price_level: Option<i32>, // 0 = free, 1-4 = $-$$$$
    pub google_rating: Option<f64>,
    pub google_review_count: Option<i64>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub schema_type: Option<String>,
    pub schema_json: Option<String>, // JSON-LD override
    pub featured_image_url: Option<String>,
    pub status: PublishStatus,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_slug: Option<String>,
    pub category_name: Option<String>,
    pub town_slug: Option<String>,
    pub town_name: Option<String>,
    #[sqlx(skip)]
    pub tags: Vec<Tag>,
}

/// Filters for the published-listing read path. Every `None` means "no restriction".
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub category_id: Option<Uuid>,
    pub town_id: Option<Uuid>,
    /// Restrict to this id set. An empty set matches nothing.
    pub ids: Option<Vec<Uuid>>,
    pub featured: Option<bool>,
    pub limit: Option<i64>,
}

impl ListingQuery {
    pub fn in_category(category_id: Uuid) -> Self {
        Self {
            category_id: Some(category_id),
            ..Default::default()
        }
    }

    pub fn featured(limit: i64) -> Self {
        Self {
            featured: Some(true),
            limit: Some(limit),
            ..Default::default()
        }
    }
}

/// Just enough of a listing to place it in the sitemap.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct ListingSitemapEntry {
    pub slug: String,
    pub category_slug: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn tag_slugs(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.slug.as_str())
    }

    /// Parse the `schema_json` override, ignoring blank or malformed values.
    pub fn parsed_schema(&self) -> Option<serde_json::Value> {
        self.schema_json
            .as_deref()
            .filter(|json| !json.trim().is_empty())
            .and_then(|json| serde_json::from_str(json).ok())
    }

    /// Published listings matching `query`, best rated first.
    pub async fn find_published(
        pool: &SqlitePool,
        query: &ListingQuery,
    ) -> Result<Vec<Self>, sqlx::Error> {
        if query.ids.as_ref().is_some_and(|ids| ids.is_empty()) {
            return Ok(Vec::new());
        }

        let mut qb =
            QueryBuilder::<Sqlite>::new(format!("SELECT {LISTING_COLUMNS} {LISTING_FROM}"));
        qb.push(" WHERE l.status = ").push_bind(PublishStatus::Published);

        if let Some(category_id) = query.category_id {
            qb.push(" AND l.category_id = ").push_bind(category_id);
        }
        if let Some(town_id) = query.town_id {
            qb.push(" AND l.town_id = ").push_bind(town_id);
        }
        if let Some(featured) = query.featured {
            qb.push(" AND l.featured = ").push_bind(featured);
        }
        if let Some(ids) = &query.ids {
            qb.push(" AND l.id IN (");
            let mut separated = qb.separated(", ");
            for id in ids {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");
        }

        qb.push(BY_RATING);
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let mut listings: Vec<Listing> = qb.build_query_as().fetch_all(pool).await?;
        Self::attach_tags(pool, &mut listings).await?;
        Ok(listings)
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        let listing = sqlx::query_as::<_, Listing>(&format!(
            "SELECT {LISTING_COLUMNS} {LISTING_FROM} WHERE l.slug = $1 AND l.status = $2"
        ))
        .bind(slug)
        .bind(PublishStatus::Published)
        .fetch_optional(pool)
        .await?;

        match listing {
            Some(listing) => {
                let mut listings = vec![listing];
                Self::attach_tags(pool, &mut listings).await?;
                Ok(listings.pop())
            }
            None => Ok(None),
        }
    }

    /// Other published listings in the same town and category.
    pub async fn find_related(
        pool: &SqlitePool,
        listing_id: Uuid,
        town_id: Uuid,
        category_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut listings = sqlx::query_as::<_, Listing>(&format!(
            r#"SELECT {LISTING_COLUMNS} {LISTING_FROM}
               WHERE l.status = $1
                 AND l.town_id = $2
                 AND l.category_id = $3
                 AND l.id != $4
               {BY_RATING}
               LIMIT $5"#
        ))
        .bind(PublishStatus::Published)
        .bind(town_id)
        .bind(category_id)
        .bind(listing_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Self::attach_tags(pool, &mut listings).await?;
        Ok(listings)
    }

    /// Published listings in the same town but a different category.
    pub async fn find_cross_category(
        pool: &SqlitePool,
        listing_id: Uuid,
        town_id: Uuid,
        category_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut listings = sqlx::query_as::<_, Listing>(&format!(
            r#"SELECT {LISTING_COLUMNS} {LISTING_FROM}
               WHERE l.status = $1
                 AND l.town_id = $2
                 AND l.category_id != $3
                 AND l.id != $4
               {BY_RATING}
               LIMIT $5"#
        ))
        .bind(PublishStatus::Published)
        .bind(town_id)
        .bind(category_id)
        .bind(listing_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Self::attach_tags(pool, &mut listings).await?;
        Ok(listings)
    }

    /// Case-insensitive substring match on the listing name, best rated first.
    /// SQLite `LIKE` only folds ASCII, so matching happens here with Unicode lowercasing.
    pub async fn search_by_name(
        pool: &SqlitePool,
        needle: &str,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let needle = needle.to_lowercase();
        let published = sqlx::query_as::<_, Listing>(&format!(
            r#"SELECT {LISTING_COLUMNS} {LISTING_FROM}
               WHERE l.status = $1
               {BY_RATING}"#
        ))
        .bind(PublishStatus::Published)
        .fetch_all(pool)
        .await?;

        let mut listings: Vec<Listing> = published
            .into_iter()
            .filter(|listing| listing.name.to_lowercase().contains(&needle))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect();
        Self::attach_tags(pool, &mut listings).await?;
        Ok(listings)
    }

    pub async fn find_sitemap_entries(
        pool: &SqlitePool,
    ) -> Result<Vec<ListingSitemapEntry>, sqlx::Error> {
        sqlx::query_as::<_, ListingSitemapEntry>(
            r#"SELECT l.slug, c.slug AS category_slug, l.updated_at
               FROM listings l
               LEFT JOIN categories c ON c.id = l.category_id
               WHERE l.status = $1
               ORDER BY c.display_order, l.slug"#,
        )
        .bind(PublishStatus::Published)
        .fetch_all(pool)
        .await
    }

    /// Fill each listing's `tags` from the join relation.
    pub async fn attach_tags(pool: &SqlitePool, listings: &mut [Listing]) -> Result<(), sqlx::Error> {
        let ids: Vec<Uuid> = listings.iter().map(|l| l.id).collect();
        let mut tags = Tag::find_for_listings(pool, &ids).await?;
        for listing in listings.iter_mut() {
            listing.tags = tags.remove(&listing.id).unwrap_or_default();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DBService,
        test_support::{NewListing, insert_listing, seed_directory},
    };

    #[tokio::test]
    async fn test_find_published_excludes_drafts_and_orders_by_rating() {
        let db = DBService::new_in_memory().await.unwrap();
        let seed = seed_directory(&db.pool).await.unwrap();

        let listings =
            Listing::find_published(&db.pool, &ListingQuery::in_category(seed.category("eat")))
                .await
                .unwrap();

        let slugs: Vec<&str> = listings.iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec![
                "purebread",
                "watershed-grill",
                "fergies-cafe",
                "pemberton-distillery-bistro",
                "no-town-taco",
            ]
        );
    }

    #[tokio::test]
    async fn test_listing_relations_are_hydrated() {
        let db = DBService::new_in_memory().await.unwrap();
        seed_directory(&db.pool).await.unwrap();

        let listing = Listing::find_by_slug(&db.pool, "fergies-cafe")
            .await
            .unwrap()
            .expect("published listing");
        assert_eq!(listing.category_slug.as_deref(), Some("eat"));
        assert_eq!(listing.town_slug.as_deref(), Some("squamish"));
        assert_eq!(listing.tag_slugs().collect::<Vec<_>>(), vec!["brunch", "patio"]);
    }

    #[tokio::test]
    async fn test_draft_listing_is_not_found_by_slug() {
        let db = DBService::new_in_memory().await.unwrap();
        seed_directory(&db.pool).await.unwrap();

        assert!(
            Listing::find_by_slug(&db.pool, "hidden-draft")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_empty_id_set_matches_nothing() {
        let db = DBService::new_in_memory().await.unwrap();
        seed_directory(&db.pool).await.unwrap();

        let query = ListingQuery {
            ids: Some(Vec::new()),
            ..Default::default()
        };
        assert!(Listing::find_published(&db.pool, &query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = DBService::new_in_memory().await.unwrap();
        seed_directory(&db.pool).await.unwrap();

        let hits = Listing::search_by_name(&db.pool, "CAFE", 12).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "fergies-cafe");

        assert!(Listing::search_by_name(&db.pool, "%", 12).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_folds_accented_capitals() {
        let db = DBService::new_in_memory().await.unwrap();
        let seed = seed_directory(&db.pool).await.unwrap();
        insert_listing(
            &db.pool,
            &NewListing::published("ecole-bistro", "École Bistro", seed.category("eat")),
        )
        .await
        .unwrap();

        for needle in ["école", "ÉCOLE", "cole bis"] {
            let hits = Listing::search_by_name(&db.pool, needle, 12).await.unwrap();
            assert_eq!(
                hits.iter().map(|l| l.slug.as_str()).collect::<Vec<_>>(),
                vec!["ecole-bistro"],
                "{needle}"
            );
        }
    }

    #[tokio::test]
    async fn test_search_respects_limit_and_rating_order() {
        let db = DBService::new_in_memory().await.unwrap();
        seed_directory(&db.pool).await.unwrap();

        let hits = Listing::search_by_name(&db.pool, "sea to sky", 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "sea-to-sky-gondola");
    }

    #[tokio::test]
    async fn test_related_and_cross_category() {
        let db = DBService::new_in_memory().await.unwrap();
        let seed = seed_directory(&db.pool).await.unwrap();
        let grill = seed.listing("watershed-grill");

        let related = Listing::find_related(
            &db.pool,
            grill,
            seed.town("squamish"),
            seed.category("eat"),
            4,
        )
        .await
        .unwrap();
        assert_eq!(
            related.iter().map(|l| l.slug.as_str()).collect::<Vec<_>>(),
            vec!["fergies-cafe"]
        );

        let cross = Listing::find_cross_category(
            &db.pool,
            grill,
            seed.town("squamish"),
            seed.category("eat"),
            3,
        )
        .await
        .unwrap();
        assert_eq!(
            cross.iter().map(|l| l.slug.as_str()).collect::<Vec<_>>(),
            vec!["sea-to-sky-gondola", "sea-to-sky-hotel"]
        );
    }
}
