//! Resolves the listings shown on a curated guide page.

use db::models::{
    listing::{Listing, ListingQuery},
    listing_tag::ListingTag,
    seo_page::SeoPage,
};
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

/// The optional constraints a guide places on its listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuideCriteria {
    pub category_id: Option<Uuid>,
    pub town_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
}

impl From<&SeoPage> for GuideCriteria {
    fn from(page: &SeoPage) -> Self {
        Self {
            category_id: page.category_id,
            town_id: page.town_id,
            tag_id: page.tag_id,
        }
    }
}

pub struct GuideSelector;

impl GuideSelector {
    /// Published listings satisfying every present constraint, ranked by rating then
    /// review count, at most `limit` of them. Data-layer failures yield an empty list.
    pub async fn select(pool: &SqlitePool, criteria: GuideCriteria, limit: i64) -> Vec<Listing> {
        match Self::try_select(pool, criteria, limit).await {
            Ok(listings) => listings,
            Err(e) => {
                warn!(error = %e, ?criteria, "Guide listing selection failed");
                Vec::new()
            }
        }
    }

    async fn try_select(
        pool: &SqlitePool,
        criteria: GuideCriteria,
        limit: i64,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let ids = match criteria.tag_id {
            Some(tag_id) => {
                let ids = ListingTag::listing_ids_for_tag(pool, tag_id).await?;
                if ids.is_empty() {
                    debug!(tag_id = %tag_id, "Guide tag has no listings");
                    return Ok(Vec::new());
                }
                Some(ids)
            }
            None => None,
        };

        let query = ListingQuery {
            category_id: criteria.category_id,
            town_id: criteria.town_id,
            ids,
            featured: None,
            limit: Some(limit),
        };
        Listing::find_published(pool, &query).await
    }
}
