//! "More nearby" suggestions for a listing detail page.

use db::models::listing::Listing;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::warn;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct RelatedListings {
    /// Same town, same category.
    pub related: Vec<Listing>,
    /// Same town, other categories.
    pub cross_category: Vec<Listing>,
}

impl RelatedListings {
    /// Both lookups run concurrently; either failing degrades to an empty list.
    /// A listing without a town has no related items.
    pub async fn load(
        pool: &SqlitePool,
        listing: &Listing,
        related_limit: i64,
        cross_category_limit: i64,
    ) -> Self {
        let Some(town_id) = listing.town_id else {
            return Self::default();
        };

        let (related, cross_category) = tokio::join!(
            Listing::find_related(pool, listing.id, town_id, listing.category_id, related_limit),
            Listing::find_cross_category(
                pool,
                listing.id,
                town_id,
                listing.category_id,
                cross_category_limit
            ),
        );

        Self {
            related: related.unwrap_or_else(|e| {
                warn!(listing_id = %listing.id, error = %e, "Failed to load related listings");
                Vec::new()
            }),
            cross_category: cross_category.unwrap_or_else(|e| {
                warn!(listing_id = %listing.id, error = %e, "Failed to load cross-category listings");
                Vec::new()
            }),
        }
    }
}
