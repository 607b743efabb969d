//! Name search behind the search-as-you-type box.

use db::models::listing::Listing;
use sqlx::SqlitePool;
use tracing::warn;

/// Queries shorter than this (after trimming) return nothing without touching the database.
pub const MIN_QUERY_CHARS: usize = 2;

pub struct ListingSearch;

impl ListingSearch {
    /// Published listings whose name contains `query`, best rated first, at most `limit`.
    /// Data-layer failures yield an empty list.
    pub async fn search(pool: &SqlitePool, query: &str, limit: i64) -> Vec<Listing> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        Listing::search_by_name(pool, query, limit)
            .await
            .unwrap_or_else(|e| {
                warn!(query, error = %e, "Listing search failed");
                Vec::new()
            })
    }
}
