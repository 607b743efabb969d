use sqlx::SqlitePool;
use uuid::Uuid;

/// The listing <-> tag join relation.
pub struct ListingTag;

impl ListingTag {
    /// Ids of every listing carrying `tag_id`, regardless of listing status.
    pub async fn listing_ids_for_tag(
        pool: &SqlitePool,
        tag_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>("SELECT listing_id FROM listing_tags WHERE tag_id = $1")
            .bind(tag_id)
            .fetch_all(pool)
            .await
    }
}
