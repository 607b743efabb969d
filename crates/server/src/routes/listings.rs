use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::listing::Listing;
use deployment::Deployment;
use serde::Serialize;
use services::services::{
    category_style::CategoryStyle, related_listings::RelatedListings,
    structured_data::listing_schema,
};
use ts_rs::TS;
use utils::{
    response::ApiResponse,
    utm::{UtmParams, build_utm_url, directions_url},
};

use super::found;
use crate::{DeploymentImpl, error::ApiError};

/// Outbound links decorated with tracking parameters.
#[derive(Debug, Serialize, TS)]
pub struct OutboundLinks {
    pub website_url: Option<String>,
    pub directions_url: Option<String>,
}

impl OutboundLinks {
    pub fn for_listing(listing: &Listing, category_slug: &str) -> Self {
        let params = UtmParams::for_listing(category_slug, &listing.slug);
        Self {
            website_url: listing
                .website
                .as_deref()
                .map(|website| build_utm_url(website, &params)),
            directions_url: listing
                .address
                .as_deref()
                .map(|address| directions_url(address, &params)),
        }
    }
}

#[derive(Debug, Serialize, TS)]
pub struct ListingPage {
    pub listing: Listing,
    pub style: CategoryStyle,
    pub related: Vec<Listing>,
    pub cross_category: Vec<Listing>,
    pub links: OutboundLinks,
    pub schema: serde_json::Value,
}

/// GET /api/listings/{slug}
pub async fn get_listing(
    State(deployment): State<DeploymentImpl>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<ListingPage>>, ApiError> {
    let pool = &deployment.db().pool;
    let listing = found(Listing::find_by_slug(pool, &slug).await, "Listing", &slug)?;

    let category_slug = listing.category_slug.clone().unwrap_or_default();
    let limits = deployment.config().limits;
    let RelatedListings {
        related,
        cross_category,
    } = RelatedListings::load(pool, &listing, limits.related, limits.cross_category).await;

    Ok(ResponseJson(ApiResponse::success(ListingPage {
        style: deployment
            .category_styles()
            .style_for(&category_slug)
            .clone(),
        links: OutboundLinks::for_listing(&listing, &category_slug),
        schema: listing_schema(&listing, &deployment.config().base_url(), &category_slug),
        listing,
        related,
        cross_category,
    })))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route("/listings/{slug}", get(get_listing))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{get_json, seeded_app, slugs};

    #[tokio::test]
    async fn test_listing_page_payload() {
        let (app, _db, _seed) = seeded_app().await;
        let (status, body) = get_json(&app, "/api/listings/watershed-grill").await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["listing"]["name"], "Watershed Grill");
        assert_eq!(slugs(&data["related"]), vec!["fergies-cafe"]);
        assert_eq!(
            slugs(&data["cross_category"]),
            vec!["sea-to-sky-gondola", "sea-to-sky-hotel"]
        );
        assert_eq!(
            data["links"]["website_url"],
            "https://watershedgrill.com/?utm_source=bestseatosky&utm_medium=directory&utm_campaign=eat&utm_content=watershed-grill"
        );
        assert!(
            data["links"]["directions_url"]
                .as_str()
                .unwrap()
                .starts_with("https://www.google.com/maps/search/?api=1&query=")
        );
        assert_eq!(data["schema"]["telephone"], "604-898-6665");
        assert_eq!(data["style"]["icon"], "🍽️");
    }

    #[tokio::test]
    async fn test_schema_override_wins() {
        let (app, _db, _seed) = seeded_app().await;
        let (_, body) = get_json(&app, "/api/listings/nita-lake-lodge").await;
        assert_eq!(
            body["data"]["schema"],
            serde_json::json!({"@type": "Hotel", "name": "Nita Lake Lodge"})
        );
        assert!(body["data"]["links"]["website_url"].is_null());
    }

    #[tokio::test]
    async fn test_draft_and_missing_listings_are_not_found() {
        let (app, _db, _seed) = seeded_app().await;
        for slug in ["hidden-draft", "nope"] {
            let (status, _) = get_json(&app, &format!("/api/listings/{slug}")).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_townless_listing_has_no_related() {
        let (app, _db, _seed) = seeded_app().await;
        let (_, body) = get_json(&app, "/api/listings/no-town-taco").await;
        assert!(body["data"]["related"].as_array().unwrap().is_empty());
        assert!(body["data"]["cross_category"].as_array().unwrap().is_empty());
    }
}
