use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::{listing::Listing, seo_page::SeoPage};
use deployment::Deployment;
use serde::Serialize;
use services::services::{
    guide_selector::{GuideCriteria, GuideSelector},
    structured_data::guide_schema,
};
use ts_rs::TS;
use utils::response::ApiResponse;

use super::{found, or_empty};
use crate::{DeploymentImpl, error::ApiError};

#[derive(Debug, Serialize, TS)]
pub struct GuidePage {
    pub guide: SeoPage,
    pub heading: String,
    pub listings: Vec<Listing>,
    pub schema: serde_json::Value,
}

/// GET /api/guides
pub async fn get_guides(
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Vec<SeoPage>>>, ApiError> {
    let guides = or_empty(SeoPage::find_published(&deployment.db().pool).await, "guides");
    Ok(ResponseJson(ApiResponse::success(guides)))
}

/// GET /api/guides/{slug}
pub async fn get_guide(
    State(deployment): State<DeploymentImpl>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<GuidePage>>, ApiError> {
    let pool = &deployment.db().pool;
    let guide = found(SeoPage::find_by_slug(pool, &slug).await, "Guide", &slug)?;

    let listings = GuideSelector::select(
        pool,
        GuideCriteria::from(&guide),
        deployment.config().limits.guide,
    )
    .await;

    Ok(ResponseJson(ApiResponse::success(GuidePage {
        heading: guide.heading().to_string(),
        schema: guide_schema(&guide, &listings),
        guide,
        listings,
    })))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new()
        .route("/guides", get(get_guides))
        .route("/guides/{slug}", get(get_guide))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{get_json, seeded_app, slugs};

    #[tokio::test]
    async fn test_guide_index_lists_published_guides() {
        let (app, _db, _seed) = seeded_app().await;
        let (status, body) = get_json(&app, "/api/guides").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            slugs(&body["data"]),
            vec![
                "best-eats",
                "best-patios-in-squamish",
                "late-night-eats",
                "top-picks"
            ]
        );
    }

    #[tokio::test]
    async fn test_guide_applies_every_constraint() {
        let (app, _db, _seed) = seeded_app().await;
        let (status, body) = get_json(&app, "/api/guides/best-patios-in-squamish").await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["heading"], "Best Patios in Squamish");
        assert_eq!(
            slugs(&data["listings"]),
            vec!["watershed-grill", "fergies-cafe"]
        );
        assert_eq!(data["schema"]["numberOfItems"], 2);
        assert_eq!(data["schema"]["itemListElement"][1]["position"], 2);
    }

    #[tokio::test]
    async fn test_tag_without_listings_selects_nothing() {
        let (app, _db, _seed) = seeded_app().await;
        let (_, body) = get_json(&app, "/api/guides/late-night-eats").await;
        assert!(body["data"]["listings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unconstrained_guide_ranks_everything() {
        let (app, _db, _seed) = seeded_app().await;
        let (_, body) = get_json(&app, "/api/guides/top-picks").await;
        let listings = body["data"]["listings"].as_array().unwrap();
        assert_eq!(listings.len(), 8);
        assert_eq!(listings[0]["slug"], "sea-to-sky-gondola");
        assert_eq!(listings[1]["slug"], "purebread");
    }

    #[tokio::test]
    async fn test_draft_guide_is_not_found() {
        let (app, _db, _seed) = seeded_app().await;
        let (status, _) = get_json(&app, "/api/guides/draft-guide").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
