use axum::{
    Router,
    extract::{Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::listing::Listing;
use deployment::Deployment;
use serde::Deserialize;
use services::services::search::ListingSearch;
use utils::response::ApiResponse;

use crate::{DeploymentImpl, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/search?q=
/// Never fails: short queries and data-layer errors both give an empty list.
pub async fn search_listings(
    State(deployment): State<DeploymentImpl>,
    Query(query): Query<SearchQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Listing>>>, ApiError> {
    let listings = ListingSearch::search(
        &deployment.db().pool,
        query.q.as_deref().unwrap_or_default(),
        deployment.config().limits.search,
    )
    .await;
    Ok(ResponseJson(ApiResponse::success(listings)))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route("/search", get(search_listings))
}
