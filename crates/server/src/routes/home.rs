use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use db::models::{
    category::Category,
    listing::{Listing, ListingQuery},
};
use deployment::Deployment;
use serde::Serialize;
use services::services::category_style::CategoryStyle;
use ts_rs::TS;
use utils::response::ApiResponse;

use super::or_empty;
use crate::{DeploymentImpl, error::ApiError};

#[derive(Debug, Serialize, TS)]
pub struct CategoryCard {
    #[serde(flatten)]
    pub category: Category,
    pub style: CategoryStyle,
}

#[derive(Debug, Serialize, TS)]
pub struct HomePage {
    pub categories: Vec<CategoryCard>,
    pub featured_listings: Vec<Listing>,
}

/// GET /api/home
pub async fn get_home(
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<HomePage>>, ApiError> {
    let pool = &deployment.db().pool;
    let featured = ListingQuery::featured(deployment.config().limits.featured);

    let (categories, featured_listings) = tokio::join!(
        Category::find_all(pool),
        Listing::find_published(pool, &featured)
    );

    let styles = deployment.category_styles();
    let categories = or_empty(categories, "categories")
        .into_iter()
        .map(|category| CategoryCard {
            style: styles.style_for(&category.slug).clone(),
            category,
        })
        .collect();

    Ok(ResponseJson(ApiResponse::success(HomePage {
        categories,
        featured_listings: or_empty(featured_listings, "featured listings"),
    })))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route("/home", get(get_home))
}
