use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::{
    category::Category,
    listing::{Listing, ListingQuery},
    tag::Tag,
    town::Town,
};
use deployment::Deployment;
use serde::{Deserialize, Serialize};
use services::services::{
    category_style::CategoryStyle, listing_filter::ListingFilter,
    structured_data::category_item_list,
};
use ts_rs::TS;
use utils::response::ApiResponse;

use super::{found, or_empty};
use crate::{DeploymentImpl, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CategoryFilterQuery {
    pub town: Option<String>,
    /// Comma-separated tag slugs.
    pub tag: Option<String>,
}

#[derive(Debug, Serialize, TS)]
pub struct CategoryPage {
    pub category: Category,
    pub style: CategoryStyle,
    pub title: String,
    pub towns: Vec<Town>,
    pub tags: Vec<Tag>,
    /// Every published listing in the category.
    pub listings: Vec<Listing>,
    pub filter: ListingFilter,
    pub filtered_listings: Vec<Listing>,
    pub results_found: usize,
    pub schema: serde_json::Value,
}

/// GET /api/categories/{slug}?town=&tag=
pub async fn get_category(
    State(deployment): State<DeploymentImpl>,
    Path(slug): Path<String>,
    Query(query): Query<CategoryFilterQuery>,
) -> Result<ResponseJson<ApiResponse<CategoryPage>>, ApiError> {
    let pool = &deployment.db().pool;
    let category = found(Category::find_by_slug(pool, &slug).await, "Category", &slug)?;

    let listing_query = ListingQuery::in_category(category.id);
    let (towns, tags, listings) = tokio::join!(
        Town::find_all(pool),
        Tag::find_by_category(pool, category.id),
        Listing::find_published(pool, &listing_query),
    );
    let listings = or_empty(listings, "category listings");

    let filter = ListingFilter::from_query(query.town.as_deref(), query.tag.as_deref());
    let filtered_listings: Vec<Listing> = filter.apply(&listings).into_iter().cloned().collect();

    let style = deployment.category_styles().style_for(&category.slug).clone();
    let title = style.page_title(&category.name);
    let schema = category_item_list(
        &title,
        category.description.as_deref(),
        &category.slug,
        &listings,
        &deployment.config().base_url(),
    );

    Ok(ResponseJson(ApiResponse::success(CategoryPage {
        results_found: filtered_listings.len(),
        towns: or_empty(towns, "towns"),
        tags: or_empty(tags, "category tags"),
        category,
        style,
        title,
        listings,
        filter,
        filtered_listings,
        schema,
    })))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route("/categories/{slug}", get(get_category))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{get_json, seeded_app, slugs};

    #[tokio::test]
    async fn test_unfiltered_category_shows_everything() {
        let (app, _db, _seed) = seeded_app().await;
        let (status, body) = get_json(&app, "/api/categories/eat").await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["title"], "Best Places to Eat in Sea to Sky");
        assert_eq!(data["results_found"], 5);
        assert_eq!(slugs(&data["listings"]), slugs(&data["filtered_listings"]));
        assert_eq!(
            slugs(&data["tags"]),
            vec!["brunch", "late-night", "patio", "vegan"]
        );
        assert_eq!(data["schema"]["@type"], "ItemList");
        assert_eq!(
            data["schema"]["itemListElement"][0]["url"],
            "https://bestseatosky.com/eat/purebread"
        );
    }

    #[tokio::test]
    async fn test_town_and_tags_narrow_results() {
        let (app, _db, _seed) = seeded_app().await;
        let (_, body) =
            get_json(&app, "/api/categories/eat?town=squamish&tag=brunch,vegan,brunch").await;

        let data = &body["data"];
        assert_eq!(slugs(&data["filtered_listings"]), vec!["fergies-cafe"]);
        assert_eq!(data["results_found"], 1);
        assert_eq!(data["filter"]["tags"], serde_json::json!(["brunch", "vegan"]));
        assert_eq!(data["listings"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_tag_selection_is_any_match() {
        let (app, _db, _seed) = seeded_app().await;
        let (_, body) = get_json(&app, "/api/categories/eat?town=all&tag=vegan").await;
        assert_eq!(
            slugs(&body["data"]["filtered_listings"]),
            vec!["purebread", "no-town-taco"]
        );
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let (app, _db, _seed) = seeded_app().await;
        let (status, body) = get_json(&app, "/api/categories/nightlife").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Category not found");
    }
}
