use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::{blog_post::BlogPost, seo_page::SeoPage};
use deployment::Deployment;
use serde::Serialize;
use services::services::structured_data::blog_post_schema;
use ts_rs::TS;
use utils::response::ApiResponse;

use super::{found, or_empty};
use crate::{DeploymentImpl, error::ApiError};

#[derive(Debug, Serialize, TS)]
pub struct BlogPostPage {
    pub post: BlogPost,
    pub related_guides: Vec<SeoPage>,
    pub schema: serde_json::Value,
}

/// GET /api/blog
pub async fn get_posts(
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Vec<BlogPost>>>, ApiError> {
    let posts = or_empty(BlogPost::find_published(&deployment.db().pool).await, "blog posts");
    Ok(ResponseJson(ApiResponse::success(posts)))
}

/// GET /api/blog/{slug}
pub async fn get_post(
    State(deployment): State<DeploymentImpl>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<BlogPostPage>>, ApiError> {
    let pool = &deployment.db().pool;
    let post = found(BlogPost::find_by_slug(pool, &slug).await, "Blog post", &slug)?;

    let mut related_guides = or_empty(SeoPage::find_published(pool).await, "related guides");
    related_guides.truncate(deployment.config().limits.related_guides);

    Ok(ResponseJson(ApiResponse::success(BlogPostPage {
        schema: blog_post_schema(&post, &deployment.config().base_url()),
        post,
        related_guides,
    })))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new()
        .route("/blog", get(get_posts))
        .route("/blog/{slug}", get(get_post))
}
