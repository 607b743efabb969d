use axum::{Router, middleware::from_fn_with_state, routing::get};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::{
    DeploymentImpl, error::ApiError, middleware::canonical_host::redirect_to_canonical_host,
};

pub mod blog;
pub mod categories;
pub mod get_listed;
pub mod guides;
pub mod health;
pub mod home;
pub mod listings;
pub mod search;
pub mod sitemap;

pub fn router(deployment: DeploymentImpl) -> Router {
    let api_routes = Router::new()
        .merge(health::router(&deployment))
        .merge(home::router(&deployment))
        .merge(categories::router(&deployment))
        .merge(listings::router(&deployment))
        .merge(guides::router(&deployment))
        .merge(blog::router(&deployment))
        .merge(search::router(&deployment))
        .merge(get_listed::router(&deployment));

    Router::new()
        .route("/sitemap.xml", get(sitemap::get_sitemap))
        .nest("/api", api_routes)
        .layer(from_fn_with_state(
            deployment.clone(),
            redirect_to_canonical_host,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(deployment)
}

/// Resolve a single-entity lookup. A missing record and a failed read both become 404.
pub(crate) fn found<T>(
    lookup: Result<Option<T>, sqlx::Error>,
    entity: &'static str,
    slug: &str,
) -> Result<T, ApiError> {
    match lookup {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(ApiError::NotFound(entity)),
        Err(e) => {
            warn!(entity, slug, error = %e, "Lookup failed; treating as not found");
            Err(ApiError::NotFound(entity))
        }
    }
}

/// Degrade a failed list read to an empty list.
pub(crate) fn or_empty<T>(result: Result<Vec<T>, sqlx::Error>, what: &'static str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load {what}");
        Vec::new()
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, Response, StatusCode},
    };
    use db::{
        DBService,
        test_support::{SeededDirectory, seed_directory},
    };
    use http_body_util::BodyExt;
    use local_deployment::LocalDeployment;
    use serde_json::Value;
    use services::services::{
        category_style::CategoryStyles,
        notification::{LeadNotifier, LogNotifier},
    };
    use tower::ServiceExt;
    use utils::config::SiteConfig;

    use super::router;

    pub const CANONICAL_HOST: &str = "bestseatosky.com";

    pub async fn seeded_app_with(
        notifier: Arc<dyn LeadNotifier>,
    ) -> (axum::Router, DBService, SeededDirectory) {
        let db = DBService::new_in_memory().await.unwrap();
        let seed = seed_directory(&db.pool).await.unwrap();
        let deployment = LocalDeployment::with_parts(
            db.clone(),
            SiteConfig::default(),
            CategoryStyles::default(),
            notifier,
        );
        (router(deployment), db, seed)
    }

    pub async fn seeded_app() -> (axum::Router, DBService, SeededDirectory) {
        seeded_app_with(Arc::new(LogNotifier)).await
    }

    pub async fn send(app: &axum::Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(app: &axum::Router, uri: &str) -> Response<Body> {
        send(
            app,
            Request::get(uri)
                .header("host", CANONICAL_HOST)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = get(app, uri).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn body_json(response: Response<Body>) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    pub fn slugs(items: &Value) -> Vec<&str> {
        items
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["slug"].as_str().unwrap())
            .collect()
    }
}
