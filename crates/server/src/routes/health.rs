use axum::{Router, response::Json as ResponseJson, routing::get};
use utils::response::ApiResponse;

use crate::DeploymentImpl;

pub async fn health_check() -> ResponseJson<ApiResponse<String>> {
    ResponseJson(ApiResponse::success("OK".to_string()))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };

    use crate::routes::test_support::{get_json, send, seeded_app};

    #[tokio::test]
    async fn test_health() {
        let (app, _db, _seed) = seeded_app().await;
        let (status, body) = get_json(&app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_foreign_host_is_redirected_permanently() {
        let (app, _db, _seed) = seeded_app().await;
        let response = send(
            &app,
            Request::get("/api/health?ref=1")
                .header("host", "www.bestseatosky.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://bestseatosky.com/api/health?ref=1"
        );
    }

    #[tokio::test]
    async fn test_absolute_uri_without_host_header_is_served() {
        let (app, _db, _seed) = seeded_app().await;
        let response = send(
            &app,
            Request::get("https://bestseatosky.com/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dev_host_is_served() {
        let (app, _db, _seed) = seeded_app().await;
        let response = send(
            &app,
            Request::get("/api/health")
                .header("host", "localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
