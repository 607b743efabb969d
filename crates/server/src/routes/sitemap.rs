use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use deployment::Deployment;
use services::services::sitemap;

use crate::DeploymentImpl;

/// GET /sitemap.xml
pub async fn get_sitemap(State(deployment): State<DeploymentImpl>) -> impl IntoResponse {
    let xml = sitemap::load(
        &deployment.db().pool,
        &deployment.config().base_url(),
        deployment.category_styles().slugs(),
    )
    .await;
    ([(header::CONTENT_TYPE, "application/xml")], xml)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };

    use crate::routes::test_support::{body_bytes, send, seeded_app};

    #[tokio::test]
    async fn test_sitemap_is_served_on_any_host() {
        let (app, _db, _seed) = seeded_app().await;
        let response = send(
            &app,
            Request::get("/sitemap.xml")
                .header("host", "old-domain.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");
        let xml = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(xml.contains("<loc>https://bestseatosky.com/services</loc>"));
        assert!(xml.contains("<loc>https://bestseatosky.com/play/sea-to-sky-gondola</loc>"));
        assert!(xml.contains("<loc>https://bestseatosky.com/guide/top-picks</loc>"));
    }
}
