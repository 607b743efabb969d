use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::Json as ResponseJson,
    routing::post,
};
use deployment::Deployment;
use services::services::lead_intake::{LeadIntake, ListingRequestSubmission};
use utils::response::ApiResponse;

use crate::{DeploymentImpl, error::ApiError};

/// POST /api/get-listed
/// Store a prospective advertiser's request. The notification runs after the response.
pub async fn submit_listing_request(
    State(deployment): State<DeploymentImpl>,
    payload: Result<Json<ListingRequestSubmission>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let Json(submission) = payload?;
    LeadIntake::submit(
        &deployment.db().pool,
        deployment.lead_notifier(),
        &submission,
    )
    .await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route("/get-listed", post(submit_listing_request))
}
