//! Swap request API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::dto::{
    AddRatingRequest, CreateSwapRequest, DecideSwapRequest, RatingCreatedResponse,
    SwapCreatedResponse, SwapDecisionResponse,
};
use crate::interfaces::http::common::{
    ApiResult, DirectoryState, ErrorResponse, IdPath, MessageResponse, ValidatedJson,
};

#[utoipa::path(
    post,
    path = "/swap_requests",
    tag = "Swap Requests",
    request_body = CreateSwapRequest,
    responses(
        (status = 201, description = "Swap request sent", body = SwapCreatedResponse),
        (status = 400, description = "Missing ids, self request or duplicate pending", body = ErrorResponse)
    )
)]
pub async fn create_swap_request(
    State(state): State<DirectoryState>,
    ValidatedJson(request): ValidatedJson<CreateSwapRequest>,
) -> ApiResult<(StatusCode, Json<SwapCreatedResponse>)> {
    let swap_id = state
        .directory
        .create_swap_request(request.requester_id, request.receiver_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SwapCreatedResponse {
            message: "Swap request sent".to_string(),
            swap_id,
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/swap_requests/{id}",
    tag = "Swap Requests",
    params(("id" = i32, Path, description = "Swap request ID")),
    request_body = DecideSwapRequest,
    responses(
        (status = 200, description = "Decision recorded", body = SwapDecisionResponse),
        (status = 400, description = "Bad action or already processed", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn decide_swap_request(
    State(state): State<DirectoryState>,
    IdPath(id): IdPath<i32>,
    ValidatedJson(request): ValidatedJson<DecideSwapRequest>,
) -> ApiResult<Json<SwapDecisionResponse>> {
    let status = state
        .directory
        .decide_swap_request(id, request.action.as_deref())
        .await?;
    Ok(Json(SwapDecisionResponse {
        message: format!("Swap request {}", status),
        status: status.to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/swap_requests/{id}",
    tag = "Swap Requests",
    params(("id" = i32, Path, description = "Swap request ID")),
    responses(
        (status = 200, description = "Swap request deleted", body = MessageResponse),
        (status = 400, description = "Already processed", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_swap_request(
    State(state): State<DirectoryState>,
    IdPath(id): IdPath<i32>,
) -> ApiResult<Json<MessageResponse>> {
    state.directory.delete_swap_request(id).await?;
    Ok(Json(MessageResponse::new("Swap request deleted")))
}

#[utoipa::path(
    post,
    path = "/swap_requests/{id}/rating",
    tag = "Swap Requests",
    params(("id" = i32, Path, description = "Swap request ID")),
    request_body = AddRatingRequest,
    responses(
        (status = 200, description = "Rating added", body = RatingCreatedResponse),
        (status = 400, description = "Not accepted, already rated or bad score", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn add_rating(
    State(state): State<DirectoryState>,
    IdPath(id): IdPath<i32>,
    ValidatedJson(request): ValidatedJson<AddRatingRequest>,
) -> ApiResult<Json<RatingCreatedResponse>> {
    let rating_id = state
        .directory
        .add_rating(id, request.score, request.feedback)
        .await?;
    Ok(Json(RatingCreatedResponse {
        message: "Rating added".to_string(),
        rating_id,
    }))
}
