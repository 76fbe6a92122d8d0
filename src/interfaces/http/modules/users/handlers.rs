//! User API handlers
//!
//! Delegates to `DirectoryService` from the application layer.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateUserRequest, SearchParams, SearchResponse, UserCreatedResponse, UserProfileDto,
    UserSwapRequestsResponse,
};
use crate::interfaces::http::common::{
    ApiResult, DirectoryState, ErrorResponse, IdPath, ValidatedJson,
};

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserCreatedResponse),
        (status = 400, description = "Missing name or invalid field", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<DirectoryState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserCreatedResponse>)> {
    let user_id = state.directory.create_user(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            message: "User created".to_string(),
            user_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserProfileDto),
        (status = 403, description = "Profile is private", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<DirectoryState>,
    IdPath(id): IdPath<i32>,
) -> ApiResult<Json<UserProfileDto>> {
    let profile = state.directory.get_user(id).await?;
    Ok(Json(profile.into()))
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "Users",
    params(SearchParams),
    responses(
        (status = 200, description = "Public users offering the skill", body = SearchResponse),
        (status = 400, description = "Missing skill parameter", body = ErrorResponse)
    )
)]
pub async fn search_users(
    State(state): State<DirectoryState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    let profiles = state
        .directory
        .search_by_skill(params.skill.as_deref())
        .await?;
    Ok(Json(SearchResponse {
        results: profiles.into_iter().map(UserProfileDto::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/users/{id}/swap_requests",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Requests sent and received", body = UserSwapRequestsResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn list_user_swap_requests(
    State(state): State<DirectoryState>,
    IdPath(id): IdPath<i32>,
) -> ApiResult<Json<UserSwapRequestsResponse>> {
    let listing = state.directory.list_for_user(id).await?;
    Ok(Json(listing.into()))
}
