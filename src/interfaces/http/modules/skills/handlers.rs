//! Skill API handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::interfaces::http::common::{ApiResult, DirectoryState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SkillListResponse {
    /// Lowercase names, ascending
    pub skills: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/skills",
    tag = "Skills",
    responses(
        (status = 200, description = "All known skills", body = SkillListResponse)
    )
)]
pub async fn list_skills(State(state): State<DirectoryState>) -> ApiResult<Json<SkillListResponse>> {
    let skills = state.directory.list_skills().await?;
    Ok(Json(SkillListResponse {
        skills: skills.into_iter().map(|s| s.name).collect(),
    }))
}
