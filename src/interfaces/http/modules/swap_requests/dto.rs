//! Swap request and rating DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSwapRequest {
    pub requester_id: Option<i32>,
    pub receiver_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SwapCreatedResponse {
    pub message: String,
    pub swap_id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DecideSwapRequest {
    /// `accept` or `reject`
    pub action: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SwapDecisionResponse {
    pub message: String,
    /// accepted or rejected
    pub status: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddRatingRequest {
    /// 1 to 5
    pub score: Option<i64>,
    /// Defaults to an empty string
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingCreatedResponse {
    pub message: String,
    pub rating_id: i32,
}
