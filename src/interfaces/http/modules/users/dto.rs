//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{CreateUserDto, SwapRequestSummary, SwapRequestsForUser, UserProfile};

/// Create user request. Only `name` is required.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    /// URL or file path
    #[validate(length(max = 250))]
    pub profile_photo: Option<String>,
    #[validate(length(max = 100))]
    pub availability: Option<String>,
    /// Defaults to `true`
    pub is_public: Option<bool>,
    #[serde(default)]
    pub skills_offered: Vec<String>,
    #[serde(default)]
    pub skills_wanted: Vec<String>,
}

impl From<CreateUserRequest> for CreateUserDto {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            name: r.name,
            location: r.location,
            profile_photo: r.profile_photo,
            availability: r.availability,
            is_public: r.is_public,
            skills_offered: r.skills_offered,
            skills_wanted: r.skills_wanted,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserCreatedResponse {
    pub message: String,
    pub user_id: i32,
}

/// Public user profile
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub profile_photo: Option<String>,
    pub availability: Option<String>,
    pub is_public: bool,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
}

impl From<UserProfile> for UserProfileDto {
    fn from(p: UserProfile) -> Self {
        Self {
            id: p.user.id,
            name: p.user.name,
            location: p.user.location,
            profile_photo: p.user.profile_photo,
            availability: p.user.availability,
            is_public: p.user.is_public,
            skills_offered: p.skills_offered,
            skills_wanted: p.skills_wanted,
        }
    }
}

/// Search query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Skill name, matched case-insensitively
    pub skill: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub results: Vec<UserProfileDto>,
}

/// One swap request as seen by the listed user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SwapRequestSummaryDto {
    pub id: i32,
    pub counterpart_id: i32,
    /// `null` when the counterpart is not a registered user
    pub counterpart_name: Option<String>,
    /// pending, accepted or rejected
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<SwapRequestSummary> for SwapRequestSummaryDto {
    fn from(s: SwapRequestSummary) -> Self {
        Self {
            id: s.id,
            counterpart_id: s.counterpart_id,
            counterpart_name: s.counterpart_name,
            status: s.status.to_string(),
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserSwapRequestsResponse {
    pub sent: Vec<SwapRequestSummaryDto>,
    pub received: Vec<SwapRequestSummaryDto>,
}

impl From<SwapRequestsForUser> for UserSwapRequestsResponse {
    fn from(listing: SwapRequestsForUser) -> Self {
        Self {
            sent: listing.sent.into_iter().map(Into::into).collect(),
            received: listing.received.into_iter().map(Into::into).collect(),
        }
    }
}
