//! Rating domain entity

use crate::domain::swap_request::SwapRequestId;
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

pub type RatingId = i32;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub id: RatingId,
    pub swap_request_id: SwapRequestId,
    pub score: i32,
    pub feedback: String,
}

/// A validated rating ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    pub swap_request_id: SwapRequestId,
    pub score: i32,
    pub feedback: String,
}

impl NewRating {
    pub fn new(
        swap_request_id: SwapRequestId,
        score: Option<i64>,
        feedback: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            swap_request_id,
            score: validate_score(score)?,
            feedback: feedback.unwrap_or_default(),
        })
    }
}

/// A score is required and must lie in `MIN_SCORE..=MAX_SCORE`.
pub fn validate_score(score: Option<i64>) -> DomainResult<i32> {
    let Some(score) = score else {
        return Err(DomainError::Validation("Score is required".into()));
    };
    if !(i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&score) {
        return Err(DomainError::Validation(format!(
            "Score must be between {} and {}",
            MIN_SCORE, MAX_SCORE
        )));
    }
    Ok(score as i32)
}
