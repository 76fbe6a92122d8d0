//! Rating repository interface

use async_trait::async_trait;

use super::model::{NewRating, Rating};
use crate::domain::swap_request::SwapRequestId;
use crate::domain::DomainResult;

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Persist a rating. Re-checks, inside the same transaction, that the swap
    /// exists, is accepted and has no rating yet.
    async fn create(&self, rating: NewRating) -> DomainResult<Rating>;

    async fn find_for_swap(&self, swap_request_id: SwapRequestId) -> DomainResult<Option<Rating>>;
}
