//! SwapRequest repository interface

use async_trait::async_trait;

use super::model::{
    SwapParticipants, SwapRequest, SwapRequestId, SwapRequestsForUser, SwapStatus,
};
use crate::domain::user::UserId;
use crate::domain::DomainResult;

#[async_trait]
pub trait SwapRequestRepository: Send + Sync {
    /// Record a new pending request. Fails with `Conflict` when the same
    /// ordered pair already has a pending request.
    async fn create_pending(&self, participants: SwapParticipants) -> DomainResult<SwapRequest>;

    async fn find_by_id(&self, id: SwapRequestId) -> DomainResult<Option<SwapRequest>>;

    /// Move a pending request to `to`. Fails with `NotFound` for an unknown
    /// id and `Conflict` when the request is no longer pending.
    async fn transition(&self, id: SwapRequestId, to: SwapStatus) -> DomainResult<SwapRequest>;

    /// Remove a request that is still pending (same failure modes as `transition`)
    async fn delete_pending(&self, id: SwapRequestId) -> DomainResult<()>;

    /// Requests sent and received by the user, ordered by ascending id
    async fn list_for_user(&self, user_id: UserId) -> DomainResult<SwapRequestsForUser>;
}
