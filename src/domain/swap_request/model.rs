//! SwapRequest domain entity and lifecycle rules

use chrono::{DateTime, Utc};

use crate::domain::user::UserId;
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

pub type SwapRequestId = i32;

/// Swap request status. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SwapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The status reached by applying `action` to a request in this status.
    pub fn apply(self, action: SwapAction) -> DomainResult<SwapStatus> {
        if self.is_terminal() {
            return Err(DomainError::Conflict(
                "Swap request already processed".into(),
            ));
        }
        Ok(match action {
            SwapAction::Accept => Self::Accepted,
            SwapAction::Reject => Self::Rejected,
        })
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decision taken by the receiver of a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    Accept,
    Reject,
}

impl SwapAction {
    pub fn parse(action: Option<&str>) -> DomainResult<Self> {
        match action {
            Some("accept") => Ok(Self::Accept),
            Some("reject") => Ok(Self::Reject),
            _ => Err(DomainError::Validation(
                "Action must be accept or reject".into(),
            )),
        }
    }
}

/// Validated (requester, receiver) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapParticipants {
    pub requester_id: UserId,
    pub receiver_id: UserId,
}

impl SwapParticipants {
    pub fn new(requester_id: Option<UserId>, receiver_id: Option<UserId>) -> DomainResult<Self> {
        let (Some(requester_id), Some(receiver_id)) = (
            requester_id.filter(|id| *id > 0),
            receiver_id.filter(|id| *id > 0),
        ) else {
            return Err(DomainError::Validation(
                "Requester and Receiver IDs required".into(),
            ));
        };

        if requester_id == receiver_id {
            return Err(DomainError::Validation(
                "Cannot request swap with yourself".into(),
            ));
        }

        Ok(Self {
            requester_id,
            receiver_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub id: SwapRequestId,
    pub requester_id: UserId,
    pub receiver_id: UserId,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
}

impl SwapRequest {
    /// Status this request moves to under `action`
    pub fn decide(&self, action: SwapAction) -> DomainResult<SwapStatus> {
        self.status.apply(action)
    }

    /// Only pending requests may be withdrawn
    pub fn ensure_deletable(&self) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::Conflict(
                "Cannot delete processed swap requests".into(),
            ));
        }
        Ok(())
    }

    /// Only accepted swaps may be rated
    pub fn ensure_rateable(&self) -> DomainResult<()> {
        if self.status != SwapStatus::Accepted {
            return Err(DomainError::Conflict(
                "Can only rate accepted swaps".into(),
            ));
        }
        Ok(())
    }
}

/// One row of a user's swap listing, seen from that user's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequestSummary {
    pub id: SwapRequestId,
    pub counterpart_id: UserId,
    /// `None` when the counterpart id does not belong to any user
    pub counterpart_name: Option<String>,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapRequestsForUser {
    pub sent: Vec<SwapRequestSummary>,
    pub received: Vec<SwapRequestSummary>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: SwapStatus) -> SwapRequest {
        SwapRequest {
            id: 1,
            requester_id: 1,
            receiver_id: 2,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn pending_can_be_accepted_or_rejected() {
        assert_eq!(
            SwapStatus::Pending.apply(SwapAction::Accept).unwrap(),
            SwapStatus::Accepted
        );
        assert_eq!(
            SwapStatus::Pending.apply(SwapAction::Reject).unwrap(),
            SwapStatus::Rejected
        );
    }

    #[test]
    fn terminal_states_are_immutable() {
        for status in [SwapStatus::Accepted, SwapStatus::Rejected] {
            for action in [SwapAction::Accept, SwapAction::Reject] {
                assert!(matches!(
                    status.apply(action),
                    Err(DomainError::Conflict(_))
                ));
            }
        }
    }

    #[test]
    fn action_parsing() {
        assert_eq!(SwapAction::parse(Some("accept")).unwrap(), SwapAction::Accept);
        assert_eq!(SwapAction::parse(Some("reject")).unwrap(), SwapAction::Reject);
        assert!(SwapAction::parse(Some("ACCEPT")).is_err());
        assert!(SwapAction::parse(Some("maybe")).is_err());
        assert!(SwapAction::parse(None).is_err());
    }

    #[test]
    fn participants_must_be_present_and_distinct() {
        assert!(SwapParticipants::new(Some(1), Some(2)).is_ok());
        assert!(SwapParticipants::new(None, Some(2)).is_err());
        assert!(SwapParticipants::new(Some(1), None).is_err());
        assert!(SwapParticipants::new(Some(0), Some(2)).is_err());
        assert!(matches!(
            SwapParticipants::new(Some(3), Some(3)),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn only_pending_is_deletable() {
        assert!(request(SwapStatus::Pending).ensure_deletable().is_ok());
        assert!(request(SwapStatus::Accepted).ensure_deletable().is_err());
        assert!(request(SwapStatus::Rejected).ensure_deletable().is_err());
    }

    #[test]
    fn only_accepted_is_rateable() {
        assert!(request(SwapStatus::Accepted).ensure_rateable().is_ok());
        assert!(request(SwapStatus::Pending).ensure_rateable().is_err());
        assert!(request(SwapStatus::Rejected).ensure_rateable().is_err());
    }
}
