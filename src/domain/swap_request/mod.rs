//! SwapRequest aggregate
//!
//! A one-directional proposal from a requester to a receiver, moving
//! through `pending -> accepted | rejected`.

pub mod model;
pub mod repository;

pub use model::{
    SwapAction, SwapParticipants, SwapRequest, SwapRequestId, SwapRequestSummary,
    SwapRequestsForUser, SwapStatus,
};
pub use repository::SwapRequestRepository;
