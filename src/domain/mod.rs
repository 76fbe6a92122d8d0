pub mod rating;
pub mod repositories;
pub mod skill;
pub mod swap_request;
pub mod user;

// Re-export commonly used types
pub use rating::{NewRating, Rating, RatingId, RatingRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use skill::{Skill, SkillId, SkillRepository};
pub use swap_request::{
    SwapAction, SwapParticipants, SwapRequest, SwapRequestId, SwapRequestRepository,
    SwapRequestSummary, SwapRequestsForUser, SwapStatus,
};
pub use user::{CreateUserDto, NewUser, User, UserId, UserProfile, UserRepository};

pub use crate::shared::errors::DomainError;
