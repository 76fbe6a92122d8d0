//! Rating aggregate: at most one per accepted swap

pub mod model;
pub mod repository;

pub use model::{validate_score, NewRating, Rating, RatingId, MAX_SCORE, MIN_SCORE};
pub use repository::RatingRepository;
