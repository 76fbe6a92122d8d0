//! Swap requests module: lifecycle and ratings

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
