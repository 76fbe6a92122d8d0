//! Users module: registration, profiles, skill search and swap listings

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
