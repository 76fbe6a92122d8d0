//! Skills module: read-only view over known skills

pub mod handlers;

pub use handlers::*;
