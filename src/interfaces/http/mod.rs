//! HTTP REST API
//!
//! - `common`: error mapping, response bodies, `ValidatedJson`
//! - `modules`: per-resource DTOs and handlers, health, metrics, request id
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
