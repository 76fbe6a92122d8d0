//! Feature modules of the HTTP API

pub mod health;
pub mod metrics;
pub mod request_id;
pub mod skills;
pub mod swap_requests;
pub mod users;
