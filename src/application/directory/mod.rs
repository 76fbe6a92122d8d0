//! Directory use cases: users, skill search, swap lifecycle and ratings

mod service;

pub use service::{DirectoryPolicy, DirectoryService};
