//! Application layer: use cases orchestrating the domain over a repository provider

pub mod directory;

pub use directory::{DirectoryPolicy, DirectoryService};
