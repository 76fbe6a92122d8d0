//! Shared HTTP building blocks: error mapping, response bodies, extractors

pub mod id_path;
pub mod response;
pub mod validated_json;

use std::sync::Arc;

use crate::application::DirectoryService;

pub use id_path::IdPath;
pub use response::{ApiError, ApiResult, ErrorResponse, MessageResponse};
pub use validated_json::ValidatedJson;

/// State shared by every directory route
#[derive(Clone)]
pub struct DirectoryState {
    pub directory: Arc<DirectoryService>,
}
