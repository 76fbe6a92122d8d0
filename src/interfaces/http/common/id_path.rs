//! Path extractor whose rejections use the standard error body
//!
//! `axum::extract::Path` answers a malformed segment (`/users/abc`) with a
//! plain-text 400; `IdPath` turns it into a `validation_error`.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::ApiError;
use crate::domain::DomainError;

pub struct IdPath<T>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError(DomainError::Validation(rejection.body_text()))),
        }
    }
}
