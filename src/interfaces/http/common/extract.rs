//! `Path` wrapper whose rejection uses the JSON envelope

use axum::extract::FromRequestParts;

use super::ApiError;

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
