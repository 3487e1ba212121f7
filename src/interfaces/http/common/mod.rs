//! Shared HTTP plumbing: response envelope, error mapping, extractors

mod error;
mod extract;
mod response;
mod validated_json;

pub use error::ApiError;
pub use extract::ApiPath;
pub use response::{ApiResponse, EmptyData};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
