//! Request and response types shared by the handlers

pub mod error;
pub mod json;

use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;

/// Success envelope: `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
