use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ValidationErrorDto;

/// Rejected request input, always tied to one field.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    FieldRequired { field: String },

    #[error("{field} is out of range: {message}")]
    FieldOutOfRange { field: String, message: String },

    #[error("{field} is invalid: {message}")]
    FormatInvalid { field: String, message: String },

    #[error("{field} has conflicting values: {message}")]
    ConflictingFlags { field: String, message: String },
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        Self::FieldRequired {
            field: field.to_string(),
        }
    }

    pub fn out_of_range(field: &str, message: impl Into<String>) -> Self {
        Self::FieldOutOfRange {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::FormatInvalid {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn conflicting(field: &str, message: impl Into<String>) -> Self {
        Self::ConflictingFlags {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Name of the rejected field.
    pub fn field(&self) -> &str {
        match self {
            Self::FieldRequired { field }
            | Self::FieldOutOfRange { field, .. }
            | Self::FormatInvalid { field, .. }
            | Self::ConflictingFlags { field, .. } => field,
        }
    }
}

/// Always 400 Bad Request with a `fields` map naming the rejected field.
impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let fields = BTreeMap::from([(self.field().to_string(), message.clone())]);

        (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorDto {
                error: message,
                fields,
            }),
        )
            .into_response()
    }
}
