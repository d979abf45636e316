use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use axum_helpers::errors::messages;
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::SortParseError;

/// Message returned whenever a serial number does not resolve to a product.
pub const NOT_FOUND_MESSAGE: &str = "Produto nao localizado com o serialNumber informado";

/// Category of a [`ProductError`] as seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Generic,
    NotFound,
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn not_found() -> Self {
        ProductError::NotFound(NOT_FOUND_MESSAGE.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Generic,
        }
    }

    /// HTTP reason phrase of the status this error maps to.
    pub fn code(&self) -> &'static str {
        match self {
            ProductError::NotFound(_) => messages::CODE_NOT_FOUND,
            ProductError::Validation(_) => messages::CODE_BAD_REQUEST,
            ProductError::Database(_) | ProductError::Internal(_) => messages::CODE_INTERNAL,
        }
    }

    /// Client-facing message. Storage and internal detail is never included.
    pub fn message(&self) -> String {
        match self {
            ProductError::NotFound(msg) | ProductError::Validation(msg) => msg.clone(),
            ProductError::Database(_) | ProductError::Internal(_) => {
                messages::INTERNAL_ERROR.to_string()
            }
        }
    }
}

impl From<SortParseError> for ProductError {
    fn from(err: SortParseError) -> Self {
        ProductError::Internal(err.to_string())
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(msg) => AppError::NotFound(msg),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(e) => AppError::InternalServerError(e.to_string()),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
