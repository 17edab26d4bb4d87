use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    validation::FieldError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Duplicate value for {}", .0.field)]
    UniquenessViolation(FieldError),

    #[error("Unknown reference in {}", .0.field)]
    ReferenceViolation(FieldError),

    #[error("ORM error")]
    OrmError(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn unique(field: &str, message: impl Into<String>) -> Self {
        AppError::UniquenessViolation(FieldError::new(field, "unique", message))
    }

    pub fn reference(field: &str, message: impl Into<String>) -> Self {
        AppError::ReferenceViolation(FieldError::new(field, "reference", message))
    }

    /// Field-level errors a client can attach to its input form.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            AppError::Validation(errors) => errors.clone(),
            AppError::UniquenessViolation(error) | AppError::ReferenceViolation(error) => {
                vec![error.clone()]
            }
            _ => Vec::new(),
        }
    }

    /// Translate a constraint failure raised by the store into the matching
    /// domain error for `field`; anything else stays an ORM error.
    pub fn from_constraint(err: DbErr, field: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::unique(field, format!("{field} is already in use"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::reference(field, format!("{field} does not exist"))
            }
            _ => AppError::OrmError(err),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorData {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::ReferenceViolation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::UniquenessViolation(_) => StatusCode::CONFLICT,
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "database failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
                errors: self.field_errors(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
