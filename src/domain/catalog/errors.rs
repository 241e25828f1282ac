//! Catalog loading and validation errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::journey::{Role, Stage};

/// Errors raised while reading or validating configuration documents.
///
/// These are fatal: the classifiers cannot run without a valid catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse {document} document: {reason}")]
    Parse {
        document: &'static str,
        reason: String,
    },

    #[error("Role catalog must define role '{0:?}'")]
    MissingRole(Role),

    #[error("Stage catalog must define stage '{0:?}'")]
    MissingStage(Stage),

    #[error("Stage '{stage:?}' declares order {actual}, expected {expected}")]
    OrderMismatch {
        stage: Stage,
        expected: u32,
        actual: u32,
    },

    #[error("Threshold '{field}' must be within [0, 1], got {value}")]
    ThresholdOutOfRange { field: &'static str, value: f64 },

    #[error("Default role '{0:?}' is not defined in the role catalog")]
    UndefinedDefaultRole(Role),

    #[error("Keyword '{keyword}' cannot be compiled: {reason}")]
    InvalidKeyword { keyword: String, reason: String },
}

impl CatalogError {
    pub(crate) fn parse(document: &'static str, err: impl std::fmt::Display) -> Self {
        CatalogError::Parse {
            document,
            reason: err.to_string(),
        }
    }
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        DomainError::new(ErrorCode::CatalogInvalid, err.to_string())
    }
}
