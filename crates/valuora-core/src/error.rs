use thiserror::Error;

use crate::api::ApiError;
use crate::auth::AuthError;
use crate::storage::StorageError;
use crate::submission::SubmissionError;
use crate::treasury::TreasuryError;

/// Validation and contract errors exposed by `valuora-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("currency must be a 3-letter uppercase ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("projection year {index} is out of range, expected 0..{years}")]
    ProjectionYearOutOfRange { index: usize, years: usize },

    #[error("a company must be selected before submitting")]
    MissingCompany,
    #[error("exactly {required} competitors are required, found {found}")]
    CompetitorCount { required: usize, found: usize },
    #[error("competitor '{symbol}' is already selected")]
    DuplicateCompetitor { symbol: String },
    #[error("competitor '{symbol}' is the selected company")]
    CompetitorIsCompany { symbol: String },
    #[error("competitor '{symbol}' is not selected")]
    UnknownCompetitor { symbol: String },

    #[error("historical limit {value} must be between 1 and {max}")]
    InvalidHistoricalLimit { value: usize, max: usize },
    #[error("project id cannot be empty")]
    EmptyProjectId,
    #[error("url must start with http:// or https://: '{value}'")]
    InvalidUrl { value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Treasury(#[from] TreasuryError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
