use thiserror::Error;

use valuora_core::{
    ApiError, AuthError, CoreError, StorageError, SubmissionError, TreasuryError,
    ValidationError,
};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Treasury(#[from] TreasuryError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("{}: {source}", .path.display())]
    File {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<SubmissionError> for CliError {
    fn from(error: SubmissionError) -> Self {
        match error {
            SubmissionError::Validation(error) => Self::Validation(error),
            SubmissionError::Storage(error) => Self::Storage(error),
            SubmissionError::Api(error) => Self::Api(error),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(error) => Self::Validation(error),
            CoreError::Api(error) => Self::Api(error),
            CoreError::Storage(error) => Self::Storage(error),
            CoreError::Auth(error) => Self::Auth(error),
            CoreError::Submission(error) => error.into(),
            CoreError::Treasury(error) => Self::Treasury(error),
            CoreError::Serialization(error) => Self::Serialization(error),
        }
    }
}

impl CliError {
    pub fn file(path: impl Into<std::path::PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::Api(ApiError::Validation(_)) => 2,
            Self::Api(_) => 3,
            Self::Treasury(_) => 3,
            Self::Serialization(_) => 4,
            Self::Auth(_) => 5,
            Self::Storage(_) => 10,
            Self::File { .. } => 10,
        }
    }

    /// Stable machine-readable code for the error envelope.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Api(ApiError::Validation(_)) => "validation",
            Self::Command(_) => "command",
            Self::Api(ApiError::Status { .. }) => "api.status",
            Self::Api(ApiError::Transport(_)) => "api.transport",
            Self::Api(ApiError::Decode { .. }) => "api.decode",
            Self::Treasury(_) => "treasury",
            Self::Auth(_) => "auth",
            Self::Storage(_) => "storage",
            Self::Serialization(_) => "serialization",
            Self::File { .. } => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_category() {
        let status = CliError::from(ApiError::Status {
            status: 500,
            message: String::from("boom"),
        });
        assert_eq!(status.exit_code(), 3);
        assert_eq!(status.code(), "api.status");

        let invalid = CliError::from(SubmissionError::Validation(ValidationError::MissingCompany));
        assert_eq!(invalid.exit_code(), 2);

        assert_eq!(CliError::from(AuthError::NotLoggedIn).exit_code(), 5);
    }
}
