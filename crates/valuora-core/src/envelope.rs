use serde::{Deserialize, Serialize};

use crate::{ApiError, UtcDateTime, ValidationError};

/// Standard response envelope for all `valuora` machine-readable outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(
        meta: EnvelopeMeta,
        data: T,
        errors: Vec<EnvelopeError>,
    ) -> Result<Self, ValidationError> {
        meta.validate()?;
        for error in &errors {
            error.validate()?;
        }

        Ok(Self { meta, data, errors })
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    pub generated_at: UtcDateTime,
    pub latency_ms: u64,
    /// Offline runs are answered from bundled sample data.
    pub offline: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EnvelopeWarning>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        schema_version: impl Into<String>,
        latency_ms: u64,
        offline: bool,
    ) -> Result<Self, ValidationError> {
        let meta = Self {
            request_id: request_id.into(),
            schema_version: schema_version.into(),
            generated_at: UtcDateTime::now(),
            latency_ms,
            offline,
            warnings: Vec::new(),
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn push_warning(&mut self, warning: EnvelopeWarning) {
        self.warnings.push(warning);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        if !is_valid_schema_version(&self.schema_version) {
            return Err(ValidationError::InvalidSchemaVersion {
                value: self.schema_version.clone(),
            });
        }

        Ok(())
    }
}

/// Degraded-but-successful conditions a client may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The ticker dataset could not be loaded; search sees no companies.
    DatasetUnavailable,
    /// Nothing matched; the company has to be entered manually.
    TickerNotFound,
    TreasuryUnavailable,
    NoSession,
    NoSavedProject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl EnvelopeWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn dataset_unavailable() -> Self {
        Self::new(
            WarningKind::DatasetUnavailable,
            "ticker dataset is unavailable; no companies can be found",
        )
    }

    pub fn ticker_not_found(query: &str) -> Self {
        Self::new(
            WarningKind::TickerNotFound,
            format!("no ticker matched '{query}'; the company can still be entered manually"),
        )
    }

    /// The risk-free field keeps whatever value it already had.
    pub fn treasury_unavailable(reason: impl std::fmt::Display) -> Self {
        Self::new(
            WarningKind::TreasuryUnavailable,
            format!("risk-free rate was not pre-filled: {reason}"),
        )
    }

    pub fn no_session() -> Self {
        Self::new(WarningKind::NoSession, "no active session")
    }

    pub fn no_saved_project() -> Self {
        Self::new(
            WarningKind::NoSavedProject,
            "no project has been saved on this machine yet",
        )
    }
}

impl std::fmt::Display for EnvelopeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Structured error payload for failed commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl EnvelopeError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let error = Self {
            code: code.into(),
            message: message.into(),
            status: None,
        };
        error.validate()?;
        Ok(error)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Envelope error for a failed backend call. Status failures keep the
    /// HTTP status so clients can tell a rejected project from an outage.
    pub fn from_api(error: &ApiError) -> Result<Self, ValidationError> {
        let code = match error {
            ApiError::Validation(_) => "validation",
            ApiError::Transport(_) => "api.transport",
            ApiError::Status { .. } => "api.status",
            ApiError::Decode { .. } => "api.decode",
        };
        let envelope_error = Self::new(code, error.to_string())?;
        Ok(match error.status() {
            Some(status) => envelope_error.with_status(status),
            None => envelope_error,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyErrorCode);
        }

        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyErrorMessage);
        }

        Ok(())
    }
}

fn is_valid_schema_version(value: &str) -> bool {
    let Some(version) = value.strip_prefix('v') else {
        return false;
    };

    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_meta() {
        let meta = EnvelopeMeta::new("request-12345", "v1.0.0", 11, true).expect("meta should be valid");
        assert_eq!(meta.schema_version, "v1.0.0");
    }

    #[test]
    fn rejects_bad_schema_version() {
        for version in ["1.0.0", "v1.0", "v1.0.x"] {
            let err = EnvelopeMeta::new("request-12345", version, 1, false).expect_err("must fail");
            assert!(matches!(err, ValidationError::InvalidSchemaVersion { .. }));
        }
    }

    #[test]
    fn status_errors_keep_the_http_status() {
        let error = EnvelopeError::from_api(&ApiError::Status {
            status: 422,
            message: String::from("tax rate is required"),
        })
        .expect("valid error");

        assert_eq!(error.code, "api.status");
        assert_eq!(error.status, Some(422));
        assert_eq!(error.message, "server returned 422: tax rate is required");
    }

    #[test]
    fn transport_errors_have_no_status() {
        let error = EnvelopeError::from_api(&ApiError::Transport(crate::HttpError::timeout(
            "deadline elapsed",
        )))
        .expect("valid error");

        assert_eq!(error.code, "api.transport");
        assert_eq!(error.status, None);
    }

    #[test]
    fn warnings_serialize_with_their_kind() {
        let mut meta = EnvelopeMeta::new("request-12345", "v1.0.0", 1, false).expect("meta");
        meta.push_warning(EnvelopeWarning::ticker_not_found("acme"));

        let value = serde_json::to_value(&meta).expect("serialize");
        assert_eq!(value["warnings"][0]["kind"], "ticker_not_found");
        assert_eq!(
            value["warnings"][0]["message"],
            "no ticker matched 'acme'; the company can still be entered manually"
        );
    }

    #[test]
    fn rejects_empty_error_message() {
        let err = EnvelopeError::new("api.status", " ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyErrorMessage));
    }
}
