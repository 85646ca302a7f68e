//! Typed client for the valuora backend.
//!
//! # Endpoints
//!
//! | Call | Method/Path | Response |
//! |------|-------------|----------|
//! | [`ValuationApi::historical_metrics`] | `POST /api/v1/historical/metrics` | [`HistoricalMetrics`] |
//! | [`ValuationApi::create_project`] | `POST /api/v1/projects/` | [`ProjectCreated`] |
//! | [`ValuationApi::export_valuation`] | `POST /api/v1/valuation/export` | [`ValuationArtifact`] |
//!
//! Non-2xx responses become [`ApiError::Status`] carrying the server's own
//! message when the body has one. Nothing is retried.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::historicals::HistoricalMetrics;
use crate::http_client::{HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::{ProjectRecord, Symbol, ValidationError};

pub const HISTORICAL_METRICS_PATH: &str = "/api/v1/historical/metrics";
pub const PROJECTS_PATH: &str = "/api/v1/projects/";
pub const VALUATION_EXPORT_PATH: &str = "/api/v1/valuation/export";

/// Largest number of fiscal years the historicals endpoint serves.
pub const MAX_HISTORICAL_LIMIT: usize = 20;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode {endpoint} response: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    fn decode(endpoint: &str, message: impl ToString) -> Self {
        Self::Decode {
            endpoint: endpoint.to_owned(),
            message: message.to_string(),
        }
    }
}

/// Acknowledgement of a created project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreated {
    pub project_id: String,
    /// Everything else the server sent back.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Spreadsheet produced by the valuation engine.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ValuationArtifact {
    pub filename: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub size: usize,
}

impl std::fmt::Debug for ValuationArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValuationArtifact")
            .field("filename", &self.filename)
            .field("size", &self.size)
            .finish()
    }
}

#[derive(Serialize)]
struct HistoricalMetricsBody<'a> {
    ticker: &'a str,
    limit: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportBody<'a> {
    project_id: &'a str,
}

#[derive(Deserialize)]
struct HistoricalMetricsResponse {
    historicals: HistoricalMetrics,
}

/// Backend client. Cheap to clone.
#[derive(Clone)]
pub struct ValuationApi {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
    auth: HttpAuth,
}

impl ValuationApi {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &ClientConfig) -> Self {
        Self {
            http_client,
            base_url: config.api_base_url.clone(),
            timeout_ms: config.timeout_ms,
            auth: HttpAuth::None,
        }
    }

    pub fn with_auth(mut self, auth: HttpAuth) -> Self {
        self.auth = auth;
        self
    }

    pub async fn historical_metrics(
        &self,
        symbol: &Symbol,
        limit: usize,
    ) -> Result<HistoricalMetrics, ApiError> {
        if limit == 0 || limit > MAX_HISTORICAL_LIMIT {
            return Err(ValidationError::InvalidHistoricalLimit {
                value: limit,
                max: MAX_HISTORICAL_LIMIT,
            }
            .into());
        }

        let body = HistoricalMetricsBody {
            ticker: symbol.as_str(),
            limit,
        };
        let response = self.post(HISTORICAL_METRICS_PATH, &body).await?;
        let parsed: HistoricalMetricsResponse = serde_json::from_slice(&response.body)
            .map_err(|error| ApiError::decode(HISTORICAL_METRICS_PATH, error))?;

        Ok(parsed.historicals)
    }

    pub async fn create_project(&self, record: &ProjectRecord) -> Result<ProjectCreated, ApiError> {
        let response = self.post(PROJECTS_PATH, record).await?;
        let value: Value = serde_json::from_slice(&response.body)
            .map_err(|error| ApiError::decode(PROJECTS_PATH, error))?;

        let Value::Object(mut fields) = value else {
            return Err(ApiError::decode(PROJECTS_PATH, "expected a JSON object"));
        };

        let project_id = match fields.remove("projectId") {
            Some(Value::String(id)) if !id.trim().is_empty() => id,
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(ApiError::decode(PROJECTS_PATH, "missing projectId")),
        };

        Ok(ProjectCreated {
            project_id,
            extra: fields,
        })
    }

    pub async fn export_valuation(&self, project_id: &str) -> Result<ValuationArtifact, ApiError> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(ValidationError::EmptyProjectId.into());
        }

        let response = self
            .post(VALUATION_EXPORT_PATH, &ExportBody { project_id })
            .await?;

        let filename = response
            .header("content-disposition")
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| format!("valuation-{project_id}.xlsx"));

        Ok(ValuationArtifact {
            filename,
            size: response.body.len(),
            bytes: response.body,
        })
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<HttpResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let request = HttpRequest::post_json(url, body)
            .map_err(|error| ApiError::decode(path, error))?
            .with_auth(&self.auth)
            .with_timeout_ms(self.timeout_ms);

        tracing::debug!(path, "calling valuora api");
        let response = self.http_client.execute(request).await?;
        if !response.is_success() {
            let message = server_message(&response);
            tracing::warn!(path, status = response.status, %message, "api call failed");
            return Err(ApiError::Status {
                status: response.status,
                message,
            });
        }

        Ok(response)
    }
}

/// Best human-readable message from an error response.
///
/// Looks at `detail` (a string, or a list of `{msg}` items), then `message`,
/// then `error`; falls back to the status line.
pub fn server_message(response: &HttpResponse) -> String {
    let from_body = serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|body| {
            ["detail", "message", "error"]
                .iter()
                .find_map(|key| body.get(*key).and_then(message_text))
        });

    from_body.unwrap_or_else(|| status_text(response.status))
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_owned),
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

fn status_text(status: u16) -> String {
    let reason = match status {
        400 => "bad request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not found",
        409 => "conflict",
        422 => "unprocessable entity",
        429 => "too many requests",
        500 => "internal server error",
        502 => "bad gateway",
        503 => "service unavailable",
        504 => "gateway timeout",
        _ => "request failed",
    };
    format!("HTTP {status} {reason}")
}

/// Extract the download filename from a `Content-Disposition` header.
///
/// `filename*=UTF-8''…` wins over a plain `filename=`. Path components are
/// stripped so the result is always a bare file name.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for part in disposition_params(header) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = unquote(value);
                let raw = encoded
                    .split_once("''")
                    .map_or(encoded, |(_, rest)| rest);
                extended = urlencoding::decode(raw).ok().map(|name| name.into_owned());
            }
            "filename" => plain = Some(unquote(value).to_owned()),
            _ => {}
        }
    }

    extended
        .or(plain)
        .map(|name| {
            name.rsplit(['/', '\\'])
                .next()
                .unwrap_or_default()
                .trim()
                .to_owned()
        })
        .filter(|name| {
            !name.is_empty() && name != "." && name != ".." && !name.chars().any(char::is_control)
        })
}

/// Split header parameters on `;`, ignoring separators inside quotes.
fn disposition_params(header: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut quoted = false;
    let mut start = 0;

    for (index, ch) in header.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            ';' if !quoted => {
                params.push(header[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    params.push(header[start..].trim());
    params
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}
