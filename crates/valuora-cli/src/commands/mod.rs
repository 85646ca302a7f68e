mod auth;
mod historicals;
mod project;
mod search;
mod treasury;
mod wizard;

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use valuora_core::{
    ApiError, ClientConfig, DemoAuthenticator, Envelope, EnvelopeError, EnvelopeWarning, FileStore,
    FixtureHttpClient, HttpClient, ReqwestHttpClient, SessionManager, ValuationApi,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Metadata;

#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<EnvelopeWarning>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: EnvelopeWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<EnvelopeWarning>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_error(mut self, error: EnvelopeError) -> Self {
        self.errors.push(error);
        self
    }
}

/// Everything a command needs, resolved once from flags and environment.
pub struct Context {
    pub config: ClientConfig,
    pub http_client: Arc<dyn HttpClient>,
    pub store: FileStore,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &cli.api_url {
            config = config.with_api_base_url(url)?;
        }
        if let Some(timeout_ms) = cli.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }
        if let Some(data_dir) = &cli.data_dir {
            config = config.with_data_dir(data_dir);
        }
        config = config.with_offline(cli.offline);

        let http_client: Arc<dyn HttpClient> = if config.offline {
            Arc::new(FixtureHttpClient::new(&config))
        } else {
            Arc::new(ReqwestHttpClient::new())
        };
        let store = FileStore::new(&config.data_dir);

        tracing::debug!(
            api = %config.api_base_url,
            offline = config.offline,
            data_dir = %config.data_dir.display(),
            "resolved configuration"
        );

        Ok(Self {
            config,
            http_client,
            store,
        })
    }

    pub fn api(&self) -> ValuationApi {
        ValuationApi::new(Arc::clone(&self.http_client), &self.config)
    }

    pub fn sessions(&self) -> SessionManager<'_, FileStore> {
        SessionManager::new(&self.store, DemoAuthenticator)
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();
    let context = Context::from_cli(cli)?;

    let outcome = match &cli.command {
        Command::Search(args) => search::run(args, &context).await,
        Command::Login(args) => auth::login(args, &context),
        Command::Logout => auth::logout(&context),
        Command::Whoami => auth::whoami(&context),
        Command::Wizard(args) => wizard::run(args, &context).await,
        Command::Project(args) => project::run(args, &context).await,
        Command::Historicals(args) => historicals::run(args, &context).await,
        Command::Treasury => treasury::run(&context).await,
    };
    let command_result = api_failure_as_envelope(outcome)?;

    let CommandResult {
        data,
        warnings,
        errors,
    } = command_result;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut metadata = Metadata::new(latency_ms, context.config.offline);
    for warning in warnings {
        tracing::debug!(%warning, "command warning");
        metadata.push_warning(warning);
    }

    let meta = metadata.into_envelope_meta()?;
    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

/// Backend failures are reported inside the envelope, with the HTTP status
/// when there is one. Local failures still abort the command.
fn api_failure_as_envelope(
    outcome: Result<CommandResult, CliError>,
) -> Result<CommandResult, CliError> {
    match outcome {
        Err(CliError::Api(error)) if !matches!(error, ApiError::Validation(_)) => {
            tracing::debug!(%error, "backend call failed");
            Ok(CommandResult::ok(Value::Null).with_error(EnvelopeError::from_api(&error)?))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use valuora_core::ValidationError;

    use super::*;

    #[test]
    fn rejected_backend_call_becomes_an_error_envelope_with_status() {
        let outcome = Err(CliError::Api(ApiError::Status {
            status: 404,
            message: String::from("project not found"),
        }));

        let result = api_failure_as_envelope(outcome).expect("envelope result");

        assert_eq!(result.data, Value::Null);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, "api.status");
        assert_eq!(result.errors[0].status, Some(404));
    }

    #[test]
    fn local_validation_failures_still_abort() {
        let outcome = Err(CliError::Api(ApiError::Validation(
            ValidationError::EmptyProjectId,
        )));

        let error = api_failure_as_envelope(outcome).expect_err("must abort");

        assert_eq!(error.exit_code(), 2);
    }
}
