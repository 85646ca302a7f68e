use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use valuora_core::historicals::fetch_historicals_quietly;
use valuora_core::{
    EnvelopeError, EnvelopeWarning, Symbol, TickerDatasetLoader, TreasuryRateSource, WizardAction,
    WizardState,
};

use crate::cli::{WizardArgs, WizardCommand, WizardInitArgs};
use crate::error::CliError;

use super::{CommandResult, Context};

const PREFILL_HISTORICAL_PERIODS: usize = 5;

pub async fn run(args: &WizardArgs, context: &Context) -> Result<CommandResult, CliError> {
    match &args.command {
        WizardCommand::Init(init) => init_state(init, context).await,
        WizardCommand::Apply(apply) => {
            let action: WizardAction = serde_json::from_str(&apply.action)
                .map_err(|error| CliError::Command(format!("invalid --action: {error}")))?;
            let mut state = read_state(&apply.file)?;
            state.apply(action)?;
            write_state(&apply.file, &state)?;
            Ok(CommandResult::ok(serde_json::to_value(&state)?))
        }
        WizardCommand::Show(show) => {
            let state = read_state(&show.file)?;
            Ok(CommandResult::ok(serde_json::to_value(&state)?))
        }
        WizardCommand::Check(check) => {
            let state = read_state(&check.file)?;
            match state.check_submission() {
                Ok(company) => Ok(CommandResult::ok(json!({
                    "ready": true,
                    "company": company,
                    "competitors": state.competitors(),
                }))),
                Err(error) => Ok(CommandResult::ok(json!({ "ready": false }))
                    .with_error(EnvelopeError::new("validation", error.to_string())?)),
            }
        }
        WizardCommand::Prefill(prefill) => prefill_state(&prefill.file, context).await,
    }
}

async fn init_state(args: &WizardInitArgs, context: &Context) -> Result<CommandResult, CliError> {
    if args.file.exists() && !args.force {
        return Err(CliError::Command(format!(
            "{} already exists; pass --force to overwrite it",
            args.file.display()
        )));
    }

    let mut state = WizardState::new();
    if let Some(raw) = &args.company {
        let loader = TickerDatasetLoader::new(
            Arc::clone(&context.http_client),
            &context.config.dataset_url,
            context.config.timeout_ms,
        );
        let dataset = loader.load().await;
        let company = dataset
            .iter()
            .find(|record| record.symbol.eq_ignore_ascii_case(raw.trim()))
            .cloned()
            .ok_or_else(|| {
                CliError::Command(format!(
                    "ticker '{raw}' is not in the dataset; select the company with 'wizard apply' instead"
                ))
            })?;
        state.apply(WizardAction::SelectCompany { company })?;
    }

    write_state(&args.file, &state)?;
    Ok(CommandResult::ok(serde_json::to_value(&state)?))
}

/// Fill the risk-free rate and historicals. Neither source is required, so
/// failures only leave the fields as they were.
async fn prefill_state(path: &Path, context: &Context) -> Result<CommandResult, CliError> {
    let mut state = read_state(path)?;
    let mut warnings = Vec::new();

    let treasury = TreasuryRateSource::new(
        Arc::clone(&context.http_client),
        &context.config.treasury_url,
        context.config.timeout_ms,
    );
    match treasury.ten_year_rate().await {
        Ok(rate) => state.apply(rate.prefill_action())?,
        Err(error) => warnings.push(EnvelopeWarning::treasury_unavailable(&error)),
    }

    let symbol = state
        .company()
        .and_then(|company| Symbol::parse(&company.symbol).ok());
    if let Some(symbol) = symbol {
        let historicals =
            fetch_historicals_quietly(&context.api(), &symbol, PREFILL_HISTORICAL_PERIODS).await;
        if let Some(historicals) = historicals {
            state.apply(WizardAction::SetHistoricals { historicals })?;
        }
    }

    write_state(path, &state)?;
    Ok(CommandResult::ok(serde_json::to_value(&state)?).with_warnings(warnings))
}

pub(super) fn read_state(path: &Path) -> Result<WizardState, CliError> {
    let raw = fs::read_to_string(path).map_err(|error| CliError::file(path, error))?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_state(path: &Path, state: &WizardState) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(state)?;
    fs::write(path, payload).map_err(|error| CliError::file(path, error))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use valuora_core::TickerRecord;

    use super::*;

    #[test]
    fn state_file_survives_write_and_read() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("wizard.json");

        let mut state = WizardState::new();
        state
            .apply(WizardAction::SelectCompany {
                company: TickerRecord::new("SHOP", "Shopify Inc."),
            })
            .expect("select");
        write_state(&path, &state).expect("write");

        assert_eq!(read_state(&path).expect("read"), state);
    }

    #[test]
    fn missing_state_file_is_an_io_error() {
        let dir = tempdir().expect("tempdir");
        let error = read_state(&dir.path().join("absent.json")).expect_err("must fail");
        assert_eq!(error.exit_code(), 10);
    }
}
