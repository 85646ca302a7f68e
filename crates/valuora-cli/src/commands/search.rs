use serde::Serialize;
use valuora_core::{
    search, EnvelopeWarning, SearchOptions, SearchOutcome, TickerDatasetLoader, TickerRecord,
    MAX_RESULTS,
};

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponseData<'a> {
    query: &'a str,
    status: &'static str,
    dataset_size: usize,
    results: &'a [TickerRecord],
}

pub async fn run(args: &SearchArgs, context: &Context) -> Result<CommandResult, CliError> {
    if args.limit == 0 || args.limit > MAX_RESULTS {
        return Err(CliError::Command(format!(
            "--limit must be between 1 and {MAX_RESULTS}"
        )));
    }

    let loader = TickerDatasetLoader::new(
        std::sync::Arc::clone(&context.http_client),
        &context.config.dataset_url,
        context.config.timeout_ms,
    );
    let dataset = loader.load().await;

    let query = args.query.trim();
    let outcome = search(query, &dataset, SearchOptions::default().with_limit(args.limit));
    let status = match &outcome {
        SearchOutcome::Empty => "empty",
        SearchOutcome::Matches { .. } => "matches",
        SearchOutcome::Unavailable { .. } => "unavailable",
    };

    let data = serde_json::to_value(SearchResponseData {
        query,
        status,
        dataset_size: dataset.len(),
        results: outcome.records(),
    })?;

    let mut result = CommandResult::ok(data);
    if dataset.is_empty() {
        result = result.with_warning(EnvelopeWarning::dataset_unavailable());
    }
    if outcome.is_unavailable() {
        result = result.with_warning(EnvelopeWarning::ticker_not_found(query));
    }

    Ok(result)
}
