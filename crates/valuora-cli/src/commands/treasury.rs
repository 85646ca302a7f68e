use std::sync::Arc;

use serde_json::json;
use valuora_core::TreasuryRateSource;

use crate::error::CliError;

use super::{CommandResult, Context};

pub async fn run(context: &Context) -> Result<CommandResult, CliError> {
    let source = TreasuryRateSource::new(
        Arc::clone(&context.http_client),
        &context.config.treasury_url,
        context.config.timeout_ms,
    );
    let rate = source.ten_year_rate().await?;

    Ok(CommandResult::ok(json!({
        "tenor": "10y",
        "ratePercent": rate.percent(),
    })))
}
