use serde_json::json;
use valuora_core::api::MAX_HISTORICAL_LIMIT;
use valuora_core::Symbol;

use crate::cli::HistoricalsArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

pub async fn run(args: &HistoricalsArgs, context: &Context) -> Result<CommandResult, CliError> {
    if args.limit == 0 || args.limit > MAX_HISTORICAL_LIMIT {
        return Err(CliError::Command(format!(
            "--limit must be between 1 and {MAX_HISTORICAL_LIMIT}"
        )));
    }

    let symbol = Symbol::parse(&args.ticker)?;
    let historicals = context.api().historical_metrics(&symbol, args.limit).await?;

    Ok(CommandResult::ok(json!({
        "ticker": symbol,
        "limit": args.limit,
        "historicals": historicals,
    })))
}
