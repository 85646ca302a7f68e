use serde_json::Value;
use valuora_core::Envelope;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => print!("{}", render_table(envelope)?),
    }

    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<String, CliError> {
    let mut out = String::new();
    out.push_str(&format!("request_id  : {}\n", envelope.meta.request_id));
    out.push_str(&format!("schema      : {}\n", envelope.meta.schema_version));
    out.push_str(&format!(
        "generated_at: {}\n",
        envelope.meta.generated_at.format_rfc3339()
    ));
    out.push_str(&format!("latency_ms  : {}\n", envelope.meta.latency_ms));
    out.push_str(&format!("offline     : {}\n", envelope.meta.offline));

    if !envelope.meta.warnings.is_empty() {
        out.push_str("warnings:\n");
        for warning in &envelope.meta.warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }

    match ticker_rows(&envelope.data) {
        Some(rows) => {
            out.push_str("data:\n");
            out.push_str(&ticker_table(&rows));
        }
        None => {
            out.push_str("data:\n");
            let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
            for line in pretty_data.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }
    }

    if !envelope.errors.is_empty() {
        out.push_str("errors:\n");
        for error in &envelope.errors {
            match error.status {
                Some(status) => out.push_str(&format!(
                    "  - {} (HTTP {status}): {}\n",
                    error.code, error.message
                )),
                None => out.push_str(&format!("  - {}: {}\n", error.code, error.message)),
            }
        }
    }

    Ok(out)
}

/// Search results get a column layout; everything else is printed as JSON.
fn ticker_rows(data: &Value) -> Option<Vec<[String; 3]>> {
    let results = data.get("results")?.as_array()?;
    results
        .iter()
        .map(|row| {
            let field = |name: &str| row.get(name).and_then(Value::as_str).map(str::to_owned);
            Some([
                field("symbol")?,
                field("companyName")?,
                field("tradingCurrency").unwrap_or_default(),
            ])
        })
        .collect()
}

fn ticker_table(rows: &[[String; 3]]) -> String {
    let headers = ["SYMBOL", "COMPANY", "CCY"];
    let mut widths = headers.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 3]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("  {}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers);
    for row in rows {
        out.push_str(&line([&row[0], &row[1], &row[2]]));
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use valuora_core::{EnvelopeError, EnvelopeMeta, EnvelopeWarning};

    use super::*;

    fn envelope(data: Value) -> Envelope<Value> {
        let meta = EnvelopeMeta::new("request-12345", "v1.0.0", 3, true).expect("meta");
        Envelope::success(meta, data)
    }

    #[test]
    fn search_results_render_as_columns() {
        let rendered = render_table(&envelope(json!({
            "query": "micro",
            "results": [
                { "symbol": "MSFT", "companyName": "Microsoft Corporation", "tradingCurrency": "USD" },
                { "symbol": "N/A", "companyName": "micro" },
            ]
        })))
        .expect("render");

        assert!(rendered.contains("  SYMBOL  COMPANY                CCY\n"));
        assert!(rendered.contains("  MSFT    Microsoft Corporation  USD\n"));
        assert!(rendered.contains("  N/A     micro\n"));
    }

    #[test]
    fn other_payloads_render_as_indented_json() {
        let rendered = render_table(&envelope(json!({ "rate": 4.2 }))).expect("render");
        assert!(rendered.contains("data:\n  {\n    \"rate\": 4.2\n  }\n"));
    }

    #[test]
    fn warnings_and_http_errors_are_listed() {
        let mut meta = EnvelopeMeta::new("request-12345", "v1.0.0", 3, false).expect("meta");
        meta.push_warning(EnvelopeWarning::no_session());
        let error = EnvelopeError::new("api.status", "server returned 404: project not found")
            .expect("error")
            .with_status(404);
        let envelope = Envelope::with_errors(meta, Value::Null, vec![error]).expect("envelope");

        let rendered = render_table(&envelope).expect("render");

        assert!(rendered.contains("warnings:\n  - no active session\n"));
        assert!(rendered
            .contains("errors:\n  - api.status (HTTP 404): server returned 404: project not found\n"));
    }
}
