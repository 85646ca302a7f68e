//! Deterministic sample data served in offline mode.
//!
//! [`FixtureHttpClient`] answers every valuora endpoint from bundled data,
//! so the whole wizard flow can be exercised without a backend.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};

use crate::api::{HISTORICAL_METRICS_PATH, PROJECTS_PATH, VALUATION_EXPORT_PATH};
use crate::config::ClientConfig;
use crate::http_client::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::TickerRecord;

pub const SAMPLE_TREASURY_RATE: f64 = 4.28;

const SAMPLE_TICKERS: &[(&str, &str, &str)] = &[
    ("AAPL", "Apple Inc.", "USD"),
    ("MSFT", "Microsoft Corporation", "USD"),
    ("GOOGL", "Alphabet Inc.", "USD"),
    ("AMZN", "Amazon.com, Inc.", "USD"),
    ("META", "Meta Platforms, Inc.", "USD"),
    ("NVDA", "NVIDIA Corporation", "USD"),
    ("ORCL", "Oracle Corporation", "USD"),
    ("IBM", "International Business Machines Corporation", "USD"),
    ("CRM", "Salesforce, Inc.", "USD"),
    ("ADBE", "Adobe Inc.", "USD"),
    ("SHOP", "Shopify Inc.", "USD"),
    ("EBAY", "eBay Inc.", "USD"),
    ("ETSY", "Etsy, Inc.", "USD"),
    ("WIX", "Wix.com Ltd.", "USD"),
    ("TSLA", "Tesla, Inc.", "USD"),
    ("F", "Ford Motor Company", "USD"),
    ("GM", "General Motors Company", "USD"),
    ("KO", "The Coca-Cola Company", "USD"),
    ("PEP", "PepsiCo, Inc.", "USD"),
    ("SAP", "SAP SE", "EUR"),
    ("ASML", "ASML Holding N.V.", "EUR"),
    ("TM", "Toyota Motor Corporation", "JPY"),
    ("RY", "Royal Bank of Canada", "CAD"),
    ("BRK.B", "Berkshire Hathaway Inc.", "USD"),
];

/// Bundled ticker dataset.
pub fn sample_tickers() -> Vec<TickerRecord> {
    SAMPLE_TICKERS
        .iter()
        .map(|(symbol, name, currency)| TickerRecord {
            symbol: (*symbol).to_owned(),
            company_name: (*name).to_owned(),
            trading_currency: Some((*currency).to_owned()),
            reporting_currency: Some((*currency).to_owned()),
        })
        .collect()
}

/// Offline stand-in for every remote endpoint.
#[derive(Debug)]
pub struct FixtureHttpClient {
    dataset_url: String,
    treasury_url: String,
    next_project: AtomicU64,
}

impl FixtureHttpClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            dataset_url: config.dataset_url.clone(),
            treasury_url: config.treasury_url.clone(),
            next_project: AtomicU64::new(1),
        }
    }

    fn respond(&self, request: &HttpRequest) -> HttpResponse {
        let path = request
            .url
            .split_once("://")
            .and_then(|(_, rest)| rest.find('/').map(|index| &rest[index..]))
            .unwrap_or("/");

        match (request.method, path) {
            (HttpMethod::Get, _) if request.url == self.dataset_url => {
                HttpResponse::ok_json(json!(sample_tickers()).to_string())
            }
            (HttpMethod::Get, _) if request.url == self.treasury_url => {
                HttpResponse::ok_json(json!({ "rate": SAMPLE_TREASURY_RATE }).to_string())
            }
            (HttpMethod::Post, HISTORICAL_METRICS_PATH) => historicals_response(request),
            (HttpMethod::Post, PROJECTS_PATH) => {
                let sequence = self.next_project.fetch_add(1, Ordering::Relaxed);
                HttpResponse::new(
                    201,
                    json!({ "projectId": format!("demo-{sequence:04}"), "status": "created" })
                        .to_string(),
                )
            }
            (HttpMethod::Post, VALUATION_EXPORT_PATH) => export_response(request),
            _ => HttpResponse::new(404, json!({ "detail": "Not Found" }).to_string()),
        }
    }
}

impl HttpClient for FixtureHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self.respond(&request);
        Box::pin(async move { Ok(response) })
    }
}

fn request_json(request: &HttpRequest) -> Value {
    request
        .body
        .as_deref()
        .and_then(|body| serde_json::from_str(body).ok())
        .unwrap_or(Value::Null)
}

fn historicals_response(request: &HttpRequest) -> HttpResponse {
    let body = request_json(request);
    let Some(ticker) = body.get("ticker").and_then(Value::as_str) else {
        return HttpResponse::new(422, json!({ "detail": "ticker is required" }).to_string());
    };
    let limit = body
        .get("limit")
        .and_then(Value::as_u64)
        .unwrap_or(5)
        .clamp(1, 20) as usize;

    // Deterministic per ticker so repeated offline runs agree.
    let seed = ticker.bytes().map(f64::from).sum::<f64>();
    let revenue: Vec<f64> = (0..limit)
        .map(|year| round2(seed * 10.0 * 1.07_f64.powi(year as i32)))
        .collect();
    let ebitda: Vec<f64> = revenue.iter().map(|value| round2(value * 0.24)).collect();
    let capex: Vec<f64> = revenue.iter().map(|value| round2(value * 0.05)).collect();

    HttpResponse::ok_json(
        json!({
            "historicals": {
                "revenue": revenue,
                "ebitda": ebitda,
                "capex": capex,
            }
        })
        .to_string(),
    )
}

fn export_response(request: &HttpRequest) -> HttpResponse {
    let body = request_json(request);
    let Some(project_id) = body.get("projectId").and_then(Value::as_str) else {
        return HttpResponse::new(422, json!({ "detail": "projectId is required" }).to_string());
    };
    if !project_id.starts_with("demo-") {
        return HttpResponse::new(
            404,
            json!({ "detail": format!("Project {project_id} not found") }).to_string(),
        );
    }

    let sheet = format!("project,{project_id}\nstatus,sample valuation\n");
    HttpResponse::new(200, sheet.into_bytes())
        .with_header("content-type", "text/csv")
        .with_header(
            "content-disposition",
            format!("attachment; filename=\"{project_id}-valuation.csv\""),
        )
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_dataset_symbols_are_unique() {
        let tickers = sample_tickers();
        let mut symbols: Vec<&str> = tickers.iter().map(|t| t.symbol.as_str()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), tickers.len());
    }

    #[tokio::test]
    async fn unknown_routes_return_not_found() {
        let client = FixtureHttpClient::new(&ClientConfig::default());
        let response = client
            .execute(HttpRequest::get("http://localhost:8000/nowhere"))
            .await
            .expect("fixture never fails");
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn project_ids_are_sequential() {
        let config = ClientConfig::default();
        let client = FixtureHttpClient::new(&config);
        let request = HttpRequest::post_json(config.endpoint(PROJECTS_PATH), &json!({}))
            .expect("payload");

        let first = client.execute(request.clone()).await.expect("ok");
        let second = client.execute(request).await.expect("ok");

        assert!(first.text().contains("demo-0001"));
        assert!(second.text().contains("demo-0002"));
    }
}
