//! Historical financial series from the market data service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::ValuationApi;
use crate::Symbol;

/// Named metric series, each ordered oldest to newest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalMetrics(BTreeMap<String, Vec<f64>>);

impl HistoricalMetrics {
    pub fn new(series: BTreeMap<String, Vec<f64>>) -> Self {
        Self(series)
    }

    pub fn series(&self, metric: &str) -> Option<&[f64]> {
        self.0.get(metric).map(Vec::as_slice)
    }

    /// Most recent value of a metric.
    pub fn latest(&self, metric: &str) -> Option<f64> {
        self.series(metric).and_then(|values| values.last().copied())
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Fetch historicals for the wizard. The feature is optional, so any
/// failure is logged and yields `None`.
pub async fn fetch_historicals_quietly(
    api: &ValuationApi,
    symbol: &Symbol,
    limit: usize,
) -> Option<HistoricalMetrics> {
    match api.historical_metrics(symbol, limit).await {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            tracing::debug!(%symbol, %error, "historical metrics unavailable");
            None
        }
    }
}
