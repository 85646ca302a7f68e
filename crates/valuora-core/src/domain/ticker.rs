use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Symbol carried by the synthetic "company not listed" record.
pub const UNAVAILABLE_SYMBOL: &str = "N/A";

/// One row of the ticker dataset.
///
/// Rows are loaded in bulk and never mutated. Currency columns that are not
/// valid ISO codes are dropped on load instead of failing the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTickerRecord")]
pub struct TickerRecord {
    pub symbol: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_currency: Option<String>,
}

impl TickerRecord {
    pub fn new(symbol: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into().trim().to_owned(),
            company_name: company_name.into().trim().to_owned(),
            trading_currency: None,
            reporting_currency: None,
        }
    }

    pub fn with_currencies(
        mut self,
        trading: Option<&str>,
        reporting: Option<&str>,
    ) -> Result<Self, ValidationError> {
        self.trading_currency = trading.map(validate_currency_code).transpose()?;
        self.reporting_currency = reporting.map(validate_currency_code).transpose()?;
        Ok(self)
    }

    /// Manual-entry record offered when a search finds nothing.
    pub fn unavailable(company_name: impl Into<String>) -> Self {
        Self::new(UNAVAILABLE_SYMBOL, company_name)
    }

    pub fn is_unavailable(&self) -> bool {
        self.symbol == UNAVAILABLE_SYMBOL
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTickerRecord {
    symbol: String,
    #[serde(default, alias = "name")]
    company_name: String,
    #[serde(default, alias = "currency")]
    trading_currency: Option<String>,
    #[serde(default)]
    reporting_currency: Option<String>,
}

impl From<RawTickerRecord> for TickerRecord {
    fn from(raw: RawTickerRecord) -> Self {
        let lenient = |value: Option<String>| {
            value.and_then(|code| validate_currency_code(&code).ok())
        };

        Self {
            symbol: raw.symbol.trim().to_owned(),
            company_name: raw.company_name.trim().to_owned(),
            trading_currency: lenient(raw.trading_currency),
            reporting_currency: lenient(raw.reporting_currency),
        }
    }
}

/// Validate and normalize currency to uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}
