//! 10-year treasury yield used to pre-fill the risk-free rate.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::http_client::{HttpClient, HttpError, HttpRequest};
use crate::wizard::{CapitalField, WizardAction};

#[derive(Debug, Error)]
pub enum TreasuryError {
    #[error("treasury rate source unreachable: {0}")]
    Transport(#[from] HttpError),

    #[error("treasury rate source returned status {status}")]
    Status { status: u16 },

    #[error("treasury rate response was not understood: {0}")]
    Decode(String),
}

/// Current 10-year rate, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreasuryRate(f64);

impl TreasuryRate {
    pub fn new(percent: f64) -> Result<Self, TreasuryError> {
        if !percent.is_finite() || !(-5.0..=50.0).contains(&percent) {
            return Err(TreasuryError::Decode(format!(
                "rate {percent} is outside the plausible range"
            )));
        }
        Ok(Self(percent))
    }

    pub const fn percent(self) -> f64 {
        self.0
    }

    /// Wizard edit that writes this rate into the risk-free field.
    pub fn prefill_action(self) -> WizardAction {
        WizardAction::SetCapital {
            field: CapitalField::RiskFreeRate,
            value: Some(self.0),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RateBody {
    Wrapped { rate: f64 },
    Bare(f64),
}

pub struct TreasuryRateSource {
    http_client: Arc<dyn HttpClient>,
    url: String,
    timeout_ms: u64,
}

impl TreasuryRateSource {
    pub fn new(http_client: Arc<dyn HttpClient>, url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            http_client,
            url: url.into(),
            timeout_ms,
        }
    }

    pub async fn ten_year_rate(&self) -> Result<TreasuryRate, TreasuryError> {
        let request = HttpRequest::get(&self.url).with_timeout_ms(self.timeout_ms);
        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            return Err(TreasuryError::Status {
                status: response.status,
            });
        }

        let rate = match serde_json::from_slice::<RateBody>(&response.body) {
            Ok(RateBody::Wrapped { rate }) | Ok(RateBody::Bare(rate)) => rate,
            Err(error) => return Err(TreasuryError::Decode(error.to_string())),
        };

        TreasuryRate::new(rate)
    }
}
