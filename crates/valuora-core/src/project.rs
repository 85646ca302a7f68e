//! Normalized project snapshot sent to the valuation backend.

use serde::{Deserialize, Serialize};

use crate::historicals::HistoricalMetrics;
use crate::wizard::{ActiveAssumption, CapitalInputs, Metric, Scenario, ScenarioAssumptions, WizardState};
use crate::{Symbol, UtcDateTime, ValidationError};

/// Active assumption per metric for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSnapshot {
    pub revenue_growth: ActiveAssumption<f64>,
    pub ebitda_margin: ActiveAssumption<f64>,
    pub depreciation: ActiveAssumption<f64>,
    pub capex: ActiveAssumption<f64>,
    pub working_capital: ActiveAssumption<f64>,
}

impl From<&ScenarioAssumptions> for ScenarioSnapshot {
    fn from(section: &ScenarioAssumptions) -> Self {
        let active = |metric| section.metric(metric).active();
        Self {
            revenue_growth: active(Metric::RevenueGrowth),
            ebitda_margin: active(Metric::EbitdaMargin),
            depreciation: active(Metric::Depreciation),
            capex: active(Metric::Capex),
            working_capital: active(Metric::WorkingCapital),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub base: ScenarioSnapshot,
    pub bear: ScenarioSnapshot,
    pub bull: ScenarioSnapshot,
}

impl ScenarioSet {
    pub fn get(&self, scenario: Scenario) -> &ScenarioSnapshot {
        match scenario {
            Scenario::Base => &self.base,
            Scenario::Bear => &self.bear,
            Scenario::Bull => &self.bull,
        }
    }
}

/// Write-once snapshot of a submitted wizard.
///
/// Built only through [`ProjectRecord::from_wizard`]; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    company_name: String,
    ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trading_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reporting_currency: Option<String>,
    competitors: Vec<Symbol>,
    scenarios: ScenarioSet,
    capital: CapitalInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    historicals: Option<HistoricalMetrics>,
    created_at: UtcDateTime,
}

impl ProjectRecord {
    /// Validate the wizard and restructure it into a project record.
    pub fn from_wizard(state: &WizardState) -> Result<Self, ValidationError> {
        let company = state.check_submission()?;
        let projections = state.projections();

        Ok(Self {
            company_name: company.company_name.clone(),
            ticker: company.symbol.clone(),
            trading_currency: company.trading_currency.clone(),
            reporting_currency: company.reporting_currency.clone(),
            competitors: state.competitors().to_vec(),
            scenarios: ScenarioSet {
                base: ScenarioSnapshot::from(&projections.base),
                bear: ScenarioSnapshot::from(&projections.bear),
                bull: ScenarioSnapshot::from(&projections.bull),
            },
            capital: *state.capital(),
            historicals: state.historicals().cloned(),
            created_at: UtcDateTime::now(),
        })
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn trading_currency(&self) -> Option<&str> {
        self.trading_currency.as_deref()
    }

    pub fn reporting_currency(&self) -> Option<&str> {
        self.reporting_currency.as_deref()
    }

    pub fn competitors(&self) -> &[Symbol] {
        &self.competitors
    }

    pub fn scenarios(&self) -> &ScenarioSet {
        &self.scenarios
    }

    pub fn capital(&self) -> &CapitalInputs {
        &self.capital
    }

    pub fn historicals(&self) -> Option<&HistoricalMetrics> {
        self.historicals.as_ref()
    }

    pub fn created_at(&self) -> UtcDateTime {
        self.created_at
    }
}
