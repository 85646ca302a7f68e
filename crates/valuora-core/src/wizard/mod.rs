//! # Project Wizard State
//!
//! The new-project wizard collects a company, four competitors, projected
//! operating assumptions per scenario, and discount-rate inputs.
//!
//! [`WizardState`] is a plain serializable value. It is changed only through
//! [`WizardState::apply`], which takes a [`WizardAction`] and either applies
//! it completely or rejects it with a [`ValidationError`].
//!
//! ```rust
//! use valuora_core::wizard::{AssumptionMethod, Metric, Scenario, WizardAction, WizardState};
//!
//! let mut state = WizardState::new();
//! state.apply(WizardAction::SetStable {
//!     scenario: Scenario::Base,
//!     metric: Metric::RevenueGrowth,
//!     value: 8.0,
//! })?;
//! state.apply(WizardAction::SetMethod {
//!     scenario: Scenario::Base,
//!     metric: Metric::RevenueGrowth,
//!     method: AssumptionMethod::Manual,
//! })?;
//!
//! // The stable value survives the switch to a manual schedule.
//! let growth = state.projections().base.metric(Metric::RevenueGrowth);
//! assert_eq!(growth.stable_value(), Some(&8.0));
//! # Ok::<(), valuora_core::ValidationError>(())
//! ```

mod action;
mod assumption;
mod sections;

pub use action::WizardAction;
pub use assumption::{ActiveAssumption, Assumption, AssumptionMethod, PROJECTION_YEARS};
pub use sections::{
    CapitalField, CapitalInputs, Metric, Projections, Scenario, ScenarioAssumptions,
};

use serde::{Deserialize, Serialize};

use crate::historicals::HistoricalMetrics;
use crate::{Symbol, TickerRecord, ValidationError};

/// Competitors a project must name before it can be submitted.
pub const REQUIRED_COMPETITORS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    company: Option<TickerRecord>,
    #[serde(default)]
    competitors: Vec<Symbol>,
    #[serde(default)]
    projections: Projections,
    #[serde(default)]
    capital: CapitalInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    historicals: Option<HistoricalMetrics>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(&self) -> Option<&TickerRecord> {
        self.company.as_ref()
    }

    pub fn competitors(&self) -> &[Symbol] {
        &self.competitors
    }

    pub fn projections(&self) -> &Projections {
        &self.projections
    }

    pub fn capital(&self) -> &CapitalInputs {
        &self.capital
    }

    pub fn historicals(&self) -> Option<&HistoricalMetrics> {
        self.historicals.as_ref()
    }

    /// Pre-submission check: a company is selected and exactly
    /// [`REQUIRED_COMPETITORS`] competitors are chosen. Nothing else is
    /// validated.
    pub fn check_submission(&self) -> Result<&TickerRecord, ValidationError> {
        let company = self.company.as_ref().ok_or(ValidationError::MissingCompany)?;

        if self.competitors.len() != REQUIRED_COMPETITORS {
            return Err(ValidationError::CompetitorCount {
                required: REQUIRED_COMPETITORS,
                found: self.competitors.len(),
            });
        }

        Ok(company)
    }

    fn assumption_mut(&mut self, scenario: Scenario, metric: Metric) -> &mut Assumption<f64> {
        self.projections.scenario_mut(scenario).metric_mut(metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_submission_requires_company_first() {
        let state = WizardState::new();
        assert_eq!(state.check_submission(), Err(ValidationError::MissingCompany));
    }

    #[test]
    fn check_submission_rejects_too_many_competitors_from_disk() {
        let state: WizardState = serde_json::from_value(serde_json::json!({
            "company": { "symbol": "MSFT", "companyName": "Microsoft Corporation" },
            "competitors": ["AAPL", "GOOGL", "AMZN", "META", "ORCL"]
        }))
        .expect("state parses");

        assert_eq!(
            state.check_submission(),
            Err(ValidationError::CompetitorCount {
                required: 4,
                found: 5
            })
        );
    }

    #[test]
    fn fresh_state_round_trips_through_json() {
        let state = WizardState::new();
        let json = serde_json::to_string(&state).expect("serialize");
        let back: WizardState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, state);
    }
}
