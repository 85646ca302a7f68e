use serde::{Deserialize, Serialize};

use super::assumption::AssumptionMethod;
use super::sections::{CapitalField, Metric, Scenario};
use super::{WizardState, REQUIRED_COMPETITORS};
use crate::historicals::HistoricalMetrics;
use crate::{Symbol, TickerRecord, ValidationError};

/// Every edit the wizard supports. Applied with [`WizardState::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardAction {
    SelectCompany {
        company: TickerRecord,
    },
    ClearCompany,
    AddCompetitor {
        symbol: Symbol,
    },
    RemoveCompetitor {
        symbol: Symbol,
    },
    SetMethod {
        scenario: Scenario,
        metric: Metric,
        method: AssumptionMethod,
    },
    SetStable {
        scenario: Scenario,
        metric: Metric,
        value: f64,
    },
    SetStep {
        scenario: Scenario,
        metric: Metric,
        rate: f64,
    },
    SetManualYear {
        scenario: Scenario,
        metric: Metric,
        year: usize,
        value: f64,
    },
    SetCapital {
        field: CapitalField,
        value: Option<f64>,
    },
    SetHistoricals {
        historicals: HistoricalMetrics,
    },
    ClearHistoricals,
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFiniteValue { field })
    }
}

impl WizardState {
    /// Apply one edit. A rejected action leaves the state untouched.
    pub fn apply(&mut self, action: WizardAction) -> Result<(), ValidationError> {
        match action {
            WizardAction::SelectCompany { company } => {
                let same_company = self
                    .company
                    .as_ref()
                    .is_some_and(|current| current.symbol.eq_ignore_ascii_case(&company.symbol));
                if !same_company {
                    self.historicals = None;
                }
                self.competitors
                    .retain(|competitor| !competitor.eq_ignore_case(&company.symbol));
                self.company = Some(company);
            }
            WizardAction::ClearCompany => {
                self.company = None;
                self.historicals = None;
            }
            WizardAction::AddCompetitor { symbol } => {
                if self.competitors.contains(&symbol) {
                    return Err(ValidationError::DuplicateCompetitor {
                        symbol: symbol.to_string(),
                    });
                }
                if self
                    .company
                    .as_ref()
                    .is_some_and(|company| symbol.eq_ignore_case(&company.symbol))
                {
                    return Err(ValidationError::CompetitorIsCompany {
                        symbol: symbol.to_string(),
                    });
                }
                if self.competitors.len() >= REQUIRED_COMPETITORS {
                    return Err(ValidationError::CompetitorCount {
                        required: REQUIRED_COMPETITORS,
                        found: self.competitors.len() + 1,
                    });
                }
                self.competitors.push(symbol);
            }
            WizardAction::RemoveCompetitor { symbol } => {
                let before = self.competitors.len();
                self.competitors.retain(|competitor| competitor != &symbol);
                if self.competitors.len() == before {
                    return Err(ValidationError::UnknownCompetitor {
                        symbol: symbol.to_string(),
                    });
                }
            }
            WizardAction::SetMethod {
                scenario,
                metric,
                method,
            } => {
                self.assumption_mut(scenario, metric).set_method(method);
            }
            WizardAction::SetStable {
                scenario,
                metric,
                value,
            } => {
                let value = finite("value", value)?;
                self.assumption_mut(scenario, metric).set_stable(value);
            }
            WizardAction::SetStep {
                scenario,
                metric,
                rate,
            } => {
                let rate = finite("rate", rate)?;
                self.assumption_mut(scenario, metric).set_step(rate);
            }
            WizardAction::SetManualYear {
                scenario,
                metric,
                year,
                value,
            } => {
                let value = finite("value", value)?;
                self.assumption_mut(scenario, metric)
                    .set_manual_year(year, value)?;
            }
            WizardAction::SetCapital { field, value } => {
                let value = value.map(|value| finite(field.as_str(), value)).transpose()?;
                self.capital.set(field, value);
            }
            WizardAction::SetHistoricals { historicals } => {
                self.historicals = Some(historicals);
            }
            WizardAction::ClearHistoricals => {
                self.historicals = None;
            }
        }

        Ok(())
    }
}
