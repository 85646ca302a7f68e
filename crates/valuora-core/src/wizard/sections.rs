use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::assumption::Assumption;

/// Forecast case a projection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Base,
    Bear,
    Bull,
}

impl Scenario {
    pub const ALL: [Self; 3] = [Self::Base, Self::Bear, Self::Bull];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Bear => "bear",
            Self::Bull => "bull",
        }
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Projected operating metric. Values are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    RevenueGrowth,
    EbitdaMargin,
    /// Depreciation & amortization as % of revenue.
    Depreciation,
    /// Capital expenditure as % of revenue.
    Capex,
    /// Net working capital as % of revenue.
    WorkingCapital,
}

impl Metric {
    pub const ALL: [Self; 5] = [
        Self::RevenueGrowth,
        Self::EbitdaMargin,
        Self::Depreciation,
        Self::Capex,
        Self::WorkingCapital,
    ];
}

/// All projected metrics of one scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioAssumptions {
    pub revenue_growth: Assumption<f64>,
    pub ebitda_margin: Assumption<f64>,
    pub depreciation: Assumption<f64>,
    pub capex: Assumption<f64>,
    pub working_capital: Assumption<f64>,
}

impl ScenarioAssumptions {
    pub fn metric(&self, metric: Metric) -> &Assumption<f64> {
        match metric {
            Metric::RevenueGrowth => &self.revenue_growth,
            Metric::EbitdaMargin => &self.ebitda_margin,
            Metric::Depreciation => &self.depreciation,
            Metric::Capex => &self.capex,
            Metric::WorkingCapital => &self.working_capital,
        }
    }

    pub(crate) fn metric_mut(&mut self, metric: Metric) -> &mut Assumption<f64> {
        match metric {
            Metric::RevenueGrowth => &mut self.revenue_growth,
            Metric::EbitdaMargin => &mut self.ebitda_margin,
            Metric::Depreciation => &mut self.depreciation,
            Metric::Capex => &mut self.capex,
            Metric::WorkingCapital => &mut self.working_capital,
        }
    }
}

/// Base/bear/bull projections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projections {
    pub base: ScenarioAssumptions,
    pub bear: ScenarioAssumptions,
    pub bull: ScenarioAssumptions,
}

impl Projections {
    pub fn scenario(&self, scenario: Scenario) -> &ScenarioAssumptions {
        match scenario {
            Scenario::Base => &self.base,
            Scenario::Bear => &self.bear,
            Scenario::Bull => &self.bull,
        }
    }

    pub(crate) fn scenario_mut(&mut self, scenario: Scenario) -> &mut ScenarioAssumptions {
        match scenario {
            Scenario::Base => &mut self.base,
            Scenario::Bear => &mut self.bear,
            Scenario::Bull => &mut self.bull,
        }
    }
}

/// Discount-rate and terminal-value input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalField {
    TaxRate,
    Beta,
    RiskFreeRate,
    EquityRiskPremium,
    CostOfDebt,
    DebtToCapital,
    TerminalGrowth,
    ExitMultiple,
}

impl CapitalField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaxRate => "tax_rate",
            Self::Beta => "beta",
            Self::RiskFreeRate => "risk_free_rate",
            Self::EquityRiskPremium => "equity_risk_premium",
            Self::CostOfDebt => "cost_of_debt",
            Self::DebtToCapital => "debt_to_capital",
            Self::TerminalGrowth => "terminal_growth",
            Self::ExitMultiple => "exit_multiple",
        }
    }
}

/// WACC and terminal value inputs. Rates are percentages; `beta` and
/// `exit_multiple` are plain ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalInputs {
    pub tax_rate: Option<f64>,
    pub beta: Option<f64>,
    pub risk_free_rate: Option<f64>,
    pub equity_risk_premium: Option<f64>,
    pub cost_of_debt: Option<f64>,
    pub debt_to_capital: Option<f64>,
    pub terminal_growth: Option<f64>,
    pub exit_multiple: Option<f64>,
}

impl CapitalInputs {
    pub fn get(&self, field: CapitalField) -> Option<f64> {
        *self.slot(field)
    }

    pub(crate) fn set(&mut self, field: CapitalField, value: Option<f64>) {
        *self.slot_mut(field) = value;
    }

    fn slot(&self, field: CapitalField) -> &Option<f64> {
        match field {
            CapitalField::TaxRate => &self.tax_rate,
            CapitalField::Beta => &self.beta,
            CapitalField::RiskFreeRate => &self.risk_free_rate,
            CapitalField::EquityRiskPremium => &self.equity_risk_premium,
            CapitalField::CostOfDebt => &self.cost_of_debt,
            CapitalField::DebtToCapital => &self.debt_to_capital,
            CapitalField::TerminalGrowth => &self.terminal_growth,
            CapitalField::ExitMultiple => &self.exit_multiple,
        }
    }

    fn slot_mut(&mut self, field: CapitalField) -> &mut Option<f64> {
        match field {
            CapitalField::TaxRate => &mut self.tax_rate,
            CapitalField::Beta => &mut self.beta,
            CapitalField::RiskFreeRate => &mut self.risk_free_rate,
            CapitalField::EquityRiskPremium => &mut self.equity_risk_premium,
            CapitalField::CostOfDebt => &mut self.cost_of_debt,
            CapitalField::DebtToCapital => &mut self.debt_to_capital,
            CapitalField::TerminalGrowth => &mut self.terminal_growth,
            CapitalField::ExitMultiple => &mut self.exit_multiple,
        }
    }
}
