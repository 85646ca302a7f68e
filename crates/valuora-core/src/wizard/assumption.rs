use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Number of projected fiscal years in a manual schedule.
pub const PROJECTION_YEARS: usize = 5;

/// How a projected metric is specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssumptionMethod {
    /// One value held flat across the projection.
    #[default]
    Stable,
    /// A constant step applied year over year.
    Step,
    /// An explicit value per projected year.
    Manual,
}

/// A projected metric with its method selector.
///
/// Each method keeps its own inputs, so switching from `manual` to `stable`
/// and back returns the schedule the user typed earlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumption<T> {
    method: AssumptionMethod,
    stable: Option<T>,
    step: Option<T>,
    manual: [Option<T>; PROJECTION_YEARS],
}

/// The inputs of the currently selected method only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveAssumption<T> {
    Stable { value: Option<T> },
    Step { rate: Option<T> },
    Manual { values: [Option<T>; PROJECTION_YEARS] },
}

impl<T> Default for Assumption<T> {
    fn default() -> Self {
        Self {
            method: AssumptionMethod::default(),
            stable: None,
            step: None,
            manual: std::array::from_fn(|_| None),
        }
    }
}

impl<T: Clone> Assumption<T> {
    pub fn stable(value: T) -> Self {
        Self {
            stable: Some(value),
            ..Self::default()
        }
    }

    pub const fn method(&self) -> AssumptionMethod {
        self.method
    }

    pub fn stable_value(&self) -> Option<&T> {
        self.stable.as_ref()
    }

    pub fn step_rate(&self) -> Option<&T> {
        self.step.as_ref()
    }

    pub fn manual_values(&self) -> &[Option<T>; PROJECTION_YEARS] {
        &self.manual
    }

    /// Switch method. Inputs of every method are kept.
    pub fn set_method(&mut self, method: AssumptionMethod) {
        self.method = method;
    }

    pub fn set_stable(&mut self, value: T) {
        self.stable = Some(value);
    }

    pub fn set_step(&mut self, rate: T) {
        self.step = Some(rate);
    }

    pub fn set_manual_year(&mut self, year: usize, value: T) -> Result<(), ValidationError> {
        let slot = self
            .manual
            .get_mut(year)
            .ok_or(ValidationError::ProjectionYearOutOfRange {
                index: year,
                years: PROJECTION_YEARS,
            })?;
        *slot = Some(value);
        Ok(())
    }

    pub fn active(&self) -> ActiveAssumption<T> {
        match self.method {
            AssumptionMethod::Stable => ActiveAssumption::Stable {
                value: self.stable.clone(),
            },
            AssumptionMethod::Step => ActiveAssumption::Step {
                rate: self.step.clone(),
            },
            AssumptionMethod::Manual => ActiveAssumption::Manual {
                values: self.manual.clone(),
            },
        }
    }
}
