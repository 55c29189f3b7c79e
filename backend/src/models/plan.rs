//! Commission plan model
//!
//! A named, ordered schedule of rate fractions. Position 0 pays the selling
//! agent, position `i >= 1` pays the i-th super agent.
//!
//! Rates are fractions, not percentages: `0.5` means 50%.
//!
//! # Invariants
//!
//! 1. Rates only grow at the end (`append_rates`); nothing is inserted mid-schedule
//! 2. `update_rate` only overwrites an existing position (`index < len`)
//! 3. The schedule may be empty; callers must check `is_empty` before paying out

use crate::core::ids::PlanId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during plan operations
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("Rate index {index} out of range for schedule of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Role a schedule position pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateRole {
    /// Position 0
    SellingAgent,
    /// Position `n >= 1`
    SuperAgent(usize),
}

impl RateRole {
    /// Role for a position in the schedule (or in an agent chain)
    ///
    /// # Example
    /// ```
    /// use commission_ledger_core::RateRole;
    ///
    /// assert_eq!(RateRole::for_position(0), RateRole::SellingAgent);
    /// assert_eq!(RateRole::for_position(2), RateRole::SuperAgent(2));
    /// ```
    pub fn for_position(position: usize) -> Self {
        match position {
            0 => RateRole::SellingAgent,
            n => RateRole::SuperAgent(n),
        }
    }
}

impl fmt::Display for RateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateRole::SellingAgent => write!(f, "Selling agent"),
            RateRole::SuperAgent(n) => write!(f, "Super agent {}", n),
        }
    }
}

/// Named, ordered commission rate schedule
///
/// # Example
/// ```
/// use commission_ledger_core::{CommissionPlan, PlanId};
///
/// let mut plan = CommissionPlan::new(PlanId(5001), "Plan A".to_string(), vec![0.50, 0.05]);
/// plan.append_rates(&[0.01]);
/// assert_eq!(plan.rate_count(), 3);
/// assert_eq!(plan.rate(1), Some(0.05));
/// assert_eq!(plan.rate_or_zero(7), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionPlan {
    id: PlanId,
    name: String,
    rates: Vec<f64>,
}

impl CommissionPlan {
    pub fn new(id: PlanId, name: String, rates: Vec<f64>) -> Self {
        Self { id, name, rates }
    }

    pub fn id(&self) -> PlanId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full schedule, selling-agent rate first
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    pub fn rate_count(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Rate at `index`, if the schedule reaches that far
    pub fn rate(&self, index: usize) -> Option<f64> {
        self.rates.get(index).copied()
    }

    /// Rate at `index`, or `0.0` past the end of the schedule
    ///
    /// Agents positioned beyond the schedule are still paid, at zero.
    pub fn rate_or_zero(&self, index: usize) -> f64 {
        self.rate(index).unwrap_or(0.0)
    }

    /// Extend the schedule with additional super-agent rates
    pub fn append_rates(&mut self, rates: &[f64]) {
        self.rates.extend_from_slice(rates);
    }

    /// Overwrite the rate at `index`
    ///
    /// # Errors
    ///
    /// `PlanError::IndexOutOfRange` if `index >= rate_count()`; the
    /// schedule is left unchanged.
    pub fn update_rate(&mut self, index: usize, rate: f64) -> Result<(), PlanError> {
        let len = self.rates.len();
        match self.rates.get_mut(index) {
            Some(slot) => {
                *slot = rate;
                Ok(())
            }
            None => Err(PlanError::IndexOutOfRange { index, len }),
        }
    }

    /// Schedule positions paired with the role each one pays
    pub fn labeled_rates(&self) -> impl Iterator<Item = (RateRole, f64)> + '_ {
        self.rates
            .iter()
            .enumerate()
            .map(|(i, rate)| (RateRole::for_position(i), *rate))
    }
}
