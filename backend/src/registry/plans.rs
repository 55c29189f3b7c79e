//! Commission plan registry
//!
//! Stores named rate schedules and issues plan ids.

use crate::core::ids::{IdSequence, PlanId};
use crate::models::plan::CommissionPlan;
use std::collections::BTreeMap;

/// Registry of commission plans, keyed by id
///
/// # Example
/// ```
/// use commission_ledger_core::registry::PlanRegistry;
///
/// let mut plans = PlanRegistry::new(5001);
/// let plan_a = plans.add("Plan A".to_string(), vec![0.50, 0.05]).unwrap();
///
/// assert_eq!(plans.rate_count(plan_a), Some(2));
/// assert_eq!(plans.get(plan_a).unwrap().name(), "Plan A");
/// ```
#[derive(Debug, Clone)]
pub struct PlanRegistry {
    plans: BTreeMap<PlanId, CommissionPlan>,
    ids: IdSequence,
}

impl PlanRegistry {
    /// Create an empty registry whose first plan gets id `first_id`
    pub fn new(first_id: u32) -> Self {
        Self {
            plans: BTreeMap::new(),
            ids: IdSequence::new(first_id),
        }
    }

    /// Register a plan with an initial (possibly empty) schedule
    ///
    /// `None` once the id sequence is exhausted.
    pub fn add(&mut self, name: String, rates: Vec<f64>) -> Option<PlanId> {
        let id = PlanId(self.ids.next_raw()?);
        self.plans.insert(id, CommissionPlan::new(id, name, rates));
        Some(id)
    }

    pub fn get(&self, id: PlanId) -> Option<&CommissionPlan> {
        self.plans.get(&id)
    }

    pub fn get_mut(&mut self, id: PlanId) -> Option<&mut CommissionPlan> {
        self.plans.get_mut(&id)
    }

    pub fn contains(&self, id: PlanId) -> bool {
        self.plans.contains_key(&id)
    }

    /// Number of rates in a plan's schedule, `None` for an unknown plan
    pub fn rate_count(&self, id: PlanId) -> Option<usize> {
        self.get(id).map(CommissionPlan::rate_count)
    }

    /// All plans in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &CommissionPlan> {
        self.plans.values()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schedule_is_allowed() {
        let mut plans = PlanRegistry::new(5001);
        let id = plans.add("Empty".to_string(), Vec::new()).unwrap();

        assert_eq!(plans.rate_count(id), Some(0));
        assert!(plans.get(id).unwrap().is_empty());
    }

    #[test]
    fn test_rate_count_unknown_plan() {
        let plans = PlanRegistry::new(5001);
        assert_eq!(plans.rate_count(PlanId(5001)), None);
    }
}
