//! Policy store
//!
//! Stores policies and issues policy numbers. The store does not know about
//! plans; the agency checks the plan id before calling [`PolicyStore::create`].

use crate::core::ids::{IdSequence, PlanId, PolicyId};
use crate::models::policy::Policy;
use std::collections::BTreeMap;

/// Store of issued policies, keyed by policy number
#[derive(Debug, Clone)]
pub struct PolicyStore {
    policies: BTreeMap<PolicyId, Policy>,
    ids: IdSequence,
}

impl PolicyStore {
    /// Create an empty store whose first policy gets number `first_id`
    pub fn new(first_id: u32) -> Self {
        Self {
            policies: BTreeMap::new(),
            ids: IdSequence::new(first_id),
        }
    }

    /// Issue a policy bound to `plan_id`
    ///
    /// The caller is responsible for having validated `plan_id`. Returns
    /// `None` once policy numbers are exhausted.
    pub fn create(&mut self, face_value: f64, plan_id: PlanId) -> Option<PolicyId> {
        let id = PolicyId(self.ids.next_raw()?);
        self.policies.insert(id, Policy::new(id, face_value, plan_id));
        Some(id)
    }

    pub fn get(&self, id: PolicyId) -> Option<&Policy> {
        self.policies.get(&id)
    }

    pub fn contains(&self, id: PolicyId) -> bool {
        self.policies.contains_key(&id)
    }

    /// All policies in ascending policy-number order
    pub fn iter(&self) -> impl Iterator<Item = &Policy> {
        self.policies.values()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        let mut store = PolicyStore::new(8001);
        let id = store.create(250_000.0, PlanId(5003)).unwrap();

        let policy = store.get(id).unwrap();
        assert_eq!(policy.id(), PolicyId(8001));
        assert_eq!(policy.face_value(), 250_000.0);
        assert_eq!(policy.plan_id(), PlanId(5003));
        assert_eq!(store.create(1_000.0, PlanId(5003)), Some(PolicyId(8002)));
    }
}
