//! Policy model
//!
//! An insurance policy with a face value, bound at creation to exactly one
//! commission plan. The binding is stored as a plan id, never as a reference
//! to the plan itself; the agency resolves it at calculation time.
//!
//! Agents attached to a policy live in the sale ledger, not here.

use crate::core::ids::{PlanId, PolicyId};
use serde::{Deserialize, Serialize};

/// Represents an insurance policy
///
/// # Example
/// ```
/// use commission_ledger_core::{Policy, PlanId, PolicyId};
///
/// let policy = Policy::new(PolicyId(8001), 100_000.0, PlanId(5001));
/// assert_eq!(policy.face_value(), 100_000.0);
/// assert_eq!(policy.plan_id(), PlanId(5001));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Policy number
    id: PolicyId,

    /// Amount insured; the base all commission fractions multiply
    face_value: f64,

    /// Commission plan this policy pays out under (immutable)
    plan_id: PlanId,
}

impl Policy {
    pub fn new(id: PolicyId, face_value: f64, plan_id: PlanId) -> Self {
        Self {
            id,
            face_value,
            plan_id,
        }
    }

    pub fn id(&self) -> PolicyId {
        self.id
    }

    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    pub fn plan_id(&self) -> PlanId {
        self.plan_id
    }
}
