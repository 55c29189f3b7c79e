//! Identifier types and id generation
//!
//! Agents, commission plans and policies each get their own typed id so the
//! compiler keeps an agent id from ever being passed where a plan id belongs.
//! Ids are issued by an [`IdSequence`] owned by the registry that stores the
//! entity, so two agencies never share a counter.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Typed Identifiers
// ============================================================================

/// Unique identifier for an insurance agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AgentId {
    fn from(raw: u32) -> Self {
        AgentId(raw)
    }
}

/// Unique identifier for a commission plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub u32);

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlanId {
    fn from(raw: u32) -> Self {
        PlanId(raw)
    }
}

/// Unique identifier (policy number) for an insurance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(pub u32);

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PolicyId {
    fn from(raw: u32) -> Self {
        PolicyId(raw)
    }
}

// ============================================================================
// Id Sequence
// ============================================================================

/// Monotonic id counter
///
/// Hands out `start`, `start + 1`, ... and never reuses a value, even after
/// the entity that held it has been removed. Once `u32::MAX` has been issued
/// the sequence is exhausted and issues nothing further.
///
/// # Example
/// ```
/// use commission_ledger_core::core::ids::IdSequence;
///
/// let mut seq = IdSequence::new(1001);
/// assert_eq!(seq.next_raw(), Some(1001));
/// assert_eq!(seq.next_raw(), Some(1002));
///
/// let mut last = IdSequence::new(u32::MAX);
/// assert_eq!(last.next_raw(), Some(u32::MAX));
/// assert_eq!(last.next_raw(), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdSequence {
    /// Value the next call to `next_raw` returns; `None` once exhausted
    next: Option<u32>,
}

impl IdSequence {
    /// Create a sequence whose first issued id is `start`
    ///
    /// # Panics
    ///
    /// Panics if `start` is zero. Configuration is validated before a
    /// sequence is built, so this only fires on programmer error.
    pub fn new(start: u32) -> Self {
        assert!(start > 0, "id sequence must start above zero");
        Self { next: Some(start) }
    }

    /// Issue the next id, or `None` if the sequence is exhausted
    pub fn next_raw(&mut self) -> Option<u32> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}
