//! Agent model
//!
//! Represents an insurance agent registered with the agency.
//! Each agent has:
//! - A unique id issued by the agent registry
//! - A display name
//! - A personal commission rate (fraction, e.g. 0.02 = 2%)
//!
//! The personal rate is a multiplier applied on top of the plan rate for the
//! agent's position in a policy's agent chain:
//!
//! ```text
//! commission = plan_rate[position] × agent.commission_rate × policy.face_value
//! ```

use crate::core::ids::AgentId;
use serde::{Deserialize, Serialize};

/// Represents an insurance agent
///
/// # Example
/// ```
/// use commission_ledger_core::{Agent, AgentId};
///
/// let mut agent = Agent::new(AgentId(1001), "Bob".to_string(), 0.02);
/// assert_eq!(agent.name(), "Bob");
///
/// agent.set_commission_rate(0.03);
/// assert_eq!(agent.commission_rate(), 0.03);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier (never reused within an agency)
    id: AgentId,

    /// Display name
    name: String,

    /// Personal share multiplier applied to the plan rate
    commission_rate: f64,
}

impl Agent {
    /// Create a new agent
    ///
    /// Agents are normally created through the agency, which issues the id.
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `name` - Display name
    /// * `commission_rate` - Personal commission rate as a fraction
    pub fn new(id: AgentId, name: String, commission_rate: f64) -> Self {
        Self {
            id,
            name,
            commission_rate,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commission_rate(&self) -> f64 {
        self.commission_rate
    }

    /// Replace the display name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Replace the personal commission rate
    ///
    /// Takes effect on the next commission calculation; past reports are
    /// not recomputed.
    pub fn set_commission_rate(&mut self, rate: f64) {
        self.commission_rate = rate;
    }
}
