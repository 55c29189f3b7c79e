//! Event logging for agency bookkeeping and auditing.
//!
//! Every significant state change in the agency is captured as an [`Event`].
//! Events enable:
//! - Auditing (who was credited on which policy, and when)
//! - Debugging (why an agent id was skipped or an operation rejected)
//! - Presentation (the demo driver renders warnings from the log)
//!
//! # Event Types
//!
//! Events are categorized by the component that produced them:
//! - **Registry**: Agents and plans added, removed or changed
//! - **Policy**: Policies created and bound to a plan
//! - **Ledger**: Selling / super agents recorded, policies sold
//! - **Commission**: Per-agent payouts and per-policy notices
//! - **Rejection**: Operations that returned an error
//!
//! Each event carries `seq`, the number of the agency operation that emitted
//! it. One operation may emit several events sharing a `seq`.
//!
//! # Example
//!
//! ```rust
//! use commission_ledger_core::models::{Event, EventLog};
//! use commission_ledger_core::{AgentId, PolicyId};
//!
//! let mut log = EventLog::new();
//! log.log(Event::SuperAgentSkipped {
//!     seq: 7,
//!     policy_id: PolicyId(8001),
//!     agent_id: AgentId(9999),
//! });
//!
//! assert_eq!(log.events_of_type("SuperAgentSkipped").len(), 1);
//! ```

use crate::core::ids::{AgentId, PlanId, PolicyId};
use serde::{Deserialize, Serialize};

/// Agency event capturing a state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// New agent registered
    AgentAdded {
        seq: u64,
        agent_id: AgentId,
        name: String,
        commission_rate: f64,
    },

    /// Agent removed from the registry (sale chains keep the id)
    AgentRemoved { seq: u64, agent_id: AgentId },

    /// Agent's personal commission rate changed
    AgentRateUpdated {
        seq: u64,
        agent_id: AgentId,
        old_rate: f64,
        new_rate: f64,
    },

    /// Agent's display name changed
    AgentRenamed {
        seq: u64,
        agent_id: AgentId,
        old_name: String,
        new_name: String,
    },

    /// New commission plan registered
    PlanAdded {
        seq: u64,
        plan_id: PlanId,
        name: String,
        rate_count: usize,
    },

    /// Rates appended to an existing plan
    PlanRatesAppended {
        seq: u64,
        plan_id: PlanId,
        added: usize,
        rate_count: usize,
    },

    /// One schedule position overwritten
    PlanRateUpdated {
        seq: u64,
        plan_id: PlanId,
        index: usize,
        rate: f64,
    },

    /// Policy created and bound to a plan
    PolicyCreated {
        seq: u64,
        policy_id: PolicyId,
        plan_id: PlanId,
        face_value: f64,
    },

    /// Selling agent set (or replaced) for a policy
    SellingAgentRecorded {
        seq: u64,
        policy_id: PolicyId,
        agent_id: AgentId,
    },

    /// Super agent appended to a policy's agent chain
    SuperAgentRecorded {
        seq: u64,
        policy_id: PolicyId,
        agent_id: AgentId,
        position: usize,
    },

    /// Unknown super agent id left out of the chain
    SuperAgentSkipped {
        seq: u64,
        policy_id: PolicyId,
        agent_id: AgentId,
    },

    /// Policy appended to the sale ledger
    PolicySold { seq: u64, policy_id: PolicyId },

    /// Commission computed for one agent position
    CommissionCalculated {
        seq: u64,
        policy_id: PolicyId,
        agent_id: AgentId,
        position: usize,
        amount: f64,
    },

    /// Sold policy's plan has an empty schedule
    NoRatesRecorded {
        seq: u64,
        policy_id: PolicyId,
        plan_id: PlanId,
    },

    /// Agent chain references an agent no longer registered
    AgentMissingFromRegistry {
        seq: u64,
        policy_id: PolicyId,
        agent_id: AgentId,
        position: usize,
    },

    /// Operation refused; `reason` is the error's display text
    OperationRejected {
        seq: u64,
        operation: String,
        reason: String,
    },
}

impl Event {
    /// Get the operation number that emitted this event
    pub fn seq(&self) -> u64 {
        match self {
            Event::AgentAdded { seq, .. } => *seq,
            Event::AgentRemoved { seq, .. } => *seq,
            Event::AgentRateUpdated { seq, .. } => *seq,
            Event::AgentRenamed { seq, .. } => *seq,
            Event::PlanAdded { seq, .. } => *seq,
            Event::PlanRatesAppended { seq, .. } => *seq,
            Event::PlanRateUpdated { seq, .. } => *seq,
            Event::PolicyCreated { seq, .. } => *seq,
            Event::SellingAgentRecorded { seq, .. } => *seq,
            Event::SuperAgentRecorded { seq, .. } => *seq,
            Event::SuperAgentSkipped { seq, .. } => *seq,
            Event::PolicySold { seq, .. } => *seq,
            Event::CommissionCalculated { seq, .. } => *seq,
            Event::NoRatesRecorded { seq, .. } => *seq,
            Event::AgentMissingFromRegistry { seq, .. } => *seq,
            Event::OperationRejected { seq, .. } => *seq,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::AgentAdded { .. } => "AgentAdded",
            Event::AgentRemoved { .. } => "AgentRemoved",
            Event::AgentRateUpdated { .. } => "AgentRateUpdated",
            Event::AgentRenamed { .. } => "AgentRenamed",
            Event::PlanAdded { .. } => "PlanAdded",
            Event::PlanRatesAppended { .. } => "PlanRatesAppended",
            Event::PlanRateUpdated { .. } => "PlanRateUpdated",
            Event::PolicyCreated { .. } => "PolicyCreated",
            Event::SellingAgentRecorded { .. } => "SellingAgentRecorded",
            Event::SuperAgentRecorded { .. } => "SuperAgentRecorded",
            Event::SuperAgentSkipped { .. } => "SuperAgentSkipped",
            Event::PolicySold { .. } => "PolicySold",
            Event::CommissionCalculated { .. } => "CommissionCalculated",
            Event::NoRatesRecorded { .. } => "NoRatesRecorded",
            Event::AgentMissingFromRegistry { .. } => "AgentMissingFromRegistry",
            Event::OperationRejected { .. } => "OperationRejected",
        }
    }

    /// Get policy ID if event relates to a specific policy
    pub fn policy_id(&self) -> Option<PolicyId> {
        match self {
            Event::PolicyCreated { policy_id, .. } => Some(*policy_id),
            Event::SellingAgentRecorded { policy_id, .. } => Some(*policy_id),
            Event::SuperAgentRecorded { policy_id, .. } => Some(*policy_id),
            Event::SuperAgentSkipped { policy_id, .. } => Some(*policy_id),
            Event::PolicySold { policy_id, .. } => Some(*policy_id),
            Event::CommissionCalculated { policy_id, .. } => Some(*policy_id),
            Event::NoRatesRecorded { policy_id, .. } => Some(*policy_id),
            Event::AgentMissingFromRegistry { policy_id, .. } => Some(*policy_id),
            _ => None,
        }
    }

    /// Get agent ID if event relates to a specific agent
    pub fn agent_id(&self) -> Option<AgentId> {
        match self {
            Event::AgentAdded { agent_id, .. } => Some(*agent_id),
            Event::AgentRemoved { agent_id, .. } => Some(*agent_id),
            Event::AgentRateUpdated { agent_id, .. } => Some(*agent_id),
            Event::AgentRenamed { agent_id, .. } => Some(*agent_id),
            Event::SellingAgentRecorded { agent_id, .. } => Some(*agent_id),
            Event::SuperAgentRecorded { agent_id, .. } => Some(*agent_id),
            Event::SuperAgentSkipped { agent_id, .. } => Some(*agent_id),
            Event::CommissionCalculated { agent_id, .. } => Some(*agent_id),
            Event::AgentMissingFromRegistry { agent_id, .. } => Some(*agent_id),
            _ => None,
        }
    }

    /// True for events a presentation layer should surface as warnings
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::SuperAgentSkipped { .. }
                | Event::NoRatesRecorded { .. }
                | Event::AgentMissingFromRegistry { .. }
                | Event::OperationRejected { .. }
        )
    }
}

/// Event log for storing and querying agency events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events emitted by a specific operation
    pub fn events_at_seq(&self, seq: u64) -> Vec<&Event> {
        self.events.iter().filter(|e| e.seq() == seq).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific policy
    pub fn events_for_policy(&self, policy_id: PolicyId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.policy_id() == Some(policy_id))
            .collect()
    }

    /// Get events for a specific agent
    pub fn events_for_agent(&self, agent_id: AgentId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.agent_id() == Some(agent_id))
            .collect()
    }

    /// Get all warning events, in the order they were logged
    pub fn warnings(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_warning()).collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
