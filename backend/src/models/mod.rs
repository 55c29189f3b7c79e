//! Domain models for the commission ledger

pub mod agent;
pub mod event;
pub mod plan;
pub mod policy;

// Re-exports
pub use agent::Agent;
pub use event::{Event, EventLog};
pub use plan::{CommissionPlan, PlanError, RateRole};
pub use policy::Policy;
