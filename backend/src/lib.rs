//! Commission Ledger Core - Rust Engine
//!
//! In-memory commission bookkeeping for an insurance agency: agents,
//! commission plans, policies, the sale ledger, and the commission pass that
//! pays every agent on every sold policy.
//!
//! # Architecture
//!
//! - **core**: Typed ids and the monotonic id counter
//! - **models**: Domain types (Agent, CommissionPlan, Policy, Event)
//! - **registry**: Agent registry, plan registry, policy store
//! - **ledger**: Agent chains, sales record, commission calculation
//! - **orchestrator**: The `Agency`, sole owner and mutator of all state
//!
//! # Critical Invariants
//!
//! 1. Ids are unique per entity type and strictly increasing; never reused
//! 2. Entities refer to each other by id only, never by reference
//! 3. Commission = plan rate[position] × agent rate × face value
//! 4. No operation aborts the agency; failures are returned as `AgencyError`

// Module declarations
pub mod core;
pub mod ledger;
pub mod models;
pub mod orchestrator;
pub mod registry;

// Re-exports for convenience
pub use crate::core::ids::{AgentId, PlanId, PolicyId};
pub use ledger::{CommissionLine, CommissionNotice, CommissionReport, PolicyStatement, SaleLedger};
pub use models::{
    agent::Agent,
    event::{Event, EventLog},
    plan::{CommissionPlan, PlanError, RateRole},
    policy::Policy,
};
pub use orchestrator::{Agency, AgencyConfig, AgencyError, SharedAgency, SuperAgentOutcome};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn commission_ledger_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::agency::PyAgency>()?;
    Ok(())
}
