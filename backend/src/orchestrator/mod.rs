//! Orchestrator - the agency that owns all bookkeeping state
//!
//! See `engine.rs` for the agency itself and `shared.rs` for the locked
//! wrapper used when several callers share one agency.

pub mod engine;
pub mod shared;

// Re-export main types for convenience
pub use engine::{Agency, AgencyConfig, AgencyError, SuperAgentOutcome};
pub use shared::SharedAgency;
