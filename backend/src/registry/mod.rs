//! Registries owning the agency's entities
//!
//! Each registry owns its records and the [`IdSequence`](crate::core::ids::IdSequence)
//! that numbers them. Records are keyed by id in a `BTreeMap`, so every
//! listing is in ascending id order, which is also creation order.

pub mod agents;
pub mod plans;
pub mod policies;

pub use agents::AgentRegistry;
pub use plans::PlanRegistry;
pub use policies::PolicyStore;
