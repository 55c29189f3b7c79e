//! Shared agency access
//!
//! The commission pass reads agents, plans, policies and the ledger
//! together, so all of them sit behind one lock. Holding that lock for a
//! whole pass means a concurrent `remove_agent` either happens entirely
//! before the pass (the agent is reported missing) or entirely after it.

use crate::ledger::CommissionReport;
use crate::orchestrator::engine::Agency;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to one agency guarded by a single mutex
///
/// # Example
/// ```
/// use commission_ledger_core::{Agency, SharedAgency};
///
/// let shared = SharedAgency::new(Agency::default());
/// let handle = shared.clone();
///
/// let bob = handle.with(|agency| agency.add_agent("Bob", 0.02).unwrap());
/// assert!(shared.with(|agency| agency.get_agent(bob).is_some()));
/// ```
#[derive(Debug, Clone)]
pub struct SharedAgency {
    inner: Arc<Mutex<Agency>>,
}

impl SharedAgency {
    pub fn new(agency: Agency) -> Self {
        Self {
            inner: Arc::new(Mutex::new(agency)),
        }
    }

    /// Run `f` with exclusive access to the agency
    pub fn with<R>(&self, f: impl FnOnce(&mut Agency) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// Commission pass over a consistent view of every store
    pub fn calculate_commissions(&self) -> CommissionReport {
        self.with(Agency::calculate_commissions)
    }

    /// Independent copy of the agency as it is right now
    pub fn snapshot(&self) -> Agency {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Agency> {
        // Agency operations never panic partway through a mutation
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
