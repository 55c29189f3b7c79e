//! Agent registry
//!
//! Stores agent records and issues agent ids. Removal only deletes the
//! record; sale chains that mention the id are left untouched.

use crate::core::ids::{AgentId, IdSequence};
use crate::models::agent::Agent;
use std::collections::BTreeMap;

/// Registry of insurance agents, keyed by id
///
/// # Example
/// ```
/// use commission_ledger_core::registry::AgentRegistry;
///
/// let mut agents = AgentRegistry::new(1001);
/// let bob = agents.add("Bob".to_string(), 0.02).unwrap();
/// let janet = agents.add("Janet".to_string(), 0.025).unwrap();
///
/// assert!(janet > bob);
/// assert_eq!(agents.get(bob).unwrap().name(), "Bob");
/// assert!(agents.remove(bob));
/// assert!(agents.get(bob).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: BTreeMap<AgentId, Agent>,
    ids: IdSequence,
}

impl AgentRegistry {
    /// Create an empty registry whose first agent gets id `first_id`
    pub fn new(first_id: u32) -> Self {
        Self {
            agents: BTreeMap::new(),
            ids: IdSequence::new(first_id),
        }
    }

    /// Register a new agent and return its freshly issued id
    ///
    /// `None` once the id sequence is exhausted; nothing is stored.
    pub fn add(&mut self, name: String, commission_rate: f64) -> Option<AgentId> {
        let id = AgentId(self.ids.next_raw()?);
        self.agents.insert(id, Agent::new(id, name, commission_rate));
        Some(id)
    }

    /// Delete an agent; returns whether anything was removed
    pub fn remove(&mut self, id: AgentId) -> bool {
        self.agents.remove(&id).is_some()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// All agents in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
