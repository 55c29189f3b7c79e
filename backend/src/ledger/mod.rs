//! Sale ledger
//!
//! Two id-to-id relations make up the ledger:
//! - **Agent chains**: per policy, the ordered agent ids credited on a sale.
//!   Position 0 is the selling agent, positions `>= 1` are super agents in
//!   the order they were recorded.
//! - **Sales**: the ordered list of policy ids marked sold. A policy may
//!   appear more than once; each appearance is paid out again.
//!
//! The ledger never checks ids against the registries. The agency validates
//! before it records, and the commission pass treats ids that have since
//! disappeared as absent.
//!
//! # Critical Invariants
//!
//! 1. A chain never holds a super agent without a selling agent before it
//! 2. Chains only grow at the end (the selling agent slot may be replaced)
//! 3. Sales keep recording order

pub mod commission;

use crate::core::ids::{AgentId, PolicyId};
use std::collections::HashMap;

pub use commission::{
    calculate_commissions, policy_statement, CommissionLine, CommissionNotice, CommissionReport,
    PolicyStatement,
};

/// Agent chains plus the ordered record of sold policies
#[derive(Debug, Clone, Default)]
pub struct SaleLedger {
    /// Policy id -> [selling agent, super agent 1, super agent 2, ...]
    chains: HashMap<PolicyId, Vec<AgentId>>,

    /// Policy ids in the order they were sold (duplicates allowed)
    sales: Vec<PolicyId>,
}

impl SaleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the selling agent of a policy
    ///
    /// Super agents already recorded keep their positions.
    pub fn set_selling_agent(&mut self, policy_id: PolicyId, agent_id: AgentId) {
        let chain = self.chains.entry(policy_id).or_default();
        if chain.is_empty() {
            chain.push(agent_id);
        } else {
            chain[0] = agent_id;
        }
    }

    /// Append a super agent to a policy's chain
    ///
    /// Returns the position the agent took, or `None` (and records nothing)
    /// when the policy has no selling agent yet.
    pub fn push_super_agent(&mut self, policy_id: PolicyId, agent_id: AgentId) -> Option<usize> {
        let chain = self.chains.get_mut(&policy_id).filter(|c| !c.is_empty())?;
        chain.push(agent_id);
        Some(chain.len() - 1)
    }

    /// Full agent chain of a policy; empty if nothing was recorded
    pub fn chain(&self, policy_id: PolicyId) -> &[AgentId] {
        self.chains
            .get(&policy_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn selling_agent(&self, policy_id: PolicyId) -> Option<AgentId> {
        self.chain(policy_id).first().copied()
    }

    /// Super agents of a policy in recording order
    pub fn super_agents(&self, policy_id: PolicyId) -> &[AgentId] {
        self.chain(policy_id).get(1..).unwrap_or(&[])
    }

    pub fn has_selling_agent(&self, policy_id: PolicyId) -> bool {
        self.selling_agent(policy_id).is_some()
    }

    /// Append a policy to the sales record
    pub fn record_sale(&mut self, policy_id: PolicyId) {
        self.sales.push(policy_id);
    }

    /// Sold policy ids in sale order
    pub fn sales(&self) -> &[PolicyId] {
        &self.sales
    }

    pub fn sale_count(&self) -> usize {
        self.sales.len()
    }
}
