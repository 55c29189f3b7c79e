//! Commission calculation
//!
//! Joins each sold policy to its plan and its agent chain and computes one
//! payout per chain position:
//!
//! ```text
//! For each policy id in the sale ledger (sale order):
//! 1. Resolve the policy and its plan
//! 2. Empty schedule → NoRatesRecorded notice, move to the next sale
//! 3. For each position i in the agent chain:
//!    - agent gone from the registry → AgentMissing notice, no line
//!    - otherwise amount = rate_or_zero(i) × agent rate × face value
//! ```
//!
//! Schedule positions past the end of the chain pay nobody. Chain positions
//! past the end of the schedule pay zero but still produce a line.
//!
//! The result is a plain value; nothing here mutates agency state, so a
//! report can be recomputed at any time.

use crate::core::ids::{AgentId, PlanId, PolicyId};
use crate::ledger::SaleLedger;
use crate::models::plan::RateRole;
use crate::registry::{AgentRegistry, PlanRegistry, PolicyStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Report Types
// ============================================================================

/// Payout to one agent for one chain position on one policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionLine {
    pub policy_id: PolicyId,
    /// Position in the agent chain (0 = selling agent)
    pub position: usize,
    pub role: RateRole,
    pub agent_id: AgentId,
    pub agent_name: String,
    /// Plan rate at this position (0.0 past the end of the schedule)
    pub plan_rate: f64,
    /// Agent's personal rate at calculation time
    pub agent_rate: f64,
    pub amount: f64,
}

/// Non-fatal condition found while computing a policy's statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommissionNotice {
    /// The policy's plan has an empty schedule; nothing was paid
    NoRatesRecorded { plan_id: PlanId },

    /// A chain position names an agent that has been removed
    AgentMissing { agent_id: AgentId, position: usize },

    /// The ledger names a policy the store does not hold
    ///
    /// An `Agency` never lets this happen; it only shows up when the ledger
    /// and stores are driven directly through this module.
    PolicyMissing,

    /// The policy's plan is not registered (same conditions as `PolicyMissing`)
    PlanMissing { plan_id: PlanId },
}

/// Everything computed for one ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyStatement {
    pub policy_id: PolicyId,
    pub plan_id: Option<PlanId>,
    pub face_value: Option<f64>,
    /// One line per paid chain position, in position order
    pub lines: Vec<CommissionLine>,
    pub notices: Vec<CommissionNotice>,
}

impl PolicyStatement {
    fn empty(policy_id: PolicyId) -> Self {
        Self {
            policy_id,
            plan_id: None,
            face_value: None,
            lines: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Sum of all lines on this statement
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| l.amount).sum()
    }

    pub fn has_no_rates(&self) -> bool {
        self.notices
            .iter()
            .any(|n| matches!(n, CommissionNotice::NoRatesRecorded { .. }))
    }
}

/// Result of one commission pass over the sale ledger
///
/// Statements appear in ledger order; a policy sold twice has two statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommissionReport {
    pub statements: Vec<PolicyStatement>,
}

impl CommissionReport {
    /// All lines, ledger order then chain position order
    pub fn lines(&self) -> impl Iterator<Item = &CommissionLine> {
        self.statements.iter().flat_map(|s| s.lines.iter())
    }

    /// All notices paired with the policy they concern
    pub fn notices(&self) -> impl Iterator<Item = (PolicyId, &CommissionNotice)> {
        self.statements
            .iter()
            .flat_map(|s| s.notices.iter().map(move |n| (s.policy_id, n)))
    }

    /// Total paid across every statement
    pub fn total_paid(&self) -> f64 {
        self.statements.iter().map(PolicyStatement::total).sum()
    }

    /// Total paid per agent, keyed by agent id
    pub fn totals_by_agent(&self) -> BTreeMap<AgentId, f64> {
        let mut totals = BTreeMap::new();
        for line in self.lines() {
            *totals.entry(line.agent_id).or_insert(0.0) += line.amount;
        }
        totals
    }

    pub fn line_count(&self) -> usize {
        self.statements.iter().map(|s| s.lines.len()).sum()
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Compute the statement for a single policy
///
/// Does not consult the sales record; the policy need not have been sold.
pub fn policy_statement(
    policy_id: PolicyId,
    ledger: &SaleLedger,
    agents: &AgentRegistry,
    plans: &PlanRegistry,
    policies: &PolicyStore,
) -> PolicyStatement {
    let mut statement = PolicyStatement::empty(policy_id);

    let Some(policy) = policies.get(policy_id) else {
        statement.notices.push(CommissionNotice::PolicyMissing);
        return statement;
    };
    statement.plan_id = Some(policy.plan_id());
    statement.face_value = Some(policy.face_value());

    let Some(plan) = plans.get(policy.plan_id()) else {
        statement.notices.push(CommissionNotice::PlanMissing {
            plan_id: policy.plan_id(),
        });
        return statement;
    };

    if plan.is_empty() {
        statement.notices.push(CommissionNotice::NoRatesRecorded { plan_id: plan.id() });
        return statement;
    }

    for (position, &agent_id) in ledger.chain(policy_id).iter().enumerate() {
        let Some(agent) = agents.get(agent_id) else {
            statement
                .notices
                .push(CommissionNotice::AgentMissing { agent_id, position });
            continue;
        };

        let plan_rate = plan.rate_or_zero(position);
        statement.lines.push(CommissionLine {
            policy_id,
            position,
            role: RateRole::for_position(position),
            agent_id,
            agent_name: agent.name().to_string(),
            plan_rate,
            agent_rate: agent.commission_rate(),
            amount: plan_rate * agent.commission_rate() * policy.face_value(),
        });
    }

    statement
}

/// Run the commission pass over every sold policy, in sale order
///
/// # Example
///
/// ```rust
/// use commission_ledger_core::ledger::{calculate_commissions, SaleLedger};
/// use commission_ledger_core::registry::{AgentRegistry, PlanRegistry, PolicyStore};
///
/// let mut agents = AgentRegistry::new(1001);
/// let mut plans = PlanRegistry::new(5001);
/// let mut policies = PolicyStore::new(8001);
/// let mut ledger = SaleLedger::new();
///
/// let bob = agents.add("Bob".to_string(), 0.02).unwrap();
/// let plan = plans.add("Plan A".to_string(), vec![0.50, 0.05]).unwrap();
/// let policy = policies.create(100_000.0, plan).unwrap();
/// ledger.set_selling_agent(policy, bob);
/// ledger.record_sale(policy);
///
/// let report = calculate_commissions(&ledger, &agents, &plans, &policies);
/// assert_eq!(report.line_count(), 1);
/// assert!((report.total_paid() - 1000.0).abs() < 1e-9);
/// ```
pub fn calculate_commissions(
    ledger: &SaleLedger,
    agents: &AgentRegistry,
    plans: &PlanRegistry,
    policies: &PolicyStore,
) -> CommissionReport {
    let statements = ledger
        .sales()
        .iter()
        .map(|&policy_id| policy_statement(policy_id, ledger, agents, plans, policies))
        .collect();

    CommissionReport { statements }
}
