//! Agency Engine
//!
//! The agency owns every registry and the sale ledger, and is the only
//! public way to mutate them. It enforces referential validity:
//! - a policy can only be bound to a registered plan
//! - an agent recorded on a sale must be registered at recording time
//! - super agents can only follow a recorded selling agent
//!
//! # Data Flow
//!
//! ```text
//! add_agent / add_commission_plan
//!   → create_policy (plan bound)
//!   → record_selling_agent → record_super_agents
//!   → record_policy_sale
//!   → calculate_commissions (joins policy → plan and policy → agent chain)
//! ```
//!
//! Associations are id-to-id relations held here, never references between
//! entities, so every record stays independently cloneable and serializable.
//!
//! # Example
//!
//! ```rust
//! use commission_ledger_core::Agency;
//!
//! let mut agency = Agency::default();
//!
//! let plan = agency.add_commission_plan("Plan A", &[0.50, 0.05]).unwrap();
//! let bob = agency.add_agent("Bob", 0.02).unwrap();
//! let janet = agency.add_agent("Janet", 0.025).unwrap();
//!
//! let policy = agency.create_policy(100_000.0, plan).unwrap();
//! agency.record_selling_agent(policy, bob).unwrap();
//! agency.record_super_agents(policy, &[janet]).unwrap();
//! agency.record_policy_sale(policy).unwrap();
//!
//! let report = agency.calculate_commissions();
//! let amounts: Vec<f64> = report.lines().map(|l| l.amount).collect();
//! assert!((amounts[0] - 1000.0).abs() < 1e-9);
//! assert!((amounts[1] - 125.0).abs() < 1e-9);
//! ```

use crate::core::ids::{AgentId, PlanId, PolicyId};
use crate::ledger::{
    calculate_commissions, policy_statement, CommissionNotice, CommissionReport, PolicyStatement,
    SaleLedger,
};
use crate::models::agent::Agent;
use crate::models::event::{Event, EventLog};
use crate::models::plan::{CommissionPlan, PlanError};
use crate::models::policy::Policy;
use crate::registry::{AgentRegistry, PlanRegistry, PolicyStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Agency configuration
///
/// # Fields
///
/// * `agent_id_start` - First id issued to an agent
/// * `plan_id_start` - First id issued to a commission plan
/// * `policy_id_start` - First policy number issued
/// * `event_logging` - Record events in the agency's [`EventLog`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgencyConfig {
    pub agent_id_start: u32,
    pub plan_id_start: u32,
    pub policy_id_start: u32,
    pub event_logging: bool,
}

impl Default for AgencyConfig {
    fn default() -> Self {
        Self {
            agent_id_start: 1001,
            plan_id_start: 5001,
            policy_id_start: 8001,
            event_logging: true,
        }
    }
}

impl AgencyConfig {
    /// Check the configuration before any registry is built
    ///
    /// # Errors
    ///
    /// `AgencyError::InvalidConfig` if any id start is zero.
    pub fn validate(&self) -> Result<(), AgencyError> {
        let starts = [
            ("agent_id_start", self.agent_id_start),
            ("plan_id_start", self.plan_id_start),
            ("policy_id_start", self.policy_id_start),
        ];
        for (field, value) in starts {
            if value == 0 {
                return Err(AgencyError::InvalidConfig(format!(
                    "{} must be at least 1",
                    field
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors returned by agency operations
///
/// None of these are fatal: the failed operation leaves state untouched and
/// the agency stays usable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AgencyError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid agent id specified: {0}")]
    AgentNotFound(AgentId),

    #[error("Invalid commission plan id specified: {0}")]
    PlanNotFound(PlanId),

    #[error("Invalid policy specified: {0}")]
    PolicyNotFound(PolicyId),

    #[error("No selling agent recorded for policy {0}")]
    NoSellingAgent(PolicyId),

    #[error("No commission rates recorded for plan {0}")]
    EmptySchedule(PlanId),

    #[error("All {0} ids have been issued")]
    IdsExhausted(&'static str),

    #[error("Invalid agent index to update on plan {plan_id}: {index} (schedule has {len} rates)")]
    RateIndexOutOfRange {
        plan_id: PlanId,
        index: usize,
        len: usize,
    },
}

impl AgencyError {
    fn from_plan_error(plan_id: PlanId, err: PlanError) -> Self {
        match err {
            PlanError::IndexOutOfRange { index, len } => {
                AgencyError::RateIndexOutOfRange { plan_id, index, len }
            }
        }
    }
}

/// Outcome of recording super agents
///
/// Unknown ids are skipped rather than stored; `skipped` lists them in call
/// order so the caller can report each one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuperAgentOutcome {
    pub recorded: Vec<AgentId>,
    pub skipped: Vec<AgentId>,
}

impl SuperAgentOutcome {
    pub fn all_recorded(&self) -> bool {
        self.skipped.is_empty()
    }
}

// ============================================================================
// Agency
// ============================================================================

/// Insurance agency: registries, sale ledger and commission calculation
#[derive(Debug, Clone)]
pub struct Agency {
    config: AgencyConfig,
    agents: AgentRegistry,
    plans: PlanRegistry,
    policies: PolicyStore,
    ledger: SaleLedger,
    events: EventLog,

    /// Number of the last operation started (tags emitted events)
    op_seq: u64,
}

impl Default for Agency {
    fn default() -> Self {
        Self::build(AgencyConfig::default())
    }
}

impl Agency {
    /// Create a new agency from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Agency)` - Empty agency ready for use
    /// * `Err(AgencyError::InvalidConfig)` - Configuration validation failed
    pub fn new(config: AgencyConfig) -> Result<Self, AgencyError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AgencyConfig) -> Self {
        Self {
            agents: AgentRegistry::new(config.agent_id_start),
            plans: PlanRegistry::new(config.plan_id_start),
            policies: PolicyStore::new(config.policy_id_start),
            ledger: SaleLedger::new(),
            events: EventLog::new(),
            op_seq: 0,
            config,
        }
    }

    pub fn config(&self) -> &AgencyConfig {
        &self.config
    }

    pub fn event_log(&self) -> &EventLog {
        &self.events
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// Register an agent
    ///
    /// Any name and rate are accepted. Fails only with `IdsExhausted` once
    /// the last agent id has been issued.
    pub fn add_agent(
        &mut self,
        name: impl Into<String>,
        commission_rate: f64,
    ) -> Result<AgentId, AgencyError> {
        let seq = self.begin_op();
        let name = name.into();
        let Some(agent_id) = self.agents.add(name.clone(), commission_rate) else {
            return Err(self.reject(seq, "add_agent", AgencyError::IdsExhausted("agent")));
        };

        self.log(Event::AgentAdded {
            seq,
            agent_id,
            name,
            commission_rate,
        });
        Ok(agent_id)
    }

    /// Remove an agent; returns whether one was removed
    ///
    /// Agent chains that mention the id keep it. The commission pass reports
    /// such positions as missing and pays nothing for them.
    pub fn remove_agent(&mut self, agent_id: AgentId) -> bool {
        let seq = self.begin_op();
        let removed = self.agents.remove(agent_id);
        if removed {
            self.log(Event::AgentRemoved { seq, agent_id });
        }
        removed
    }

    pub fn get_agent(&self, agent_id: AgentId) -> Option<&Agent> {
        self.agents.get(agent_id)
    }

    /// All registered agents, ascending id order
    pub fn list_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Change an agent's personal commission rate
    pub fn update_agent_rate(&mut self, agent_id: AgentId, rate: f64) -> Result<(), AgencyError> {
        let seq = self.begin_op();
        let Some(agent) = self.agents.get_mut(agent_id) else {
            let err = AgencyError::AgentNotFound(agent_id);
            return Err(self.reject(seq, "update_agent_rate", err));
        };

        let old_rate = agent.commission_rate();
        agent.set_commission_rate(rate);
        self.log(Event::AgentRateUpdated {
            seq,
            agent_id,
            old_rate,
            new_rate: rate,
        });
        Ok(())
    }

    /// Change an agent's display name
    pub fn rename_agent(
        &mut self,
        agent_id: AgentId,
        name: impl Into<String>,
    ) -> Result<(), AgencyError> {
        let seq = self.begin_op();
        let Some(agent) = self.agents.get_mut(agent_id) else {
            return Err(self.reject(seq, "rename_agent", AgencyError::AgentNotFound(agent_id)));
        };

        let new_name = name.into();
        let old_name = agent.name().to_string();
        agent.set_name(new_name.clone());
        self.log(Event::AgentRenamed {
            seq,
            agent_id,
            old_name,
            new_name,
        });
        Ok(())
    }

    // ========================================================================
    // Commission Plans
    // ========================================================================

    /// Register a plan; `rates[0]` pays the selling agent, `rates[i]` the
    /// i-th super agent. The schedule may be empty.
    ///
    /// Fails only with `IdsExhausted` once the last plan id has been issued.
    pub fn add_commission_plan(
        &mut self,
        name: impl Into<String>,
        rates: &[f64],
    ) -> Result<PlanId, AgencyError> {
        let seq = self.begin_op();
        let name = name.into();
        let Some(plan_id) = self.plans.add(name.clone(), rates.to_vec()) else {
            let err = AgencyError::IdsExhausted("commission plan");
            return Err(self.reject(seq, "add_commission_plan", err));
        };

        self.log(Event::PlanAdded {
            seq,
            plan_id,
            name,
            rate_count: rates.len(),
        });
        Ok(plan_id)
    }

    /// Append rates to the end of an existing plan's schedule
    pub fn add_rates_to_plan(&mut self, plan_id: PlanId, rates: &[f64]) -> Result<(), AgencyError> {
        let seq = self.begin_op();
        let Some(plan) = self.plans.get_mut(plan_id) else {
            let err = AgencyError::PlanNotFound(plan_id);
            return Err(self.reject(seq, "add_rates_to_plan", err));
        };

        plan.append_rates(rates);
        let rate_count = plan.rate_count();
        self.log(Event::PlanRatesAppended {
            seq,
            plan_id,
            added: rates.len(),
            rate_count,
        });
        Ok(())
    }

    /// Overwrite the rate at `index`; `index` must be below the current
    /// schedule length
    pub fn update_rate(
        &mut self,
        plan_id: PlanId,
        index: usize,
        rate: f64,
    ) -> Result<(), AgencyError> {
        let seq = self.begin_op();
        let Some(plan) = self.plans.get_mut(plan_id) else {
            return Err(self.reject(seq, "update_rate", AgencyError::PlanNotFound(plan_id)));
        };

        match plan.update_rate(index, rate) {
            Ok(()) => {
                self.log(Event::PlanRateUpdated {
                    seq,
                    plan_id,
                    index,
                    rate,
                });
                Ok(())
            }
            Err(e) => {
                let err = AgencyError::from_plan_error(plan_id, e);
                Err(self.reject(seq, "update_rate", err))
            }
        }
    }

    pub fn get_plan(&self, plan_id: PlanId) -> Option<&CommissionPlan> {
        self.plans.get(plan_id)
    }

    /// Number of rates in a plan's schedule
    pub fn rate_count(&self, plan_id: PlanId) -> Result<usize, AgencyError> {
        self.plans
            .rate_count(plan_id)
            .ok_or(AgencyError::PlanNotFound(plan_id))
    }

    /// All plans, ascending id order; use
    /// [`CommissionPlan::labeled_rates`] for role-labelled schedules
    pub fn list_plans(&self) -> impl Iterator<Item = &CommissionPlan> {
        self.plans.iter()
    }

    // ========================================================================
    // Policies
    // ========================================================================

    /// Issue a policy bound to `plan_id`
    ///
    /// # Errors
    ///
    /// * `PlanNotFound` - the plan is not registered; no policy is created
    ///   and no policy number is consumed
    /// * `IdsExhausted` - the last policy number has been issued
    pub fn create_policy(
        &mut self,
        face_value: f64,
        plan_id: PlanId,
    ) -> Result<PolicyId, AgencyError> {
        let seq = self.begin_op();
        if !self.plans.contains(plan_id) {
            return Err(self.reject(seq, "create_policy", AgencyError::PlanNotFound(plan_id)));
        }

        let Some(policy_id) = self.policies.create(face_value, plan_id) else {
            return Err(self.reject(seq, "create_policy", AgencyError::IdsExhausted("policy")));
        };
        self.log(Event::PolicyCreated {
            seq,
            policy_id,
            plan_id,
            face_value,
        });
        Ok(policy_id)
    }

    pub fn get_policy(&self, policy_id: PolicyId) -> Option<&Policy> {
        self.policies.get(policy_id)
    }

    /// All policies, ascending policy-number order
    pub fn list_policies(&self) -> impl Iterator<Item = &Policy> {
        self.policies.iter()
    }

    // ========================================================================
    // Sale Ledger
    // ========================================================================

    /// Set (or replace) the selling agent of a policy
    pub fn record_selling_agent(
        &mut self,
        policy_id: PolicyId,
        agent_id: AgentId,
    ) -> Result<(), AgencyError> {
        let seq = self.begin_op();
        if !self.policies.contains(policy_id) {
            let err = AgencyError::PolicyNotFound(policy_id);
            return Err(self.reject(seq, "record_selling_agent", err));
        }
        if !self.agents.contains(agent_id) {
            let err = AgencyError::AgentNotFound(agent_id);
            return Err(self.reject(seq, "record_selling_agent", err));
        }

        self.ledger.set_selling_agent(policy_id, agent_id);
        self.log(Event::SellingAgentRecorded {
            seq,
            policy_id,
            agent_id,
        });
        Ok(())
    }

    /// Append super agents to a policy's chain, in the order given
    ///
    /// Unregistered ids are skipped and listed in the outcome; the valid
    /// ones are still recorded.
    ///
    /// # Errors
    ///
    /// * `PolicyNotFound` - unknown policy
    /// * `NoSellingAgent` - no selling agent recorded yet; the chain stays empty
    pub fn record_super_agents(
        &mut self,
        policy_id: PolicyId,
        agent_ids: &[AgentId],
    ) -> Result<SuperAgentOutcome, AgencyError> {
        let seq = self.begin_op();
        if !self.policies.contains(policy_id) {
            let err = AgencyError::PolicyNotFound(policy_id);
            return Err(self.reject(seq, "record_super_agents", err));
        }
        if !self.ledger.has_selling_agent(policy_id) {
            let err = AgencyError::NoSellingAgent(policy_id);
            return Err(self.reject(seq, "record_super_agents", err));
        }

        let mut outcome = SuperAgentOutcome::default();
        for &agent_id in agent_ids {
            if !self.agents.contains(agent_id) {
                outcome.skipped.push(agent_id);
                self.log(Event::SuperAgentSkipped {
                    seq,
                    policy_id,
                    agent_id,
                });
                continue;
            }

            // Selling agent presence was checked above
            if let Some(position) = self.ledger.push_super_agent(policy_id, agent_id) {
                outcome.recorded.push(agent_id);
                self.log(Event::SuperAgentRecorded {
                    seq,
                    policy_id,
                    agent_id,
                    position,
                });
            }
        }
        Ok(outcome)
    }

    /// Append a policy to the sale ledger
    ///
    /// Selling the same policy again is allowed and pays it out again.
    ///
    /// # Errors
    ///
    /// `PolicyNotFound` if the policy was never created.
    pub fn record_policy_sale(&mut self, policy_id: PolicyId) -> Result<(), AgencyError> {
        let seq = self.begin_op();
        if !self.policies.contains(policy_id) {
            let err = AgencyError::PolicyNotFound(policy_id);
            return Err(self.reject(seq, "record_policy_sale", err));
        }

        self.ledger.record_sale(policy_id);
        self.log(Event::PolicySold { seq, policy_id });
        Ok(())
    }

    /// Full agent chain: selling agent first, then super agents
    pub fn agent_chain(&self, policy_id: PolicyId) -> &[AgentId] {
        self.ledger.chain(policy_id)
    }

    pub fn selling_agent(&self, policy_id: PolicyId) -> Option<AgentId> {
        self.ledger.selling_agent(policy_id)
    }

    pub fn super_agents(&self, policy_id: PolicyId) -> &[AgentId] {
        self.ledger.super_agents(policy_id)
    }

    /// Sold policy ids in sale order
    pub fn sold_policies(&self) -> &[PolicyId] {
        self.ledger.sales()
    }

    pub fn sale_count(&self) -> usize {
        self.ledger.sale_count()
    }

    // ========================================================================
    // Commission Calculation
    // ========================================================================

    /// Compute commissions for every sold policy, in sale order
    ///
    /// Never fails as a whole: an empty schedule or a removed agent only
    /// adds a notice to that policy's statement.
    pub fn calculate_commissions(&mut self) -> CommissionReport {
        let seq = self.begin_op();
        let report =
            calculate_commissions(&self.ledger, &self.agents, &self.plans, &self.policies);
        for statement in &report.statements {
            self.log_statement(seq, statement);
        }
        report
    }

    /// Compute the statement for one policy, sold or not
    ///
    /// # Errors
    ///
    /// * `PolicyNotFound` - unknown policy
    /// * `EmptySchedule` - the policy's plan has no rates
    pub fn calculate_policy_commissions(
        &mut self,
        policy_id: PolicyId,
    ) -> Result<PolicyStatement, AgencyError> {
        let seq = self.begin_op();
        let statement = policy_statement(
            policy_id,
            &self.ledger,
            &self.agents,
            &self.plans,
            &self.policies,
        );

        for notice in &statement.notices {
            let err = match notice {
                CommissionNotice::PolicyMissing => AgencyError::PolicyNotFound(policy_id),
                CommissionNotice::PlanMissing { plan_id } => AgencyError::PlanNotFound(*plan_id),
                CommissionNotice::NoRatesRecorded { plan_id } => {
                    AgencyError::EmptySchedule(*plan_id)
                }
                CommissionNotice::AgentMissing { .. } => continue,
            };
            return Err(self.reject(seq, "calculate_policy_commissions", err));
        }

        self.log_statement(seq, &statement);
        Ok(statement)
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn begin_op(&mut self) -> u64 {
        self.op_seq += 1;
        self.op_seq
    }

    fn log(&mut self, event: Event) {
        if self.config.event_logging {
            self.events.log(event);
        }
    }

    /// Log a rejected operation and hand the error back for returning
    fn reject(&mut self, seq: u64, operation: &str, err: AgencyError) -> AgencyError {
        self.log(Event::OperationRejected {
            seq,
            operation: operation.to_string(),
            reason: err.to_string(),
        });
        err
    }

    fn log_statement(&mut self, seq: u64, statement: &PolicyStatement) {
        let policy_id = statement.policy_id;
        for notice in &statement.notices {
            match notice {
                CommissionNotice::NoRatesRecorded { plan_id } => self.log(Event::NoRatesRecorded {
                    seq,
                    policy_id,
                    plan_id: *plan_id,
                }),
                CommissionNotice::AgentMissing { agent_id, position } => {
                    self.log(Event::AgentMissingFromRegistry {
                        seq,
                        policy_id,
                        agent_id: *agent_id,
                        position: *position,
                    })
                }
                CommissionNotice::PolicyMissing => self.log(Event::OperationRejected {
                    seq,
                    operation: "calculate_commissions".to_string(),
                    reason: AgencyError::PolicyNotFound(policy_id).to_string(),
                }),
                CommissionNotice::PlanMissing { plan_id } => self.log(Event::OperationRejected {
                    seq,
                    operation: "calculate_commissions".to_string(),
                    reason: AgencyError::PlanNotFound(*plan_id).to_string(),
                }),
            }
        }
        for line in &statement.lines {
            self.log(Event::CommissionCalculated {
                seq,
                policy_id,
                agent_id: line.agent_id,
                position: line.position,
                amount: line.amount,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_id_start_rejected() {
        let config = AgencyConfig {
            plan_id_start: 0,
            ..AgencyConfig::default()
        };

        let err = Agency::new(config).unwrap_err();
        assert_eq!(
            err,
            AgencyError::InvalidConfig("plan_id_start must be at least 1".to_string())
        );
    }

    #[test]
    fn test_config_ids_are_used() {
        let config = AgencyConfig {
            agent_id_start: 1,
            plan_id_start: 100,
            policy_id_start: 7,
            event_logging: true,
        };
        let mut agency = Agency::new(config).unwrap();

        assert_eq!(agency.add_agent("Bob", 0.02).unwrap(), AgentId(1));
        let plan = agency.add_commission_plan("Plan A", &[0.5]).unwrap();
        assert_eq!(plan, PlanId(100));
        assert_eq!(agency.create_policy(1.0, plan).unwrap(), PolicyId(7));
    }

    #[test]
    fn test_plan_and_policy_ids_never_wrap() {
        let config = AgencyConfig {
            plan_id_start: u32::MAX,
            policy_id_start: u32::MAX,
            ..AgencyConfig::default()
        };
        let mut agency = Agency::new(config).unwrap();

        let plan = agency.add_commission_plan("Plan A", &[0.5]).unwrap();
        assert_eq!(plan, PlanId(u32::MAX));
        assert_eq!(
            agency.add_commission_plan("Plan B", &[0.7]),
            Err(AgencyError::IdsExhausted("commission plan"))
        );

        assert_eq!(agency.create_policy(1.0, plan), Ok(PolicyId(u32::MAX)));
        assert_eq!(
            agency.create_policy(2.0, plan),
            Err(AgencyError::IdsExhausted("policy"))
        );
        assert_eq!(agency.list_policies().count(), 1);
    }

    #[test]
    fn test_event_logging_can_be_disabled() {
        let config = AgencyConfig {
            event_logging: false,
            ..AgencyConfig::default()
        };
        let mut agency = Agency::new(config).unwrap();
        agency.add_agent("Bob", 0.02).unwrap();
        let _ = agency.create_policy(1.0, PlanId(1));

        assert!(agency.event_log().is_empty());
    }

    #[test]
    fn test_events_share_operation_seq() {
        let mut agency = Agency::default();
        let plan = agency.add_commission_plan("Plan A", &[0.5]).unwrap();
        let bob = agency.add_agent("Bob", 0.02).unwrap();
        let policy = agency.create_policy(1000.0, plan).unwrap();
        agency.record_selling_agent(policy, bob).unwrap();
        agency
            .record_super_agents(policy, &[AgentId(1), AgentId(2)])
            .unwrap();

        let last_seq = agency.event_log().events().last().unwrap().seq();
        let skipped = agency.event_log().events_at_seq(last_seq);
        assert_eq!(skipped.len(), 2);
        assert!(skipped.iter().all(|e| e.event_type() == "SuperAgentSkipped"));
    }

    #[test]
    fn test_rejection_is_logged() {
        let mut agency = Agency::default();
        let err = agency.create_policy(1000.0, PlanId(4242)).unwrap_err();

        let rejected = agency.event_log().events_of_type("OperationRejected");
        assert_eq!(rejected.len(), 1);
        match rejected[0] {
            Event::OperationRejected { operation, reason, .. } => {
                assert_eq!(operation, "create_policy");
                assert_eq!(reason, &err.to_string());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AgencyError::PlanNotFound(PlanId(5009)).to_string(),
            "Invalid commission plan id specified: 5009"
        );
        assert_eq!(
            AgencyError::RateIndexOutOfRange {
                plan_id: PlanId(5001),
                index: 4,
                len: 4
            }
            .to_string(),
            "Invalid agent index to update on plan 5001: 4 (schedule has 4 rates)"
        );
    }
}
