//! Demo scenario definition
//!
//! A scenario names plans and agents and refers to them by name when it
//! issues policies, so a JSON file never has to guess the ids the agency
//! will hand out.

use commission_ledger_core::{Agency, AgencyConfig, AgencyError, AgentId, PlanId, PolicyId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEntry {
    pub name: String,
    #[serde(default)]
    pub rates: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEntry {
    pub name: String,
    pub commission_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyEntry {
    pub face_value: f64,
    /// Plan name
    pub plan: String,
    /// Agent name
    pub selling_agent: Option<String>,
    #[serde(default)]
    pub super_agents: Vec<String>,
    #[serde(default = "default_sold")]
    pub sold: bool,
}

fn default_sold() -> bool {
    true
}

/// Complete demo scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: AgencyConfig,
    pub plans: Vec<PlanEntry>,
    pub agents: Vec<AgentEntry>,
    pub policies: Vec<PolicyEntry>,
}

impl Scenario {
    /// Three plans, six agents, three policies
    pub fn builtin() -> Self {
        let plan = |name: &str, rates: &[f64]| PlanEntry {
            name: name.to_string(),
            rates: rates.to_vec(),
        };
        let agent = |name: &str, commission_rate: f64| AgentEntry {
            name: name.to_string(),
            commission_rate,
        };
        let policy = |face_value: f64, plan: &str, selling: &str, supers: &[&str]| PolicyEntry {
            face_value,
            plan: plan.to_string(),
            selling_agent: Some(selling.to_string()),
            super_agents: supers.iter().map(|s| s.to_string()).collect(),
            sold: true,
        };

        Scenario {
            config: AgencyConfig::default(),
            plans: vec![
                plan("Plan A", &[0.50, 0.05, 0.0, 0.0]),
                plan("Plan B", &[0.70, 0.08, 0.04, 0.0]),
                plan("Plan C", &[0.4, 0.08, 0.02, 0.015]),
            ],
            agents: vec![
                agent("Bob", 0.02),
                agent("Janet", 0.025),
                agent("Peter", 0.0325),
                agent("Fiona", 0.0225),
                agent("Lisa", 0.045),
                agent("Tony", 0.05),
            ],
            policies: vec![
                policy(100_000.0, "Plan A", "Bob", &["Janet", "Peter", "Fiona"]),
                policy(100_000.0, "Plan B", "Bob", &["Janet", "Peter", "Fiona"]),
                policy(
                    250_000.0,
                    "Plan C",
                    "Lisa",
                    &["Tony", "Bob", "Janet", "Fiona", "Peter"],
                ),
            ],
        }
    }
}

/// Problem found while loading a scenario into the agency
#[derive(Debug)]
pub enum SetupIssue {
    UnknownPlan(String),
    UnknownAgent(String),
    Rejected(AgencyError),
}

impl std::fmt::Display for SetupIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupIssue::UnknownPlan(name) => write!(f, "Unknown commission plan: {}", name),
            SetupIssue::UnknownAgent(name) => write!(f, "Unknown agent: {}", name),
            SetupIssue::Rejected(err) => write!(f, "{}", err),
        }
    }
}

impl From<AgencyError> for SetupIssue {
    fn from(err: AgencyError) -> Self {
        SetupIssue::Rejected(err)
    }
}

/// Agency built from a scenario plus the name → id maps used to build it
pub struct LoadedScenario {
    pub agency: Agency,
    pub plans: HashMap<String, PlanId>,
    pub agents: HashMap<String, AgentId>,
    pub policies: Vec<PolicyId>,
    pub issues: Vec<SetupIssue>,
}

impl LoadedScenario {
    /// Register everything the scenario declares
    ///
    /// Bad references are collected in `issues`; the rest of the scenario
    /// still loads.
    pub fn load(scenario: &Scenario) -> Result<Self, AgencyError> {
        let mut loaded = LoadedScenario {
            agency: Agency::new(scenario.config.clone())?,
            plans: HashMap::new(),
            agents: HashMap::new(),
            policies: Vec::new(),
            issues: Vec::new(),
        };

        for plan in &scenario.plans {
            match loaded.agency.add_commission_plan(plan.name.as_str(), &plan.rates) {
                Ok(id) => {
                    loaded.plans.insert(plan.name.clone(), id);
                }
                Err(err) => loaded.issues.push(err.into()),
            }
        }
        for agent in &scenario.agents {
            match loaded.agency.add_agent(agent.name.as_str(), agent.commission_rate) {
                Ok(id) => {
                    loaded.agents.insert(agent.name.clone(), id);
                }
                Err(err) => loaded.issues.push(err.into()),
            }
        }

        let mut sales = Vec::new();
        for entry in &scenario.policies {
            match loaded.issue_policy(entry) {
                Ok(policy_id) if entry.sold => sales.push(policy_id),
                Ok(_) => {}
                Err(issue) => loaded.issues.push(issue),
            }
        }

        for policy_id in sales {
            if let Err(err) = loaded.agency.record_policy_sale(policy_id) {
                loaded.issues.push(err.into());
            }
        }

        Ok(loaded)
    }

    /// Issue one policy; every name is resolved before the policy exists
    ///
    /// An unknown plan or selling agent leaves no policy behind. Unknown
    /// super agent names are reported and left out of the chain.
    fn issue_policy(&mut self, entry: &PolicyEntry) -> Result<PolicyId, SetupIssue> {
        let plan_id = *self
            .plans
            .get(&entry.plan)
            .ok_or_else(|| SetupIssue::UnknownPlan(entry.plan.clone()))?;
        let selling_id = match &entry.selling_agent {
            Some(name) => Some(self.agent_id(name)?),
            None => None,
        };

        let mut super_ids = Vec::with_capacity(entry.super_agents.len());
        for name in &entry.super_agents {
            match self.agent_id(name) {
                Ok(id) => super_ids.push(id),
                Err(issue) => self.issues.push(issue),
            }
        }

        let policy_id = self.agency.create_policy(entry.face_value, plan_id)?;
        self.policies.push(policy_id);

        if let Some(agent_id) = selling_id {
            self.agency.record_selling_agent(policy_id, agent_id)?;
        }
        if !super_ids.is_empty() {
            // Skipped ids show up as SuperAgentSkipped warnings in the event log
            self.agency.record_super_agents(policy_id, &super_ids)?;
        }

        Ok(policy_id)
    }

    fn agent_id(&self, name: &str) -> Result<AgentId, SetupIssue> {
        self.agents
            .get(name)
            .copied()
            .ok_or_else(|| SetupIssue::UnknownAgent(name.to_string()))
    }
}
