//! PyO3 wrapper for Agency
//!
//! This module provides the Python interface to the Rust agency.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{report_to_py, statement_to_py};
use crate::core::ids::{AgentId, PlanId, PolicyId};
use crate::orchestrator::{Agency as RustAgency, AgencyConfig};

/// Python wrapper for Rust Agency
///
/// Ids cross the boundary as plain integers.
///
/// # Example (from Python)
///
/// ```python
/// from commission_ledger_core import Agency
///
/// agency = Agency()
/// plan = agency.add_commission_plan("Plan A", [0.50, 0.05])
/// bob = agency.add_agent("Bob", 0.02)
/// policy = agency.create_policy(100000.0, plan)
/// agency.record_selling_agent(policy, bob)
/// agency.record_policy_sale(policy)
/// for statement in agency.calculate_commissions():
///     print(statement["policy_id"], statement["total"])
/// ```
#[pyclass(name = "Agency")]
pub struct PyAgency {
    inner: RustAgency,
}

#[pymethods]
impl PyAgency {
    /// Create an agency; id starts default to 1001 / 5001 / 8001
    #[new]
    #[pyo3(signature = (agent_id_start=1001, plan_id_start=5001, policy_id_start=8001))]
    fn new(agent_id_start: u32, plan_id_start: u32, policy_id_start: u32) -> PyResult<Self> {
        let config = AgencyConfig {
            agent_id_start,
            plan_id_start,
            policy_id_start,
            ..AgencyConfig::default()
        };
        Ok(PyAgency {
            inner: RustAgency::new(config)?,
        })
    }

    fn add_agent(&mut self, name: String, commission_rate: f64) -> PyResult<u32> {
        Ok(self.inner.add_agent(name, commission_rate)?.0)
    }

    fn remove_agent(&mut self, agent_id: u32) -> bool {
        self.inner.remove_agent(AgentId(agent_id))
    }

    fn update_agent_rate(&mut self, agent_id: u32, rate: f64) -> PyResult<()> {
        Ok(self.inner.update_agent_rate(AgentId(agent_id), rate)?)
    }

    fn add_commission_plan(&mut self, name: String, rates: Vec<f64>) -> PyResult<u32> {
        Ok(self.inner.add_commission_plan(name, &rates)?.0)
    }

    fn add_rates_to_plan(&mut self, plan_id: u32, rates: Vec<f64>) -> PyResult<()> {
        Ok(self.inner.add_rates_to_plan(PlanId(plan_id), &rates)?)
    }

    fn update_rate(&mut self, plan_id: u32, index: usize, rate: f64) -> PyResult<()> {
        Ok(self.inner.update_rate(PlanId(plan_id), index, rate)?)
    }

    fn rate_count(&self, plan_id: u32) -> PyResult<usize> {
        Ok(self.inner.rate_count(PlanId(plan_id))?)
    }

    fn create_policy(&mut self, face_value: f64, plan_id: u32) -> PyResult<u32> {
        Ok(self.inner.create_policy(face_value, PlanId(plan_id))?.0)
    }

    fn record_selling_agent(&mut self, policy_id: u32, agent_id: u32) -> PyResult<()> {
        Ok(self
            .inner
            .record_selling_agent(PolicyId(policy_id), AgentId(agent_id))?)
    }

    /// Record super agents; returns the ids that were skipped as unknown
    fn record_super_agents(&mut self, policy_id: u32, agent_ids: Vec<u32>) -> PyResult<Vec<u32>> {
        let ids: Vec<AgentId> = agent_ids.into_iter().map(AgentId).collect();
        let outcome = self.inner.record_super_agents(PolicyId(policy_id), &ids)?;
        Ok(outcome.skipped.into_iter().map(|id| id.0).collect())
    }

    fn record_policy_sale(&mut self, policy_id: u32) -> PyResult<()> {
        Ok(self.inner.record_policy_sale(PolicyId(policy_id))?)
    }

    fn agent_chain(&self, policy_id: u32) -> Vec<u32> {
        self.inner
            .agent_chain(PolicyId(policy_id))
            .iter()
            .map(|id| id.0)
            .collect()
    }

    /// Run the commission pass; returns one dict per ledger entry
    fn calculate_commissions(&mut self, py: Python) -> PyResult<Py<PyList>> {
        let report = self.inner.calculate_commissions();
        report_to_py(py, &report)
    }

    fn calculate_policy_commissions(
        &mut self,
        py: Python,
        policy_id: u32,
    ) -> PyResult<Py<PyDict>> {
        let statement = self.inner.calculate_policy_commissions(PolicyId(policy_id))?;
        statement_to_py(py, &statement)
    }
}
