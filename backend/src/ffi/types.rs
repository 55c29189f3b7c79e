//! Type conversions between Rust and Python
//!
//! Report values cross the boundary as plain dicts so Python callers need
//! no extra classes.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::ledger::{CommissionLine, CommissionNotice, CommissionReport, PolicyStatement};
use crate::orchestrator::AgencyError;

impl From<AgencyError> for PyErr {
    fn from(err: AgencyError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Convert one commission line to a Python dict
pub fn commission_line_to_py(py: Python, line: &CommissionLine) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);

    dict.set_item("policy_id", line.policy_id.0)?;
    dict.set_item("position", line.position)?;
    dict.set_item("role", line.role.to_string())?;
    dict.set_item("agent_id", line.agent_id.0)?;
    dict.set_item("agent_name", &line.agent_name)?;
    dict.set_item("plan_rate", line.plan_rate)?;
    dict.set_item("agent_rate", line.agent_rate)?;
    dict.set_item("amount", line.amount)?;

    Ok(dict.unbind())
}

fn notice_to_py(py: Python, notice: &CommissionNotice) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);

    match notice {
        CommissionNotice::NoRatesRecorded { plan_id } => {
            dict.set_item("kind", "no_rates_recorded")?;
            dict.set_item("plan_id", plan_id.0)?;
        }
        CommissionNotice::AgentMissing { agent_id, position } => {
            dict.set_item("kind", "agent_missing")?;
            dict.set_item("agent_id", agent_id.0)?;
            dict.set_item("position", *position)?;
        }
        CommissionNotice::PolicyMissing => {
            dict.set_item("kind", "policy_missing")?;
        }
        CommissionNotice::PlanMissing { plan_id } => {
            dict.set_item("kind", "plan_missing")?;
            dict.set_item("plan_id", plan_id.0)?;
        }
    }

    Ok(dict.unbind())
}

/// Convert a policy statement to a Python dict
pub fn statement_to_py(py: Python, statement: &PolicyStatement) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);

    dict.set_item("policy_id", statement.policy_id.0)?;
    dict.set_item("plan_id", statement.plan_id.map(|p| p.0))?;
    dict.set_item("face_value", statement.face_value)?;
    dict.set_item("total", statement.total())?;

    let lines = PyList::empty_bound(py);
    for line in &statement.lines {
        lines.append(commission_line_to_py(py, line)?)?;
    }
    dict.set_item("lines", lines)?;

    let notices = PyList::empty_bound(py);
    for notice in &statement.notices {
        notices.append(notice_to_py(py, notice)?)?;
    }
    dict.set_item("notices", notices)?;

    Ok(dict.unbind())
}

/// Convert a full report to a list of statement dicts (ledger order)
pub fn report_to_py(py: Python, report: &CommissionReport) -> PyResult<Py<PyList>> {
    let list = PyList::empty_bound(py);
    for statement in &report.statements {
        list.append(statement_to_py(py, statement)?)?;
    }
    Ok(list.unbind())
}
