//! Python bindings (feature `pyo3`)
//!
//! - **agency**: `Agency` Python class wrapping the Rust agency
//! - **types**: Conversions from report types to Python dicts

pub mod agency;
pub mod types;
