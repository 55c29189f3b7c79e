//! Core primitives shared by every registry
//!
//! - **ids**: Typed identifiers and the monotonic counter that issues them

pub mod ids;
