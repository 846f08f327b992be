//! Tools module
//!
//! MCP tool implementations for the body calculators.

pub mod calculators;
pub mod forms;
pub mod status;
