//! Body Calculators Library
//!
//! BMI, body fat and ideal weight calculators with persisted form inputs.

pub mod build_info;
pub mod calc;
pub mod config;
pub mod db;
pub mod forms;
pub mod mcp;
pub mod models;
pub mod store;
pub mod tools;
