//! DietKit Tools module
//!
//! MCP tool implementations for the DietKit service.

pub mod calculators;
pub mod plans;
pub mod status;
