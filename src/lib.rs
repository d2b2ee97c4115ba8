//! DietKit Library
//!
//! Clinical nutrition calculations and exchange-based meal planning.

pub mod build_info;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
