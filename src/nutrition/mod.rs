//! Nutrition calculation module
//!
//! Pure calculators: metabolic profile, exchange totals, meal distribution,
//! diet templates, and growth percentiles.

pub mod age;
pub mod distribution;
pub mod exchange;
pub mod growth;
mod growth_tables;
pub mod metabolic;
pub mod templates;

pub use distribution::{AllocationStatus, GroupRemainder};
pub use exchange::{compute_totals, energy_share, exchange_factors, reconcile};
pub use growth::{
    GrowthAge, GrowthSeverity, GrowthStandard, Measurement, PercentileBand, PercentileClassification,
};
pub use metabolic::{BmiClass, MetabolicResult, WeightLossSeverity};
pub use templates::{DietTemplateRow, DietType, MacroDistribution};
