//! Data models
//!
//! Caller-owned planner state, clinical inputs, and the persisted plan record.

mod anthropometrics;
mod exchange;
mod meal;
mod plan_record;
mod targets;

pub use anthropometrics::{AnthropometricInput, ChangeDuration, FluidGrade, Gender, PhysicalActivity};
pub use exchange::{
    ExchangeFactors, FatRepresentation, FoodExchangeGroup, ServingPlan, ServingPlanRecord,
};
pub use meal::{MealDistribution, MealSlot};
pub use plan_record::{PlanRecord, PlanRecordCreate, PlanRecordSummary, PlanState, ToolType};
pub use targets::{
    Achievement, EnergyShare, FatSubtypeEnergy, MacroTargets, MacroTotals, TargetMode, TargetSpec,
};
