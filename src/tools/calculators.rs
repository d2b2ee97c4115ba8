//! Calculator MCP Tools
//!
//! Tools for the metabolic profile, exchange totals, meal distribution check,
//! diet templates and growth percentiles. Enumerated fields arrive as strings
//! and are parsed here; unknown values are rejected with a message.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::models::{
    Achievement, AnthropometricInput, ChangeDuration, EnergyShare, FluidGrade, FoodExchangeGroup,
    Gender, MacroTargets, MacroTotals, MealDistribution, MealSlot, PhysicalActivity, ServingPlan,
    ServingPlanRecord, TargetMode, TargetSpec,
};
use crate::nutrition::{
    age, distribution, exchange, growth, metabolic, templates, AllocationStatus, GroupRemainder,
    MetabolicResult, PercentileClassification,
};

// ============================================================================
// Shared inputs
// ============================================================================

/// Per-macro targets (grams or percent of energy, depending on the mode)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MacroTargetInput {
    #[serde(default)]
    pub cho: f64,
    #[serde(default)]
    pub pro: f64,
    #[serde(default)]
    pub fat: f64,
}

impl From<MacroTargetInput> for MacroTargets {
    fn from(t: MacroTargetInput) -> Self {
        MacroTargets {
            cho: t.cho,
            pro: t.pro,
            fat: t.fat,
        }
    }
}

impl From<MacroTargets> for MacroTargetInput {
    fn from(t: MacroTargets) -> Self {
        MacroTargetInput {
            cho: t.cho,
            pro: t.pro,
            fat: t.fat,
        }
    }
}

/// Planner state as sent by a client
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct PlanInput {
    /// Servings per exchange group, e.g. {"starch": 6, "meat_lean": 4, "fats": 3}
    #[serde(default)]
    pub servings: BTreeMap<String, f64>,
    /// Plan fats by sub-type (fats_sat, fats_mufa, fats_pufa) instead of the aggregate
    #[serde(default)]
    pub fat_breakdown: bool,
    /// Servings per group per meal slot, e.g. {"starch": {"breakfast": 2, "lunch": 2}}
    #[serde(default)]
    pub distribution: BTreeMap<String, BTreeMap<String, f64>>,
    /// Daily energy target (kcal)
    #[serde(default)]
    pub target_kcal: f64,
    /// Target mode: none, grams, or percent (default: none)
    #[serde(default)]
    pub target_mode: Option<String>,
    /// Manual gram targets, used in grams mode
    #[serde(default)]
    pub gram_targets: MacroTargetInput,
    /// Manual percent-of-energy targets, used in percent mode
    #[serde(default)]
    pub percent_targets: MacroTargetInput,
}

impl PlanInput {
    pub fn serving_plan(&self) -> Result<ServingPlan, String> {
        parse_serving_plan(&self.servings, self.fat_breakdown)
    }

    pub fn meal_distribution(&self) -> Result<MealDistribution, String> {
        parse_distribution(&self.distribution)
    }

    pub fn target_spec(&self) -> Result<TargetSpec, String> {
        let mode = match self.target_mode.as_deref() {
            Some(s) => TargetMode::from_str(s).ok_or_else(|| format!("Unknown target mode: {}", s))?,
            None => TargetMode::None,
        };
        Ok(TargetSpec {
            target_kcal: self.target_kcal,
            mode,
            manual_grams: self.gram_targets.into(),
            manual_percent: self.percent_targets.into(),
        })
    }
}

pub fn parse_group(s: &str) -> Result<FoodExchangeGroup, String> {
    FoodExchangeGroup::from_str(s).ok_or_else(|| {
        tracing::warn!(group = s, "Rejected unknown exchange group");
        format!("Unknown exchange group: {}", s)
    })
}

pub fn parse_slot(s: &str) -> Result<MealSlot, String> {
    MealSlot::from_str(s).ok_or_else(|| format!("Unknown meal slot: {}", s))
}

/// Build a plan in the caller's fat mode; entries of the other mode are ignored
pub fn parse_serving_plan(servings: &BTreeMap<String, f64>, fat_breakdown: bool) -> Result<ServingPlan, String> {
    let servings: BTreeMap<FoodExchangeGroup, f64> = servings
        .iter()
        .map(|(name, count)| Ok((parse_group(name)?, *count)))
        .collect::<Result<_, String>>()?;
    Ok(ServingPlan::from(ServingPlanRecord {
        servings,
        fat_breakdown,
    }))
}

pub fn parse_distribution(raw: &BTreeMap<String, BTreeMap<String, f64>>) -> Result<MealDistribution, String> {
    let mut dist = MealDistribution::new();
    for (group_name, slots) in raw {
        let group = parse_group(group_name)?;
        for (slot_name, count) in slots {
            dist.set(group, parse_slot(slot_name)?, *count);
        }
    }
    Ok(dist)
}

fn parse_gender(s: &str) -> Result<Gender, String> {
    Gender::from_str(s).ok_or_else(|| format!("Unknown gender: {}. Use male or female", s))
}

fn parse_iso_date(field: &str, s: &str) -> Result<NaiveDate, String> {
    age::parse_date(s).ok_or_else(|| format!("Invalid {}: {}. Use YYYY-MM-DD", field, s))
}

/// Completed age from a date of birth to `as_of` (today when omitted)
fn age_from_dob(date_of_birth: &str, as_of: Option<&str>) -> Result<age::AgeOnDate, String> {
    let dob = parse_iso_date("date_of_birth", date_of_birth)?;
    let as_of = match as_of {
        Some(s) => parse_iso_date("as_of", s)?,
        None => chrono::Local::now().date_naive(),
    };
    age::age_on(dob, as_of).ok_or_else(|| {
        tracing::warn!(%dob, %as_of, "Rejected birth date after reference date");
        format!("Date of birth {} is after {}", dob, as_of)
    })
}

// ============================================================================
// Metabolic profile
// ============================================================================

fn default_activity() -> String {
    "sedentary".to_string()
}

fn default_none() -> String {
    "none".to_string()
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct MetabolicProfileRequest {
    /// male or female
    pub gender: String,
    /// Age in completed years. Derived from date_of_birth when omitted
    pub age_years: Option<u32>,
    /// Date of birth (YYYY-MM-DD), used when age_years is omitted
    pub date_of_birth: Option<String>,
    /// Reference date for date_of_birth (YYYY-MM-DD, default: today)
    pub as_of: Option<String>,
    pub height_cm: f64,
    pub current_weight_kg: f64,
    /// Weight used for the "selected" BMI and energy results (default: current weight)
    pub selected_weight_kg: Option<f64>,
    /// Usual weight before the recent change (0 or omitted: no weight-loss figure)
    #[serde(default)]
    pub usual_weight_kg: f64,
    pub waist_cm: Option<f64>,
    pub hip_cm: Option<f64>,
    /// Mid-arm circumference (cm)
    pub mac_cm: Option<f64>,
    /// Triceps skinfold (cm)
    pub tsf_cm: Option<f64>,
    /// sedentary, lightly_active, moderately_active, very_active, extra_active (default: sedentary)
    #[serde(default = "default_activity")]
    pub physical_activity: String,
    /// Period of the weight change: none, 1-week, 1-month, 3-months, 6-months (default: none)
    #[serde(default = "default_none")]
    pub change_duration: String,
    /// Ascites grade: none, mild, moderate, severe (default: none)
    #[serde(default = "default_none")]
    pub ascites: String,
    /// Peripheral edema grade: none, mild, moderate, severe (default: none)
    #[serde(default = "default_none")]
    pub edema: String,
    /// Planned energy deficit (kcal/day)
    #[serde(default)]
    pub deficit_kcal: f64,
}

impl MetabolicProfileRequest {
    pub fn to_input(&self) -> Result<AnthropometricInput, String> {
        let gender = parse_gender(&self.gender)?;
        let age_years = match (self.age_years, self.date_of_birth.as_deref()) {
            (Some(years), _) => years,
            (None, Some(dob)) => age_from_dob(dob, self.as_of.as_deref())?.years,
            (None, None) => return Err("Either age_years or date_of_birth is required".to_string()),
        };
        let physical_activity = PhysicalActivity::from_str(&self.physical_activity)
            .ok_or_else(|| format!("Unknown physical activity: {}", self.physical_activity))?;
        let change_duration = ChangeDuration::from_str(&self.change_duration)
            .ok_or_else(|| format!("Unknown change duration: {}", self.change_duration))?;
        let ascites = FluidGrade::from_str(&self.ascites)
            .ok_or_else(|| format!("Unknown ascites grade: {}", self.ascites))?;
        let edema = FluidGrade::from_str(&self.edema)
            .ok_or_else(|| format!("Unknown edema grade: {}", self.edema))?;

        Ok(AnthropometricInput {
            selected_weight_kg: self.selected_weight_kg.unwrap_or(self.current_weight_kg),
            usual_weight_kg: self.usual_weight_kg,
            waist_cm: self.waist_cm,
            hip_cm: self.hip_cm,
            mac_cm: self.mac_cm,
            tsf_cm: self.tsf_cm,
            physical_activity,
            change_duration,
            ascites,
            edema,
            deficit_kcal: self.deficit_kcal,
            ..AnthropometricInput::new(gender, age_years, self.height_cm, self.current_weight_kg)
        })
    }
}

/// Response for compute_metabolic_profile
#[derive(Debug, Serialize)]
pub struct MetabolicProfileResponse {
    pub input: AnthropometricInput,
    pub activity_multiplier: f64,
    #[serde(flatten)]
    pub result: MetabolicResult,
}

pub fn compute_metabolic_profile(req: &MetabolicProfileRequest) -> Result<MetabolicProfileResponse, String> {
    let input = req.to_input()?;
    let result = metabolic::compute(&input);
    Ok(MetabolicProfileResponse {
        activity_multiplier: input.physical_activity.multiplier(),
        input,
        result,
    })
}

// ============================================================================
// Exchange totals
// ============================================================================

/// Response for compute_exchange_totals
#[derive(Debug, Serialize)]
pub struct ExchangeTotalsResponse {
    pub fat_breakdown: bool,
    /// Servings that count toward the totals under the plan's fat mode
    pub servings: BTreeMap<FoodExchangeGroup, f64>,
    pub totals: MacroTotals,
    pub energy_share: EnergyShare,
    pub target_kcal: f64,
    pub target_mode: TargetMode,
    pub gram_targets: MacroTargets,
    pub achievement: Achievement,
}

pub fn exchange_summary(plan: &ServingPlan, targets: &TargetSpec) -> ExchangeTotalsResponse {
    let totals = exchange::compute_totals(plan);
    ExchangeTotalsResponse {
        fat_breakdown: plan.is_fat_breakdown(),
        servings: plan.active_entries().collect(),
        energy_share: exchange::energy_share(&totals),
        target_kcal: targets.target_kcal,
        target_mode: targets.mode,
        gram_targets: exchange::gram_targets(targets),
        achievement: exchange::reconcile(&totals, targets),
        totals,
    }
}

pub fn compute_exchange_totals(input: &PlanInput) -> Result<ExchangeTotalsResponse, String> {
    let plan = input.serving_plan()?;
    let targets = input.target_spec()?;
    Ok(exchange_summary(&plan, &targets))
}

// ============================================================================
// Meal distribution
// ============================================================================

/// Response for check_meal_distribution
#[derive(Debug, Serialize)]
pub struct DistributionCheckResponse {
    pub fat_breakdown: bool,
    pub groups: BTreeMap<FoodExchangeGroup, GroupRemainder>,
    pub over_allocated: Vec<FoodExchangeGroup>,
    pub fully_allocated: bool,
    pub slot_totals: BTreeMap<MealSlot, MacroTotals>,
}

pub fn distribution_summary(plan: &ServingPlan, dist: &MealDistribution) -> DistributionCheckResponse {
    let groups = distribution::check(plan, dist);
    let over_allocated = groups
        .iter()
        .filter(|(_, row)| row.status == AllocationStatus::OverAllocated)
        .map(|(group, _)| *group)
        .collect();
    let fully_allocated = groups.values().all(|row| row.status == AllocationStatus::Exact);
    DistributionCheckResponse {
        fat_breakdown: plan.is_fat_breakdown(),
        slot_totals: distribution::slot_totals(plan, dist),
        groups,
        over_allocated,
        fully_allocated,
    }
}

pub fn check_meal_distribution(input: &PlanInput) -> Result<DistributionCheckResponse, String> {
    let plan = input.serving_plan()?;
    let dist = input.meal_distribution()?;
    Ok(distribution_summary(&plan, &dist))
}

// ============================================================================
// Diet templates
// ============================================================================

#[derive(Debug, Serialize)]
pub struct DistributionSummary {
    pub id: &'static str,
    pub cho_percent: f64,
    pub pro_percent: f64,
    pub fat_percent: f64,
    pub energy_tiers: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct DietTypeSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub distributions: Vec<DistributionSummary>,
}

/// Response for list_diet_templates
#[derive(Debug, Serialize)]
pub struct ListDietTemplatesResponse {
    pub diet_types: Vec<DietTypeSummary>,
}

pub fn list_diet_templates() -> ListDietTemplatesResponse {
    let diet_types = templates::CATALOG
        .iter()
        .map(|diet| DietTypeSummary {
            id: diet.id,
            name: diet.name,
            distributions: diet
                .distributions
                .iter()
                .map(|d| DistributionSummary {
                    id: d.id,
                    cho_percent: d.cho_percent,
                    pro_percent: d.pro_percent,
                    fat_percent: d.fat_percent,
                    energy_tiers: d.tiers(),
                })
                .collect(),
        })
        .collect();
    ListDietTemplatesResponse { diet_types }
}

/// Response for apply_diet_template
#[derive(Debug, Serialize)]
pub struct AppliedTemplateResponse {
    pub diet_type: &'static str,
    pub distribution: &'static str,
    pub energy_tier: u32,
    #[serde(flatten)]
    pub summary: ExchangeTotalsResponse,
}

/// Apply a catalog row; `None` when the combination or tier is not in the catalog
pub fn apply_diet_template(diet_type: &str, distribution_id: &str, energy_tier: u32) -> Option<AppliedTemplateResponse> {
    let templates::TemplateMatch {
        diet,
        distribution: dist,
        row,
    } = templates::lookup(diet_type, distribution_id, energy_tier)?;

    let plan = templates::apply(row);
    let targets = TargetSpec {
        target_kcal: f64::from(row.energy_tier),
        mode: TargetMode::Percent,
        manual_grams: MacroTargets::default(),
        manual_percent: MacroTargets {
            cho: dist.cho_percent,
            pro: dist.pro_percent,
            fat: dist.fat_percent,
        },
    };

    Some(AppliedTemplateResponse {
        diet_type: diet.id,
        distribution: dist.id,
        energy_tier: row.energy_tier,
        summary: exchange_summary(&plan, &targets),
    })
}

// ============================================================================
// Growth percentiles
// ============================================================================

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct GrowthRequest {
    /// who or cdc
    pub standard: String,
    /// weight_for_age, height_for_age (length/stature), or bmi_for_age
    pub measurement: String,
    /// male or female
    pub gender: String,
    /// Age in months (takes precedence over age_years and date_of_birth)
    pub age_months: Option<f64>,
    /// Age in years
    pub age_years: Option<f64>,
    /// Date of birth (YYYY-MM-DD), used when no age is given
    pub date_of_birth: Option<String>,
    /// Reference date for date_of_birth (YYYY-MM-DD, default: today)
    pub as_of: Option<String>,
    /// Measured value: kg, cm or kg/m2 depending on the measurement
    pub value: f64,
}

/// Response for classify_growth
#[derive(Debug, Serialize)]
pub struct GrowthResponse {
    pub standard: growth::GrowthStandard,
    pub measurement: growth::Measurement,
    pub unit: &'static str,
    pub gender: Gender,
    pub age_months: f64,
    /// Age in the unit of the matched table's rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_age_unit: Option<&'static str>,
    pub value: f64,
    /// False when no reference table covers the age
    pub available: bool,
    pub percentile: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<PercentileClassification>,
}

pub fn classify_growth(req: &GrowthRequest) -> Result<GrowthResponse, String> {
    let standard = growth::GrowthStandard::from_str(&req.standard)
        .ok_or_else(|| format!("Unknown growth standard: {}. Use who or cdc", req.standard))?;
    let measurement = growth::Measurement::from_str(&req.measurement)
        .ok_or_else(|| format!("Unknown measurement: {}", req.measurement))?;
    let gender = parse_gender(&req.gender)?;

    let age = match (req.age_months, req.age_years, req.date_of_birth.as_deref()) {
        (Some(months), _, _) => growth::GrowthAge::Months(months),
        (None, Some(years), _) => growth::GrowthAge::Years(years),
        (None, None, Some(dob)) => {
            growth::GrowthAge::Months(f64::from(age_from_dob(dob, req.as_of.as_deref())?.months))
        }
        (None, None, None) => {
            return Err("One of age_months, age_years or date_of_birth is required".to_string())
        }
    };

    let classification = growth::classify(standard, measurement, gender, age, req.value);
    Ok(GrowthResponse {
        standard,
        measurement,
        unit: measurement.unit(),
        gender,
        age_months: age.in_months(),
        table_age: classification.map(|c| c.bucket.table_age(age.in_months())),
        table_age_unit: classification.map(|c| c.bucket.age_unit()),
        value: req.value,
        available: classification.is_some(),
        percentile: classification.map(|c| c.band.label()),
        classification,
    })
}
