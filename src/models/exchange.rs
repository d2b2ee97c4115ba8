//! Food exchange groups and serving plans
//!
//! A serving plan is the day's target number of exchanges per food group.
//! Fat exchanges are either planned as a single aggregate or split into
//! saturated / MUFA / PUFA sub-types, never both at once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Food exchange group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodExchangeGroup {
    Starch,
    Veg,
    Fruit,
    Legumes,
    Sugar,
    MeatLean,
    MeatMed,
    MeatHigh,
    MilkSkim,
    MilkLow,
    MilkWhole,
    Fats,
    FatsSat,
    FatsMufa,
    FatsPufa,
}

impl FoodExchangeGroup {
    /// Every group, in display order
    pub const ALL: [FoodExchangeGroup; 15] = [
        FoodExchangeGroup::Starch,
        FoodExchangeGroup::Veg,
        FoodExchangeGroup::Fruit,
        FoodExchangeGroup::Legumes,
        FoodExchangeGroup::Sugar,
        FoodExchangeGroup::MeatLean,
        FoodExchangeGroup::MeatMed,
        FoodExchangeGroup::MeatHigh,
        FoodExchangeGroup::MilkSkim,
        FoodExchangeGroup::MilkLow,
        FoodExchangeGroup::MilkWhole,
        FoodExchangeGroup::Fats,
        FoodExchangeGroup::FatsSat,
        FoodExchangeGroup::FatsMufa,
        FoodExchangeGroup::FatsPufa,
    ];

    /// The three fat sub-types used in breakdown mode
    pub const FAT_SUBTYPES: [FoodExchangeGroup; 3] = [
        FoodExchangeGroup::FatsSat,
        FoodExchangeGroup::FatsMufa,
        FoodExchangeGroup::FatsPufa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodExchangeGroup::Starch => "starch",
            FoodExchangeGroup::Veg => "veg",
            FoodExchangeGroup::Fruit => "fruit",
            FoodExchangeGroup::Legumes => "legumes",
            FoodExchangeGroup::Sugar => "sugar",
            FoodExchangeGroup::MeatLean => "meat_lean",
            FoodExchangeGroup::MeatMed => "meat_med",
            FoodExchangeGroup::MeatHigh => "meat_high",
            FoodExchangeGroup::MilkSkim => "milk_skim",
            FoodExchangeGroup::MilkLow => "milk_low",
            FoodExchangeGroup::MilkWhole => "milk_whole",
            FoodExchangeGroup::Fats => "fats",
            FoodExchangeGroup::FatsSat => "fats_sat",
            FoodExchangeGroup::FatsMufa => "fats_mufa",
            FoodExchangeGroup::FatsPufa => "fats_pufa",
        }
    }

    /// Parse a group name; accepts snake_case, kebab-case and camelCase
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "starch" | "starches" => Some(FoodExchangeGroup::Starch),
            "veg" | "vegetable" | "vegetables" => Some(FoodExchangeGroup::Veg),
            "fruit" | "fruits" => Some(FoodExchangeGroup::Fruit),
            "legumes" | "legume" => Some(FoodExchangeGroup::Legumes),
            "sugar" | "sugars" => Some(FoodExchangeGroup::Sugar),
            "meatlean" => Some(FoodExchangeGroup::MeatLean),
            "meatmed" | "meatmedium" => Some(FoodExchangeGroup::MeatMed),
            "meathigh" => Some(FoodExchangeGroup::MeatHigh),
            "milkskim" => Some(FoodExchangeGroup::MilkSkim),
            "milklow" => Some(FoodExchangeGroup::MilkLow),
            "milkwhole" => Some(FoodExchangeGroup::MilkWhole),
            "fats" | "fat" => Some(FoodExchangeGroup::Fats),
            "fatssat" => Some(FoodExchangeGroup::FatsSat),
            "fatsmufa" => Some(FoodExchangeGroup::FatsMufa),
            "fatspufa" => Some(FoodExchangeGroup::FatsPufa),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FoodExchangeGroup::Starch => "Starch",
            FoodExchangeGroup::Veg => "Vegetables",
            FoodExchangeGroup::Fruit => "Fruit",
            FoodExchangeGroup::Legumes => "Legumes",
            FoodExchangeGroup::Sugar => "Sugar",
            FoodExchangeGroup::MeatLean => "Meat (lean)",
            FoodExchangeGroup::MeatMed => "Meat (medium fat)",
            FoodExchangeGroup::MeatHigh => "Meat (high fat)",
            FoodExchangeGroup::MilkSkim => "Milk (skim)",
            FoodExchangeGroup::MilkLow => "Milk (low fat)",
            FoodExchangeGroup::MilkWhole => "Milk (whole)",
            FoodExchangeGroup::Fats => "Fats",
            FoodExchangeGroup::FatsSat => "Fats (saturated)",
            FoodExchangeGroup::FatsMufa => "Fats (MUFA)",
            FoodExchangeGroup::FatsPufa => "Fats (PUFA)",
        }
    }

    pub fn is_fat_subtype(&self) -> bool {
        matches!(
            self,
            FoodExchangeGroup::FatsSat | FoodExchangeGroup::FatsMufa | FoodExchangeGroup::FatsPufa
        )
    }

    /// Fat aggregate or one of its sub-types
    pub fn is_fat(&self) -> bool {
        *self == FoodExchangeGroup::Fats || self.is_fat_subtype()
    }

    /// Groups that carry a value under the given fat mode
    pub fn active(fat_breakdown: bool) -> impl Iterator<Item = FoodExchangeGroup> {
        Self::ALL.into_iter().filter(move |g| {
            if fat_breakdown {
                *g != FoodExchangeGroup::Fats
            } else {
                !g.is_fat_subtype()
            }
        })
    }
}

/// Per-serving nutrient content of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeFactors {
    pub cho: f64,   // grams
    pub pro: f64,   // grams
    pub fat: f64,   // grams
    pub fiber: f64, // grams
    pub kcal: f64,
}

/// How the plan represents fat exchanges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FatRepresentation {
    /// One `fats` count
    Aggregate { serves: f64 },
    /// Saturated / monounsaturated / polyunsaturated counts
    Breakdown { sat: f64, mufa: f64, pufa: f64 },
}

impl FatRepresentation {
    /// Total fat exchanges regardless of representation
    pub fn total(&self) -> f64 {
        match self {
            FatRepresentation::Aggregate { serves } => *serves,
            FatRepresentation::Breakdown { sat, mufa, pufa } => sat + mufa + pufa,
        }
    }

    pub fn is_breakdown(&self) -> bool {
        matches!(self, FatRepresentation::Breakdown { .. })
    }
}

impl Default for FatRepresentation {
    fn default() -> Self {
        FatRepresentation::Aggregate { serves: 0.0 }
    }
}

/// Serving counts are non-negative real numbers; anything else counts as 0
pub(crate) fn sanitize_count(count: f64) -> f64 {
    if count.is_finite() && count > 0.0 {
        count
    } else {
        0.0
    }
}

/// Target exchanges per group for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ServingPlanRecord", into = "ServingPlanRecord")]
pub struct ServingPlan {
    /// Non-fat groups only
    servings: BTreeMap<FoodExchangeGroup, f64>,
    fat: FatRepresentation,
}

impl ServingPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty plan in fat breakdown mode
    pub fn with_fat_breakdown() -> Self {
        Self {
            servings: BTreeMap::new(),
            fat: FatRepresentation::Breakdown {
                sat: 0.0,
                mufa: 0.0,
                pufa: 0.0,
            },
        }
    }

    /// Build a plan from (group, count) pairs, applied in order through [`ServingPlan::set`]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (FoodExchangeGroup, f64)>,
    {
        let mut plan = Self::new();
        for (group, count) in pairs {
            plan.set(group, count);
        }
        plan
    }

    pub fn fat(&self) -> &FatRepresentation {
        &self.fat
    }

    pub fn is_fat_breakdown(&self) -> bool {
        self.fat.is_breakdown()
    }

    /// Serving count of a group as the engine sees it.
    ///
    /// In breakdown mode the `fats` aggregate reads as 0; in aggregate mode the
    /// sub-types read as 0.
    pub fn get(&self, group: FoodExchangeGroup) -> f64 {
        match (group, &self.fat) {
            (FoodExchangeGroup::Fats, FatRepresentation::Aggregate { serves }) => *serves,
            (FoodExchangeGroup::FatsSat, FatRepresentation::Breakdown { sat, .. }) => *sat,
            (FoodExchangeGroup::FatsMufa, FatRepresentation::Breakdown { mufa, .. }) => *mufa,
            (FoodExchangeGroup::FatsPufa, FatRepresentation::Breakdown { pufa, .. }) => *pufa,
            (g, _) if g.is_fat() => 0.0,
            (g, _) => self.servings.get(&g).copied().unwrap_or(0.0),
        }
    }

    /// Set a group's serving count.
    ///
    /// Fat writes only land in the active fat mode: `fats` is inert in
    /// breakdown mode and the sub-types are inert in aggregate mode. Use
    /// [`ServingPlan::set_fat_breakdown`] to switch modes.
    pub fn set(&mut self, group: FoodExchangeGroup, count: f64) {
        let count = sanitize_count(count);
        match (group, &mut self.fat) {
            (FoodExchangeGroup::Fats, FatRepresentation::Aggregate { serves }) => *serves = count,
            (FoodExchangeGroup::FatsSat, FatRepresentation::Breakdown { sat, .. }) => *sat = count,
            (FoodExchangeGroup::FatsMufa, FatRepresentation::Breakdown { mufa, .. }) => *mufa = count,
            (FoodExchangeGroup::FatsPufa, FatRepresentation::Breakdown { pufa, .. }) => *pufa = count,
            (g, _) if g.is_fat() => {}
            (g, _) => {
                self.servings.insert(g, count);
            }
        }
    }

    /// Switch between aggregate and breakdown fat planning.
    ///
    /// Enabling breakdown zeroes the aggregate. Disabling it collapses the
    /// sub-types into the aggregate so the day's fat total is kept.
    pub fn set_fat_breakdown(&mut self, enabled: bool) {
        self.fat = match (enabled, self.fat) {
            (true, FatRepresentation::Aggregate { .. }) => FatRepresentation::Breakdown {
                sat: 0.0,
                mufa: 0.0,
                pufa: 0.0,
            },
            (false, breakdown @ FatRepresentation::Breakdown { .. }) => {
                FatRepresentation::Aggregate {
                    serves: breakdown.total(),
                }
            }
            (_, unchanged) => unchanged,
        };
    }

    /// Fat exchange target: the aggregate, or the sum of the three sub-types
    pub fn fat_target(&self) -> f64 {
        self.fat.total()
    }

    /// (group, count) for every group active under the plan's fat mode
    pub fn active_entries(&self) -> impl Iterator<Item = (FoodExchangeGroup, f64)> + '_ {
        FoodExchangeGroup::active(self.is_fat_breakdown()).map(move |g| (g, self.get(g)))
    }
}

/// Flat wire shape of a serving plan: `{servings: {group: count}, fat_breakdown}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServingPlanRecord {
    #[serde(default)]
    pub servings: BTreeMap<FoodExchangeGroup, f64>,
    #[serde(default)]
    pub fat_breakdown: bool,
}

impl From<ServingPlanRecord> for ServingPlan {
    fn from(record: ServingPlanRecord) -> Self {
        let lookup = |g: FoodExchangeGroup| sanitize_count(record.servings.get(&g).copied().unwrap_or(0.0));

        let fat = if record.fat_breakdown {
            FatRepresentation::Breakdown {
                sat: lookup(FoodExchangeGroup::FatsSat),
                mufa: lookup(FoodExchangeGroup::FatsMufa),
                pufa: lookup(FoodExchangeGroup::FatsPufa),
            }
        } else {
            FatRepresentation::Aggregate {
                serves: lookup(FoodExchangeGroup::Fats),
            }
        };

        let servings = record
            .servings
            .iter()
            .filter(|(g, _)| !g.is_fat())
            .map(|(g, count)| (*g, sanitize_count(*count)))
            .collect();

        Self { servings, fat }
    }
}

impl From<ServingPlan> for ServingPlanRecord {
    fn from(plan: ServingPlan) -> Self {
        let mut servings = plan.servings.clone();
        match plan.fat {
            FatRepresentation::Aggregate { serves } => {
                servings.insert(FoodExchangeGroup::Fats, serves);
            }
            FatRepresentation::Breakdown { sat, mufa, pufa } => {
                servings.insert(FoodExchangeGroup::FatsSat, sat);
                servings.insert(FoodExchangeGroup::FatsMufa, mufa);
                servings.insert(FoodExchangeGroup::FatsPufa, pufa);
            }
        }
        Self {
            servings,
            fat_breakdown: plan.fat.is_breakdown(),
        }
    }
}
