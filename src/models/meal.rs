//! Meal slots and per-meal serving allocations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::exchange::{sanitize_count, FoodExchangeGroup, ServingPlan};

/// Meal slot within a day, in chronological order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Dinner,
    EveningSnack,
    BedtimeSnack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 7] = [
        MealSlot::Breakfast,
        MealSlot::MorningSnack,
        MealSlot::Lunch,
        MealSlot::AfternoonSnack,
        MealSlot::Dinner,
        MealSlot::EveningSnack,
        MealSlot::BedtimeSnack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::MorningSnack => "morning_snack",
            MealSlot::Lunch => "lunch",
            MealSlot::AfternoonSnack => "afternoon_snack",
            MealSlot::Dinner => "dinner",
            MealSlot::EveningSnack => "evening_snack",
            MealSlot::BedtimeSnack => "bedtime_snack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "breakfast" => Some(MealSlot::Breakfast),
            "morning_snack" | "snack1" | "snack_1" => Some(MealSlot::MorningSnack),
            "lunch" => Some(MealSlot::Lunch),
            "afternoon_snack" | "snack2" | "snack_2" => Some(MealSlot::AfternoonSnack),
            "dinner" => Some(MealSlot::Dinner),
            "evening_snack" | "snack3" | "snack_3" => Some(MealSlot::EveningSnack),
            "bedtime_snack" | "bedtime" => Some(MealSlot::BedtimeSnack),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::MorningSnack => "Morning Snack",
            MealSlot::Lunch => "Lunch",
            MealSlot::AfternoonSnack => "Afternoon Snack",
            MealSlot::Dinner => "Dinner",
            MealSlot::EveningSnack => "Evening Snack",
            MealSlot::BedtimeSnack => "Bedtime Snack",
        }
    }
}

type Allocations = BTreeMap<FoodExchangeGroup, BTreeMap<MealSlot, f64>>;

/// Servings allocated to each meal slot, per group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Allocations", into = "Allocations")]
pub struct MealDistribution {
    allocations: Allocations,
}

impl From<Allocations> for MealDistribution {
    fn from(mut allocations: Allocations) -> Self {
        for count in allocations.values_mut().flat_map(|slots| slots.values_mut()) {
            *count = sanitize_count(*count);
        }
        Self { allocations }
    }
}

impl From<MealDistribution> for Allocations {
    fn from(distribution: MealDistribution) -> Self {
        distribution.allocations
    }
}

impl MealDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group: FoodExchangeGroup, slot: MealSlot) -> f64 {
        self.allocations
            .get(&group)
            .and_then(|slots| slots.get(&slot))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, group: FoodExchangeGroup, slot: MealSlot, count: f64) {
        self.allocations
            .entry(group)
            .or_default()
            .insert(slot, sanitize_count(count));
    }

    /// Sum of a group's allocations across all slots
    pub fn distributed(&self, group: FoodExchangeGroup) -> f64 {
        self.allocations
            .get(&group)
            .map(|slots| slots.values().sum())
            .unwrap_or(0.0)
    }

    /// The servings placed in one slot, as a plan using the given fat mode
    pub fn slot_plan(&self, slot: MealSlot, fat_breakdown: bool) -> ServingPlan {
        let mut plan = if fat_breakdown {
            ServingPlan::with_fat_breakdown()
        } else {
            ServingPlan::new()
        };
        for group in FoodExchangeGroup::active(fat_breakdown) {
            let count = self.get(group, slot);
            if count > 0.0 {
                plan.set(group, count);
            }
        }
        plan
    }
}
