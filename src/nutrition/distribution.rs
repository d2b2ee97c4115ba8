//! Meal distribution validator
//!
//! Compares the servings allocated across meal slots with the day's plan.
//! A negative remainder means the group is over-allocated; it is reported
//! as-is, never clamped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{FoodExchangeGroup, MacroTotals, MealDistribution, MealSlot, ServingPlan};

use super::exchange::compute_totals;

/// Allocation state of a group, derived from the sign of its remainder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    Remaining,
    Exact,
    OverAllocated,
}

impl AllocationStatus {
    pub fn from_remainder(remainder: f64) -> Self {
        if remainder > 0.0 {
            AllocationStatus::Remaining
        } else if remainder < 0.0 {
            AllocationStatus::OverAllocated
        } else {
            AllocationStatus::Exact
        }
    }
}

/// One displayed row of the distribution check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupRemainder {
    pub target: f64,
    pub distributed: f64,
    pub remainder: f64,
    pub status: AllocationStatus,
}

/// Groups shown by the distribution table for the plan's fat mode.
///
/// In breakdown mode the `fats` row stays as a pseudo-aggregate of the
/// three sub-types, which are listed individually as well.
pub fn displayed_groups(fat_breakdown: bool) -> Vec<FoodExchangeGroup> {
    FoodExchangeGroup::ALL
        .into_iter()
        .filter(|g| fat_breakdown || !g.is_fat_subtype())
        .collect()
}

fn target_and_distributed(
    plan: &ServingPlan,
    distribution: &MealDistribution,
    group: FoodExchangeGroup,
) -> (f64, f64) {
    if group == FoodExchangeGroup::Fats && plan.is_fat_breakdown() {
        // the aggregate's own allocations are inert here
        let distributed = FoodExchangeGroup::FAT_SUBTYPES
            .iter()
            .map(|g| distribution.distributed(*g))
            .sum();
        (plan.fat_target(), distributed)
    } else {
        (plan.get(group), distribution.distributed(group))
    }
}

/// Remainder per displayed group: `target - sum of slot allocations`
pub fn remainders(plan: &ServingPlan, distribution: &MealDistribution) -> BTreeMap<FoodExchangeGroup, f64> {
    check(plan, distribution)
        .into_iter()
        .map(|(group, row)| (group, row.remainder))
        .collect()
}

/// Full per-group report with targets, allocations and status
pub fn check(
    plan: &ServingPlan,
    distribution: &MealDistribution,
) -> BTreeMap<FoodExchangeGroup, GroupRemainder> {
    displayed_groups(plan.is_fat_breakdown())
        .into_iter()
        .map(|group| {
            let (target, distributed) = target_and_distributed(plan, distribution, group);
            let remainder = target - distributed;
            let status = AllocationStatus::from_remainder(remainder);
            if status == AllocationStatus::OverAllocated {
                tracing::debug!(group = group.as_str(), planned = target, distributed, "Group over-allocated");
            }
            (
                group,
                GroupRemainder {
                    target,
                    distributed,
                    remainder,
                    status,
                },
            )
        })
        .collect()
}

/// Macro totals of each meal slot under the plan's fat mode
pub fn slot_totals(plan: &ServingPlan, distribution: &MealDistribution) -> BTreeMap<MealSlot, MacroTotals> {
    MealSlot::ALL
        .into_iter()
        .map(|slot| {
            let slot_plan = distribution.slot_plan(slot, plan.is_fat_breakdown());
            (slot, compute_totals(&slot_plan))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_positive_and_negative() {
        let plan = ServingPlan::from_pairs([(FoodExchangeGroup::Starch, 4.0)]);

        let mut dist = MealDistribution::new();
        dist.set(FoodExchangeGroup::Starch, MealSlot::Breakfast, 1.0);
        dist.set(FoodExchangeGroup::Starch, MealSlot::Lunch, 2.0);
        assert_eq!(remainders(&plan, &dist)[&FoodExchangeGroup::Starch], 1.0);

        dist.set(FoodExchangeGroup::Starch, MealSlot::Dinner, 2.0);
        let report = check(&plan, &dist);
        let starch = report[&FoodExchangeGroup::Starch];
        assert_eq!(starch.remainder, -1.0);
        assert_eq!(starch.status, AllocationStatus::OverAllocated);
    }

    #[test]
    fn test_exact_allocation_is_zero() {
        let plan = ServingPlan::from_pairs([(FoodExchangeGroup::Fruit, 3.0)]);
        let mut dist = MealDistribution::new();
        dist.set(FoodExchangeGroup::Fruit, MealSlot::MorningSnack, 1.0);
        dist.set(FoodExchangeGroup::Fruit, MealSlot::AfternoonSnack, 2.0);
        let row = check(&plan, &dist)[&FoodExchangeGroup::Fruit];
        assert_eq!(row.remainder, 0.0);
        assert_eq!(row.status, AllocationStatus::Exact);
    }

    #[test]
    fn test_unallocated_groups_report_full_target() {
        let plan = ServingPlan::from_pairs([(FoodExchangeGroup::Veg, 5.0)]);
        let report = remainders(&plan, &MealDistribution::new());
        assert_eq!(report[&FoodExchangeGroup::Veg], 5.0);
        assert_eq!(report[&FoodExchangeGroup::Sugar], 0.0);
        assert!(!report.contains_key(&FoodExchangeGroup::FatsSat));
    }

    #[test]
    fn test_fat_pseudo_aggregate_in_breakdown_mode() {
        let mut plan = ServingPlan::with_fat_breakdown();
        plan.set(FoodExchangeGroup::FatsSat, 1.0);
        plan.set(FoodExchangeGroup::FatsMufa, 2.0);
        plan.set(FoodExchangeGroup::FatsPufa, 1.0);

        let mut dist = MealDistribution::new();
        dist.set(FoodExchangeGroup::Fats, MealSlot::Lunch, 10.0); // inert
        dist.set(FoodExchangeGroup::FatsSat, MealSlot::Lunch, 1.0);
        dist.set(FoodExchangeGroup::FatsMufa, MealSlot::Dinner, 3.0);

        let report = check(&plan, &dist);
        let fats = report[&FoodExchangeGroup::Fats];
        assert_eq!(fats.target, 4.0);
        assert_eq!(fats.distributed, 4.0);
        assert_eq!(fats.remainder, 0.0);

        assert_eq!(report[&FoodExchangeGroup::FatsMufa].remainder, -1.0);
        assert_eq!(report[&FoodExchangeGroup::FatsPufa].remainder, 1.0);
    }

    #[test]
    fn test_aggregate_fats_use_own_allocations() {
        let plan = ServingPlan::from_pairs([(FoodExchangeGroup::Fats, 3.0)]);
        let mut dist = MealDistribution::new();
        dist.set(FoodExchangeGroup::Fats, MealSlot::Breakfast, 1.0);
        dist.set(FoodExchangeGroup::FatsSat, MealSlot::Breakfast, 5.0);
        assert_eq!(remainders(&plan, &dist)[&FoodExchangeGroup::Fats], 2.0);
    }

    #[test]
    fn test_slot_totals() {
        let plan = ServingPlan::from_pairs([
            (FoodExchangeGroup::Starch, 6.0),
            (FoodExchangeGroup::MilkSkim, 2.0),
        ]);
        let mut dist = MealDistribution::new();
        dist.set(FoodExchangeGroup::Starch, MealSlot::Breakfast, 2.0);
        dist.set(FoodExchangeGroup::MilkSkim, MealSlot::Breakfast, 1.0);
        dist.set(FoodExchangeGroup::Starch, MealSlot::Dinner, 3.0);

        let totals = slot_totals(&plan, &dist);
        assert_eq!(totals.len(), MealSlot::ALL.len());
        assert_eq!(totals[&MealSlot::Breakfast].kcal, 260.0);
        assert_eq!(totals[&MealSlot::Dinner].cho, 45.0);
        assert_eq!(totals[&MealSlot::Lunch], MacroTotals::zero());
    }
}
