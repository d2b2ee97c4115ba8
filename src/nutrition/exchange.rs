//! Exchange macro engine
//!
//! Turns serving counts into macro grams, fiber and energy, and compares the
//! result with the dietitian's targets.

use crate::models::{
    Achievement, EnergyShare, ExchangeFactors, FatSubtypeEnergy, FoodExchangeGroup, MacroTargets,
    MacroTotals, ServingPlan, TargetMode, TargetSpec,
};

/// kcal per gram of carbohydrate
pub const KCAL_PER_G_CHO: f64 = 4.0;
/// kcal per gram of protein
pub const KCAL_PER_G_PRO: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

const fn factors(cho: f64, pro: f64, fat: f64, fiber: f64, kcal: f64) -> ExchangeFactors {
    ExchangeFactors {
        cho,
        pro,
        fat,
        fiber,
        kcal,
    }
}

const FAT_EXCHANGE: ExchangeFactors = factors(0.0, 0.0, 5.0, 0.0, 45.0);

/// Nutrient content of one serving of a group
pub const fn exchange_factors(group: FoodExchangeGroup) -> ExchangeFactors {
    match group {
        FoodExchangeGroup::Starch => factors(15.0, 3.0, 1.0, 2.0, 80.0),
        FoodExchangeGroup::Veg => factors(5.0, 2.0, 0.0, 2.0, 25.0),
        FoodExchangeGroup::Fruit => factors(15.0, 0.0, 0.0, 2.0, 60.0),
        FoodExchangeGroup::Legumes => factors(15.0, 7.0, 1.0, 4.0, 125.0),
        FoodExchangeGroup::Sugar => factors(15.0, 0.0, 0.0, 0.0, 60.0),
        FoodExchangeGroup::MeatLean => factors(0.0, 7.0, 2.0, 0.0, 45.0),
        FoodExchangeGroup::MeatMed => factors(0.0, 7.0, 5.0, 0.0, 75.0),
        FoodExchangeGroup::MeatHigh => factors(0.0, 7.0, 8.0, 0.0, 100.0),
        FoodExchangeGroup::MilkSkim => factors(12.0, 8.0, 0.0, 0.0, 100.0),
        FoodExchangeGroup::MilkLow => factors(12.0, 8.0, 5.0, 0.0, 120.0),
        FoodExchangeGroup::MilkWhole => factors(12.0, 8.0, 8.0, 0.0, 160.0),
        FoodExchangeGroup::Fats
        | FoodExchangeGroup::FatsSat
        | FoodExchangeGroup::FatsMufa
        | FoodExchangeGroup::FatsPufa => FAT_EXCHANGE,
    }
}

/// Totals contributed by `servings` exchanges of a single group
pub fn group_totals(group: FoodExchangeGroup, servings: f64) -> MacroTotals {
    let f = exchange_factors(group);
    let kcal = servings * f.kcal;
    let mut kcal_by_subtype = FatSubtypeEnergy::default();
    match group {
        FoodExchangeGroup::FatsSat => kcal_by_subtype.sat = kcal,
        FoodExchangeGroup::FatsMufa => kcal_by_subtype.mufa = kcal,
        FoodExchangeGroup::FatsPufa => kcal_by_subtype.pufa = kcal,
        _ => {}
    }
    MacroTotals {
        cho: servings * f.cho,
        pro: servings * f.pro,
        fat: servings * f.fat,
        fiber: servings * f.fiber,
        kcal,
        kcal_by_subtype,
    }
}

/// Macro totals of a plan.
///
/// The plan's fat representation decides which fat rows count: the `fats`
/// aggregate in aggregate mode, the three sub-types in breakdown mode.
pub fn compute_totals(plan: &ServingPlan) -> MacroTotals {
    plan.active_entries()
        .filter(|(_, servings)| *servings > 0.0)
        .map(|(group, servings)| group_totals(group, servings))
        .sum()
}

/// Share of total energy supplied by `grams` of a macro (percent).
///
/// The denominator is floored at 1 kcal.
pub fn percent_of_energy(grams: f64, kcal_per_gram: f64, total_kcal: f64) -> f64 {
    grams * kcal_per_gram / total_kcal.max(1.0) * 100.0
}

/// Percent-of-energy for carbohydrate, protein and fat
pub fn energy_share(totals: &MacroTotals) -> EnergyShare {
    EnergyShare {
        cho: percent_of_energy(totals.cho, KCAL_PER_G_CHO, totals.kcal),
        pro: percent_of_energy(totals.pro, KCAL_PER_G_PRO, totals.kcal),
        fat: percent_of_energy(totals.fat, KCAL_PER_G_FAT, totals.kcal),
    }
}

/// Gram targets implied by a target specification.
///
/// Percent targets are converted with `target_kcal x pct / 100 / kcal_per_gram`;
/// `TargetMode::None` has no gram targets.
pub fn gram_targets(targets: &TargetSpec) -> MacroTargets {
    match targets.mode {
        TargetMode::None => MacroTargets::default(),
        TargetMode::Grams => targets.manual_grams,
        TargetMode::Percent => {
            let kcal = targets.target_kcal;
            MacroTargets {
                cho: kcal * targets.manual_percent.cho / 100.0 / KCAL_PER_G_CHO,
                pro: kcal * targets.manual_percent.pro / 100.0 / KCAL_PER_G_PRO,
                fat: kcal * targets.manual_percent.fat / 100.0 / KCAL_PER_G_FAT,
            }
        }
    }
}

fn achieved(actual: f64, target: f64) -> f64 {
    if target > 0.0 {
        actual / target * 100.0
    } else {
        0.0
    }
}

/// Percentage of each target reached by the totals (0 where no target is set)
pub fn reconcile(totals: &MacroTotals, targets: &TargetSpec) -> Achievement {
    let grams = gram_targets(targets);
    Achievement {
        cho: achieved(totals.cho, grams.cho),
        pro: achieved(totals.pro, grams.pro),
        fat: achieved(totals.fat, grams.fat),
        kcal: achieved(totals.kcal, targets.target_kcal),
    }
}
