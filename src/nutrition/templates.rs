//! Diet template catalog and selector
//!
//! Predefined serving plans organised as diet type -> macro distribution ->
//! energy tiers. Lookup matches the tier exactly; a tier that is not in the
//! catalog is a miss even when neighbouring tiers exist.

use serde::Serialize;

use crate::models::{FoodExchangeGroup as G, ServingPlan};

/// One energy tier of a distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DietTemplateRow {
    pub energy_tier: u32,
    pub exchanges: &'static [(G, f64)],
}

impl DietTemplateRow {
    /// True when the row plans fats by sub-type
    pub fn uses_fat_breakdown(&self) -> bool {
        self.exchanges.iter().any(|(g, _)| g.is_fat_subtype())
    }
}

/// Macro split (percent of energy) with its tiers in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroDistribution {
    pub id: &'static str,
    pub cho_percent: f64,
    pub pro_percent: f64,
    pub fat_percent: f64,
    pub rows: &'static [DietTemplateRow],
}

impl MacroDistribution {
    pub fn tiers(&self) -> Vec<u32> {
        self.rows.iter().map(|row| row.energy_tier).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DietType {
    pub id: &'static str,
    pub name: &'static str,
    pub distributions: &'static [MacroDistribution],
}

const fn row(energy_tier: u32, exchanges: &'static [(G, f64)]) -> DietTemplateRow {
    DietTemplateRow {
        energy_tier,
        exchanges,
    }
}

const BALANCED_55_15_30: &[DietTemplateRow] = &[
    row(1200, &[(G::Starch, 5.5), (G::Veg, 3.0), (G::Fruit, 2.0), (G::Sugar, 1.0), (G::MeatMed, 1.0), (G::MilkLow, 2.0), (G::Fats, 4.0)]),
    row(1400, &[(G::Starch, 6.0), (G::Veg, 3.0), (G::Fruit, 3.0), (G::Sugar, 1.0), (G::MeatMed, 2.0), (G::MilkLow, 2.0), (G::Fats, 4.0)]),
    row(1600, &[(G::Starch, 7.5), (G::Veg, 4.0), (G::Fruit, 3.0), (G::Sugar, 1.0), (G::MeatMed, 2.0), (G::MilkLow, 2.0), (G::Fats, 5.0)]),
    row(1800, &[(G::Starch, 9.5), (G::Veg, 4.0), (G::Fruit, 3.0), (G::Sugar, 1.0), (G::MeatMed, 2.0), (G::MilkLow, 2.0), (G::Fats, 6.0)]),
    row(2000, &[(G::Starch, 10.0), (G::Veg, 4.0), (G::Fruit, 4.0), (G::Sugar, 1.0), (G::MeatMed, 2.5), (G::MilkLow, 2.5), (G::Fats, 6.5)]),
    row(2200, &[(G::Starch, 11.5), (G::Veg, 5.0), (G::Fruit, 4.0), (G::Sugar, 1.0), (G::MeatMed, 2.5), (G::MilkLow, 2.5), (G::Fats, 7.5)]),
    row(2400, &[(G::Starch, 13.5), (G::Veg, 5.0), (G::Fruit, 4.0), (G::Sugar, 1.0), (G::MeatMed, 3.0), (G::MilkLow, 2.5), (G::Fats, 8.0)]),
];

const BALANCED_50_20_30: &[DietTemplateRow] = &[
    row(1200, &[(G::Starch, 4.5), (G::Veg, 3.0), (G::Fruit, 2.0), (G::Legumes, 1.0), (G::MeatLean, 2.5), (G::MilkLow, 2.0), (G::Fats, 4.0)]),
    row(1400, &[(G::Starch, 5.0), (G::Veg, 3.0), (G::Fruit, 3.0), (G::Legumes, 1.0), (G::MeatLean, 3.5), (G::MilkLow, 2.0), (G::Fats, 4.5)]),
    row(1600, &[(G::Starch, 6.5), (G::Veg, 4.0), (G::Fruit, 3.0), (G::Legumes, 1.0), (G::MeatLean, 4.0), (G::MilkLow, 2.0), (G::Fats, 5.5)]),
    row(1800, &[(G::Starch, 8.0), (G::Veg, 4.0), (G::Fruit, 3.0), (G::Legumes, 1.0), (G::MeatLean, 5.0), (G::MilkLow, 2.0), (G::Fats, 6.0)]),
    row(2000, &[(G::Starch, 8.5), (G::Veg, 4.0), (G::Fruit, 4.0), (G::Legumes, 1.0), (G::MeatLean, 5.5), (G::MilkLow, 2.5), (G::Fats, 6.5)]),
];

const DIABETIC_45_20_35: &[DietTemplateRow] = &[
    row(1200, &[(G::Starch, 3.5), (G::Veg, 3.0), (G::Fruit, 2.0), (G::Legumes, 1.0), (G::MeatLean, 3.0), (G::MilkSkim, 2.0), (G::Fats, 7.0)]),
    row(1400, &[(G::Starch, 4.0), (G::Veg, 3.0), (G::Fruit, 3.0), (G::Legumes, 1.0), (G::MeatLean, 4.0), (G::MilkSkim, 2.0), (G::Fats, 8.5)]),
    row(1600, &[(G::Starch, 5.0), (G::Veg, 4.0), (G::Fruit, 3.0), (G::Legumes, 1.0), (G::MeatLean, 5.0), (G::MilkSkim, 2.0), (G::Fats, 9.0)]),
    row(1800, &[(G::Starch, 6.5), (G::Veg, 4.0), (G::Fruit, 3.0), (G::Legumes, 1.0), (G::MeatLean, 5.5), (G::MilkSkim, 2.0), (G::Fats, 10.5)]),
    row(2000, &[(G::Starch, 6.5), (G::Veg, 4.0), (G::Fruit, 4.0), (G::Legumes, 1.0), (G::MeatLean, 6.5), (G::MilkSkim, 2.5), (G::Fats, 11.5)]),
];

// Heart-healthy rows plan fats by sub-type
const CARDIAC_50_20_30: &[DietTemplateRow] = &[
    row(1200, &[(G::Starch, 4.5), (G::Veg, 3.0), (G::Fruit, 2.0), (G::Legumes, 1.0), (G::MeatLean, 2.5), (G::MilkSkim, 2.0), (G::FatsSat, 1.0), (G::FatsMufa, 3.0), (G::FatsPufa, 2.0)]),
    row(1500, &[(G::Starch, 6.0), (G::Veg, 3.0), (G::Fruit, 3.0), (G::Legumes, 1.0), (G::MeatLean, 4.0), (G::MilkSkim, 2.0), (G::FatsSat, 1.5), (G::FatsMufa, 3.5), (G::FatsPufa, 2.0)]),
    row(1800, &[(G::Starch, 8.0), (G::Veg, 4.0), (G::Fruit, 3.0), (G::Legumes, 1.0), (G::MeatLean, 5.0), (G::MilkSkim, 2.0), (G::FatsSat, 1.5), (G::FatsMufa, 4.0), (G::FatsPufa, 2.5)]),
    row(2100, &[(G::Starch, 9.0), (G::Veg, 4.0), (G::Fruit, 4.0), (G::Legumes, 1.0), (G::MeatLean, 6.0), (G::MilkSkim, 2.5), (G::FatsSat, 2.0), (G::FatsMufa, 5.0), (G::FatsPufa, 2.5)]),
];

/// The shipped template catalog
pub const CATALOG: &[DietType] = &[
    DietType {
        id: "balanced",
        name: "Balanced",
        distributions: &[
            MacroDistribution {
                id: "cho55_pro15_fat30",
                cho_percent: 55.0,
                pro_percent: 15.0,
                fat_percent: 30.0,
                rows: BALANCED_55_15_30,
            },
            MacroDistribution {
                id: "cho50_pro20_fat30",
                cho_percent: 50.0,
                pro_percent: 20.0,
                fat_percent: 30.0,
                rows: BALANCED_50_20_30,
            },
        ],
    },
    DietType {
        id: "diabetic",
        name: "Diabetic",
        distributions: &[MacroDistribution {
            id: "cho45_pro20_fat35",
            cho_percent: 45.0,
            pro_percent: 20.0,
            fat_percent: 35.0,
            rows: DIABETIC_45_20_35,
        }],
    },
    DietType {
        id: "cardiac",
        name: "Heart Healthy",
        distributions: &[MacroDistribution {
            id: "cho50_pro20_fat30",
            cho_percent: 50.0,
            pro_percent: 20.0,
            fat_percent: 30.0,
            rows: CARDIAC_50_20_30,
        }],
    },
];

pub fn find_diet_type(diet_type_id: &str) -> Option<&'static DietType> {
    let id = diet_type_id.trim();
    CATALOG.iter().find(|d| d.id.eq_ignore_ascii_case(id))
}

/// A catalog hit with the diet type and distribution it was found under
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateMatch {
    pub diet: &'static DietType,
    pub distribution: &'static MacroDistribution,
    pub row: &'static DietTemplateRow,
}

/// Exact-tier lookup
pub fn lookup(diet_type_id: &str, distribution_id: &str, energy_tier: u32) -> Option<TemplateMatch> {
    let found = find_diet_type(diet_type_id).and_then(|diet| {
        let id = distribution_id.trim();
        let distribution = diet.distributions.iter().find(|d| d.id.eq_ignore_ascii_case(id))?;
        let row = distribution.rows.iter().find(|row| row.energy_tier == energy_tier)?;
        Some(TemplateMatch { diet, distribution, row })
    });
    if found.is_none() {
        tracing::debug!(diet_type_id, distribution_id, energy_tier, "No diet template for tier");
    }
    found
}

/// Turn a template row into a serving plan.
///
/// Rows listing any fat sub-type produce a breakdown-mode plan with the
/// aggregate zeroed.
pub fn apply(row: &DietTemplateRow) -> ServingPlan {
    let mut plan = if row.uses_fat_breakdown() {
        ServingPlan::with_fat_breakdown()
    } else {
        ServingPlan::new()
    };
    for (group, count) in row.exchanges {
        plan.set(*group, *count);
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FatRepresentation;
    use crate::nutrition::exchange::{compute_totals, energy_share};

    #[test]
    fn test_exact_tier_hit() {
        let hit = lookup("balanced", "cho55_pro15_fat30", 1400).unwrap();
        assert_eq!(hit.row.energy_tier, 1400);
        assert_eq!(hit.distribution.cho_percent, 55.0);
        assert_eq!(hit.diet.id, "balanced");
        assert!(lookup("Balanced", "CHO55_PRO15_FAT30", 2400).is_some());
    }

    #[test]
    fn test_tier_between_rows_is_not_found() {
        assert!(lookup("balanced", "cho55_pro15_fat30", 1200).is_some());
        assert!(lookup("balanced", "cho55_pro15_fat30", 1400).is_some());
        assert!(lookup("balanced", "cho55_pro15_fat30", 1300).is_none());
        assert!(lookup("cardiac", "cho50_pro20_fat30", 1400).is_none());
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        assert!(lookup("ketogenic", "cho55_pro15_fat30", 1200).is_none());
        assert!(lookup("diabetic", "cho55_pro15_fat30", 1200).is_none());
    }

    #[test]
    fn test_apply_aggregate_row() {
        let row = lookup("diabetic", "cho45_pro20_fat35", 1600).unwrap().row;
        let plan = apply(row);
        assert!(!plan.is_fat_breakdown());
        assert_eq!(plan.get(G::Fats), 9.0);
        assert_eq!(plan.get(G::MeatLean), 5.0);
    }

    #[test]
    fn test_apply_breakdown_row_forces_breakdown() {
        let row = lookup("cardiac", "cho50_pro20_fat30", 1800).unwrap().row;
        assert!(row.uses_fat_breakdown());
        let plan = apply(row);
        assert_eq!(
            plan.fat(),
            &FatRepresentation::Breakdown {
                sat: 1.5,
                mufa: 4.0,
                pufa: 2.5
            }
        );
        assert_eq!(plan.get(G::Fats), 0.0);
    }

    #[test]
    fn test_catalog_rows_track_their_tier_and_split() {
        for diet in CATALOG {
            for dist in diet.distributions {
                let tiers = dist.tiers();
                assert!(tiers.windows(2).all(|w| w[0] < w[1]), "{} tiers out of order", dist.id);
                for row in dist.rows {
                    let totals = compute_totals(&apply(row));
                    let tier = f64::from(row.energy_tier);
                    assert!(
                        (totals.kcal - tier).abs() / tier < 0.06,
                        "{}/{} {} kcal vs tier {}",
                        diet.id,
                        dist.id,
                        totals.kcal,
                        tier
                    );
                    let share = energy_share(&totals);
                    assert!((share.cho - dist.cho_percent).abs() < 3.0, "{}/{} {}", diet.id, dist.id, tier);
                    assert!((share.pro - dist.pro_percent).abs() < 3.0, "{}/{} {}", diet.id, dist.id, tier);
                    assert!((share.fat - dist.fat_percent).abs() < 3.0, "{}/{} {}", diet.id, dist.id, tier);
                }
            }
        }
    }
}
