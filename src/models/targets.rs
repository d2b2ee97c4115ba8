//! Macro totals and intake targets

use serde::{Deserialize, Serialize};

/// Energy attributable to each fat sub-type (kcal)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FatSubtypeEnergy {
    pub sat: f64,
    pub mufa: f64,
    pub pufa: f64,
}

/// Accumulated macros for a set of exchanges
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub cho: f64,   // grams
    pub pro: f64,   // grams
    pub fat: f64,   // grams
    pub fiber: f64, // grams
    pub kcal: f64,
    pub kcal_by_subtype: FatSubtypeEnergy,
}

impl MacroTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Add another totals record componentwise
    pub fn add(&self, other: &MacroTotals) -> Self {
        Self {
            cho: self.cho + other.cho,
            pro: self.pro + other.pro,
            fat: self.fat + other.fat,
            fiber: self.fiber + other.fiber,
            kcal: self.kcal + other.kcal,
            kcal_by_subtype: FatSubtypeEnergy {
                sat: self.kcal_by_subtype.sat + other.kcal_by_subtype.sat,
                mufa: self.kcal_by_subtype.mufa + other.kcal_by_subtype.mufa,
                pufa: self.kcal_by_subtype.pufa + other.kcal_by_subtype.pufa,
            },
        }
    }
}

impl std::ops::Add for MacroTotals {
    type Output = MacroTotals;

    fn add(self, other: MacroTotals) -> MacroTotals {
        MacroTotals::add(&self, &other)
    }
}

impl std::iter::Sum for MacroTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MacroTotals::zero(), |acc, t| acc + t)
    }
}

/// How macro targets are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMode {
    #[default]
    None,
    Grams,
    Percent,
}

impl TargetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetMode::None => "none",
            TargetMode::Grams => "grams",
            TargetMode::Percent => "percent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Some(TargetMode::None),
            "grams" | "gram" | "g" => Some(TargetMode::Grams),
            "percent" | "pct" | "%" => Some(TargetMode::Percent),
            _ => None,
        }
    }
}

/// Per-macro values: grams or percent of energy depending on context
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    #[serde(default)]
    pub cho: f64,
    #[serde(default)]
    pub pro: f64,
    #[serde(default)]
    pub fat: f64,
}

/// Energy target plus the manual macro targets entered for each mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    #[serde(default)]
    pub target_kcal: f64,
    #[serde(default)]
    pub mode: TargetMode,
    #[serde(default)]
    pub manual_grams: MacroTargets,
    #[serde(default)]
    pub manual_percent: MacroTargets,
}

/// Share of energy from each macro (percent)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyShare {
    pub cho: f64,
    pub pro: f64,
    pub fat: f64,
}

/// Achieved percentage of each target
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub cho: f64,
    pub pro: f64,
    pub fat: f64,
    pub kcal: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_sum() {
        let a = MacroTotals {
            cho: 10.0,
            kcal: 40.0,
            ..MacroTotals::zero()
        };
        let b = MacroTotals {
            fat: 5.0,
            kcal: 45.0,
            kcal_by_subtype: FatSubtypeEnergy {
                mufa: 45.0,
                ..FatSubtypeEnergy::default()
            },
            ..MacroTotals::zero()
        };
        let total: MacroTotals = vec![a, b].into_iter().sum();
        assert_eq!(total.cho, 10.0);
        assert_eq!(total.fat, 5.0);
        assert_eq!(total.kcal, 85.0);
        assert_eq!(total.kcal_by_subtype.mufa, 45.0);
    }

    #[test]
    fn test_target_spec_defaults_from_empty_json() {
        let spec: TargetSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(spec, TargetSpec::default());
        assert_eq!(spec.mode, TargetMode::None);
    }
}
