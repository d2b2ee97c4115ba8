//! DietKit Status Tool
//!
//! Provides runtime status information about the DietKit service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Exchange planning instructions for AI assistants
pub const PLANNER_INSTRUCTIONS: &str = r#"
# DietKit Planning Instructions

This guide explains how to build an exchange-based meal plan with the DietKit tools.

## Overview

A plan is built in four steps:
1. **Assess** - `compute_metabolic_profile` gives dry weight, BMI, IBW/ABW and energy needs
2. **Plan servings** - choose exchange servings by hand or start from `apply_diet_template`
3. **Check totals** - `compute_exchange_totals` compares the plan with the energy and macro targets
4. **Distribute** - `check_meal_distribution` shows what is left to place in each meal slot

Children are assessed with `classify_growth` instead of BMI classes.

---

## Exchange Groups

| Group | Key | CHO g | PRO g | Fat g | Fiber g | kcal |
|-------|-----|-------|-------|-------|---------|------|
| Starch | starch | 15 | 3 | 1 | 2 | 80 |
| Vegetables | veg | 5 | 2 | 0 | 2 | 25 |
| Fruit | fruit | 15 | 0 | 0 | 2 | 60 |
| Legumes | legumes | 15 | 7 | 1 | 4 | 125 |
| Sugar | sugar | 15 | 0 | 0 | 0 | 60 |
| Meat, lean | meat_lean | 0 | 7 | 2 | 0 | 45 |
| Meat, medium fat | meat_med | 0 | 7 | 5 | 0 | 75 |
| Meat, high fat | meat_high | 0 | 7 | 8 | 0 | 100 |
| Milk, skim | milk_skim | 12 | 8 | 0 | 0 | 100 |
| Milk, low fat | milk_low | 12 | 8 | 5 | 0 | 120 |
| Milk, whole | milk_whole | 12 | 8 | 8 | 0 | 160 |
| Fats | fats | 0 | 0 | 5 | 0 | 45 |

Fats can instead be planned by type: `fats_sat`, `fats_mufa`, `fats_pufa`
(same values per serving). Set `fat_breakdown: true` to use them. In that
mode the `fats` entry is ignored; without it the sub-types are ignored.

---

## Meal Slots

`breakfast`, `morning_snack`, `lunch`, `afternoon_snack`, `dinner`,
`evening_snack`, `bedtime_snack`

Distribution input is nested by group, then slot:

```json
{"starch": {"breakfast": 2, "lunch": 2, "dinner": 2}}
```

A negative remainder means the group is over-allocated. It is reported,
not blocked.

---

## Targets

- `target_mode: "none"` - only energy is compared (`target_kcal`)
- `target_mode: "grams"` - `gram_targets` are compared directly
- `target_mode: "percent"` - `percent_targets` are converted with
  `target_kcal x pct / 100 / kcal per gram` (4 for CHO and protein, 9 for fat)

Achievement is `actual / target x 100`, or 0 where no target is set.

---

## Metabolic Profile Inputs

- `physical_activity`: sedentary (1.2), lightly_active (1.375), moderately_active (1.55),
  very_active (1.725), extra_active (1.9)
- `change_duration`: none, 1-week, 1-month, 3-months, 6-months
- `ascites`: none (0 kg), mild (2.2), moderate (6), severe (14)
- `edema`: none (0 kg), mild (1), moderate (5), severe (10)

Dry weight subtracts the fluid estimates from the current weight and is the
weight used for weight loss, IBW difference and the "actual" energy results.

---

## Diet Templates

Call `list_diet_templates` to see diet types, their macro splits and energy
tiers. `apply_diet_template` only matches a listed tier exactly; a tier
that is not listed returns not found.

---

## Saving Plans

Plans are stored per owner and tool type (`meal_planner`, `diet_template`,
`meal_distribution`). `get_plan`, `update_plan` and `delete_plan` take the same
`tool_type` the plan was saved with (default `meal_planner`). `update_plan`
replaces the whole state; the last write wins.
"#;

/// Runtime status of the DietKit service
#[derive(Debug, Clone, Serialize)]
pub struct DietKitStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub build_label: &'static str,
    pub version: &'static str,
    /// One-line build summary, as printed in the startup banner
    pub build: String,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self) -> DietKitStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        DietKitStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            build_label: build_info.build_label,
            version: build_info.version,
            build: build_info.summary(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/dietkit.db"));
        let status = tracker.get_status();
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.version, crate::build_info::VERSION);
        assert_eq!(status.build_label, crate::build_info::BUILD_LABEL);
        assert!(status.build.contains(status.build_label));
    }

    #[test]
    fn test_instructions_list_every_group_key() {
        for group in crate::models::FoodExchangeGroup::ALL {
            assert!(PLANNER_INSTRUCTIONS.contains(group.as_str()), "{}", group.as_str());
        }
    }
}
