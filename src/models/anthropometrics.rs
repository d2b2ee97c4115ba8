//! Anthropometric and clinical inputs for the metabolic profile

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "boy" => Some(Gender::Male),
            "female" | "f" | "girl" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Physical activity level, mapped to a TEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalActivity {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl PhysicalActivity {
    pub fn multiplier(&self) -> f64 {
        match self {
            PhysicalActivity::Sedentary => 1.2,
            PhysicalActivity::LightlyActive => 1.375,
            PhysicalActivity::ModeratelyActive => 1.55,
            PhysicalActivity::VeryActive => 1.725,
            PhysicalActivity::ExtraActive => 1.9,
        }
    }

    /// Parse by name or by the multiplier value itself ("1.55")
    pub fn from_str(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "sedentary" | "1.2" => Some(PhysicalActivity::Sedentary),
            "lightly_active" | "light" | "1.375" => Some(PhysicalActivity::LightlyActive),
            "moderately_active" | "moderate" | "1.55" => Some(PhysicalActivity::ModeratelyActive),
            "very_active" | "1.725" => Some(PhysicalActivity::VeryActive),
            "extra_active" | "extra" | "1.9" => Some(PhysicalActivity::ExtraActive),
            _ => None,
        }
    }
}

/// Period over which weight change is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeDuration {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "1-week")]
    OneWeek,
    #[serde(rename = "1-month")]
    OneMonth,
    #[serde(rename = "3-months")]
    ThreeMonths,
    #[serde(rename = "6-months")]
    SixMonths,
}

impl ChangeDuration {
    /// Weight-loss percentage at which loss becomes clinically significant.
    ///
    /// `OneWeek` reports 2 (the top of its 1-2% band); `None` has no threshold.
    pub fn threshold(&self) -> Option<f64> {
        match self {
            ChangeDuration::None => None,
            ChangeDuration::OneWeek => Some(2.0),
            ChangeDuration::OneMonth => Some(5.0),
            ChangeDuration::ThreeMonths => Some(7.5),
            ChangeDuration::SixMonths => Some(10.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeDuration::None => "none",
            ChangeDuration::OneWeek => "1-week",
            ChangeDuration::OneMonth => "1-month",
            ChangeDuration::ThreeMonths => "3-months",
            ChangeDuration::SixMonths => "6-months",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "" | "none" => Some(ChangeDuration::None),
            "1-week" | "1-weeks" => Some(ChangeDuration::OneWeek),
            "1-month" | "1-months" => Some(ChangeDuration::OneMonth),
            "3-months" | "3-month" => Some(ChangeDuration::ThreeMonths),
            "6-months" | "6-month" => Some(ChangeDuration::SixMonths),
            _ => None,
        }
    }
}

/// Severity grade of fluid retention, used for dry-weight corrections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FluidGrade {
    #[default]
    None,
    Mild,
    Moderate,
    Severe,
}

impl FluidGrade {
    /// Estimated ascitic fluid weight (kg)
    pub fn ascites_kg(&self) -> f64 {
        match self {
            FluidGrade::None => 0.0,
            FluidGrade::Mild => 2.2,
            FluidGrade::Moderate => 6.0,
            FluidGrade::Severe => 14.0,
        }
    }

    /// Estimated peripheral edema fluid weight (kg)
    pub fn edema_kg(&self) -> f64 {
        match self {
            FluidGrade::None => 0.0,
            FluidGrade::Mild => 1.0,
            FluidGrade::Moderate => 5.0,
            FluidGrade::Severe => 10.0,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Some(FluidGrade::None),
            "mild" | "minimal" => Some(FluidGrade::Mild),
            "moderate" => Some(FluidGrade::Moderate),
            "severe" => Some(FluidGrade::Severe),
            _ => None,
        }
    }
}

/// Inputs for one metabolic profile computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropometricInput {
    pub gender: Gender,
    pub age_years: u32,
    pub height_cm: f64,
    pub current_weight_kg: f64,
    /// Weight chosen by the clinician as the metabolic baseline
    pub selected_weight_kg: f64,
    pub usual_weight_kg: f64,
    pub waist_cm: Option<f64>,
    pub hip_cm: Option<f64>,
    /// Mid-arm circumference
    pub mac_cm: Option<f64>,
    /// Triceps skinfold thickness
    pub tsf_cm: Option<f64>,
    pub physical_activity: PhysicalActivity,
    pub change_duration: ChangeDuration,
    pub ascites: FluidGrade,
    pub edema: FluidGrade,
    /// Planned energy deficit (kcal/day)
    pub deficit_kcal: f64,
}

impl AnthropometricInput {
    /// Sedentary, no fluid retention, no weight history, selected weight = current weight
    pub fn new(gender: Gender, age_years: u32, height_cm: f64, current_weight_kg: f64) -> Self {
        Self {
            gender,
            age_years,
            height_cm,
            current_weight_kg,
            selected_weight_kg: current_weight_kg,
            usual_weight_kg: 0.0,
            waist_cm: None,
            hip_cm: None,
            mac_cm: None,
            tsf_cm: None,
            physical_activity: PhysicalActivity::Sedentary,
            change_duration: ChangeDuration::None,
            ascites: FluidGrade::None,
            edema: FluidGrade::None,
            deficit_kcal: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_parses_name_or_multiplier() {
        assert_eq!(PhysicalActivity::from_str("1.55"), Some(PhysicalActivity::ModeratelyActive));
        assert_eq!(PhysicalActivity::from_str("Very Active"), Some(PhysicalActivity::VeryActive));
        assert_eq!(PhysicalActivity::from_str("1.3"), None);
    }

    #[test]
    fn test_change_duration_wire_names() {
        let d: ChangeDuration = serde_json::from_str("\"3-months\"").unwrap();
        assert_eq!(d, ChangeDuration::ThreeMonths);
        assert_eq!(ChangeDuration::from_str("1 week"), Some(ChangeDuration::OneWeek));
        assert_eq!(ChangeDuration::from_str("2-weeks"), None);
        assert_eq!(ChangeDuration::None.threshold(), None);
    }

    #[test]
    fn test_fluid_grades_map_to_kg() {
        assert_eq!(FluidGrade::Severe.ascites_kg(), 14.0);
        assert_eq!(FluidGrade::Moderate.edema_kg(), 5.0);
        assert_eq!(FluidGrade::from_str("minimal"), Some(FluidGrade::Mild));
    }
}
