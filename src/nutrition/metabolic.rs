//! Metabolic profile calculator
//!
//! Dry weight, weight-loss severity, BMI, ideal/adjusted body weight and
//! energy expenditure under the Harris-Benedict and Mifflin-St Jeor equations.
//!
//! Every denominator is guarded: degenerate inputs (zero height, zero usual
//! weight) produce 0 rather than NaN or infinity.

use serde::{Deserialize, Serialize};

use crate::models::{AnthropometricInput, ChangeDuration, Gender};

/// Severity of unintentional weight loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightLossSeverity {
    None,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiClass {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// BMI value and class; `classification` is `None` when BMI could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiReading {
    pub value: f64,
    pub classification: Option<BmiClass>,
}

/// BMR and the energy expenditures derived from it (kcal/day)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    pub bmr: f64,
    pub tee: f64,
    /// TEE minus the planned deficit
    pub estimated_tee: f64,
}

/// Both predictive equations for one weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquationResults {
    pub harris_benedict: EnergyEstimate,
    pub mifflin_st_jeor: EnergyEstimate,
}

/// Waist-to-hip ratio with the gender-specific risk cut-off applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaistHipReading {
    pub ratio: f64,
    pub high_risk: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicResult {
    pub dry_weight_kg: f64,
    pub weight_loss_percent: f64,
    pub weight_loss_severity: WeightLossSeverity,
    pub bmi_actual: BmiReading,
    pub bmi_selected: BmiReading,
    pub ibw_simple_kg: f64,
    pub ibw_accurate_kg: f64,
    pub abw_simple_kg: f64,
    pub abw_accurate_kg: f64,
    /// (dry weight - IBW) relative to dry weight, percent
    pub ibw_simple_diff_percent: f64,
    pub ibw_accurate_diff_percent: f64,
    /// Equations evaluated at dry weight
    pub energy_actual: EquationResults,
    /// Equations evaluated at the selected weight
    pub energy_selected: EquationResults,
    pub waist_hip: Option<WaistHipReading>,
    /// Mid-arm muscle circumference (cm)
    pub mamc_cm: Option<f64>,
}

pub fn dry_weight(current_weight_kg: f64, ascites_kg: f64, edema_kg: f64) -> f64 {
    (current_weight_kg - ascites_kg - edema_kg).max(0.0)
}

pub fn weight_loss_percent(usual_weight_kg: f64, dry_weight_kg: f64) -> f64 {
    if usual_weight_kg > 0.0 {
        ((usual_weight_kg - dry_weight_kg) / usual_weight_kg * 100.0).max(0.0)
    } else {
        0.0
    }
}

/// Classify weight loss against the reporting period.
///
/// One week uses the 1-2% band. Longer periods compare with the threshold
/// using exact equality for the moderate grade, so real-valued percentages
/// land on `Moderate` only when they hit the threshold exactly.
pub fn weight_loss_severity(percent: f64, duration: ChangeDuration) -> WeightLossSeverity {
    match duration {
        ChangeDuration::None => WeightLossSeverity::None,
        ChangeDuration::OneWeek => {
            if percent > 2.0 {
                WeightLossSeverity::Severe
            } else if percent >= 1.0 {
                WeightLossSeverity::Moderate
            } else {
                WeightLossSeverity::None
            }
        }
        other => match other.threshold() {
            Some(d) if percent == d => WeightLossSeverity::Moderate,
            Some(d) if percent > d => WeightLossSeverity::Severe,
            _ => WeightLossSeverity::None,
        },
    }
}

pub fn ibw_simple(height_cm: f64) -> f64 {
    (height_cm - 100.0).max(0.0)
}

pub fn ibw_accurate(height_cm: f64, gender: Gender) -> f64 {
    let base = match gender {
        Gender::Male => 50.0,
        Gender::Female => 45.5,
    };
    (height_cm - 154.0) * 0.9 + base
}

/// Adjusted body weight against a given ideal weight
pub fn adjusted_body_weight(weight_kg: f64, ibw_kg: f64, gender: Gender) -> f64 {
    let factor = match gender {
        Gender::Male => 0.38,
        Gender::Female => 0.32,
    };
    (weight_kg - ibw_kg) * factor + ibw_kg
}

/// Distance from ideal weight as a percentage of the measured weight
pub fn ibw_diff_percent(weight_kg: f64, ibw_kg: f64) -> f64 {
    if weight_kg > 0.0 {
        (weight_kg - ibw_kg) / weight_kg * 100.0
    } else {
        0.0
    }
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> BmiReading {
    let height_m = height_cm / 100.0;
    if weight_kg <= 0.0 || height_m <= 0.0 {
        return BmiReading {
            value: 0.0,
            classification: None,
        };
    }
    let value = weight_kg / (height_m * height_m);
    let classification = if value < 18.5 {
        BmiClass::Underweight
    } else if value < 25.0 {
        BmiClass::Normal
    } else if value < 30.0 {
        BmiClass::Overweight
    } else {
        BmiClass::Obese
    };
    BmiReading {
        value,
        classification: Some(classification),
    }
}

pub fn bmr_harris_benedict(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let age = f64::from(age_years);
    match gender {
        Gender::Male => 66.5 + 13.75 * weight_kg + 5.003 * height_cm - 6.75 * age,
        Gender::Female => 655.1 + 9.563 * weight_kg + 1.85 * height_cm - 4.676 * age,
    }
}

pub fn bmr_mifflin_st_jeor(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

fn energy_estimate(bmr: f64, activity_multiplier: f64, deficit_kcal: f64) -> EnergyEstimate {
    let tee = bmr * activity_multiplier;
    EnergyEstimate {
        bmr,
        tee,
        estimated_tee: tee - deficit_kcal,
    }
}

fn equations(input: &AnthropometricInput, weight_kg: f64) -> EquationResults {
    let multiplier = input.physical_activity.multiplier();
    EquationResults {
        harris_benedict: energy_estimate(
            bmr_harris_benedict(weight_kg, input.height_cm, input.age_years, input.gender),
            multiplier,
            input.deficit_kcal,
        ),
        mifflin_st_jeor: energy_estimate(
            bmr_mifflin_st_jeor(weight_kg, input.height_cm, input.age_years, input.gender),
            multiplier,
            input.deficit_kcal,
        ),
    }
}

pub fn waist_hip_ratio(waist_cm: f64, hip_cm: f64, gender: Gender) -> Option<WaistHipReading> {
    if hip_cm <= 0.0 || waist_cm <= 0.0 {
        return None;
    }
    let ratio = waist_cm / hip_cm;
    let cutoff = match gender {
        Gender::Male => 0.90,
        Gender::Female => 0.85,
    };
    Some(WaistHipReading {
        ratio,
        high_risk: ratio > cutoff,
    })
}

/// MAMC = MAC - pi x TSF, both in cm
pub fn mid_arm_muscle_circumference(mac_cm: f64, tsf_cm: f64) -> f64 {
    (mac_cm - std::f64::consts::PI * tsf_cm).max(0.0)
}

/// Compute the full profile from scratch
pub fn compute(input: &AnthropometricInput) -> MetabolicResult {
    let dry = dry_weight(
        input.current_weight_kg,
        input.ascites.ascites_kg(),
        input.edema.edema_kg(),
    );
    let loss = weight_loss_percent(input.usual_weight_kg, dry);

    let ibw_s = ibw_simple(input.height_cm);
    let ibw_a = ibw_accurate(input.height_cm, input.gender);

    let waist_hip = match (input.waist_cm, input.hip_cm) {
        (Some(waist), Some(hip)) => waist_hip_ratio(waist, hip, input.gender),
        _ => None,
    };
    let mamc_cm = match (input.mac_cm, input.tsf_cm) {
        (Some(mac), Some(tsf)) if mac > 0.0 => Some(mid_arm_muscle_circumference(mac, tsf)),
        _ => None,
    };

    MetabolicResult {
        dry_weight_kg: dry,
        weight_loss_percent: loss,
        weight_loss_severity: weight_loss_severity(loss, input.change_duration),
        bmi_actual: bmi(input.current_weight_kg, input.height_cm),
        bmi_selected: bmi(input.selected_weight_kg, input.height_cm),
        ibw_simple_kg: ibw_s,
        ibw_accurate_kg: ibw_a,
        abw_simple_kg: adjusted_body_weight(dry, ibw_s, input.gender),
        abw_accurate_kg: adjusted_body_weight(dry, ibw_a, input.gender),
        ibw_simple_diff_percent: ibw_diff_percent(dry, ibw_s),
        ibw_accurate_diff_percent: ibw_diff_percent(dry, ibw_a),
        energy_actual: equations(input, dry),
        energy_selected: equations(input, input.selected_weight_kg),
        waist_hip,
        mamc_cm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FluidGrade, PhysicalActivity};

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_adult_male_profile() {
        let mut input = AnthropometricInput::new(Gender::Male, 40, 175.0, 90.0);
        input.selected_weight_kg = 80.0;
        let r = compute(&input);

        assert_eq!(r.dry_weight_kg, 90.0);
        assert_eq!(r.weight_loss_percent, 0.0);
        assert_eq!(r.weight_loss_severity, WeightLossSeverity::None);
        assert!(close(r.bmi_actual.value, 29.4, 0.05));
        assert_eq!(r.bmi_actual.classification, Some(BmiClass::Overweight));
        assert!(close(r.ibw_simple_kg, 75.0, 1e-9));
        assert!(close(r.ibw_accurate_kg, 68.9, 1e-9));
        assert!(close(r.abw_simple_kg, 80.7, 1e-9));
        assert!(close(r.abw_accurate_kg, 76.9, 0.05));
        assert!(close(r.energy_actual.harris_benedict.bmr, 1909.525, 1e-6));
        assert!(close(r.energy_actual.mifflin_st_jeor.bmr, 1798.75, 1e-6));
        // selected weight feeds the second set of equations
        assert!(close(r.energy_selected.mifflin_st_jeor.bmr, 1698.75, 1e-6));
    }

    #[test]
    fn test_one_week_loss_above_band_is_severe() {
        let mut input = AnthropometricInput::new(Gender::Female, 30, 160.0, 70.0);
        input.usual_weight_kg = 75.0;
        input.change_duration = ChangeDuration::OneWeek;
        let r = compute(&input);
        assert!(close(r.weight_loss_percent, 6.67, 0.01));
        assert_eq!(r.weight_loss_severity, WeightLossSeverity::Severe);
    }

    #[test]
    fn test_one_week_band_edges() {
        assert_eq!(weight_loss_severity(0.99, ChangeDuration::OneWeek), WeightLossSeverity::None);
        assert_eq!(weight_loss_severity(1.0, ChangeDuration::OneWeek), WeightLossSeverity::Moderate);
        assert_eq!(weight_loss_severity(2.0, ChangeDuration::OneWeek), WeightLossSeverity::Moderate);
        assert_eq!(weight_loss_severity(2.01, ChangeDuration::OneWeek), WeightLossSeverity::Severe);
    }

    #[test]
    fn test_longer_periods_use_exact_threshold_match() {
        assert_eq!(weight_loss_severity(5.0, ChangeDuration::OneMonth), WeightLossSeverity::Moderate);
        assert_eq!(weight_loss_severity(4.9, ChangeDuration::OneMonth), WeightLossSeverity::None);
        assert_eq!(weight_loss_severity(5.1, ChangeDuration::OneMonth), WeightLossSeverity::Severe);
        assert_eq!(weight_loss_severity(7.5, ChangeDuration::ThreeMonths), WeightLossSeverity::Moderate);
        assert_eq!(weight_loss_severity(9.99, ChangeDuration::SixMonths), WeightLossSeverity::None);
        assert_eq!(weight_loss_severity(40.0, ChangeDuration::None), WeightLossSeverity::None);
    }

    #[test]
    fn test_bmi_class_boundaries() {
        // weights chosen for a 100 cm height so BMI == weight
        let cases = [
            (18.49, BmiClass::Underweight),
            (18.5, BmiClass::Normal),
            (24.99, BmiClass::Normal),
            (25.0, BmiClass::Overweight),
            (29.99, BmiClass::Overweight),
            (30.0, BmiClass::Obese),
        ];
        for (weight, class) in cases {
            let reading = bmi(weight, 100.0);
            assert!(close(reading.value, weight, 1e-9));
            assert_eq!(reading.classification, Some(class), "weight {}", weight);
        }
    }

    #[test]
    fn test_bmi_degenerate_inputs() {
        assert_eq!(bmi(0.0, 170.0), BmiReading { value: 0.0, classification: None });
        assert_eq!(bmi(70.0, 0.0), BmiReading { value: 0.0, classification: None });
    }

    #[test]
    fn test_dry_weight_never_negative() {
        assert_eq!(dry_weight(10.0, 14.0, 10.0), 0.0);
        let mut input = AnthropometricInput::new(Gender::Male, 60, 170.0, 80.0);
        input.ascites = FluidGrade::Moderate;
        input.edema = FluidGrade::Mild;
        let r = compute(&input);
        assert!(close(r.dry_weight_kg, 73.0, 1e-9));
    }

    #[test]
    fn test_weight_loss_guarded() {
        assert_eq!(weight_loss_percent(0.0, 70.0), 0.0);
        assert_eq!(weight_loss_percent(-5.0, 70.0), 0.0);
        // weight gain is not reported as negative loss
        assert_eq!(weight_loss_percent(60.0, 70.0), 0.0);
    }

    #[test]
    fn test_ibw_simple_clamps() {
        assert_eq!(ibw_simple(90.0), 0.0);
        assert_eq!(ibw_simple(0.0), 0.0);
        assert_eq!(ibw_simple(181.0), 81.0);
    }

    #[test]
    fn test_zero_height_and_weight_stay_finite() {
        let input = AnthropometricInput::new(Gender::Female, 0, 0.0, 0.0);
        let r = compute(&input);
        assert_eq!(r.ibw_simple_diff_percent, 0.0);
        assert_eq!(r.bmi_actual.value, 0.0);
        assert!(r.energy_actual.harris_benedict.bmr.is_finite());
        assert!(r.abw_accurate_kg.is_finite());
    }

    #[test]
    fn test_ibw_diff_relative_to_weight() {
        assert!(close(ibw_diff_percent(100.0, 75.0), 25.0, 1e-9));
        assert!(close(ibw_diff_percent(50.0, 75.0), -50.0, 1e-9));
    }

    #[test]
    fn test_tee_and_deficit() {
        let mut input = AnthropometricInput::new(Gender::Female, 30, 160.0, 60.0);
        input.physical_activity = PhysicalActivity::ModeratelyActive;
        input.deficit_kcal = 500.0;
        let r = compute(&input);
        let mifflin = r.energy_actual.mifflin_st_jeor;
        assert!(close(mifflin.bmr, 1289.0, 1e-9));
        assert!(close(mifflin.tee, 1289.0 * 1.55, 1e-9));
        assert!(close(mifflin.estimated_tee, 1289.0 * 1.55 - 500.0, 1e-9));
    }

    #[test]
    fn test_body_composition_extras() {
        let mut input = AnthropometricInput::new(Gender::Female, 45, 165.0, 72.0);
        input.waist_cm = Some(88.0);
        input.hip_cm = Some(100.0);
        input.mac_cm = Some(30.0);
        input.tsf_cm = Some(2.0);
        let r = compute(&input);

        let whr = r.waist_hip.unwrap();
        assert!(close(whr.ratio, 0.88, 1e-9));
        assert!(whr.high_risk);
        assert!(close(r.mamc_cm.unwrap(), 30.0 - std::f64::consts::PI * 2.0, 1e-9));

        assert!(waist_hip_ratio(88.0, 0.0, Gender::Male).is_none());
        assert!(!waist_hip_ratio(88.0, 100.0, Gender::Male).unwrap().high_risk);
    }
}
