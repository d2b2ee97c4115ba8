//! Growth percentile classifier
//!
//! Classifies a child's measurement against WHO or CDC reference percentiles.
//! The reference row is the one whose age is nearest to the child's age;
//! values between sampled ages are not interpolated.

use serde::{Deserialize, Serialize};

use crate::models::Gender;

use super::growth_tables::TABLES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStandard {
    Who,
    Cdc,
}

impl GrowthStandard {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "who" => Some(GrowthStandard::Who),
            "cdc" => Some(GrowthStandard::Cdc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    WeightForAge,
    HeightForAge,
    BmiForAge,
}

impl Measurement {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "weight_for_age" | "weight" | "wfa" => Some(Measurement::WeightForAge),
            "height_for_age" | "length_for_age" | "height" | "length" | "stature" | "hfa" => {
                Some(Measurement::HeightForAge)
            }
            "bmi_for_age" | "bmi" => Some(Measurement::BmiForAge),
            _ => None,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Measurement::WeightForAge => "kg",
            Measurement::HeightForAge => "cm",
            Measurement::BmiForAge => "kg/m2",
        }
    }
}

/// Declared age range of a reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBucket {
    /// 0-36 months, rows keyed in months
    Months0To36,
    /// 2-20 years, rows keyed in years
    Years2To20,
    /// 5-19 years, rows keyed in years
    Years5To19,
}

impl AgeBucket {
    pub fn covers(&self, age_months: f64) -> bool {
        match self {
            AgeBucket::Months0To36 => (0.0..=36.0).contains(&age_months),
            AgeBucket::Years2To20 => (24.0..=240.0).contains(&age_months),
            AgeBucket::Years5To19 => (60.0..=228.0).contains(&age_months),
        }
    }

    /// Convert an age in months to the unit the table's rows use
    pub fn table_age(&self, age_months: f64) -> f64 {
        match self {
            AgeBucket::Months0To36 => age_months,
            AgeBucket::Years2To20 | AgeBucket::Years5To19 => age_months / 12.0,
        }
    }

    pub fn age_unit(&self) -> &'static str {
        match self {
            AgeBucket::Months0To36 => "months",
            AgeBucket::Years2To20 | AgeBucket::Years5To19 => "years",
        }
    }
}

/// A child's age as entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthAge {
    Months(f64),
    Years(f64),
}

impl GrowthAge {
    pub fn in_months(&self) -> f64 {
        match self {
            GrowthAge::Months(m) => *m,
            GrowthAge::Years(y) => y * 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileRow {
    pub age: f64,
    pub p3: f64,
    pub p15: f64,
    pub p50: f64,
    pub p85: f64,
    pub p97: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileTable {
    pub standard: GrowthStandard,
    pub bucket: AgeBucket,
    pub measurement: Measurement,
    pub gender: Gender,
    pub rows: &'static [PercentileRow],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentileBand {
    #[serde(rename = "<3rd")]
    Below3rd,
    #[serde(rename = "3rd-15th")]
    P3To15,
    #[serde(rename = "15th-50th")]
    P15To50,
    #[serde(rename = "50th-85th")]
    P50To85,
    #[serde(rename = "85th-97th")]
    P85To97,
    #[serde(rename = ">97th")]
    Above97th,
}

impl PercentileBand {
    pub fn label(&self) -> &'static str {
        match self {
            PercentileBand::Below3rd => "<3rd",
            PercentileBand::P3To15 => "3rd-15th",
            PercentileBand::P15To50 => "15th-50th",
            PercentileBand::P50To85 => "50th-85th",
            PercentileBand::P85To97 => "85th-97th",
            PercentileBand::Above97th => ">97th",
        }
    }

    pub fn severity(&self) -> GrowthSeverity {
        match self {
            PercentileBand::Below3rd | PercentileBand::Above97th => GrowthSeverity::High,
            PercentileBand::P3To15 | PercentileBand::P85To97 => GrowthSeverity::Moderate,
            PercentileBand::P15To50 | PercentileBand::P50To85 => GrowthSeverity::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthSeverity {
    High,
    Moderate,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileClassification {
    pub band: PercentileBand,
    pub severity: GrowthSeverity,
    /// The reference row the value was compared with
    pub reference: PercentileRow,
    pub bucket: AgeBucket,
}

/// First table (in declaration order) for the standard, measurement and
/// gender whose age bucket covers the age
pub fn find_table(
    standard: GrowthStandard,
    measurement: Measurement,
    gender: Gender,
    age_months: f64,
) -> Option<&'static PercentileTable> {
    TABLES.iter().find(|t| {
        t.standard == standard
            && t.measurement == measurement
            && t.gender == gender
            && t.bucket.covers(age_months)
    })
}

/// Row with the smallest age distance; on a tie the earlier row wins
pub fn nearest_row(rows: &[PercentileRow], age: f64) -> Option<&PercentileRow> {
    let mut best: Option<&PercentileRow> = None;
    for row in rows {
        let closer = match best {
            Some(b) => (row.age - age).abs() < (b.age - age).abs(),
            None => true,
        };
        if closer {
            best = Some(row);
        }
    }
    best
}

/// Band for a value, checked against successive upper bounds with strict `<`
pub fn band_for(row: &PercentileRow, value: f64) -> PercentileBand {
    if value < row.p3 {
        PercentileBand::Below3rd
    } else if value < row.p15 {
        PercentileBand::P3To15
    } else if value < row.p50 {
        PercentileBand::P15To50
    } else if value < row.p85 {
        PercentileBand::P50To85
    } else if value < row.p97 {
        PercentileBand::P85To97
    } else {
        PercentileBand::Above97th
    }
}

/// Classify a measurement; `None` when no reference table covers the age
pub fn classify(
    standard: GrowthStandard,
    measurement: Measurement,
    gender: Gender,
    age: GrowthAge,
    value: f64,
) -> Option<PercentileClassification> {
    let age_months = age.in_months();
    if !age_months.is_finite() || !value.is_finite() {
        return None;
    }

    let Some(table) = find_table(standard, measurement, gender, age_months) else {
        tracing::debug!(?standard, ?measurement, age_months, "No growth reference for age");
        return None;
    };
    let reference = *nearest_row(table.rows, table.bucket.table_age(age_months))?;
    let band = band_for(&reference, value);

    Some(PercentileClassification {
        band,
        severity: band.severity(),
        reference,
        bucket: table.bucket,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_who_bmi_boy_age_ten() {
        let c = classify(
            GrowthStandard::Who,
            Measurement::BmiForAge,
            Gender::Male,
            GrowthAge::Years(10.0),
            15.0,
        )
        .unwrap();
        assert_eq!(c.reference.p50, 16.4);
        assert_eq!(c.band, PercentileBand::P15To50);
        assert_eq!(c.severity, GrowthSeverity::Normal);
        assert_eq!(c.bucket, AgeBucket::Years5To19);
    }

    #[test]
    fn test_value_on_median_is_upper_band() {
        let c = classify(
            GrowthStandard::Who,
            Measurement::BmiForAge,
            Gender::Male,
            GrowthAge::Years(10.0),
            16.4,
        )
        .unwrap();
        assert_eq!(c.band, PercentileBand::P50To85);
    }

    #[test]
    fn test_band_edges_and_severity() {
        let row = PercentileRow { age: 10.0, p3: 13.7, p15: 14.6, p50: 16.4, p85: 19.3, p97: 24.0 };
        assert_eq!(band_for(&row, 13.6), PercentileBand::Below3rd);
        assert_eq!(band_for(&row, 13.7), PercentileBand::P3To15);
        assert_eq!(band_for(&row, 14.6), PercentileBand::P15To50);
        assert_eq!(band_for(&row, 19.3), PercentileBand::P85To97);
        assert_eq!(band_for(&row, 24.0), PercentileBand::Above97th);
        assert_eq!(PercentileBand::Below3rd.severity(), GrowthSeverity::High);
        assert_eq!(PercentileBand::P85To97.severity(), GrowthSeverity::Moderate);
        assert_eq!(PercentileBand::P15To50.severity(), GrowthSeverity::Normal);
    }

    #[test]
    fn test_who_school_age_excludes_under_five() {
        // 4 years is past the infant tables and before the 5-19 tables
        let c = classify(
            GrowthStandard::Who,
            Measurement::BmiForAge,
            Gender::Female,
            GrowthAge::Years(4.0),
            15.0,
        );
        assert!(c.is_none());
        assert!(classify(GrowthStandard::Who, Measurement::BmiForAge, Gender::Female, GrowthAge::Years(5.0), 15.0).is_some());
    }

    #[test]
    fn test_cdc_covers_four_year_old() {
        let c = classify(
            GrowthStandard::Cdc,
            Measurement::BmiForAge,
            Gender::Female,
            GrowthAge::Years(4.0),
            15.0,
        )
        .unwrap();
        assert_eq!(c.bucket, AgeBucket::Years2To20);
        assert_eq!(c.reference.age, 4.0);
    }

    #[test]
    fn test_infant_tables_take_precedence_on_overlap() {
        let c = classify(
            GrowthStandard::Cdc,
            Measurement::WeightForAge,
            Gender::Male,
            GrowthAge::Months(30.0),
            13.5,
        )
        .unwrap();
        assert_eq!(c.bucket, AgeBucket::Months0To36);
        assert_eq!(c.reference.age, 30.0);
    }

    #[test]
    fn test_nearest_age_without_interpolation() {
        let rows = [
            PercentileRow { age: 2.0, p3: 1.0, p15: 2.0, p50: 3.0, p85: 4.0, p97: 5.0 },
            PercentileRow { age: 4.0, p3: 11.0, p15: 12.0, p50: 13.0, p85: 14.0, p97: 15.0 },
        ];
        assert_eq!(nearest_row(&rows, 3.4).unwrap().age, 4.0);
        assert_eq!(nearest_row(&rows, 2.6).unwrap().age, 2.0);
        // equidistant: the earlier row wins
        assert_eq!(nearest_row(&rows, 3.0).unwrap().age, 2.0);
        assert!(nearest_row(&[], 3.0).is_none());
    }

    #[test]
    fn test_out_of_range_ages() {
        assert!(classify(GrowthStandard::Cdc, Measurement::HeightForAge, Gender::Male, GrowthAge::Years(21.0), 170.0).is_none());
        assert!(classify(GrowthStandard::Who, Measurement::WeightForAge, Gender::Male, GrowthAge::Months(-1.0), 3.0).is_none());
        assert!(classify(GrowthStandard::Who, Measurement::WeightForAge, Gender::Male, GrowthAge::Months(6.0), f64::NAN).is_none());
    }

    #[test]
    fn test_every_table_is_well_formed() {
        for table in TABLES {
            assert!(!table.rows.is_empty());
            for pair in table.rows.windows(2) {
                assert!(pair[0].age < pair[1].age);
            }
            for row in table.rows {
                assert!(
                    row.p3 < row.p15 && row.p15 < row.p50 && row.p50 < row.p85 && row.p85 < row.p97,
                    "{:?} {:?} {:?} age {}",
                    table.standard,
                    table.measurement,
                    table.gender,
                    row.age
                );
                assert!(table.bucket.covers(row.age * if table.bucket == AgeBucket::Months0To36 { 1.0 } else { 12.0 }));
            }
        }
    }
}
