//! Reference percentile tables
//!
//! Approximate WHO and CDC cut-offs at sampled ages. Infant tables are keyed in
//! months, the others in years. Infant tables are declared before the older
//! age ranges so they win where ranges overlap.

use crate::models::Gender;

use super::growth::{AgeBucket, GrowthStandard, Measurement, PercentileRow, PercentileTable};

const fn r(age: f64, p3: f64, p15: f64, p50: f64, p85: f64, p97: f64) -> PercentileRow {
    PercentileRow {
        age,
        p3,
        p15,
        p50,
        p85,
        p97,
    }
}

const WHO_WFA_BOYS_0_36: &[PercentileRow] = &[
    r(0.0, 2.5, 2.9, 3.3, 3.9, 4.3),
    r(3.0, 5.1, 5.6, 6.4, 7.2, 7.7),
    r(6.0, 6.4, 7.1, 7.9, 8.9, 9.7),
    r(9.0, 7.4, 8.0, 8.9, 9.9, 10.5),
    r(12.0, 7.8, 8.6, 9.6, 10.8, 11.8),
    r(18.0, 9.1, 9.9, 10.9, 12.2, 13.2),
    r(24.0, 10.1, 11.0, 12.2, 13.6, 14.8),
    r(30.0, 11.1, 12.0, 13.3, 14.8, 16.1),
    r(36.0, 11.9, 12.9, 14.3, 16.0, 17.3),
];

const WHO_WFA_GIRLS_0_36: &[PercentileRow] = &[
    r(0.0, 2.4, 2.8, 3.2, 3.7, 4.2),
    r(3.0, 4.6, 5.1, 5.8, 6.6, 7.2),
    r(6.0, 5.8, 6.4, 7.3, 8.3, 9.0),
    r(9.0, 6.6, 7.3, 8.2, 9.3, 10.1),
    r(12.0, 7.1, 7.9, 8.9, 10.1, 11.0),
    r(18.0, 8.4, 9.3, 10.2, 11.6, 12.6),
    r(24.0, 9.4, 10.4, 11.5, 13.0, 14.2),
    r(30.0, 10.4, 11.4, 12.7, 14.4, 15.7),
    r(36.0, 11.2, 12.3, 13.9, 15.7, 17.2),
];

const WHO_LFA_BOYS_0_36: &[PercentileRow] = &[
    r(0.0, 46.3, 47.9, 49.9, 51.8, 53.4),
    r(3.0, 57.6, 59.3, 61.4, 63.5, 65.3),
    r(6.0, 63.6, 65.4, 67.6, 69.8, 71.6),
    r(9.0, 68.0, 69.9, 72.0, 74.2, 76.2),
    r(12.0, 71.3, 73.3, 75.7, 78.0, 80.2),
    r(18.0, 77.2, 79.5, 82.3, 85.1, 87.7),
    r(24.0, 82.5, 85.1, 87.8, 90.9, 93.6),
    r(30.0, 86.4, 89.0, 91.9, 95.0, 97.6),
    r(36.0, 89.7, 92.4, 96.1, 99.7, 102.5),
];

const WHO_LFA_GIRLS_0_36: &[PercentileRow] = &[
    r(0.0, 45.6, 47.2, 49.1, 51.1, 52.7),
    r(3.0, 56.0, 57.6, 59.8, 62.0, 63.8),
    r(6.0, 61.5, 63.4, 65.7, 68.1, 70.0),
    r(9.0, 66.1, 68.0, 70.1, 72.6, 74.7),
    r(12.0, 69.8, 71.8, 74.0, 76.7, 78.9),
    r(18.0, 75.8, 78.3, 80.7, 83.6, 86.0),
    r(24.0, 80.9, 83.5, 86.4, 89.4, 92.0),
    r(30.0, 85.1, 87.9, 90.7, 93.8, 96.5),
    r(36.0, 88.4, 91.4, 95.1, 98.2, 101.1),
];

const WHO_BMI_BOYS_5_19: &[PercentileRow] = &[
    r(5.0, 13.0, 13.8, 15.3, 16.7, 18.0),
    r(6.0, 13.0, 13.8, 15.3, 16.8, 18.3),
    r(7.0, 13.1, 13.9, 15.5, 17.1, 18.9),
    r(8.0, 13.3, 14.1, 15.7, 17.6, 19.7),
    r(9.0, 13.5, 14.3, 16.0, 18.6, 22.6),
    r(10.0, 13.7, 14.6, 16.4, 19.3, 24.0),
    r(11.0, 14.0, 15.0, 16.9, 19.9, 24.5),
    r(12.0, 14.4, 15.4, 17.5, 20.6, 25.2),
    r(13.0, 14.9, 16.0, 18.2, 21.4, 25.9),
    r(14.0, 15.4, 16.6, 19.0, 22.2, 26.6),
    r(15.0, 15.9, 17.2, 19.8, 23.0, 27.2),
    r(16.0, 16.4, 17.7, 20.5, 23.7, 27.7),
    r(17.0, 16.9, 18.2, 21.1, 24.3, 28.1),
    r(18.0, 17.3, 18.6, 21.7, 24.8, 28.4),
    r(19.0, 17.6, 19.0, 22.2, 25.3, 28.7),
];

const WHO_BMI_GIRLS_5_19: &[PercentileRow] = &[
    r(5.0, 12.7, 13.6, 15.2, 16.9, 18.6),
    r(6.0, 12.7, 13.6, 15.3, 17.1, 19.0),
    r(7.0, 12.8, 13.7, 15.4, 17.5, 19.7),
    r(8.0, 13.0, 13.9, 15.7, 18.0, 20.6),
    r(9.0, 13.3, 14.2, 16.1, 18.7, 21.6),
    r(10.0, 13.6, 14.6, 16.6, 19.4, 22.6),
    r(11.0, 14.0, 15.1, 17.2, 20.2, 23.7),
    r(12.0, 14.5, 15.6, 18.0, 21.1, 24.9),
    r(13.0, 15.0, 16.2, 18.8, 22.0, 25.9),
    r(14.0, 15.5, 16.8, 19.6, 22.8, 26.8),
    r(15.0, 15.9, 17.2, 20.2, 23.5, 27.5),
    r(16.0, 16.2, 17.5, 20.5, 23.9, 27.9),
    r(17.0, 16.4, 17.8, 20.7, 24.2, 28.2),
    r(18.0, 16.5, 17.9, 20.8, 24.3, 28.3),
    r(19.0, 16.6, 18.0, 21.0, 24.5, 28.4),
];

const WHO_HFA_BOYS_5_19: &[PercentileRow] = &[
    r(5.0, 101.2, 104.9, 110.0, 115.1, 118.7),
    r(6.0, 106.7, 110.5, 116.0, 121.4, 125.2),
    r(7.0, 112.0, 116.1, 121.7, 127.3, 131.3),
    r(8.0, 116.9, 121.2, 127.3, 133.3, 137.5),
    r(9.0, 121.5, 126.0, 132.6, 139.0, 143.5),
    r(10.0, 125.8, 130.5, 137.8, 144.5, 149.3),
    r(11.0, 130.0, 135.0, 143.1, 150.3, 155.4),
    r(12.0, 134.6, 140.1, 149.1, 157.2, 162.6),
    r(13.0, 140.0, 146.2, 156.0, 164.6, 170.2),
    r(14.0, 146.0, 152.5, 163.2, 171.5, 176.8),
    r(15.0, 151.5, 158.0, 169.0, 176.7, 181.6),
    r(16.0, 155.8, 162.0, 172.9, 180.1, 184.6),
    r(17.0, 158.5, 164.5, 175.2, 182.1, 186.4),
    r(18.0, 160.0, 166.0, 176.1, 183.2, 187.5),
    r(19.0, 160.7, 166.6, 176.5, 183.6, 188.0),
];

const WHO_HFA_GIRLS_5_19: &[PercentileRow] = &[
    r(5.0, 100.3, 104.1, 109.4, 114.7, 118.5),
    r(6.0, 105.7, 109.7, 115.1, 120.6, 124.5),
    r(7.0, 110.9, 115.0, 120.8, 126.6, 130.7),
    r(8.0, 115.8, 120.2, 126.6, 132.8, 137.1),
    r(9.0, 120.5, 125.3, 132.5, 139.1, 143.6),
    r(10.0, 125.4, 130.6, 138.6, 145.7, 150.3),
    r(11.0, 130.7, 136.3, 144.9, 152.0, 156.5),
    r(12.0, 136.2, 141.9, 151.2, 157.7, 161.9),
    r(13.0, 141.3, 146.8, 156.4, 162.1, 165.9),
    r(14.0, 144.7, 150.0, 159.8, 164.9, 168.4),
    r(15.0, 146.5, 151.7, 161.7, 166.4, 169.8),
    r(16.0, 147.3, 152.5, 162.5, 167.2, 170.6),
    r(17.0, 147.7, 152.9, 162.9, 167.6, 171.1),
    r(18.0, 147.9, 153.1, 163.1, 167.9, 171.4),
    r(19.0, 148.0, 153.2, 163.2, 168.1, 171.6),
];

const CDC_WFA_BOYS_0_36: &[PercentileRow] = &[
    r(0.0, 2.4, 2.9, 3.5, 4.0, 4.4),
    r(3.0, 5.1, 5.7, 6.4, 7.1, 7.6),
    r(6.0, 6.6, 7.2, 7.9, 8.8, 9.4),
    r(9.0, 7.7, 8.4, 9.2, 10.1, 10.8),
    r(12.0, 8.5, 9.2, 10.1, 11.1, 11.8),
    r(18.0, 9.6, 10.4, 11.5, 12.6, 13.4),
    r(24.0, 10.5, 11.4, 12.6, 13.8, 14.7),
    r(30.0, 11.3, 12.2, 13.5, 14.9, 15.9),
    r(36.0, 12.0, 13.0, 14.4, 15.9, 17.0),
];

const CDC_WFA_GIRLS_0_36: &[PercentileRow] = &[
    r(0.0, 2.4, 2.8, 3.4, 3.8, 4.2),
    r(3.0, 4.7, 5.2, 5.8, 6.5, 7.0),
    r(6.0, 6.1, 6.6, 7.3, 8.1, 8.7),
    r(9.0, 7.1, 7.7, 8.5, 9.4, 10.1),
    r(12.0, 7.8, 8.5, 9.4, 10.4, 11.1),
    r(18.0, 9.0, 9.7, 10.8, 11.9, 12.7),
    r(24.0, 9.9, 10.8, 11.9, 13.2, 14.1),
    r(30.0, 10.8, 11.7, 13.0, 14.4, 15.4),
    r(36.0, 11.6, 12.5, 13.9, 15.4, 16.6),
];

const CDC_LFA_BOYS_0_36: &[PercentileRow] = &[
    r(0.0, 46.5, 48.5, 50.5, 52.5, 54.0),
    r(3.0, 57.5, 59.4, 61.4, 63.4, 64.9),
    r(6.0, 63.9, 65.8, 67.8, 69.9, 71.4),
    r(9.0, 68.4, 70.4, 72.4, 74.5, 76.0),
    r(12.0, 72.0, 74.1, 76.1, 78.3, 79.9),
    r(18.0, 77.9, 80.2, 82.4, 84.8, 86.5),
    r(24.0, 82.5, 85.0, 87.5, 90.0, 91.9),
    r(30.0, 86.5, 89.1, 91.8, 94.5, 96.5),
    r(36.0, 90.0, 92.7, 95.6, 98.5, 100.6),
];

const CDC_LFA_GIRLS_0_36: &[PercentileRow] = &[
    r(0.0, 45.8, 47.7, 49.5, 51.3, 52.7),
    r(3.0, 55.9, 57.8, 59.8, 61.8, 63.2),
    r(6.0, 61.9, 63.8, 65.9, 68.0, 69.6),
    r(9.0, 66.4, 68.4, 70.6, 72.8, 74.5),
    r(12.0, 70.1, 72.3, 74.5, 76.8, 78.6),
    r(18.0, 76.2, 78.6, 81.1, 83.6, 85.6),
    r(24.0, 81.2, 83.8, 86.5, 89.2, 91.3),
    r(30.0, 85.3, 88.0, 90.9, 93.8, 96.0),
    r(36.0, 88.8, 91.6, 94.7, 97.8, 100.2),
];

const CDC_WFA_BOYS_2_20: &[PercentileRow] = &[
    r(2.0, 10.7, 11.6, 12.7, 14.0, 15.0),
    r(4.0, 13.6, 14.8, 16.3, 18.0, 19.5),
    r(6.0, 16.6, 18.2, 20.7, 23.2, 25.6),
    r(8.0, 20.0, 22.3, 25.6, 29.6, 33.6),
    r(10.0, 24.2, 27.1, 31.9, 38.2, 44.5),
    r(12.0, 29.0, 33.2, 39.9, 48.4, 56.3),
    r(14.0, 36.0, 41.9, 50.8, 61.0, 70.0),
    r(16.0, 45.5, 51.5, 61.0, 71.6, 81.5),
    r(18.0, 51.2, 57.0, 66.7, 77.8, 88.0),
    r(20.0, 54.7, 60.3, 70.6, 81.4, 92.0),
];

const CDC_WFA_GIRLS_2_20: &[PercentileRow] = &[
    r(2.0, 10.0, 10.9, 12.0, 13.3, 14.3),
    r(4.0, 13.0, 14.2, 15.9, 17.8, 19.4),
    r(6.0, 16.0, 17.7, 20.2, 23.2, 25.9),
    r(8.0, 19.6, 21.8, 25.8, 30.4, 34.7),
    r(10.0, 23.9, 26.9, 32.5, 39.6, 46.0),
    r(12.0, 29.7, 34.0, 41.5, 50.6, 58.4),
    r(14.0, 36.2, 41.2, 49.4, 59.6, 68.6),
    r(16.0, 41.2, 45.8, 53.5, 63.6, 73.1),
    r(18.0, 43.5, 48.1, 56.2, 66.5, 76.9),
    r(20.0, 44.8, 49.4, 58.0, 68.9, 80.1),
];

const CDC_STATURE_BOYS_2_20: &[PercentileRow] = &[
    r(2.0, 82.5, 84.8, 86.9, 89.1, 90.9),
    r(4.0, 96.0, 99.0, 102.5, 106.0, 108.5),
    r(6.0, 107.6, 111.1, 115.5, 119.7, 122.6),
    r(8.0, 118.2, 122.2, 127.0, 131.8, 135.2),
    r(10.0, 127.4, 131.6, 137.5, 143.1, 146.8),
    r(12.0, 136.1, 141.0, 149.1, 155.6, 160.0),
    r(14.0, 148.0, 154.3, 163.2, 170.1, 174.4),
    r(16.0, 158.9, 164.5, 173.5, 178.9, 182.6),
    r(18.0, 163.0, 168.4, 176.1, 181.8, 185.5),
    r(20.0, 163.8, 169.0, 176.8, 182.7, 186.2),
];

const CDC_STATURE_GIRLS_2_20: &[PercentileRow] = &[
    r(2.0, 80.9, 83.3, 85.4, 87.9, 89.9),
    r(4.0, 95.0, 98.0, 101.6, 105.2, 107.7),
    r(6.0, 106.8, 110.4, 114.6, 118.9, 121.8),
    r(8.0, 117.6, 121.6, 126.6, 131.5, 134.9),
    r(10.0, 127.6, 132.0, 138.3, 143.9, 147.7),
    r(12.0, 139.1, 144.3, 151.5, 157.5, 161.3),
    r(14.0, 148.9, 153.5, 159.8, 165.3, 168.7),
    r(16.0, 151.3, 155.7, 162.4, 167.9, 171.3),
    r(18.0, 151.9, 156.3, 163.1, 168.7, 172.0),
    r(20.0, 152.1, 156.6, 163.3, 168.9, 172.2),
];

const CDC_BMI_BOYS_2_20: &[PercentileRow] = &[
    r(2.0, 14.9, 15.7, 16.6, 17.7, 18.5),
    r(4.0, 14.0, 14.7, 15.6, 16.6, 17.6),
    r(6.0, 13.6, 14.3, 15.3, 16.6, 18.0),
    r(8.0, 13.7, 14.5, 15.7, 17.4, 19.7),
    r(10.0, 14.2, 15.1, 16.6, 18.7, 21.9),
    r(12.0, 14.9, 16.0, 17.9, 20.4, 24.0),
    r(14.0, 15.9, 17.0, 19.3, 22.1, 25.9),
    r(16.0, 16.9, 18.1, 20.5, 23.4, 27.4),
    r(18.0, 17.8, 19.0, 21.7, 24.5, 28.4),
    r(20.0, 18.6, 19.8, 22.6, 25.6, 29.5),
];

const CDC_BMI_GIRLS_2_20: &[PercentileRow] = &[
    r(2.0, 14.6, 15.3, 16.3, 17.3, 18.2),
    r(4.0, 13.8, 14.5, 15.4, 16.5, 17.6),
    r(6.0, 13.3, 14.0, 15.2, 16.6, 18.2),
    r(8.0, 13.4, 14.2, 15.8, 17.8, 20.4),
    r(10.0, 14.0, 15.0, 16.9, 19.4, 23.0),
    r(12.0, 14.8, 16.0, 18.0, 21.0, 25.0),
    r(14.0, 15.7, 17.0, 19.4, 22.5, 26.6),
    r(16.0, 16.5, 17.8, 20.3, 23.6, 27.8),
    r(18.0, 17.1, 18.4, 21.0, 24.5, 29.0),
    r(20.0, 17.6, 18.9, 21.7, 25.3, 30.0),
];

const fn table(
    standard: GrowthStandard,
    bucket: AgeBucket,
    measurement: Measurement,
    gender: Gender,
    rows: &'static [PercentileRow],
) -> PercentileTable {
    PercentileTable {
        standard,
        bucket,
        measurement,
        gender,
        rows,
    }
}

pub static TABLES: &[PercentileTable] = &[
    table(GrowthStandard::Who, AgeBucket::Months0To36, Measurement::WeightForAge, Gender::Male, WHO_WFA_BOYS_0_36),
    table(GrowthStandard::Who, AgeBucket::Months0To36, Measurement::WeightForAge, Gender::Female, WHO_WFA_GIRLS_0_36),
    table(GrowthStandard::Who, AgeBucket::Months0To36, Measurement::HeightForAge, Gender::Male, WHO_LFA_BOYS_0_36),
    table(GrowthStandard::Who, AgeBucket::Months0To36, Measurement::HeightForAge, Gender::Female, WHO_LFA_GIRLS_0_36),
    table(GrowthStandard::Who, AgeBucket::Years5To19, Measurement::BmiForAge, Gender::Male, WHO_BMI_BOYS_5_19),
    table(GrowthStandard::Who, AgeBucket::Years5To19, Measurement::BmiForAge, Gender::Female, WHO_BMI_GIRLS_5_19),
    table(GrowthStandard::Who, AgeBucket::Years5To19, Measurement::HeightForAge, Gender::Male, WHO_HFA_BOYS_5_19),
    table(GrowthStandard::Who, AgeBucket::Years5To19, Measurement::HeightForAge, Gender::Female, WHO_HFA_GIRLS_5_19),
    table(GrowthStandard::Cdc, AgeBucket::Months0To36, Measurement::WeightForAge, Gender::Male, CDC_WFA_BOYS_0_36),
    table(GrowthStandard::Cdc, AgeBucket::Months0To36, Measurement::WeightForAge, Gender::Female, CDC_WFA_GIRLS_0_36),
    table(GrowthStandard::Cdc, AgeBucket::Months0To36, Measurement::HeightForAge, Gender::Male, CDC_LFA_BOYS_0_36),
    table(GrowthStandard::Cdc, AgeBucket::Months0To36, Measurement::HeightForAge, Gender::Female, CDC_LFA_GIRLS_0_36),
    table(GrowthStandard::Cdc, AgeBucket::Years2To20, Measurement::WeightForAge, Gender::Male, CDC_WFA_BOYS_2_20),
    table(GrowthStandard::Cdc, AgeBucket::Years2To20, Measurement::WeightForAge, Gender::Female, CDC_WFA_GIRLS_2_20),
    table(GrowthStandard::Cdc, AgeBucket::Years2To20, Measurement::HeightForAge, Gender::Male, CDC_STATURE_BOYS_2_20),
    table(GrowthStandard::Cdc, AgeBucket::Years2To20, Measurement::HeightForAge, Gender::Female, CDC_STATURE_GIRLS_2_20),
    table(GrowthStandard::Cdc, AgeBucket::Years2To20, Measurement::BmiForAge, Gender::Male, CDC_BMI_BOYS_2_20),
    table(GrowthStandard::Cdc, AgeBucket::Years2To20, Measurement::BmiForAge, Gender::Female, CDC_BMI_GIRLS_2_20),
];
