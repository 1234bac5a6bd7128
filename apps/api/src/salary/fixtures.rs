// Shared test fixtures: a tiny salary table and hand-set artifacts whose
// coefficients are dyadic so every expected value below is exact.

use chrono::{TimeZone, Utc};

use crate::salary::artifacts::{ModelArtifacts, ModelSchema, SCHEMA_VERSION};
use crate::salary::dataset::SalaryDataset;
use crate::salary::features::FeatureSpace;
use crate::salary::model::{LinearModel, MinMaxScaler};
use crate::salary::predictor::SalaryPredictor;

pub const FIXTURE_CSV: &str = "\
Rating,Company Name,Job Title,Salary,Salaries Reported,Location,Employment Status,Job Roles
3.8,IBM,Web Developer,600000,2,Bangalore,Full Time,Web
4.1,Infosys,Android Developer,400000,1,Pune,Full Time,Android
3.9,IBM,Android Developer,700000,1,Hyderabad,Intern,Android
4.0,TCS,Web Developer,350000,3,Bangalore,Contractor,Web
,Infosys,Web Developer,450000,1,Bangalore,Full Time,Web
3.5,IBM,Web Developer,650000,1,Bangalore,Full Time,Web
4.2,TCS,Web Developer,380000,1,Pune,Full Time,Web
3.0,,Android Developer,,1,Pune,Intern,Android
";

pub fn fixture_dataset() -> SalaryDataset {
    SalaryDataset::from_bytes(FIXTURE_CSV.as_bytes()).unwrap()
}

/// Coefficients in fixture column order:
/// IBM, Infosys, TCS | Android, Web | Bangalore, Hyderabad, Pune | Contractor, Full Time, Intern
pub const FIXTURE_COEFFICIENTS: [f64; 11] = [
    0.25, 0.125, 0.0, 0.0625, 0.125, 0.0625, 0.125, 0.0, -0.0625, 0.0625, -0.125,
];
pub const FIXTURE_INTERCEPT: f64 = 0.125;

pub fn fixture_artifacts(dataset: &SalaryDataset) -> ModelArtifacts {
    let space = FeatureSpace::from_records(dataset.records());
    ModelArtifacts {
        model: LinearModel {
            intercept: FIXTURE_INTERCEPT,
            coefficients: FIXTURE_COEFFICIENTS.to_vec(),
        },
        scaler: MinMaxScaler {
            data_min: 350_000.0,
            data_max: 700_000.0,
            feature_range: (0.0, 1.0),
        },
        schema: ModelSchema {
            version: SCHEMA_VERSION,
            columns: space.columns().to_vec(),
            dataset_sha256: dataset.fingerprint().to_string(),
            trained_at: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            train_r2: None,
            test_r2: None,
        },
    }
}

pub fn fixture_predictor() -> SalaryPredictor {
    let dataset = fixture_dataset();
    let artifacts = fixture_artifacts(&dataset);
    SalaryPredictor::new(dataset, artifacts).unwrap()
}
