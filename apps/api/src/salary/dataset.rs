//! Salary dataset: the CSV table the model was trained on.
//!
//! The table stays in memory for the lifetime of the process: it defines the
//! training feature space at startup and answers the company lookups afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::salary::error::ArtifactError;

/// One row of `Salary_Dataset_with_Extra_Features.csv`.
///
/// Empty cells deserialize to `None`. Columns not listed here are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "Company Name")]
    pub company_name: Option<String>,
    #[serde(rename = "Job Title")]
    pub job_title: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Salary")]
    pub salary: Option<f64>,
    #[serde(rename = "Employment Status")]
    pub employment_status: Option<String>,
    /// Coarse role bucket ("Web", "Android", ...). Only used by the graph statistics.
    #[serde(rename = "Job Roles")]
    pub job_roles: Option<String>,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
}

/// Values co-occurring with a company in the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub job_roles: Vec<String>,
    pub location: Vec<String>,
    pub employment_status: Vec<String>,
}

impl CompanyProfile {
    pub fn is_empty(&self) -> bool {
        self.job_roles.is_empty() && self.location.is_empty() && self.employment_status.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SalaryDataset {
    records: Vec<SalaryRecord>,
    fingerprint: String,
}

impl SalaryDataset {
    /// Reads and parses the dataset file.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
        let dataset = Self::from_bytes(&bytes)?;
        info!(
            "Loaded salary dataset from {} ({} rows, {})",
            path.display(),
            dataset.records.len(),
            dataset.fingerprint
        );
        Ok(dataset)
    }

    /// Parses CSV bytes (with header row) and fingerprints the raw snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let mut reader = csv::Reader::from_reader(bytes);
        let mut records = Vec::new();

        for result in reader.deserialize() {
            let record: SalaryRecord = result?;
            records.push(record);
        }

        Ok(Self {
            records,
            fingerprint: fingerprint(bytes),
        })
    }

    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }

    /// `sha256:<hex>` digest of the raw CSV bytes.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Distinct company names in first-seen order. Empty cells are skipped.
    pub fn list_companies(&self) -> Vec<String> {
        distinct(self.records.iter().filter_map(|r| r.company_name.as_deref()))
    }

    /// Job titles, locations and employment statuses seen with `company`.
    ///
    /// The company match is case-insensitive. An unknown company yields an
    /// empty profile rather than an error.
    pub fn describe_company(&self, company: &str) -> CompanyProfile {
        let wanted = company.to_lowercase();
        let rows: Vec<&SalaryRecord> = self
            .records
            .iter()
            .filter(|r| {
                r.company_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase() == wanted)
            })
            .collect();

        CompanyProfile {
            job_roles: distinct(rows.iter().filter_map(|r| r.job_title.as_deref())),
            location: distinct(rows.iter().filter_map(|r| r.location.as_deref())),
            employment_status: distinct(rows.iter().filter_map(|r| r.employment_status.as_deref())),
        }
    }
}

/// Deduplicates while keeping first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salary::fixtures::{fixture_dataset, FIXTURE_CSV};

    #[test]
    fn test_parses_all_rows_and_optional_cells() {
        let dataset = fixture_dataset();
        assert_eq!(dataset.records().len(), 8);

        let missing_rating = &dataset.records()[4];
        assert_eq!(missing_rating.company_name.as_deref(), Some("Infosys"));
        assert!(missing_rating.rating.is_none());

        let missing_company = &dataset.records()[7];
        assert!(missing_company.company_name.is_none());
        assert!(missing_company.salary.is_none());
    }

    #[test]
    fn test_fingerprint_is_stable_and_content_sensitive() {
        let a = SalaryDataset::from_bytes(FIXTURE_CSV.as_bytes()).unwrap();
        let b = SalaryDataset::from_bytes(FIXTURE_CSV.as_bytes()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert!(a.fingerprint().starts_with("sha256:"));

        let altered = FIXTURE_CSV.replace("600000", "600001");
        let c = SalaryDataset::from_bytes(altered.as_bytes()).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_list_companies_dedups_in_first_seen_order() {
        let dataset = fixture_dataset();
        let companies = dataset.list_companies();
        assert_eq!(companies, vec!["IBM", "Infosys", "TCS"]);
        // Stable across calls
        assert_eq!(companies, dataset.list_companies());
    }

    #[test]
    fn test_describe_company_is_case_insensitive() {
        let dataset = fixture_dataset();
        let upper = dataset.describe_company("IBM");
        let lower = dataset.describe_company("ibm");
        assert_eq!(upper, lower);
        assert_eq!(upper.job_roles, vec!["Web Developer", "Android Developer"]);
        assert_eq!(upper.location, vec!["Bangalore", "Hyderabad"]);
        assert_eq!(upper.employment_status, vec!["Full Time", "Intern"]);
    }

    #[test]
    fn test_describe_unknown_company_is_empty() {
        let dataset = fixture_dataset();
        let profile = dataset.describe_company("Nonexistent Corp Ω");
        assert!(profile.is_empty());
        assert_eq!(profile, CompanyProfile::default());
    }

    #[test]
    fn test_describe_company_does_not_match_prefix() {
        let dataset = fixture_dataset();
        assert!(dataset.describe_company("IB").is_empty());
        assert!(dataset.describe_company("").is_empty());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SalaryDataset::load(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn test_malformed_salary_is_csv_error() {
        let csv = "Company Name,Job Title,Location,Salary,Employment Status\nIBM,Dev,Pune,lots,Full Time\n";
        let err = SalaryDataset::from_bytes(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ArtifactError::Csv(_)));
    }
}
