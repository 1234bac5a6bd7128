//! Descriptive statistics over the salary dataset for the dashboard graphs.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::salary::dataset::SalaryRecord;

/// Each map is keyed by role or location. Key order is part of the output:
/// `roles_count` is ordered by count descending, the rest alphabetically.
#[derive(Debug, Clone, Serialize)]
pub struct GraphData {
    #[serde(rename = "RolesCount")]
    pub roles_count: Map<String, Value>,
    #[serde(rename = "AverageSalary")]
    pub average_salary: Map<String, Value>,
    #[serde(rename = "CompanyCount")]
    pub company_count: Map<String, Value>,
    #[serde(rename = "LocationSalary")]
    pub location_salary: Map<String, Value>,
    #[serde(rename = "Rating")]
    pub rating: Map<String, Value>,
}

#[derive(Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    /// `None` for a group with no observations (serialized as null).
    fn get(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl GraphData {
    pub fn from_records(records: &[SalaryRecord]) -> Self {
        let mut role_counts: BTreeMap<&str, u64> = BTreeMap::new();
        let mut role_salary: BTreeMap<&str, Mean> = BTreeMap::new();
        let mut location_companies: BTreeMap<&str, u64> = BTreeMap::new();
        let mut location_salary: BTreeMap<&str, Mean> = BTreeMap::new();
        let mut location_rating: BTreeMap<&str, Mean> = BTreeMap::new();

        for record in records {
            if let Some(role) = record.job_roles.as_deref() {
                let count = role_counts.entry(role).or_default();
                if record.employment_status.is_some() {
                    *count += 1;
                }
                role_salary.entry(role).or_default().add(record.salary);
            }

            if let Some(location) = record.location.as_deref() {
                let count = location_companies.entry(location).or_default();
                if record.company_name.is_some() {
                    *count += 1;
                }
                location_salary
                    .entry(location)
                    .or_default()
                    .add(record.salary);
                location_rating
                    .entry(location)
                    .or_default()
                    .add(record.rating);
            }
        }

        let mut ranked: Vec<(&str, u64)> = role_counts.into_iter().collect();
        // Stable sort keeps alphabetical order among equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            roles_count: ranked
                .into_iter()
                .map(|(k, v)| (k.to_string(), Value::from(v)))
                .collect(),
            average_salary: means(&role_salary, |m| m.round_ties_even()),
            company_count: location_companies
                .into_iter()
                .map(|(k, v)| (k.to_string(), Value::from(v)))
                .collect(),
            location_salary: means(&location_salary, |m| m.round_ties_even()),
            rating: means(&location_rating, |m| m),
        }
    }
}

fn means(groups: &BTreeMap<&str, Mean>, finish: impl Fn(f64) -> f64) -> Map<String, Value> {
    groups
        .iter()
        .map(|(k, mean)| {
            let value = mean.get().map(&finish).map_or(Value::Null, Value::from);
            (k.to_string(), value)
        })
        .collect()
}
