//! One-hot feature space and per-request alignment.
//!
//! # Column order
//! Groups appear in the fixed order company, job role, location, employment
//! status. Within a group, values are sorted lexicographically. Each column is
//! named `<prefix>_<value>`. The fitted coefficients are bound to this order by
//! position, so it must never change between training and inference.
//!
//! # Alignment
//! A request is encoded on its own and then reindexed by column name onto the
//! training space. Columns the request does not produce stay 0. A request value
//! with no matching column is dropped and reported back as an unknown field.

use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::salary::dataset::SalaryRecord;

/// The four categorical attributes the model is trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Company,
    JobRole,
    Location,
    EmploymentStatus,
}

impl CategoricalField {
    /// Encoding order of the groups.
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::Company,
        CategoricalField::JobRole,
        CategoricalField::Location,
        CategoricalField::EmploymentStatus,
    ];

    pub fn column_prefix(self) -> &'static str {
        match self {
            CategoricalField::Company => "company_name",
            CategoricalField::JobRole => "job_roles",
            CategoricalField::Location => "location",
            CategoricalField::EmploymentStatus => "employment_status",
        }
    }

    pub fn column_name(self, value: &str) -> String {
        format!("{}_{}", self.column_prefix(), value)
    }

    fn record_value(self, record: &SalaryRecord) -> Option<&str> {
        match self {
            CategoricalField::Company => record.company_name.as_deref(),
            CategoricalField::JobRole => record.job_title.as_deref(),
            CategoricalField::Location => record.location.as_deref(),
            CategoricalField::EmploymentStatus => record.employment_status.as_deref(),
        }
    }
}

/// Raw categorical tuple for one prediction. Any strings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryQuery {
    pub company_name: String,
    pub job_role: String,
    pub location: String,
    pub employment_status: String,
}

impl SalaryQuery {
    pub fn new(
        company_name: impl Into<String>,
        job_role: impl Into<String>,
        location: impl Into<String>,
        employment_status: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            job_role: job_role.into(),
            location: location.into(),
            employment_status: employment_status.into(),
        }
    }

    pub fn value(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Company => &self.company_name,
            CategoricalField::JobRole => &self.job_role,
            CategoricalField::Location => &self.location,
            CategoricalField::EmploymentStatus => &self.employment_status,
        }
    }
}

/// A request encoded onto the training feature space.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFeatures {
    pub values: Vec<f64>,
    /// Fields whose value had no column in the training space, in encoding order.
    pub unknown_fields: Vec<CategoricalField>,
}

/// Ordered one-hot column schema the model coefficients are bound to.
#[derive(Debug, Clone)]
pub struct FeatureSpace {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    blocks: [Range<usize>; 4],
}

impl FeatureSpace {
    /// Derives the space from every row of the dataset, including rows with no salary.
    pub fn from_records(records: &[SalaryRecord]) -> Self {
        let mut columns = Vec::new();
        let mut blocks: [Range<usize>; 4] = Default::default();

        for (slot, field) in CategoricalField::ALL.into_iter().enumerate() {
            let values: BTreeSet<&str> = records
                .iter()
                .filter_map(|r| field.record_value(r))
                .collect();

            let start = columns.len();
            columns.extend(values.into_iter().map(|v| field.column_name(v)));
            blocks[slot] = start..columns.len();
        }

        Self::from_parts(columns, blocks)
    }

    fn from_parts(columns: Vec<String>, blocks: [Range<usize>; 4]) -> Self {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            columns,
            index,
            blocks,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column range occupied by one categorical group.
    pub fn block(&self, field: CategoricalField) -> Range<usize> {
        let slot = CategoricalField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default();
        self.blocks[slot].clone()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Encodes `query` and reindexes it onto this space with fill value 0.
    pub fn align(&self, query: &SalaryQuery) -> AlignedFeatures {
        let mut values = vec![0.0; self.columns.len()];
        let mut unknown_fields = Vec::new();

        for field in CategoricalField::ALL {
            match self.position(&field.column_name(query.value(field))) {
                Some(i) => values[i] = 1.0,
                None => unknown_fields.push(field),
            }
        }

        AlignedFeatures {
            values,
            unknown_fields,
        }
    }

    /// Encodes a dataset row. Empty cells leave their group all-zero.
    pub fn encode_record(&self, record: &SalaryRecord) -> Vec<f64> {
        let mut values = vec![0.0; self.columns.len()];
        for field in CategoricalField::ALL {
            if let Some(i) = field
                .record_value(record)
                .and_then(|v| self.position(&field.column_name(v)))
            {
                values[i] = 1.0;
            }
        }
        values
    }
}
