//! Feature schema and single-row assembly.

use std::collections::HashSet;

use super::selection::{CategoryOption, UserSelection};

pub const TENURE_COLUMN: &str = "tenure";
pub const MONTHLY_CHARGES_COLUMN: &str = "MonthlyCharges";
pub const CONTRACT_COLUMN: &str = "Contract";
pub const INTERNET_SERVICE_COLUMN: &str = "InternetService";

/// Columns the form writes into, by their assumed training names.
pub const FORM_COLUMNS: [&str; 4] = [
    TENURE_COLUMN,
    MONTHLY_CHARGES_COLUMN,
    CONTRACT_COLUMN,
    INTERNET_SERVICE_COLUMN,
];

/// Ordered training column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Build a schema, rejecting empty lists and duplicate names.
    pub fn new(columns: Vec<String>) -> Result<Self, String> {
        if columns.is_empty() {
            return Err("feature column list is empty".to_string());
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(format!("duplicate feature column {name:?}"));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Form columns that the schema does not literally contain.
    ///
    /// The row builder still writes these, appending new columns, so a
    /// naming mismatch with the training data only shows up at predict time.
    pub fn missing_form_columns(&self) -> Vec<&'static str> {
        FORM_COLUMNS
            .into_iter()
            .filter(|name| self.position(name).is_none())
            .collect()
    }
}

/// One feature row keyed by column name, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl InputRow {
    /// Row with every schema column set to zero.
    pub fn zeroed(schema: &FeatureSchema) -> Self {
        Self {
            columns: schema.columns.clone(),
            values: vec![0.0; schema.len()],
        }
    }

    /// Assign a column, appending it when the name is not present.
    pub fn set(&mut self, name: &str, value: f64) {
        match self.columns.iter().position(|column| column == name) {
            Some(idx) => self.values[idx] = value,
            None => {
                tracing::warn!(column = name, "Appending column missing from the feature schema");
                self.columns.push(name.to_string());
                self.values.push(value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|column| column == name)
            .map(|idx| self.values[idx])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in column order, as handed to the model.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Zero-fill the schema, then write the four form inputs.
pub fn build_input_row(schema: &FeatureSchema, selection: &UserSelection) -> InputRow {
    let mut row = InputRow::zeroed(schema);
    row.set(TENURE_COLUMN, f64::from(selection.tenure));
    row.set(MONTHLY_CHARGES_COLUMN, selection.monthly_charges);
    row.set(CONTRACT_COLUMN, f64::from(selection.contract.code()));
    row.set(INTERNET_SERVICE_COLUMN, f64::from(selection.internet.code()));
    row
}
