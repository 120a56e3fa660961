//! Top feature importances for the chart panel.

use std::cmp::Ordering;

use thiserror::Error;

use super::row::FeatureSchema;

/// Number of bars in the importance chart.
pub const TOP_FEATURES: usize = 10;

/// Why the importance chart cannot be drawn.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportanceError {
    #[error("model of kind `{kind}` has no feature importances")]
    Unavailable { kind: String },
    #[error("{importances} importance values for {features} feature columns")]
    LengthMismatch { features: usize, importances: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceEntry {
    pub feature: String,
    pub importance: f64,
}

/// Feature/importance pairs sorted by descending importance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportanceTable {
    entries: Vec<ImportanceEntry>,
}

impl ImportanceTable {
    pub fn entries(&self) -> &[ImportanceEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest importance in the table, used to scale bars.
    pub fn max_importance(&self) -> f64 {
        self.entries
            .first()
            .map(|entry| entry.importance)
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }
}

/// Pair importances with schema names and keep the [`TOP_FEATURES`] largest.
///
/// Ties keep schema order. NaN values sort last.
pub fn top_importances(
    schema: &FeatureSchema,
    importances: &[f64],
) -> Result<ImportanceTable, ImportanceError> {
    if importances.len() != schema.len() {
        return Err(ImportanceError::LengthMismatch {
            features: schema.len(),
            importances: importances.len(),
        });
    }
    let mut entries: Vec<ImportanceEntry> = schema
        .columns()
        .iter()
        .zip(importances)
        .map(|(feature, &importance)| ImportanceEntry {
            feature: feature.clone(),
            importance,
        })
        .collect();
    entries.sort_by(|a, b| descending_nan_last(a.importance, b.importance));
    entries.truncate(TOP_FEATURES);
    Ok(ImportanceTable { entries })
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(len: usize) -> FeatureSchema {
        FeatureSchema::new((0..len).map(|i| format!("f{i}")).collect()).unwrap()
    }

    #[test]
    fn top_entry_is_argmax_and_order_descends() {
        let importances = [
            0.1, 0.5, 0.05, 0.02, 0.03, 0.04, 0.06, 0.07, 0.01, 0.015, 0.025, 0.035,
        ];
        let table = top_importances(&schema(12), &importances).unwrap();

        assert_eq!(table.entries().len(), TOP_FEATURES);
        assert_eq!(table.entries()[0].feature, "f1");
        assert_eq!(table.max_importance(), 0.5);
        assert!(
            table
                .entries()
                .windows(2)
                .all(|pair| pair[0].importance >= pair[1].importance)
        );
        let names: Vec<&str> = table.entries().iter().map(|e| e.feature.as_str()).collect();
        assert!(!names.contains(&"f8"));
        assert!(!names.contains(&"f9"));
    }

    #[test]
    fn short_schema_keeps_all_columns() {
        let table = top_importances(&schema(3), &[0.2, 0.2, 0.6]).unwrap();
        let names: Vec<&str> = table.entries().iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(names, vec!["f2", "f0", "f1"]);
    }

    #[test]
    fn nan_sorts_last() {
        let table = top_importances(&schema(3), &[f64::NAN, 0.1, 0.3]).unwrap();
        assert_eq!(table.entries()[0].feature, "f2");
        assert_eq!(table.entries()[2].feature, "f0");
    }

    #[test]
    fn length_mismatch_is_reported() {
        let err = top_importances(&schema(4), &[0.5, 0.5]).unwrap_err();
        assert_eq!(
            err,
            ImportanceError::LengthMismatch {
                features: 4,
                importances: 2
            }
        );
    }
}
