//! Startup loading of the model and feature column exports.
//!
//! Both files are read once and never mutated afterwards, so one
//! [`ArtifactContext`] can be shared read-only by any number of sessions.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::churn::FeatureSchema;
use crate::config::AppConfig;
use crate::ml::{ChurnModel, ModelArtifact};

/// Errors that prevent the app from starting.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid model file {path}: {source}")]
    ParseModel {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid model file {path}: {reason}")]
    InvalidModel { path: PathBuf, reason: String },
    #[error("Invalid feature column file {path}: {source}")]
    ParseColumns {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid feature column file {path}: {reason}")]
    InvalidColumns { path: PathBuf, reason: String },
    #[error("Model was trained on {model} features but the column file lists {columns}")]
    FeatureCountMismatch { model: usize, columns: usize },
}

/// Where the two exports live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub columns: PathBuf,
}

impl From<&AppConfig> for ArtifactPaths {
    fn from(config: &AppConfig) -> Self {
        Self {
            model: config.model_path.clone(),
            columns: config.columns_path.clone(),
        }
    }
}

/// Loaded classifier and the columns it was trained on.
pub struct ArtifactContext {
    model: Box<dyn ChurnModel>,
    schema: FeatureSchema,
}

impl std::fmt::Debug for ArtifactContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactContext")
            .field("model", &self.model.kind())
            .field("schema", &self.schema)
            .finish()
    }
}

impl ArtifactContext {
    /// Pair a model with its schema, checking that their widths agree.
    pub fn new(model: Box<dyn ChurnModel>, schema: FeatureSchema) -> Result<Self, ArtifactError> {
        if model.n_features() != schema.len() {
            return Err(ArtifactError::FeatureCountMismatch {
                model: model.n_features(),
                columns: schema.len(),
            });
        }
        Ok(Self { model, schema })
    }

    /// Read and validate both exports.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let model = load_model(&paths.model)?;
        let schema = load_schema(&paths.columns)?;
        let context = Self::new(model, schema)?;
        tracing::info!(
            model = %paths.model.display(),
            columns = %paths.columns.display(),
            kind = context.model.kind(),
            features = context.schema.len(),
            "Loaded churn artifacts"
        );
        let missing = context.schema.missing_form_columns();
        if !missing.is_empty() {
            tracing::warn!(
                ?missing,
                "Feature columns lack form inputs by these names; they will be appended and scoring will fail"
            );
        }
        Ok(context)
    }

    pub fn model(&self) -> &dyn ChurnModel {
        self.model.as_ref()
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }
}

/// Parse and validate a model export.
pub fn load_model(path: &Path) -> Result<Box<dyn ChurnModel>, ArtifactError> {
    let bytes = read(path)?;
    let artifact: ModelArtifact =
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::ParseModel {
            path: path.to_path_buf(),
            source,
        })?;
    artifact
        .validate()
        .map_err(|reason| ArtifactError::InvalidModel {
            path: path.to_path_buf(),
            reason,
        })?;
    Ok(artifact.into_model())
}

/// Parse a JSON array of column names.
pub fn load_schema(path: &Path) -> Result<FeatureSchema, ArtifactError> {
    let bytes = read(path)?;
    let columns: Vec<String> =
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::ParseColumns {
            path: path.to_path_buf(),
            source,
        })?;
    FeatureSchema::new(columns).map_err(|reason| ArtifactError::InvalidColumns {
        path: path.to_path_buf(),
        reason,
    })
}

fn read(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    std::fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const COLUMNS: &str = r#"["tenure", "MonthlyCharges", "Contract", "InternetService"]"#;
    const LOGREG: &str = r#"{
        "kind": "logistic_regression",
        "classes": ["No", "Yes"],
        "weights": [-0.05, 0.03, -1.0, 0.4],
        "intercept": -0.5
    }"#;

    fn write_pair(dir: &Path, model: &str, columns: &str) -> ArtifactPaths {
        let paths = ArtifactPaths {
            model: dir.join("churn_model.json"),
            columns: dir.join("feature_columns.json"),
        };
        std::fs::write(&paths.model, model).unwrap();
        std::fs::write(&paths.columns, columns).unwrap();
        paths
    }

    #[test]
    fn loads_matching_pair() {
        let dir = tempdir().unwrap();
        let paths = write_pair(dir.path(), LOGREG, COLUMNS);
        let context = ArtifactContext::load(&paths).unwrap();
        assert_eq!(context.schema().len(), 4);
        assert_eq!(context.model().kind(), "logistic_regression");
    }

    #[test]
    fn missing_model_is_read_error() {
        let dir = tempdir().unwrap();
        let mut paths = write_pair(dir.path(), LOGREG, COLUMNS);
        paths.model = dir.path().join("absent.json");
        let err = ArtifactContext::load(&paths).unwrap_err();
        assert!(matches!(err, ArtifactError::Read { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn corrupt_model_is_parse_error() {
        let dir = tempdir().unwrap();
        let paths = write_pair(dir.path(), "{not json", COLUMNS);
        assert!(matches!(
            ArtifactContext::load(&paths).unwrap_err(),
            ArtifactError::ParseModel { .. }
        ));
    }

    #[test]
    fn columns_must_be_string_list() {
        let dir = tempdir().unwrap();
        let paths = write_pair(dir.path(), LOGREG, r#"{"columns": 4}"#);
        assert!(matches!(
            ArtifactContext::load(&paths).unwrap_err(),
            ArtifactError::ParseColumns { .. }
        ));
        let paths = write_pair(dir.path(), LOGREG, "[]");
        assert!(matches!(
            ArtifactContext::load(&paths).unwrap_err(),
            ArtifactError::InvalidColumns { .. }
        ));
    }

    #[test]
    fn width_mismatch_is_fatal() {
        let dir = tempdir().unwrap();
        let paths = write_pair(dir.path(), LOGREG, r#"["tenure", "MonthlyCharges"]"#);
        assert!(matches!(
            ArtifactContext::load(&paths).unwrap_err(),
            ArtifactError::FeatureCountMismatch {
                model: 4,
                columns: 2
            }
        ));
    }

    #[test]
    fn invalid_model_shape_is_fatal() {
        let dir = tempdir().unwrap();
        let model = r#"{"kind": "random_forest", "classes": ["No", "Yes"], "n_features": 4, "trees": []}"#;
        let paths = write_pair(dir.path(), model, COLUMNS);
        assert!(matches!(
            ArtifactContext::load(&paths).unwrap_err(),
            ArtifactError::InvalidModel { .. }
        ));
    }

    #[test]
    fn context_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArtifactContext>();
    }
}
