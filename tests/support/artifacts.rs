use std::path::Path;

use churnsight::artifacts::ArtifactPaths;
use serde_json::{Value, json};

/// Telco-style training columns, twelve wide.
pub const COLUMNS: [&str; 12] = [
    "gender",
    "SeniorCitizen",
    "Partner",
    "tenure",
    "PhoneService",
    "InternetService",
    "OnlineSecurity",
    "TechSupport",
    "Contract",
    "PaperlessBilling",
    "MonthlyCharges",
    "TotalCharges",
];

/// Forest keyed on tenure, contract and monthly charges.
///
/// The first tree says short tenure churns; the second says month-to-month
/// contracts churn; the third says high charges churn.
pub fn forest(importances: Option<Vec<f64>>) -> Value {
    let mut model = json!({
        "kind": "random_forest",
        "classes": ["No", "Yes"],
        "n_features": COLUMNS.len(),
        "trees": [
            { "nodes": [
                { "feature": 3, "threshold": 12.5, "left": 1, "right": 2, "impurity_decrease": 6.0 },
                { "value": [10, 90] },
                { "value": [80, 20] }
            ]},
            { "nodes": [
                { "feature": 8, "threshold": 0.5, "left": 1, "right": 2, "impurity_decrease": 3.0 },
                { "value": [30, 70] },
                { "value": [95, 5] }
            ]},
            { "nodes": [
                { "feature": 10, "threshold": 80.0, "left": 1, "right": 2, "impurity_decrease": 1.0 },
                { "value": [60, 40] },
                { "value": [40, 60] }
            ]}
        ]
    });
    if let Some(values) = importances {
        model["feature_importances"] = json!(values);
    }
    model
}

pub fn logistic_regression() -> Value {
    let mut weights = vec![0.0; COLUMNS.len()];
    weights[3] = -0.15;
    weights[10] = 0.02;
    json!({
        "kind": "logistic_regression",
        "classes": ["No", "Yes"],
        "weights": weights,
        "intercept": 0.0
    })
}

pub fn write(dir: &Path, model: &Value, columns: &[&str]) -> ArtifactPaths {
    let paths = ArtifactPaths {
        model: dir.join("churn_model.json"),
        columns: dir.join("feature_columns.json"),
    };
    std::fs::write(&paths.model, serde_json::to_vec_pretty(model).unwrap()).unwrap();
    std::fs::write(&paths.columns, serde_json::to_vec(columns).unwrap()).unwrap();
    paths
}
