//! Churn form domain: inputs, row assembly, scoring and the page model.

pub mod importance;
pub mod page;
pub mod predict;
pub mod row;
pub mod selection;

pub use importance::{ImportanceEntry, ImportanceError, ImportanceTable, TOP_FEATURES};
pub use page::{ImportancePanel, PageView, build_page};
pub use predict::{PredictionResult, RISK_THRESHOLD, RiskLevel, predict};
pub use row::{FeatureSchema, InputRow, build_input_row};
pub use selection::{CategoryOption, ContractType, InternetService, UserSelection};
