pub mod panels;
pub mod plot;
pub mod table;

/// Shown when no dataset is loaded (failed load or rejected upload).
pub const NO_DATASET_NOTICE: &str = "No dataset loaded.";

/// Shown when the current filter combination excludes every row.
pub const NO_DATA_NOTICE: &str = "No data available for the current filter selection.";
