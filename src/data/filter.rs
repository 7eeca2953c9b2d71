use thiserror::Error;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Cascading filter engine: five ordered categorical stages
// ---------------------------------------------------------------------------

/// Filter columns in cascade order. Each stage's options are computed over the
/// table already narrowed by the stages before it.
pub const FILTER_COLUMNS: [&str; 5] = ["Test", "Pump", "Case", "TargetRPM", "TargetP_psi"];

/// Raised when a dataset lacks one of [`FILTER_COLUMNS`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("dataset is missing required column '{0}'")]
pub struct MissingColumn(pub String);

/// Check that every filter column is present, naming the first missing one.
pub fn require_filter_columns(dataset: &Dataset) -> Result<(), MissingColumn> {
    for col in FILTER_COLUMNS {
        if dataset.column_index(col).is_none() {
            return Err(MissingColumn(col.to_string()));
        }
    }
    Ok(())
}

/// One stage's current selection: the "All" sentinel passes every row through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Value(CellValue),
}

impl Selection {
    /// Dropdown label.
    pub fn label(&self) -> String {
        match self {
            Selection::All => "All".to_string(),
            Selection::Value(v) => v.to_string(),
        }
    }
}

/// Per-stage selections, sticky across frames until a source change resets them.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    selections: [Selection; FILTER_COLUMNS.len()],
}

impl FilterState {
    pub fn selection(&self, stage: usize) -> &Selection {
        &self.selections[stage]
    }

    pub fn set(&mut self, stage: usize, selection: Selection) {
        self.selections[stage] = selection;
    }

    /// Reset every stage to "All" (dataset source changed).
    pub fn reset(&mut self) {
        for s in &mut self.selections {
            *s = Selection::All;
        }
    }

    /// Drop any stored selection that no longer appears in its stage's
    /// recomputed option list, falling back to "All" for that stage. Later
    /// stages are re-checked against the re-widened row set.
    pub fn resolve(&mut self, dataset: &Dataset) {
        let mut rows: Vec<usize> = (0..dataset.len()).collect();
        for (stage, col) in FILTER_COLUMNS.iter().enumerate() {
            if let Selection::Value(v) = &self.selections[stage] {
                if !dataset.distinct_values(col, &rows).contains(v) {
                    self.selections[stage] = Selection::All;
                }
            }
            narrow(dataset, col, &self.selections[stage], &mut rows);
        }
    }
}

/// Restrict `rows` to those matching a concrete selection; "All" is a no-op.
fn narrow(dataset: &Dataset, column: &str, selection: &Selection, rows: &mut Vec<usize>) {
    if let Selection::Value(v) = selection {
        if let Some(ci) = dataset.column_index(column) {
            rows.retain(|&ri| &dataset.rows[ri][ci] == v);
        }
    }
}

/// Row indices (original order) passing stages `0..stage`.
fn rows_before_stage(dataset: &Dataset, state: &FilterState, stage: usize) -> Vec<usize> {
    let mut rows: Vec<usize> = (0..dataset.len()).collect();
    for (i, col) in FILTER_COLUMNS.iter().enumerate().take(stage) {
        narrow(dataset, col, &state.selections[i], &mut rows);
    }
    rows
}

/// Option list for one stage: "All", then the sorted distinct non-null values
/// of its column within the rows passing all earlier stages.
pub fn stage_options(dataset: &Dataset, state: &FilterState, stage: usize) -> Vec<Selection> {
    let rows = rows_before_stage(dataset, state, stage);
    let mut options = vec![Selection::All];
    options.extend(
        dataset
            .distinct_values(FILTER_COLUMNS[stage], &rows)
            .into_iter()
            .map(Selection::Value),
    );
    options
}

/// Row indices passing all five stages, in original order.
pub fn filtered_rows(dataset: &Dataset, state: &FilterState) -> Vec<usize> {
    rows_before_stage(dataset, state, FILTER_COLUMNS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    /// Four rows over the five filter columns.
    fn pump_table() -> Dataset {
        let cols: Vec<String> = FILTER_COLUMNS.iter().map(|c| c.to_string()).collect();
        let row = |t: &str, p: &str, c: &str, rpm: i64, psi: i64| {
            vec![
                text(t),
                text(p),
                text(c),
                CellValue::Integer(rpm),
                CellValue::Integer(psi),
            ]
        };
        Dataset::new(
            cols,
            vec![
                row("gas", "P1", "base", 3000, 50),
                row("gas", "P1", "high", 3500, 100),
                row("gas", "P2", "base", 3000, 50),
                row("visc", "P2", "base", 2400, 150),
            ],
        )
    }

    #[test]
    fn options_include_all_then_sorted_distinct() {
        let ds = pump_table();
        let state = FilterState::default();
        let opts = stage_options(&ds, &state, 0);
        assert_eq!(
            opts,
            vec![
                Selection::All,
                Selection::Value(text("gas")),
                Selection::Value(text("visc")),
            ]
        );
    }

    #[test]
    fn later_stage_options_follow_earlier_selections() {
        let ds = pump_table();
        let mut state = FilterState::default();
        state.set(0, Selection::Value(text("visc")));
        // Only P2 remains once Test=visc.
        let opts = stage_options(&ds, &state, 1);
        assert_eq!(opts, vec![Selection::All, Selection::Value(text("P2"))]);
    }

    #[test]
    fn narrowing_is_monotone_and_nested() {
        let ds = pump_table();
        let mut state = FilterState::default();
        let all = filtered_rows(&ds, &state);
        assert_eq!(all, vec![0, 1, 2, 3]);

        state.set(0, Selection::Value(text("gas")));
        let after_test = filtered_rows(&ds, &state);
        assert!(after_test.len() <= all.len());
        assert!(after_test.iter().all(|r| all.contains(r)));

        state.set(1, Selection::Value(text("P1")));
        let after_pump = filtered_rows(&ds, &state);
        assert!(after_pump.len() <= after_test.len());
        assert!(after_pump.iter().all(|r| after_test.contains(r)));
        assert_eq!(after_pump, vec![0, 1]);
    }

    #[test]
    fn all_is_a_no_op_stage() {
        let ds = pump_table();
        let mut state = FilterState::default();
        state.set(0, Selection::Value(text("gas")));
        state.set(2, Selection::All);
        assert_eq!(filtered_rows(&ds, &state), vec![0, 1, 2]);
    }

    #[test]
    fn reset_returns_every_stage_to_all() {
        let mut state = FilterState::default();
        state.set(0, Selection::Value(text("gas")));
        state.set(3, Selection::Value(CellValue::Integer(3000)));
        state.reset();
        for stage in 0..FILTER_COLUMNS.len() {
            assert_eq!(state.selection(stage), &Selection::All);
        }
    }

    #[test]
    fn vanished_selection_falls_back_to_all() {
        let ds = pump_table();
        let mut state = FilterState::default();
        // TargetRPM=3500 only exists under Test=gas, Pump=P1, Case=high.
        state.set(0, Selection::Value(text("gas")));
        state.set(3, Selection::Value(CellValue::Integer(3500)));
        state.resolve(&ds);
        assert_eq!(state.selection(3), &Selection::Value(CellValue::Integer(3500)));

        // Switching Test to visc narrows 3500 out; resolve drops it.
        state.set(0, Selection::Value(text("visc")));
        state.resolve(&ds);
        assert_eq!(state.selection(3), &Selection::All);
        assert_eq!(filtered_rows(&ds, &state), vec![3]);
    }

    #[test]
    fn missing_filter_column_is_named() {
        let ds = Dataset::new(
            vec!["Test".into(), "Pump".into()],
            vec![vec![text("gas"), text("P1")]],
        );
        let err = require_filter_columns(&ds).unwrap_err();
        assert_eq!(err, MissingColumn("Case".to_string()));
        assert_eq!(
            err.to_string(),
            "dataset is missing required column 'Case'"
        );

        assert!(require_filter_columns(&pump_table()).is_ok());
    }
}
