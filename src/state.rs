use crate::auth;
use crate::data::filter::{filtered_rows, FilterState};
use crate::data::loader::{self, DataSource, DefaultDataset};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The two display tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    TestData,
    Visualization,
}

/// Severity of the transient status line in the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// Columns of an active scatter plot. Cleared whenever the filtered view
/// changes; the user re-requests a plot per view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotSpec {
    pub x: String,
    pub y: String,
    pub legend: Option<String>,
}

/// The full per-session state, independent of rendering.
pub struct AppState {
    /// Whether the credential gate has been passed this session.
    pub logged_in: bool,
    pub login_username: String,
    pub login_password: String,
    pub login_error: Option<String>,

    /// Selected data source (bundled default or upload).
    pub source: DataSource,
    /// Default-dataset dropdown choice, remembered while an upload is active.
    pub default_choice: DefaultDataset,
    /// Identifier of the last loaded source, for switch detection.
    previous_source_id: Option<String>,
    /// Loaded dataset (None until a source loads successfully).
    pub dataset: Option<Dataset>,

    /// Five sticky cascading filter selections.
    pub filters: FilterState,
    /// Indices of rows passing the current filters (cached).
    pub visible_rows: Vec<usize>,

    pub tab: Tab,
    /// Axis/legend dropdown choices in the visualization tab.
    pub x_choice: Option<String>,
    pub y_choice: Option<String>,
    pub legend_choice: Option<String>,
    /// Plot currently on screen, if one was requested.
    pub active_plot: Option<PlotSpec>,

    /// Status line shown in the top bar, with its severity.
    pub status_message: Option<(StatusLevel, String)>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            logged_in: false,
            login_username: String::new(),
            login_password: String::new(),
            login_error: None,
            source: DataSource::Default(DefaultDataset::GasTest),
            default_choice: DefaultDataset::GasTest,
            previous_source_id: None,
            dataset: None,
            filters: FilterState::default(),
            visible_rows: Vec::new(),
            tab: Tab::TestData,
            x_choice: None,
            y_choice: None,
            legend_choice: None,
            active_plot: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Login submit event.
    pub fn submit_login(&mut self) {
        if auth::check_credentials(&self.login_username, &self.login_password) {
            self.logged_in = true;
            self.login_error = None;
            self.login_password.clear();
        } else {
            self.login_error = Some("Invalid credentials".to_string());
        }
    }

    /// Load the selected source if it differs from the last loaded one.
    /// A source switch resets every filter selection to "All" and discards
    /// any plot choices before the new dataset is loaded.
    pub fn ensure_loaded(&mut self) {
        let id = self.source.id();
        if self.previous_source_id.as_deref() == Some(id.as_str()) {
            return;
        }
        self.filters.reset();
        self.clear_plot_choices();
        self.previous_source_id = Some(id.clone());

        match loader::load_source(&self.source) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows from '{id}' with columns {:?}",
                    dataset.len(),
                    dataset.columns
                );
                self.visible_rows = (0..dataset.len()).collect();
                self.dataset = Some(dataset);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load '{id}': {e:#}");
                self.dataset = None;
                self.visible_rows.clear();
                self.status_message = Some((StatusLevel::Error, format!("Error: {e:#}")));
            }
        }
    }

    /// Recompute `visible_rows` after a filter change. Selections that were
    /// narrowed out of their option list fall back to "All" first.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters.resolve(ds);
            let rows = filtered_rows(ds, &self.filters);
            if rows != self.visible_rows {
                self.visible_rows = rows;
                self.clear_plot_choices();
            }
        }
    }

    fn clear_plot_choices(&mut self) {
        self.x_choice = None;
        self.y_choice = None;
        self.legend_choice = None;
        self.active_plot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{Selection, FILTER_COLUMNS};
    use crate::data::model::CellValue;

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.ensure_loaded();
        assert!(state.dataset.is_some());
        state
    }

    #[test]
    fn source_switch_resets_all_selections() {
        let mut state = loaded_state();
        state
            .filters
            .set(0, Selection::Value(CellValue::Text("GT-01".into())));
        state
            .filters
            .set(3, Selection::Value(CellValue::Integer(3500)));
        state.refilter();
        assert_ne!(state.filters.selection(0), &Selection::All);

        state.source = DataSource::Default(DefaultDataset::Catalog);
        state.ensure_loaded();
        for stage in 0..FILTER_COLUMNS.len() {
            assert_eq!(state.filters.selection(stage), &Selection::All);
        }
        let rows = state.dataset.as_ref().map(|d| d.len()).unwrap_or(0);
        assert_eq!(state.visible_rows.len(), rows);
    }

    #[test]
    fn reselecting_the_same_source_does_not_reload() {
        let mut state = loaded_state();
        state
            .filters
            .set(0, Selection::Value(CellValue::Text("GT-01".into())));
        state.refilter();
        let before = state.visible_rows.clone();

        state.ensure_loaded();
        assert_ne!(state.filters.selection(0), &Selection::All);
        assert_eq!(state.visible_rows, before);
    }

    #[test]
    fn failed_login_keeps_the_gate_closed() {
        let mut state = AppState::default();
        state.login_username = "TUALP".into();
        state.login_password = "wrong".into();
        state.submit_login();
        assert!(!state.logged_in);
        assert_eq!(state.login_error.as_deref(), Some("Invalid credentials"));

        state.login_password = "TUALP2025".into();
        state.submit_login();
        assert!(state.logged_in);
        assert!(state.login_error.is_none());
    }

    #[test]
    fn empty_dataset_drives_the_no_data_notice_in_both_tabs() {
        // A header-only upload loads cleanly but has no rows; both tabs gate
        // on a loaded dataset with an empty visible set.
        let mut state = loaded_state();
        let ds = crate::data::loader::load_csv_reader(
            "Test,Pump,Case,TargetRPM,TargetP_psi\n".as_bytes(),
        )
        .unwrap();
        state.dataset = Some(ds);
        state.refilter();

        assert!(state.dataset.is_some());
        assert!(state.visible_rows.is_empty());
        assert_eq!(
            crate::ui::NO_DATA_NOTICE,
            "No data available for the current filter selection."
        );
    }

    #[test]
    fn cross_narrowed_selection_cannot_empty_the_view() {
        // TargetRPM 3000 exists in the dataset but not under Test=GT-01;
        // the fallback re-widens that stage instead of emptying the view.
        let mut state = loaded_state();
        state
            .filters
            .set(0, Selection::Value(CellValue::Text("GT-01".into())));
        state.refilter();
        assert!(!state.visible_rows.is_empty());

        state
            .filters
            .set(3, Selection::Value(CellValue::Integer(3000)));
        state.refilter();
        assert_eq!(state.filters.selection(3), &Selection::All);
        assert!(!state.visible_rows.is_empty());
    }

    #[test]
    fn load_failure_sets_an_error_status() {
        let mut state = AppState::default();
        state.source = DataSource::Upload(std::path::PathBuf::from("notes.txt"));
        state.ensure_loaded();

        assert!(state.dataset.is_none());
        assert!(state.visible_rows.is_empty());
        match &state.status_message {
            Some((StatusLevel::Error, msg)) => {
                assert!(msg.contains("Unsupported file type"), "{msg}");
            }
            other => panic!("expected an error status, got {other:?}"),
        }
    }

    #[test]
    fn filter_change_clears_the_active_plot() {
        let mut state = loaded_state();
        state.active_plot = Some(PlotSpec {
            x: "QL_bpd".into(),
            y: "DP_psi".into(),
            legend: None,
        });
        state
            .filters
            .set(1, Selection::Value(CellValue::Text("DN1750".into())));
        state.refilter();
        assert!(state.active_plot.is_none());
    }
}
