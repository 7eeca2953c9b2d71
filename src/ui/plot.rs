use std::collections::BTreeMap;

use eframe::egui::{self, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::model::{CellValue, Dataset};
use crate::state::{AppState, PlotSpec};

// ---------------------------------------------------------------------------
// Axis / legend candidate ordering
// ---------------------------------------------------------------------------

// Pump curves are read as rate vs head/pressure, so each selector leads with
// the columns an operator reaches for first.

/// X-axis: liquid then gas rate first, remaining numeric columns after.
pub fn x_axis_candidates(numeric: &[String]) -> Vec<String> {
    reorder(numeric, |c| ["QL_bpd", "QG_bpd"].iter().position(|p| *p == c))
}

/// Y-axis: `DP_psi` and `Head_ft` first, then `dp*` per-stage columns.
pub fn y_axis_candidates(numeric: &[String]) -> Vec<String> {
    reorder(numeric, |c| {
        match ["DP_psi", "Head_ft"].iter().position(|p| *p == c) {
            Some(i) => Some(i),
            None if c.starts_with("dp") => Some(2),
            None => None,
        }
    })
}

/// Legend: `Target*` setpoint columns first; unreordered when none exist.
pub fn legend_candidates(numeric: &[String]) -> Vec<String> {
    reorder(numeric, |c| c.starts_with("Target").then_some(0))
}

/// Stable reorder: preferred columns (by ascending rank) ahead of the rest,
/// everything else keeping its natural order.
fn reorder(numeric: &[String], rank: impl Fn(&str) -> Option<usize>) -> Vec<String> {
    let mut preferred: Vec<(usize, &String)> = numeric
        .iter()
        .filter_map(|c| rank(c).map(|r| (r, c)))
        .collect();
    preferred.sort_by_key(|(r, _)| *r);

    let mut out: Vec<String> = preferred.iter().map(|(_, c)| (*c).clone()).collect();
    out.extend(
        numeric
            .iter()
            .filter(|c| rank(c).is_none())
            .cloned(),
    );
    out
}

// ---------------------------------------------------------------------------
// Visualization tab
// ---------------------------------------------------------------------------

pub fn visualization_tab(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Visualization");

    let Some(dataset) = &state.dataset else {
        ui.label(super::NO_DATASET_NOTICE);
        return;
    };
    if state.visible_rows.is_empty() {
        ui.label(super::NO_DATA_NOTICE);
        return;
    }

    let numeric = dataset.numeric_columns(&state.visible_rows);
    if numeric.is_empty() {
        ui.label("No numeric columns to plot.");
        return;
    }

    let xs = x_axis_candidates(&numeric);
    let ys = y_axis_candidates(&numeric);
    let legends = legend_candidates(&numeric);

    // Dropdowns default to the head of each candidate list.
    column_selector(ui, "X-axis", &mut state.x_choice, &xs);
    column_selector(ui, "Y-axis", &mut state.y_choice, &ys);
    column_selector(ui, "Legend", &mut state.legend_choice, &legends);

    if ui.button("Plot").clicked() {
        if let (Some(x), Some(y)) = (state.x_choice.clone(), state.y_choice.clone()) {
            state.active_plot = Some(PlotSpec {
                x,
                y,
                legend: state.legend_choice.clone(),
            });
        }
    }

    if let Some(spec) = &state.active_plot {
        ui.separator();
        scatter_plot(ui, dataset, &state.visible_rows, spec);
    }
}

/// One column dropdown; falls back to the first candidate when the stored
/// choice vanished from the filtered view's numeric columns.
fn column_selector(ui: &mut Ui, label: &str, choice: &mut Option<String>, candidates: &[String]) {
    if choice.as_ref().map_or(true, |c| !candidates.contains(c)) {
        *choice = candidates.first().cloned();
    }
    let current = choice.clone().unwrap_or_default();
    egui::ComboBox::from_label(label)
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in candidates {
                if ui.selectable_label(current == *col, col).clicked() {
                    *choice = Some(col.clone());
                }
            }
        });
}

/// Scatter of X vs Y over the filtered rows, one named colored series per
/// distinct legend value.
fn scatter_plot(ui: &mut Ui, dataset: &Dataset, rows: &[usize], spec: &PlotSpec) {
    ui.heading(format!("{} vs {}", spec.y, spec.x));

    // Partition points by legend value (single Null bucket without a legend).
    let mut series: BTreeMap<CellValue, Vec<[f64; 2]>> = BTreeMap::new();
    for &ri in rows {
        let Some(x) = dataset.value(ri, &spec.x).as_f64() else {
            continue;
        };
        let Some(y) = dataset.value(ri, &spec.y).as_f64() else {
            continue;
        };
        let key = match &spec.legend {
            Some(col) => dataset.value(ri, col).clone(),
            None => CellValue::Null,
        };
        series.entry(key).or_default().push([x, y]);
    }

    let color_map = ColorMap::new(&series.keys().cloned().collect());

    Plot::new("pump_scatter")
        .legend(Legend::default())
        .x_axis_label(&spec.x)
        .y_axis_label(&spec.y)
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (value, points) in &series {
                let plot_points: PlotPoints = points.iter().copied().collect();
                let mut dots = Points::new(plot_points).radius(3.0);
                if spec.legend.is_some() {
                    dots = dots.name(value.to_string()).color(color_map.color_for(value));
                }
                plot_ui.points(dots);
            }
        });
}
