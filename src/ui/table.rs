use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Dataset;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Test data tab
// ---------------------------------------------------------------------------

pub fn table_tab(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        ui.label(super::NO_DATASET_NOTICE);
        return;
    };
    if state.visible_rows.is_empty() {
        ui.label(super::NO_DATA_NOTICE);
        return;
    }

    if dataset.column_index("Comments").is_some() {
        ui.heading("Test Case Info");
        let comments = distinct_comments(dataset, &state.visible_rows);
        if comments.is_empty() {
            ui.label("No case available");
        } else {
            for line in comment_lines(&comments) {
                ui.label(line);
            }
        }
        ui.separator();
    }

    ui.heading("Test Data");
    data_table(ui, dataset, &state.visible_rows);
}

/// Distinct non-null `Comments` values in first-appearance (row) order.
pub fn distinct_comments(dataset: &Dataset, rows: &[usize]) -> Vec<String> {
    let mut seen = Vec::new();
    for &ri in rows {
        let value = dataset.value(ri, "Comments");
        if value.is_null() {
            continue;
        }
        let text = value.to_string();
        if !seen.contains(&text) {
            seen.push(text);
        }
    }
    seen
}

/// Numbered display lines for the comment block. With more than one distinct
/// comment each is cut at its first sentence; a lone comment is shown whole.
pub fn comment_lines(comments: &[String]) -> Vec<String> {
    comments
        .iter()
        .enumerate()
        .map(|(i, comment)| {
            let text = if comments.len() > 1 {
                first_sentence(comment)
            } else {
                comment.clone()
            };
            format!("Test {}: {}", i + 1, text)
        })
        .collect()
}

/// Text up to and including the first period; a trailing period is appended
/// when the comment has none.
fn first_sentence(comment: &str) -> String {
    let head = comment.split('.').next().unwrap_or(comment);
    format!("{head}.")
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

fn data_table(ui: &mut Ui, dataset: &Dataset, rows: &[usize]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), dataset.columns.len())
        .header(22.0, |mut header| {
            for col in &dataset.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|mut body| {
            for &ri in rows {
                body.row(18.0, |mut row| {
                    for cell in &dataset.rows[ri] {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    #[test]
    fn multiple_comments_are_cut_at_the_first_period() {
        let comments = vec![
            "Test A. extra detail.".to_string(),
            "Test B. more info.".to_string(),
        ];
        assert_eq!(
            comment_lines(&comments),
            vec!["Test 1: Test A.".to_string(), "Test 2: Test B.".to_string()]
        );
    }

    #[test]
    fn a_single_comment_is_shown_unabridged() {
        let comments = vec!["Baseline run. Intake held at 100 psig.".to_string()];
        assert_eq!(
            comment_lines(&comments),
            vec!["Test 1: Baseline run. Intake held at 100 psig.".to_string()]
        );
    }

    #[test]
    fn comment_without_period_gets_one() {
        let comments = vec!["first run".to_string(), "second run".to_string()];
        assert_eq!(
            comment_lines(&comments),
            vec![
                "Test 1: first run.".to_string(),
                "Test 2: second run.".to_string()
            ]
        );
    }

    #[test]
    fn distinct_comments_dedupe_in_row_order() {
        let ds = Dataset::new(
            vec!["Comments".into()],
            vec![
                vec![CellValue::Text("beta run.".into())],
                vec![CellValue::Null],
                vec![CellValue::Text("alpha run.".into())],
                vec![CellValue::Text("beta run.".into())],
            ],
        );
        assert_eq!(
            distinct_comments(&ds, &[0, 1, 2, 3]),
            vec!["beta run.".to_string(), "alpha run.".to_string()]
        );
        // Restricting the rows restricts the comments.
        assert_eq!(distinct_comments(&ds, &[2]), vec!["alpha run.".to_string()]);
    }
}
