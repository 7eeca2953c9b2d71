use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Filtered-view export
// ---------------------------------------------------------------------------

/// Default file name offered by the save dialog.
pub const EXPORT_FILE_NAME: &str = "filtered_data.csv";

/// Serialize the given rows as CSV: header row, then data rows in order.
/// No index column; null cells become empty fields.
pub fn to_csv_string(dataset: &Dataset, rows: &[usize]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&dataset.columns)?;
    for &ri in rows {
        let record: Vec<String> = dataset.rows[ri].iter().map(|v| v.to_string()).collect();
        writer.write_record(&record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV writer: {e}"))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Ask for a destination and write the filtered view there.
/// Returns `None` when the user cancels the dialog.
pub fn export_filtered(dataset: &Dataset, rows: &[usize]) -> Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return Ok(None);
    };

    let csv = to_csv_string(dataset, rows)?;
    std::fs::write(&path, csv).with_context(|| format!("writing {}", path.display()))?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    #[test]
    fn header_plus_rows_no_index() {
        let ds = Dataset::new(
            vec!["Test".into(), "QL_bpd".into()],
            vec![vec![CellValue::Text("A".into()), CellValue::Integer(100)]],
        );
        let csv = to_csv_string(&ds, &[0]).unwrap();
        assert_eq!(csv, "Test,QL_bpd\nA,100\n");
    }

    #[test]
    fn only_listed_rows_in_listed_order() {
        let ds = Dataset::new(
            vec!["Test".into()],
            vec![
                vec![CellValue::Text("A".into())],
                vec![CellValue::Text("B".into())],
                vec![CellValue::Text("C".into())],
            ],
        );
        let csv = to_csv_string(&ds, &[2, 0]).unwrap();
        assert_eq!(csv, "Test\nC\nA\n");
    }

    #[test]
    fn null_cells_become_empty_fields() {
        let ds = Dataset::new(
            vec!["Test".into(), "Comments".into()],
            vec![vec![CellValue::Text("A".into()), CellValue::Null]],
        );
        let csv = to_csv_string(&ds, &[0]).unwrap();
        assert_eq!(csv, "Test,Comments\nA,\n");
    }
}
