use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use super::filter::require_filter_columns;
use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

/// The three bundled datasets, loadable without an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultDataset {
    GasTest,
    Catalog,
    ViscosityEmulsion,
}

impl DefaultDataset {
    pub const ALL: [DefaultDataset; 3] = [
        DefaultDataset::GasTest,
        DefaultDataset::Catalog,
        DefaultDataset::ViscosityEmulsion,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            DefaultDataset::GasTest => "Gas test",
            DefaultDataset::Catalog => "Catalog",
            DefaultDataset::ViscosityEmulsion => "Viscosity and emulsion",
        }
    }

    /// Bundled CSV content, embedded at compile time.
    fn contents(&self) -> &'static str {
        match self {
            DefaultDataset::GasTest => include_str!("../../assets/All_pump.csv"),
            DefaultDataset::Catalog => include_str!("../../assets/Catalog_All.csv"),
            DefaultDataset::ViscosityEmulsion => include_str!("../../assets/df_Viscosity.csv"),
        }
    }
}

/// Where the active dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Default(DefaultDataset),
    Upload(PathBuf),
}

impl DataSource {
    /// Identifier compared against the previously loaded source to detect a
    /// switch: the default's display name, or the uploaded file's name.
    pub fn id(&self) -> String {
        match self {
            DataSource::Default(d) => d.display_name().to_string(),
            DataSource::Upload(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    pub fn display_name(&self) -> String {
        self.id()
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, DataSource::Upload(_))
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and validate the dataset for a source. The five filter columns must
/// be present; the error names the first missing one.
pub fn load_source(source: &DataSource) -> Result<Dataset> {
    let dataset = match source {
        DataSource::Default(default) => load_csv_reader(default.contents().as_bytes())
            .with_context(|| format!("loading bundled dataset '{}'", default.display_name()))?,
        DataSource::Upload(path) => load_path(path)?,
    };
    require_filter_columns(&dataset)?;
    Ok(dataset)
}

/// Load a table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row, one record per table row
/// * `.xlsx` – first worksheet, first row taken as headers
pub fn load_path(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            load_csv_reader(file)
        }
        "xlsx" => load_xlsx(path),
        other => bail!("Unsupported file type: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

pub(crate) fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns: Vec<String> = csv_reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if columns.is_empty() {
        bail!("CSV has no header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Vec<CellValue> = (0..columns.len())
            .map(|i| parse_cell(record.get(i).unwrap_or("")))
            .collect();
        rows.push(row);
    }

    Ok(Dataset::new(columns, rows))
}

/// Guess a cell's type from its text form.
fn parse_cell(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// XLSX loader
// ---------------------------------------------------------------------------

/// Read the first worksheet; row 0 supplies column names.
fn load_xlsx(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).context("opening spreadsheet")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("spreadsheet has no worksheets")?
        .context("reading first worksheet")?;

    let mut row_iter = range.rows();
    let columns: Vec<String> = row_iter
        .next()
        .context("worksheet has no header row")?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    if columns.is_empty() {
        bail!("worksheet has no header row");
    }

    let rows: Vec<Vec<CellValue>> = row_iter
        .map(|row| {
            (0..columns.len())
                .map(|i| xlsx_cell(row.get(i).unwrap_or(&Data::Empty)))
                .collect()
        })
        .collect();

    Ok(Dataset::new(columns, rows))
}

/// Map a spreadsheet cell to a [`CellValue`]. Whole floats collapse to
/// integers so they compare equal to the same value read from CSV.
fn xlsx_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                CellValue::Integer(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => parse_cell(s),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::Error(_) => CellValue::Null,
    }
}
