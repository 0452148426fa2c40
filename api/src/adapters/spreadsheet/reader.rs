//! Spreadsheet record source implementation

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};

use crate::domain::entities::{
    parse_label, parse_numeric, MaintenanceRecord, MaintenanceTable, RowIssue,
    ASSET_TYPE_COLUMN, COST_OF_PARTS_COLUMN, MEAN_TIME_TILL_REPAIR_COLUMN,
    PROBLEM_DESCRIPTION_COLUMN,
};
use crate::domain::ports::RecordSource;
use crate::error::SourceError;

/// File formats the source understands, picked by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Workbook,
    Csv,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Format::Workbook),
            "csv" => Ok(Format::Csv),
            "" => Err(SourceError::UnsupportedFormat(
                "file has no extension".to_string(),
            )),
            other => Err(SourceError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

/// Reads maintenance records from a spreadsheet on disk
pub struct SpreadsheetSource {
    path: PathBuf,
    sheet_name: Option<String>,
}

impl SpreadsheetSource {
    pub fn new(path: impl Into<PathBuf>, sheet_name: Option<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name,
        }
    }

    fn open_error(&self, reason: impl ToString) -> SourceError {
        SourceError::Open {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    fn load_workbook(&self) -> Result<MaintenanceTable, SourceError> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.open_error(e))?;

        let range = match &self.sheet_name {
            Some(name) => {
                if !workbook.sheet_names().iter().any(|s| s == name) {
                    return Err(SourceError::SheetMissing(name.clone()));
                }
                workbook
                    .worksheet_range(name)
                    .map_err(|e| self.open_error(e))?
            }
            None => workbook
                .worksheet_range_at(0)
                .ok_or(SourceError::EmptySheet)?
                .map_err(|e| self.open_error(e))?,
        };

        let mut rows = range.rows();
        let header = rows.next().ok_or(SourceError::EmptySheet)?;
        let columns = ColumnIndex::from_headers(header.iter().map(|c| c.to_string()))?;

        let mut builder = TableBuilder::default();
        for (i, row) in rows.enumerate() {
            let cell = |idx: usize| row.get(idx).map(Cell::from_data).unwrap_or(Cell::Empty);
            builder.push_row(i + 2, &columns, cell);
        }
        Ok(builder.finish())
    }

    fn load_csv(&self) -> Result<MaintenanceTable, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.open_error(e))?;

        let headers = reader.headers().map_err(|e| self.open_error(e))?.clone();
        if headers.is_empty() {
            return Err(SourceError::EmptySheet);
        }
        let columns = ColumnIndex::from_headers(headers.iter().map(str::to_string))?;

        let mut builder = TableBuilder::default();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.open_error(e))?;
            let cell = |idx: usize| record.get(idx).map(Cell::Text).unwrap_or(Cell::Empty);
            builder.push_row(i + 2, &columns, cell);
        }
        Ok(builder.finish())
    }
}

impl RecordSource for SpreadsheetSource {
    fn load(&self) -> Result<MaintenanceTable, SourceError> {
        if !self.path.is_file() {
            return Err(SourceError::NotFound(self.path.display().to_string()));
        }

        let table = match Format::from_path(&self.path)? {
            Format::Workbook => self.load_workbook()?,
            Format::Csv => self.load_csv()?,
        };

        if !table.issues.is_empty() {
            tracing::warn!(
                "{} cell(s) in '{}' could not be read and were treated as blank",
                table.issues.len(),
                self.path.display()
            );
            for issue in &table.issues {
                tracing::debug!("line {} [{}]: {}", issue.line, issue.column, issue.message);
            }
        }
        tracing::debug!(
            "Loaded {} record(s) from '{}'",
            table.len(),
            self.path.display()
        );

        Ok(table)
    }

    fn describe(&self) -> String {
        match &self.sheet_name {
            Some(sheet) => format!("{} [{}]", self.path.display(), sheet),
            None => self.path.display().to_string(),
        }
    }
}

/// Positions of the required columns in the header row
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnIndex {
    asset_type: usize,
    mean_time_till_repair: usize,
    problem_description: usize,
    cost_of_parts: usize,
}

impl ColumnIndex {
    fn from_headers(headers: impl Iterator<Item = String>) -> Result<Self, SourceError> {
        let headers: Vec<String> = headers.map(|h| h.trim().to_string()).collect();
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SourceError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            asset_type: find(ASSET_TYPE_COLUMN)?,
            mean_time_till_repair: find(MEAN_TIME_TILL_REPAIR_COLUMN)?,
            problem_description: find(PROBLEM_DESCRIPTION_COLUMN)?,
            cost_of_parts: find(COST_OF_PARTS_COLUMN)?,
        })
    }
}

/// Format-independent view of a cell
#[derive(Debug, Clone, PartialEq)]
enum Cell<'a> {
    Empty,
    Text(&'a str),
    Number(f64),
    Other(String),
}

impl<'a> Cell<'a> {
    fn from_data(data: &'a Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) => Cell::Text(s),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            other => Cell::Other(other.to_string()),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
            Cell::Other(s) => s.trim().is_empty(),
        }
    }
}

/// Whole numbers print without a fraction so `3.0` groups as "3"
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[derive(Default)]
struct TableBuilder {
    table: MaintenanceTable,
}

impl TableBuilder {
    fn push_row<'a>(
        &mut self,
        line: usize,
        columns: &ColumnIndex,
        cell: impl Fn(usize) -> Cell<'a>,
    ) {
        let cells = [
            cell(columns.asset_type),
            cell(columns.mean_time_till_repair),
            cell(columns.problem_description),
            cell(columns.cost_of_parts),
        ];
        if cells.iter().all(Cell::is_blank) {
            return;
        }
        let [asset_type, mttr, problem, cost] = cells;

        let record = MaintenanceRecord {
            asset_type: Self::label(asset_type),
            mean_time_till_repair: self.numeric(line, MEAN_TIME_TILL_REPAIR_COLUMN, mttr),
            problem_description: Self::label(problem),
            cost_of_parts: self.numeric(line, COST_OF_PARTS_COLUMN, cost),
        };
        self.table.records.push(record);
    }

    fn label(cell: Cell<'_>) -> Option<String> {
        match cell {
            Cell::Empty => None,
            Cell::Text(s) => parse_label(s),
            Cell::Number(n) => Some(format_number(n)),
            Cell::Other(s) => parse_label(&s),
        }
    }

    fn numeric(&mut self, line: usize, column: &str, cell: Cell<'_>) -> Option<f64> {
        let parsed = match cell {
            Cell::Empty => Ok(None),
            Cell::Number(n) if n.is_finite() => Ok(Some(n)),
            Cell::Number(n) => Err(format!("not a finite number: '{}'", n)),
            Cell::Text(s) => parse_numeric(s),
            Cell::Other(s) => Err(format!("unsupported value: '{}'", s)),
        };

        match parsed {
            Ok(value) => value,
            Err(message) => {
                self.table.issues.push(RowIssue {
                    line,
                    column: column.to_string(),
                    message,
                });
                None
            }
        }
    }

    fn finish(self) -> MaintenanceTable {
        self.table
    }
}
