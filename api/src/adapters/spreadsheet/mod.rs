//! Spreadsheet adapter
//!
//! Reads maintenance records from Excel/ODS workbooks (calamine) or CSV.

pub mod reader;

pub use reader::SpreadsheetSource;
