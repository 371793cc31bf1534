//! Spreadsheet export to CSV

pub mod sheets;

pub use sheets::{export_workbook, ExportSummary, EXPECTED_SHEETS};
