//! Workbook → CSV export
//!
//! Reads the bookkeeping workbook and writes one CSV per expected worksheet
//! into the output directory. Sheets missing from the workbook are skipped
//! with a warning; the `export-sheets` binary exits non-zero only when
//! nothing at all could be exported.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};

/// Worksheets the operation keeps in its bookkeeping workbook.
pub const EXPECTED_SHEETS: [&str; 7] = [
    "Compras",
    "Ventas",
    "Clientes",
    "Proveedores",
    "Inventario",
    "Gastos",
    "Resumen",
];

/// One exported worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSheet {
    pub label: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// What the export run produced.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub exported: Vec<ExportedSheet>,
    pub missing: Vec<String>,
}

impl ExportSummary {
    /// The run counts as successful when at least one sheet was written.
    pub fn any_exported(&self) -> bool {
        !self.exported.is_empty()
    }
}

/// CSV file name for a worksheet label.
pub fn sheet_csv_name(label: &str) -> String {
    format!("{}.csv", label.to_lowercase())
}

/// Splits the expected labels into those present in the workbook and those
/// missing from it.
pub fn partition_sheets(available: &[String]) -> (Vec<&'static str>, Vec<&'static str>) {
    EXPECTED_SHEETS
        .iter()
        .copied()
        .partition(|label| available.iter().any(|name| name.as_str() == *label))
}

/// Writes one worksheet range as CSV. Returns the number of rows written.
pub fn write_rows_csv(range: &Range<Data>, path: &Path) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("no se pudo crear el archivo {}", path.display()))?;

    let mut rows = 0;
    for row in range.rows() {
        let record: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Data::Empty => String::new(),
                other => other.to_string(),
            })
            .collect();
        writer.write_record(&record)?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

/// Exports every expected worksheet found in the workbook.
///
/// The output directory is created if absent. Worksheet labels not present in
/// the workbook are reported in the summary and logged as warnings.
pub fn export_workbook(workbook_path: &Path, output_dir: &Path) -> Result<ExportSummary> {
    let mut workbook: Xlsx<_> = open_workbook(workbook_path)
        .with_context(|| format!("no se pudo abrir el libro {}", workbook_path.display()))?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("no se pudo crear el directorio {}", output_dir.display()))?;

    let available = workbook.sheet_names().to_owned();
    let (present, missing) = partition_sheets(&available);

    let mut summary = ExportSummary::default();
    for label in missing {
        log::warn!("⚠️ Hoja \"{}\" no encontrada en el libro, se omite", label);
        summary.missing.push(label.to_string());
    }

    for label in present {
        let range = workbook
            .worksheet_range(label)
            .with_context(|| format!("no se pudo leer la hoja \"{}\"", label))?;

        let path = output_dir.join(sheet_csv_name(label));
        let rows = write_rows_csv(&range, &path)?;
        log::info!("✅ Hoja \"{}\" exportada a {} ({} filas)", label, path.display(), rows);
        summary.exported.push(ExportedSheet {
            label: label.to_string(),
            path,
            rows,
        });
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sheet_csv_name_lowercases() {
        assert_eq!(sheet_csv_name("Compras"), "compras.csv");
        assert_eq!(sheet_csv_name("Resumen"), "resumen.csv");
    }

    #[test]
    fn test_partition_sheets_two_of_seven() {
        let available = vec!["Compras".to_string(), "Ventas".to_string()];
        let (present, missing) = partition_sheets(&available);
        assert_eq!(present, vec!["Compras", "Ventas"]);
        assert_eq!(missing.len(), 5);
        assert!(missing.contains(&"Clientes"));
        assert!(missing.contains(&"Resumen"));
    }

    #[test]
    fn test_partition_sheets_ignores_unexpected_labels() {
        let available = vec!["Compras".to_string(), "Borradores".to_string()];
        let (present, missing) = partition_sheets(&available);
        assert_eq!(present, vec!["Compras"]);
        assert_eq!(missing.len(), 6);
    }

    #[test]
    fn test_write_rows_csv_round_trips_cells() {
        let mut range = Range::new((0, 0), (1, 2));
        range.set_value((0, 0), Data::String("Fecha".to_string()));
        range.set_value((0, 1), Data::String("Proveedor".to_string()));
        range.set_value((0, 2), Data::String("Monto".to_string()));
        range.set_value((1, 0), Data::String("2024-05-13".to_string()));
        range.set_value((1, 1), Data::String("Finca La Loma".to_string()));
        range.set_value((1, 2), Data::Float(1250.5));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compras.csv");
        let rows = write_rows_csv(&range, &path).unwrap();
        assert_eq!(rows, 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Fecha,Proveedor,Monto"));
        assert_eq!(lines.next(), Some("2024-05-13,Finca La Loma,1250.5"));
    }

    #[test]
    fn test_write_rows_csv_empty_cells_become_empty_fields() {
        let mut range = Range::new((0, 0), (0, 2));
        range.set_value((0, 0), Data::String("a".to_string()));
        range.set_value((0, 2), Data::String("c".to_string()));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hoja.csv");
        write_rows_csv(&range, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), "a,,c");
    }

    #[test]
    fn test_summary_any_exported() {
        let mut summary = ExportSummary::default();
        assert!(!summary.any_exported());
        summary.exported.push(ExportedSheet {
            label: "Compras".to_string(),
            path: PathBuf::from("compras.csv"),
            rows: 1,
        });
        assert!(summary.any_exported());
    }
}
