//! Workbook → CSV export CLI
//!
//! Exports the expected bookkeeping worksheets (Compras, Ventas, Clientes,
//! Proveedores, Inventario, Gastos, Resumen) from a local .xlsx workbook to
//! one CSV per sheet. Sheets missing from the workbook are skipped with a
//! warning.
//!
//! Usage:
//!   export-sheets -i contabilidad.xlsx -o ./csv
//!
//! Exit code 0 when at least one sheet was exported.

use std::path::PathBuf;

use clap::Parser;
use granobot::export::sheets::export_workbook;

#[derive(Parser)]
#[command(name = "export-sheets")]
#[command(about = "Export the bookkeeping workbook sheets to CSV files")]
#[command(version)]
struct Cli {
    /// Input workbook (.xlsx)
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for the CSV files (created if absent)
    #[arg(short, long, default_value = "./csv")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    let _ = builder.try_init();

    match export_workbook(&cli.input, &cli.output) {
        Ok(summary) if summary.any_exported() => {
            log::info!(
                "Exportación terminada: {} hoja(s) exportada(s), {} omitida(s)",
                summary.exported.len(),
                summary.missing.len()
            );
        }
        Ok(_) => {
            log::error!("Ninguna de las hojas esperadas está en el libro; no se exportó nada");
            std::process::exit(1);
        }
        Err(e) => {
            log::error!("La exportación falló: {:#}", e);
            std::process::exit(1);
        }
    }
}
