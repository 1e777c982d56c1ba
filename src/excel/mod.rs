//! Excel import/export for the in-memory grid
//!
//! - Import: .xls or .xlsx bytes → Workbook (format sniffed from the bytes)
//! - Export: Workbook → .xlsx bytes (never .xls)

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;
