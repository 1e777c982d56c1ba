//! Inventory Formatter - shelf-check sheets from library inventory exports
//!
//! Loads an `.xls` or `.xlsx` inventory export, deletes a fixed set of named
//! columns, appends "Inventory Date", "✓" and "Initials" tracking columns,
//! styles the sheet for printing and returns a new `.xlsx` file.
//!
//! # Example
//!
//! ```no_run
//! use inventory_formatter::core::{transform, TransformOptions};
//!
//! let raw = std::fs::read("inventory.xls")?;
//! let options = TransformOptions {
//!     remove_author: true,
//!     initials: "JP".to_string(),
//!     end_date: Some("12/31/2025".to_string()),
//!     ..Default::default()
//! };
//! let formatted = transform(&raw, &options)?;
//! std::fs::write("ProcessedFile.xlsx", formatted)?;
//! # Ok::<(), inventory_formatter::error::FormatterError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod settings;
pub mod types;

// Re-export commonly used types
pub use crate::core::{process_file, transform, transform_at, TransformOptions};
pub use error::{FormatterError, FormatterResult};
pub use types::{Cell, CellValue, Workbook, Worksheet};
