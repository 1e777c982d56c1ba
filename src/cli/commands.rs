use crate::core::{self, RemovalSpec};
use crate::error::FormatterResult;
use crate::excel::ExcelImporter;
use crate::settings::{Settings, SettingsStore};
use crate::types::CellValue;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name offered when no output path is given
pub const DEFAULT_OUTPUT_NAME: &str = "ProcessedFile.xlsx";

/// Command-line values that replace stored settings for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub remove_author: Option<bool>,
    pub remove_location: Option<bool>,
    pub remove_isbn: Option<bool>,
    pub remove_edition: Option<bool>,
    pub remove_availability: Option<bool>,
    pub initials: Option<String>,
    pub end_date: Option<String>,
    pub clear_end_date: bool,
}

impl SettingsOverrides {
    pub fn apply(&self, settings: &mut Settings) {
        let toggles = [
            (self.remove_author, &mut settings.remove_author),
            (self.remove_location, &mut settings.remove_location),
            (self.remove_isbn, &mut settings.remove_isbn),
            (self.remove_edition, &mut settings.remove_edition),
            (self.remove_availability, &mut settings.remove_availability),
        ];
        for (value, target) in toggles {
            if let Some(value) = value {
                *target = value;
            }
        }
        if let Some(initials) = &self.initials {
            settings.initials = initials.trim().to_string();
        }
        if self.clear_end_date {
            settings.end_date = None;
        } else if let Some(end_date) = &self.end_date {
            settings.end_date = Some(end_date.trim().to_string());
        }
    }
}

/// Everything the `format` command needs
#[derive(Debug, Clone)]
pub struct FormatRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub overrides: SettingsOverrides,
    pub dry_run: bool,
    pub save_settings: bool,
    pub verbose: bool,
}

/// `ProcessedFile.xlsx` next to the input file
pub fn default_output_path(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_OUTPUT_NAME)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Execute the format command. Returns the saved path, or `None` on a dry run.
pub fn format(request: FormatRequest, store: &dyn SettingsStore) -> FormatterResult<Option<PathBuf>> {
    println!("{}", "📚 Inventory Formatter".bold().green());
    println!("   Input: {}", request.input.display());

    let mut settings = store.load()?;
    request.overrides.apply(&mut settings);
    if request.save_settings {
        store.save(&settings)?;
        println!("   {}", "Settings saved".cyan());
    }
    let options = settings.to_options();

    if request.verbose {
        println!();
        println!("{}", "⚙️  Options:".cyan());
        println!("   Remove Author:       {}", yes_no(options.remove_author));
        println!("   Remove Location:     {}", yes_no(options.remove_location));
        println!("   Remove ISBN/ISSN:    {}", yes_no(options.remove_isbn));
        println!("   Remove Edition:      {}", yes_no(options.remove_edition));
        println!("   Remove Availability: {}", yes_no(options.remove_availability));
        println!(
            "   Initials:            {}",
            if options.initials.is_empty() {
                "(none)"
            } else {
                options.initials.as_str()
            }
        );
        println!(
            "   End date:            {}",
            options.end_date().unwrap_or("(none)")
        );
    }
    println!();

    let destination = if request.dry_run {
        None
    } else {
        Some(
            request
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(&request.input)),
        )
    };

    let outcome = core::process_file(&request.input, destination.as_deref(), &options)?;
    let summary = &outcome.summary;

    if summary.removed_columns.is_empty() {
        println!("   No columns removed");
    } else {
        println!(
            "   Removed columns: {}",
            summary.removed_columns.join(", ").bright_yellow()
        );
    }
    if request.verbose {
        println!(
            "   Tracking columns start at column {}",
            summary.tracking.inventory_date
        );
        if let Some(col) = summary.end_date_column {
            println!("   End-date message written above column {}", col);
        }
    }

    match &outcome.saved_to {
        Some(path) => {
            println!("{}", "✅ Formatting complete!".bold().green());
            println!("   Saved to: {}\n", path.display());
        }
        None => {
            println!("{}", "📋 Dry run complete - no file written".yellow());
        }
    }

    Ok(outcome.saved_to)
}

/// Execute the headers command: list the first sheet's header row and mark
/// the columns the current settings would delete.
pub fn headers(input: PathBuf, store: &dyn SettingsStore) -> FormatterResult<()> {
    let settings = store.load()?;
    let spec = RemovalSpec::from_options(&settings.to_options());

    let bytes = fs::read(&input)?;
    let workbook = ExcelImporter::new(&bytes).import()?;

    println!("{}", "📚 Inventory Formatter - Headers".bold().green());
    println!("   File: {}", input.display());

    let Some(sheet) = workbook.first_sheet() else {
        return Ok(());
    };
    println!("   Sheet: {}\n", sheet.name.bright_blue().bold());

    for (idx, value) in sheet.row_values(1).iter().enumerate() {
        let name = value.display_text();
        let removed = matches!(value, CellValue::Text(text) if spec.contains(text));
        if removed {
            println!("   {:>3}  {}  {}", idx + 1, name.red(), "(removed)".red());
        } else {
            println!("   {:>3}  {}", idx + 1, name);
        }
    }
    println!();
    Ok(())
}

/// Print the stored settings as YAML
pub fn show_settings(store: &dyn SettingsStore, location: Option<&Path>) -> FormatterResult<()> {
    let settings = store.load()?;
    println!("{}", "⚙️  Stored settings".bold().green());
    match location {
        Some(path) => println!("   File: {}\n", path.display()),
        None => println!("   {}\n", "(not persisted)".yellow()),
    }
    print!("{}", serde_yaml::to_string(&settings)?);
    Ok(())
}

/// Overwrite the stored settings with defaults
pub fn reset_settings(store: &dyn SettingsStore) -> FormatterResult<()> {
    store.save(&Settings::default())?;
    println!("{}", "✅ Settings reset to defaults".bold().green());
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
