use clap::{Parser, Subcommand};
use colored::Colorize;
use inventory_formatter::cli::{self, FormatRequest, SettingsOverrides};
use inventory_formatter::error::FormatterResult;
use inventory_formatter::settings::{
    MemorySettingsStore, SettingsStore, YamlSettingsStore, SETTINGS_ENV,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inventory-formatter")]
#[command(about = "Turn a library inventory export into a printable shelf-check sheet.")]
#[command(long_about = "Inventory Formatter - shelf-check sheets from catalog exports

Reads an .xls or .xlsx inventory export, deletes unwanted columns, appends
'Inventory Date', '✓' and 'Initials' tracking columns with boxes for manual
sign-off, and saves a landscape, print-ready .xlsx.

COMMANDS:
  format    - Format an inventory export
  headers   - Show the header row and which columns would be removed
  settings  - Show or reset remembered options

EXAMPLES:
  inventory-formatter format list.xls                       # -> ProcessedFile.xlsx
  inventory-formatter format list.xls --remove-author --initials JP
  inventory-formatter format list.xlsx --end-date 12/31/2025 -o shelf.xlsx
  inventory-formatter headers list.xls")]
#[command(version)]
struct Cli {
    /// Show verbose output and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long, global = true, env = SETTINGS_ENV)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Format an inventory export.

The columns 'Imprint', 'Digital Availability' and 'Electronic Availability'
are always removed. The --remove-* flags add more; each accepts an optional
true/false so a remembered choice can be switched off for one run.

Unset options fall back to the stored settings (see 'settings show').
Use --save-settings to remember this run's options.")]
    /// Format an inventory export into a shelf-check sheet
    Format {
        /// Inventory export (.xls or .xlsx)
        input: PathBuf,

        /// Output .xlsx path (default: ProcessedFile.xlsx next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Delete the "Author" column
        #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
        remove_author: Option<bool>,

        /// Delete the "Location" column
        #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
        remove_location: Option<bool>,

        /// Delete the "ISBN/ISSN" column
        #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
        remove_isbn: Option<bool>,

        /// Delete the "Edition" column
        #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
        remove_edition: Option<bool>,

        /// Delete the "Availability" column
        #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
        remove_availability: Option<bool>,

        /// Initials written into the sign-off row
        #[arg(long)]
        initials: Option<String>,

        /// End date announced above the Initials column
        #[arg(long, conflicts_with = "clear_end_date")]
        end_date: Option<String>,

        /// Ignore a remembered end date
        #[arg(long)]
        clear_end_date: bool,

        /// Run the whole transformation without writing a file
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Remember these options for the next run
        #[arg(long)]
        save_settings: bool,
    },

    /// Show the header row of the first sheet and mark removed columns
    Headers {
        /// Inventory export (.xls or .xlsx)
        input: PathBuf,
    },

    /// Show or reset remembered options
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the stored settings
    Show,
    /// Forget all stored settings
    Reset,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "inventory_formatter=debug"
    } else {
        "inventory_formatter=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> FormatterResult<()> {
    let settings_path = cli.settings.or_else(YamlSettingsStore::default_path);
    let store: Box<dyn SettingsStore> = match &settings_path {
        Some(path) => Box::new(YamlSettingsStore::new(path)),
        None => {
            tracing::warn!("no config directory available; settings will not be remembered");
            Box::new(MemorySettingsStore::default())
        }
    };

    match cli.command {
        Commands::Format {
            input,
            output,
            remove_author,
            remove_location,
            remove_isbn,
            remove_edition,
            remove_availability,
            initials,
            end_date,
            clear_end_date,
            dry_run,
            save_settings,
        } => {
            let request = FormatRequest {
                input,
                output,
                overrides: SettingsOverrides {
                    remove_author,
                    remove_location,
                    remove_isbn,
                    remove_edition,
                    remove_availability,
                    initials,
                    end_date,
                    clear_end_date,
                },
                dry_run,
                save_settings,
                verbose: cli.verbose,
            };
            cli::format(request, store.as_ref()).map(|_| ())
        }

        Commands::Headers { input } => cli::headers(input, store.as_ref()),

        Commands::Settings { action } => match action {
            SettingsAction::Show => cli::show_settings(store.as_ref(), settings_path.as_deref()),
            SettingsAction::Reset => cli::reset_settings(store.as_ref()),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "❌".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}
