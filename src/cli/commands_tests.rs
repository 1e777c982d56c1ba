use super::*;
use crate::settings::{MemorySettingsStore, YamlSettingsStore};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use tempfile::TempDir;

fn write_inventory(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut workbook = XlsxWorkbook::new();
    let ws = workbook.add_worksheet();
    for (col, header) in ["Title", "Author", "Imprint", "Location"].iter().enumerate() {
        ws.write_string(0, col as u16, *header).unwrap();
    }
    for (col, value) in ["Dune", "Herbert", "Ace", "Stacks"].iter().enumerate() {
        ws.write_string(1, col as u16, *value).unwrap();
    }
    workbook.save(&path).unwrap();
    path
}

fn request(input: PathBuf) -> FormatRequest {
    FormatRequest {
        input,
        output: None,
        overrides: SettingsOverrides::default(),
        dry_run: false,
        save_settings: false,
        verbose: false,
    }
}

// =========================================================================
// SettingsOverrides Tests
// =========================================================================

#[test]
fn test_overrides_empty_keeps_settings() {
    let mut settings = Settings {
        remove_author: true,
        initials: "JP".to_string(),
        end_date: Some("12/31/2025".to_string()),
        ..Default::default()
    };
    let before = settings.clone();
    SettingsOverrides::default().apply(&mut settings);
    assert_eq!(settings, before);
}

#[test]
fn test_overrides_replace_toggles_both_ways() {
    let mut settings = Settings {
        remove_author: true,
        ..Default::default()
    };
    let overrides = SettingsOverrides {
        remove_author: Some(false),
        remove_edition: Some(true),
        ..Default::default()
    };
    overrides.apply(&mut settings);
    assert!(!settings.remove_author);
    assert!(settings.remove_edition);
    assert!(!settings.remove_location);
}

#[test]
fn test_overrides_trim_text_values() {
    let mut settings = Settings::default();
    let overrides = SettingsOverrides {
        initials: Some(" JP ".to_string()),
        end_date: Some(" 12/31/2025".to_string()),
        ..Default::default()
    };
    overrides.apply(&mut settings);
    assert_eq!(settings.initials, "JP");
    assert_eq!(settings.end_date.as_deref(), Some("12/31/2025"));
}

#[test]
fn test_overrides_clear_end_date() {
    let mut settings = Settings {
        end_date: Some("12/31/2025".to_string()),
        ..Default::default()
    };
    let overrides = SettingsOverrides {
        clear_end_date: true,
        ..Default::default()
    };
    overrides.apply(&mut settings);
    assert_eq!(settings.end_date, None);
}

// =========================================================================
// default_output_path Tests
// =========================================================================

#[test]
fn test_default_output_path_next_to_input() {
    assert_eq!(
        default_output_path(Path::new("/data/exports/list.xls")),
        PathBuf::from("/data/exports/ProcessedFile.xlsx")
    );
    assert_eq!(
        default_output_path(Path::new("list.xls")),
        PathBuf::from("ProcessedFile.xlsx")
    );
}

// =========================================================================
// format Tests
// =========================================================================

#[test]
fn test_format_writes_default_output() {
    let dir = TempDir::new().unwrap();
    let input = write_inventory(&dir, "list.xlsx");
    let store = MemorySettingsStore::default();

    let saved = format(request(input), &store).unwrap();
    let expected = dir.path().join(DEFAULT_OUTPUT_NAME);
    assert_eq!(saved, Some(expected.clone()));
    assert!(expected.exists());
}

#[test]
fn test_format_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_inventory(&dir, "list.xlsx");
    let store = MemorySettingsStore::default();

    let mut req = request(input);
    req.dry_run = true;
    assert_eq!(format(req, &store).unwrap(), None);
    assert!(!dir.path().join(DEFAULT_OUTPUT_NAME).exists());
}

#[test]
fn test_format_uses_stored_settings() {
    let dir = TempDir::new().unwrap();
    let input = write_inventory(&dir, "list.xlsx");
    let output = dir.path().join("out.xlsx");
    let store = MemorySettingsStore::new(Settings {
        remove_author: true,
        ..Default::default()
    });

    let mut req = request(input);
    req.output = Some(output.clone());
    format(req, &store).unwrap();

    let bytes = fs::read(&output).unwrap();
    let workbook = ExcelImporter::new(&bytes).import().unwrap();
    let header: Vec<String> = workbook
        .first_sheet()
        .unwrap()
        .row_values(3)
        .iter()
        .map(CellValue::display_text)
        .collect();
    assert_eq!(
        header,
        vec!["Title", "Location", "Inventory Date", "✓", "Initials"]
    );
}

#[test]
fn test_format_save_settings_persists_overrides() {
    let dir = TempDir::new().unwrap();
    let input = write_inventory(&dir, "list.xlsx");
    let store = YamlSettingsStore::new(dir.path().join("settings.yaml"));

    let mut req = request(input);
    req.dry_run = true;
    req.save_settings = true;
    req.overrides.initials = Some("EP".to_string());
    req.overrides.remove_location = Some(true);
    format(req, &store).unwrap();

    let stored = store.load().unwrap();
    assert_eq!(stored.initials, "EP");
    assert!(stored.remove_location);
}

#[test]
fn test_format_missing_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    let store = MemorySettingsStore::default();
    let result = format(request(dir.path().join("missing.xls")), &store);
    assert!(matches!(result, Err(crate::error::FormatterError::Io(_))));
}

// =========================================================================
// headers / settings Tests
// =========================================================================

#[test]
fn test_headers_lists_first_sheet() {
    let dir = TempDir::new().unwrap();
    let input = write_inventory(&dir, "list.xlsx");
    let store = MemorySettingsStore::default();
    assert!(headers(input, &store).is_ok());
}

#[test]
fn test_headers_rejects_non_spreadsheet() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.xlsx");
    fs::write(&input, "just some text").unwrap();
    let store = MemorySettingsStore::default();
    assert!(matches!(
        headers(input, &store),
        Err(crate::error::FormatterError::Decode(_))
    ));
}

#[test]
fn test_reset_settings() {
    let store = MemorySettingsStore::new(Settings {
        remove_isbn: true,
        initials: "JP".to_string(),
        ..Default::default()
    });
    reset_settings(&store).unwrap();
    assert_eq!(store.load().unwrap(), Settings::default());
    assert!(show_settings(&store, None).is_ok());
}
