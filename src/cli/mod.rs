//! CLI command handlers

pub mod commands;

pub use commands::{
    format, headers, reset_settings, show_settings, FormatRequest, SettingsOverrides,
};
