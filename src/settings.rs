//! ロケール設定の読み込みと適用
//!
//! `.i18n-tree.json` からプロセス全体のロケール優先順位を設定します。

use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locales::{
    set_fallback_locales,
    set_host_locales,
    set_locales,
};

/// A single invalid field in the settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Settings error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "locales[0]")
    pub field_path: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Error loading or applying locale settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// One or more fields failed validation.
    #[error("Settings validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file could not be read.
    #[error("Failed to load settings file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file was not valid JSON.
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Process-wide locale preference settings.
///
/// Every field falls back to its default when absent, so a partial document
/// like `{"locales": ["nl"]}` is valid.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleSettings {
    /// Explicitly configured locales, in preference order.
    pub locales: Vec<String>,

    /// Last-resort locales appended after the host environment's.
    pub fallback_locales: Vec<String>,

    /// Overrides host-environment locale detection when set.
    pub host_locales: Option<Vec<String>>,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            locales: Vec::new(),
            fallback_locales: vec!["en".to_string()],
            host_locales: None,
        }
    }
}

impl LocaleSettings {
    /// # Errors
    /// - A locale tag is empty
    /// - A locale tag contains whitespace or a `_` separator
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (index, tag) in self.locales.iter().enumerate() {
            check_tag("locales", index, tag, &mut errors);
        }
        for (index, tag) in self.fallback_locales.iter().enumerate() {
            check_tag("fallbackLocales", index, tag, &mut errors);
        }
        if let Some(hosts) = &self.host_locales {
            for (index, tag) in hosts.iter().enumerate() {
                check_tag("hostLocales", index, tag, &mut errors);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validates and installs these settings process-wide.
    ///
    /// Nothing is installed when validation fails.
    ///
    /// # Errors
    /// - Validation errors, see [`LocaleSettings::validate`]
    pub fn apply(&self) -> Result<(), SettingsError> {
        self.validate().map_err(SettingsError::ValidationErrors)?;

        set_locales(self.locales.iter().cloned());
        set_fallback_locales(self.fallback_locales.iter().cloned());
        if let Some(hosts) = &self.host_locales {
            set_host_locales(hosts.iter().cloned());
        }
        Ok(())
    }
}

fn check_tag(field: &str, index: usize, tag: &str, errors: &mut Vec<ValidationError>) {
    if tag.is_empty() {
        errors.push(ValidationError::new(
            format!("{field}[{index}]"),
            "Locale tags cannot be empty. Example: \"en-US\"",
        ));
    } else if tag.chars().any(char::is_whitespace) {
        errors.push(ValidationError::new(
            format!("{field}[{index}]"),
            format!("Locale tag '{tag}' must not contain whitespace"),
        ));
    } else if tag.contains('_') {
        errors.push(ValidationError::new(
            format!("{field}[{index}]"),
            format!("Locale tag '{tag}' must use '-' as separator, not '_'. Example: \"de-DE\""),
        ));
    }
}

/// ワークスペースから設定を読み込む
///
/// `.i18n-tree.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(SettingsError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub fn load_from_workspace(workspace_root: &Path) -> Result<Option<LocaleSettings>, SettingsError> {
    let settings_path = workspace_root.join(".i18n-tree.json");

    if !settings_path.exists() {
        tracing::debug!("Settings file not found: {:?}", settings_path);
        return Ok(None);
    }

    tracing::debug!("Loading settings from: {:?}", settings_path);

    let content = std::fs::read_to_string(&settings_path)?;
    let settings: LocaleSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
