//! Global settings loaded from TOML, following the same OnceLock pattern as
//! the rule table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub converter: ConverterSettings,
    pub editor: EditorSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConverterSettings {
    pub max_extra_passes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorSettings {
    pub mark_separators: bool,
    pub pronunciation: bool,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    if s.converter.max_extra_passes == 0 {
        return Err(SettingsError::InvalidValue {
            field: "converter.max_extra_passes".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.converter.max_extra_passes, 8);
        assert!(!s.editor.mark_separators);
        assert!(s.editor.pronunciation);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[converter]
max_extra_passes = 4

[editor]
mark_separators = true
pronunciation = false
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.converter.max_extra_passes, 4);
        assert!(s.editor.mark_separators);
        assert!(!s.editor.pronunciation);
    }

    #[test]
    fn error_zero_passes() {
        let toml = r#"
[converter]
max_extra_passes = 0

[editor]
mark_separators = false
pronunciation = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("max_extra_passes"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[converter]
max_extra_passes = 8
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
