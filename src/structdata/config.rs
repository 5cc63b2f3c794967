//! # Configuration
//!
//! Structdata configuration is a [`confique`] struct, loaded in layers.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `STRUCTDATA_IMAGE_WIDTH`, `STRUCTDATA_MAILGUARD`, etc.
//! 2. **Config file**: an optional TOML file passed by the host (`--config` in the CLI).
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `image_width` | `70` | Width for `img` columns without an explicit width |
//! | `mailguard` | `visible` | Address obfuscation: `visible`, `hex` or `none` |
//! | `use_heading` | `false` | Page links display the first heading of the target |
//! | `lang_before_translation` | unset | Language reported by `%lang%` when set |
//! | `datetime_format` | `%Y/%m/%d %H:%M` | strftime format for `timestamp` columns |

use crate::error::{DataError, Result};
use chrono::format::{Item, StrftimeItems};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How mail addresses are disguised in rendered output.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailGuard {
    /// `@`, `.` and `-` are spelled out (`jane [at] example [dot] com`)
    #[default]
    Visible,
    /// Every byte is written as a hexadecimal character reference
    Hex,
    /// Addresses are shown as they are
    None,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// Default width in pixels for image columns.
    #[config(env = "STRUCTDATA_IMAGE_WIDTH", default = 70)]
    pub image_width: u32,

    /// Mail address obfuscation mode.
    #[config(env = "STRUCTDATA_MAILGUARD", default = "visible")]
    pub mailguard: MailGuard,

    /// Whether page titles are taken from the first heading of the page.
    #[config(env = "STRUCTDATA_USE_HEADING", default = false)]
    pub use_heading: bool,

    /// The site language before any translation scheme rewrote it.
    #[config(env = "STRUCTDATA_LANG_BEFORE_TRANSLATION")]
    pub lang_before_translation: Option<String>,

    /// strftime-style format used for `timestamp` columns.
    #[config(env = "STRUCTDATA_DATETIME_FORMAT", default = "%Y/%m/%d %H:%M")]
    pub datetime_format: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            image_width: 70,
            mailguard: MailGuard::Visible,
            use_heading: false,
            lang_before_translation: None,
            datetime_format: "%Y/%m/%d %H:%M".to_string(),
        }
    }
}

impl DataConfig {
    /// Load configuration from the environment and an optional TOML file.
    ///
    /// A missing file is skipped, so passing a path that does not exist yields
    /// the environment and compiled defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        let config: Self = builder.load()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the formatter could not use.
    pub fn validate(&self) -> Result<()> {
        let invalid = StrftimeItems::new(&self.datetime_format).any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(DataError::InvalidConfig(format!(
                "datetime_format \"{}\" is not a valid strftime format",
                self.datetime_format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DataConfig::default();
        assert_eq!(config.image_width, 70);
        assert_eq!(config.mailguard, MailGuard::Visible);
        assert!(!config.use_heading);
        assert!(config.lang_before_translation.is_none());
        assert_eq!(config.datetime_format, "%Y/%m/%d %H:%M");
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("structdata.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "image_width = 120").unwrap();
        writeln!(file, "mailguard = \"hex\"").unwrap();
        writeln!(file, "lang_before_translation = \"de\"").unwrap();

        let config = DataConfig::load(Some(&path)).unwrap();
        assert_eq!(config.image_width, 120);
        assert_eq!(config.mailguard, MailGuard::Hex);
        assert_eq!(config.lang_before_translation.as_deref(), Some("de"));
        assert!(!config.use_heading);
    }

    #[test]
    fn test_invalid_datetime_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("structdata.toml");
        std::fs::write(&path, "datetime_format = \"%Y %Q\"\n").unwrap();

        let err = DataConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, DataError::InvalidConfig(_)));
        assert!(err.to_string().contains("%Y %Q"));

        assert!(DataConfig::default().validate().is_ok());
    }

    #[test]
    fn test_mailguard_serde_names() {
        let guard: MailGuard = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(guard, MailGuard::None);
        assert_eq!(serde_json::to_string(&MailGuard::Visible).unwrap(), "\"visible\"");
    }
}
