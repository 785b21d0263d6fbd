use crate::activity::DEFAULT_RECENT_LIMIT;
use crate::error::Result;
use crate::locale::Language;
use crate::password::PasswordScheme;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSettings {
    /// LibreOffice binary used for DOCX/PDF
    pub office: String,
    /// ImageMagick binary used for JPG/PNG
    pub imagemagick: String,
    pub ffmpeg: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            office: "soffice".into(),
            imagemagick: "magick".into(),
            ffmpeg: "ffmpeg".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database_file: String,
    pub password_scheme: PasswordScheme,
    pub history_limit: usize,
    pub theme: Theme,
    pub language: Language,
    pub tools: ToolSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_file: "users.db".into(),
            password_scheme: PasswordScheme::Argon2id,
            history_limit: DEFAULT_RECENT_LIMIT,
            theme: Theme::Dark,
            language: Language::Bn,
            tools: ToolSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load from disk, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.history_limit, 8);
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub").join("config.json");
        let config = AppConfig {
            theme: Theme::Light,
            language: Language::En,
            password_scheme: PasswordScheme::Sha256,
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let json = r#"{"language": "en", "tools": {"ffmpeg": "/opt/ffmpeg"}}"#;
        fs::write(&path, json).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.language, Language::En);
        assert_eq!(config.tools.ffmpeg, "/opt/ffmpeg");
        assert_eq!(config.tools.office, "soffice");
        assert_eq!(config.database_file, "users.db");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"colour": "blue"}"#).unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
