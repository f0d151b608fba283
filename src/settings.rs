use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub dark_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            language: String::new(),
            dark_mode: true,
        }
    }
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("cinedex")
                .join("config.json")
        })
    }

    /// Config file first, then the process environment (including anything a
    /// `.env` file put there) on top.
    pub fn load() -> Self {
        let from_file = match Self::config_path() {
            Some(path) => match Self::from_file(&path) {
                Ok(Some(settings)) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Ok(None) => {
                    debug!("No settings file at {}", path.display());
                    Self::default()
                }
                Err(e) => {
                    warn!("Ignoring settings file: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        };
        from_file.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Option<Self>, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(api_key) = lookup("TMDB_API_KEY") {
            self.api_key = api_key;
        }
        if let Some(base_url) = lookup("TMDB_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(language) = lookup("TMDB_LANGUAGE") {
            self.language = language;
        }
        if let Some(dark_mode) = lookup("CINEDEX_DARK_MODE") {
            match parse_flag(&dark_mode) {
                Some(flag) => self.dark_mode = flag,
                None => warn!("CINEDEX_DARK_MODE={} is not a boolean; ignoring", dark_mode),
            }
        }
        self
    }

    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.base_url.trim().is_empty()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_incomplete_and_dark() {
        let settings = AppSettings::default();
        assert!(!settings.is_complete());
        assert!(settings.dark_mode);
    }

    #[test]
    fn environment_overrides_file_values() {
        let file = AppSettings {
            api_key: String::from("from-file"),
            base_url: String::from("https://file.example/3"),
            language: String::from("de-DE"),
            dark_mode: true,
        };
        let settings = file.with_env(lookup_from(&[
            ("TMDB_API_KEY", "from-env"),
            ("CINEDEX_DARK_MODE", "off"),
        ]));
        assert_eq!(settings.api_key, "from-env");
        assert_eq!(settings.base_url, "https://file.example/3");
        assert_eq!(settings.language, "de-DE");
        assert!(!settings.dark_mode);
        assert!(settings.is_complete());
    }

    #[test]
    fn blank_values_are_incomplete() {
        let settings = AppSettings::default().with_env(lookup_from(&[
            ("TMDB_API_KEY", "   "),
            ("TMDB_BASE_URL", "https://api.themoviedb.org/3"),
        ]));
        assert!(!settings.is_complete());
    }

    #[test]
    fn unparseable_dark_mode_is_ignored() {
        let settings =
            AppSettings::default().with_env(lookup_from(&[("CINEDEX_DARK_MODE", "sometimes")]));
        assert!(settings.dark_mode);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("cinedex-settings-that-do-not-exist.json");
        assert!(matches!(AppSettings::from_file(&path), Ok(None)));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = std::env::temp_dir().join(format!(
            "cinedex-settings-partial-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"api_key": "abc"}"#).unwrap();
        let settings = AppSettings::from_file(&path).unwrap().unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(settings.api_key, "abc");
        assert!(settings.base_url.is_empty());
        assert!(settings.dark_mode);
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "cinedex-settings-malformed-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{not json").unwrap();
        let result = AppSettings::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }
}
