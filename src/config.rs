//! Runtime settings and persisted user preferences.
//!
//! Settings come from the environment (optionally seeded from a `.env` file);
//! the only state that survives a restart is the colour scheme, stored as a
//! small JSON document in the platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_GITHUB_USER: &str = "IrisC113";
const DEFAULT_GITHUB_API: &str = "https://api.github.com";
const DEFAULT_COMMIT_URL_BASE: &str = "https://github.com/IrisC113/portfolio/commit/";

/// Where the site's data lives and which accounts it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory that relative data paths are resolved against
    pub site_root: PathBuf,
    /// Per-line commit log, relative to `site_root` unless absolute
    pub loc_csv: PathBuf,
    /// Project list, relative to `site_root` unless absolute
    pub projects_json: PathBuf,
    pub github_user: String,
    pub github_api: String,
    /// Prefix joined with a commit id to link to the commit
    pub commit_url_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            loc_csv: PathBuf::from("meta/loc.csv"),
            projects_json: PathBuf::from("lib/projects.json"),
            github_user: DEFAULT_GITHUB_USER.to_string(),
            github_api: DEFAULT_GITHUB_API.to_string(),
            commit_url_base: DEFAULT_COMMIT_URL_BASE.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `FOLIO_*` environment variables, loading `.env`
    /// first if one exists.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; unset or blank keys keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            site_root: get("FOLIO_SITE_ROOT").map(PathBuf::from).unwrap_or(defaults.site_root),
            loc_csv: get("FOLIO_LOC_CSV").map(PathBuf::from).unwrap_or(defaults.loc_csv),
            projects_json: get("FOLIO_PROJECTS_JSON")
                .map(PathBuf::from)
                .unwrap_or(defaults.projects_json),
            github_user: get("FOLIO_GITHUB_USER").unwrap_or(defaults.github_user),
            github_api: get("FOLIO_GITHUB_API").unwrap_or(defaults.github_api),
            commit_url_base: get("FOLIO_COMMIT_URL_BASE").unwrap_or(defaults.commit_url_base),
        }
    }

    pub fn loc_csv_path(&self) -> PathBuf {
        self.site_root.join(&self.loc_csv)
    }

    pub fn projects_json_path(&self) -> PathBuf {
        self.site_root.join(&self.projects_json)
    }

    pub fn github_page_url(&self) -> String {
        format!("https://github.com/{}", self.github_user)
    }
}

/// The user's colour scheme choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScheme {
    /// Follow the operating system
    #[default]
    #[serde(rename = "light dark")]
    Automatic,
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 3] = [ColorScheme::Automatic, ColorScheme::Light, ColorScheme::Dark];

    pub fn label(self) -> &'static str {
        match self {
            ColorScheme::Automatic => "Automatic",
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(rename = "colorScheme", default, skip_serializing_if = "Option::is_none")]
    color_scheme: Option<ColorScheme>,
}

/// Reads and writes the persisted preferences file.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform config directory, falling back to the
    /// working directory when the platform has none.
    pub fn in_config_dir() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("folio").join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved colour scheme, or [`ColorScheme::Automatic`] when nothing
    /// usable has been saved.
    pub fn load_color_scheme(&self) -> ColorScheme {
        match fs::read_to_string(&self.path) {
            Ok(text) => match serde_json::from_str::<Preferences>(&text) {
                Ok(prefs) => prefs.color_scheme.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt preferences");
                    ColorScheme::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ColorScheme::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "preferences unreadable");
                ColorScheme::default()
            }
        }
    }

    pub fn save_color_scheme(&self, scheme: ColorScheme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let prefs = Preferences {
            color_scheme: Some(scheme),
        };
        let json = serde_json::to_string_pretty(&prefs)?;
        fs::write(&self.path, json).with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_env_is_empty() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.loc_csv_path(), PathBuf::from("./meta/loc.csv"));
        assert_eq!(settings.github_api, "https://api.github.com");
        assert_eq!(settings.github_user, "IrisC113");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("FOLIO_SITE_ROOT", "/srv/site"),
            ("FOLIO_GITHUB_USER", "octocat"),
            ("FOLIO_GITHUB_API", "http://localhost:8080/"),
            ("FOLIO_LOC_CSV", "   "),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.site_root, PathBuf::from("/srv/site"));
        assert_eq!(settings.loc_csv, PathBuf::from("meta/loc.csv"));
        assert_eq!(settings.github_api, "http://localhost:8080/");
        assert_eq!(settings.github_page_url(), "https://github.com/octocat");
    }

    #[test]
    fn test_color_scheme_roundtrip_through_store() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("nested").join("prefs.json"));

        assert_eq!(store.load_color_scheme(), ColorScheme::Automatic);
        store.save_color_scheme(ColorScheme::Dark).unwrap();
        assert_eq!(store.load_color_scheme(), ColorScheme::Dark);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(r#""colorScheme": "dark""#));
    }

    #[test]
    fn test_corrupt_preferences_fall_back_to_automatic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(PreferenceStore::new(path).load_color_scheme(), ColorScheme::Automatic);
    }

    #[test]
    fn test_automatic_serializes_as_css_value() {
        let json = serde_json::to_string(&ColorScheme::Automatic).unwrap();
        assert_eq!(json, r#""light dark""#);
    }
}
