//! User settings loaded from `settings.toml`.
//!
//! Every field is optional. Problems never abort startup: they are returned
//! as warnings next to the defaults.

use directories::ProjectDirs;
use leadgrid_core::StorageKeys;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_SETTINGS_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    data_dir: Option<PathBuf>,
    keys: Option<KeysFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysFile {
    registry: Option<String>,
    saved_scores: Option<String>,
    legacy: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    /// Directory for the file store. `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,
    pub keys: StorageKeys,
}

impl Settings {
    /// Directory the file store should use.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| project_dirs().map(|p| p.data_dir().to_path_buf()))
    }
}

/// Load settings from `settings_file`, or from the user config dir when no
/// path is given.
pub fn load_settings(settings_file: Option<&Path>) -> (Settings, Vec<String>) {
    let mut warnings = Vec::new();
    let path = settings_file.map(Path::to_path_buf).or_else(user_settings_path);

    let Some(path) = path else {
        return (Settings::default(), warnings);
    };
    if !path.exists() {
        if settings_file.is_some() {
            warnings.push(format!("Settings file not found: {}", path.display()));
        }
        return (Settings::default(), warnings);
    }

    let file = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_SETTINGS_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_SETTINGS_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<SettingsFile>(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    let settings = build_settings(file.unwrap_or_default(), &mut warnings);
    (settings, warnings)
}

fn build_settings(file: SettingsFile, warnings: &mut Vec<String>) -> Settings {
    let mut keys = StorageKeys::default();
    if let Some(overrides) = file.keys {
        apply_key(&mut keys.registry, overrides.registry, "registry", warnings);
        apply_key(&mut keys.saved_scores, overrides.saved_scores, "saved_scores", warnings);
        apply_key(&mut keys.legacy, overrides.legacy, "legacy", warnings);
    }
    if keys.registry == keys.saved_scores
        || keys.registry == keys.legacy
        || keys.saved_scores == keys.legacy
    {
        warnings.push("Storage keys must be distinct; using defaults".to_string());
        keys = StorageKeys::default();
    }
    Settings {
        data_dir: file.data_dir,
        keys,
    }
}

fn apply_key(slot: &mut String, value: Option<String>, name: &str, warnings: &mut Vec<String>) {
    let Some(value) = value else {
        return;
    };
    let value = value.trim();
    if value.is_empty() {
        warnings.push(format!("Ignoring blank storage key '{}'", name));
    } else if !value.chars().all(is_key_char) {
        warnings.push(format!(
            "Ignoring storage key '{}': only letters, digits, '.', '-' and '_' are allowed",
            name
        ));
    } else {
        *slot = value.to_string();
    }
}

/// Keys map one-to-one onto file names only within this character set.
fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "leadgrid")
}

fn user_settings_path() -> Option<PathBuf> {
    let proj = project_dirs()?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("settings.toml");
    Some(path)
}
