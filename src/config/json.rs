//! JSON configuration support.
//! - Loads settings from an explicit config file (serde_json).
//! - Missing optional keys keep their built-in defaults.
//!
//! Notes:
//! - `folder_template` must be present whenever a file is given.
//! - `media_types` entries are layered over the built-in categories by label.
//! - Unknown keys are rejected to surface misconfigurations early.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{FramefoldError, Result};
use crate::media::template::FolderTemplate;

use super::types::{normalize_extension, Config, LogLevel, OnConflict};

/// Struct mirroring the JSON config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonConfig {
    folder_template: Option<String>,
    media_types: Option<BTreeMap<String, Vec<String>>>,
    use_original_filename: Option<bool>,
    logging: Option<JsonLogging>,
    on_conflict: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonLogging {
    enabled: Option<bool>,
    level: Option<String>,
}

/// Load the run configuration: built-in defaults when `path` is None,
/// otherwise the given file layered over the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        None => Ok(Config::default()),
        Some(p) => load_config_from_path(p),
    }
}

/// Load and validate a Config from a specific JSON file.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(|source| FramefoldError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: JsonConfig =
        serde_json::from_str(&contents).map_err(|source| FramefoldError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    let cfg = json_to_config(parsed)?;
    debug!(path = %path.display(), template = %cfg.folder_template, "Loaded config");
    Ok(cfg)
}

// Map JsonConfig -> Config, then validate
fn json_to_config(parsed: JsonConfig) -> Result<Config> {
    let mut cfg = Config::default();

    cfg.folder_template = parsed
        .folder_template
        .ok_or_else(|| FramefoldError::InvalidConfig("folder_template is required".into()))?;

    // Listed categories replace their built-in entry; unlisted ones keep the defaults.
    if let Some(types) = parsed.media_types {
        for (label, exts) in types {
            let label = label.trim().to_string();
            if label.is_empty() {
                return Err(FramefoldError::InvalidConfig(
                    "media_types contains an empty category label".into(),
                ));
            }
            let mut normalized = Vec::with_capacity(exts.len());
            for ext in exts {
                if ext.trim().trim_start_matches('.').is_empty() {
                    return Err(FramefoldError::InvalidConfig(format!(
                        "media_types.{label} contains an empty extension"
                    )));
                }
                normalized.push(normalize_extension(&ext));
            }
            cfg.media_types.insert(label, normalized);
        }
    }

    if let Some(keep) = parsed.use_original_filename {
        cfg.use_original_filename = keep;
    }

    if let Some(logging) = parsed.logging {
        if let Some(enabled) = logging.enabled {
            cfg.logging.enabled = enabled;
        }
        if let Some(level) = logging.level.as_deref() {
            cfg.logging.level = level.parse::<LogLevel>().map_err(FramefoldError::InvalidConfig)?;
        }
    }

    if let Some(policy) = parsed.on_conflict.as_deref() {
        cfg.on_conflict = policy.parse::<OnConflict>().map_err(FramefoldError::InvalidConfig)?;
    }

    if cfg.media_types.values().all(|exts| exts.is_empty()) {
        return Err(FramefoldError::InvalidConfig(
            "media_types must list at least one extension".into(),
        ));
    }

    // Surface template mistakes at load time rather than on the first file.
    FolderTemplate::parse(&cfg.folder_template)?;

    Ok(cfg)
}
