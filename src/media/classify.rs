//! Extension-based media classification.

use std::collections::HashMap;
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::types::normalize_extension;

/// Category of a recognised file plus its lowercase extension (no dot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub media_type: String,
    pub extension: String,
}

/// Lookup table from lowercase extension (with dot) to category label.
#[derive(Debug, Clone, Default)]
pub struct MediaCatalog {
    by_extension: HashMap<String, String>,
}

impl MediaCatalog {
    /// Build from a category -> extensions mapping. When two categories list the
    /// same extension, the label that sorts first wins.
    pub fn new(media_types: &BTreeMap<String, Vec<String>>) -> Self {
        let mut by_extension = HashMap::new();
        for (label, exts) in media_types {
            for ext in exts {
                by_extension
                    .entry(normalize_extension(ext))
                    .or_insert_with(|| label.clone());
            }
        }
        Self { by_extension }
    }

    /// Classify `path` by its extension (case-insensitive). None means "not media".
    ///
    /// The extension is whatever follows the last dot of the file name, so a bare
    /// `.jpg` counts as a jpg.
    pub fn classify(&self, path: &Path) -> Option<Classification> {
        let name = path.file_name()?.to_str()?;
        let ext = name[name.rfind('.')? + 1..].to_ascii_lowercase();
        if ext.is_empty() {
            return None;
        }
        let label = self.by_extension.get(&format!(".{ext}"))?;
        Some(Classification {
            media_type: label.clone(),
            extension: ext,
        })
    }
}
