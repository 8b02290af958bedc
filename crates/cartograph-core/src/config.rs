use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Repo-local indexing defaults, loaded from `.decompose/config.json` when
/// present. Every field is optional and defaulted; a missing file is
/// treated identically to an empty object, and a file that fails to parse
/// falls back to defaults with a logged warning rather than aborting
/// indexing.
///
/// Call-time arguments to an indexing request always override these
/// defaults; these defaults always override the built-ins in
/// [`CartographConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartographConfig {
    pub languages: Vec<Language>,
    pub exclude_dirs: Vec<String>,
    pub snapshot_dir: String,
}

impl Default for CartographConfig {
    fn default() -> Self {
        Self {
            languages: vec![
                Language::Go,
                Language::TypeScript,
                Language::Python,
                Language::Rust,
            ],
            exclude_dirs: Vec::new(),
            snapshot_dir: ".decompose/graph".to_string(),
        }
    }
}

impl CartographConfig {
    /// Loads `<repo_root>/.decompose/config.json`, falling back to
    /// [`CartographConfig::default`] when the file is absent or malformed.
    pub fn load(repo_root: &Path) -> Self {
        let path = repo_root.join(".decompose").join("config.json");
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(_) => return Self::default(),
        };

        match serde_json::from_slice::<Self>(&bytes) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config: failed to parse {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
