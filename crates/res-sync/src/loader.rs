//! Format-agnostic loading of resource definition files

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use res_model::ResourceDefinition;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A definitions file: resource name to definition.
///
/// Backed by a `BTreeMap`, so iteration (and therefore sync order) is
/// name-sorted and deterministic regardless of input format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSet {
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceDefinition>,
}

impl DefinitionSet {
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }
}

/// Load a definition set from a file.
///
/// Format is detected from the file extension:
/// - `.toml` -> TOML
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
pub fn load_definitions(path: &Path) -> Result<DefinitionSet> {
    let content = fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension.to_lowercase().as_str() {
        "toml" => toml::from_str(&content).map_err(|e| parse_error(path, "TOML", e)),
        "json" => serde_json::from_str(&content).map_err(|e| parse_error(path, "JSON", e)),
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| parse_error(path, "YAML", e)),
        _ => Err(Error::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}

fn parse_error(path: &Path, format: &str, source: impl std::fmt::Display) -> Error {
    Error::DefinitionParse {
        path: path.to_path_buf(),
        format: format.into(),
        message: source.to_string(),
    }
}
