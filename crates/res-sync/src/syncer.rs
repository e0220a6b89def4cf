//! Sync driver: definition sets in, INI sections out

use res_model::Resource;
use tracing::info;

use crate::error::Result;
use crate::loader::DefinitionSet;
use crate::store::{ResourceStore, validate_resource_name};

/// Applies whole definition sets to a resource store.
///
/// Every name and definition is validated before anything is written,
/// so an invalid set leaves the resources file untouched.
#[derive(Debug, Default)]
pub struct ResourceSyncer;

impl ResourceSyncer {
    pub fn new() -> Self {
        Self
    }

    /// Validate and apply all definitions.
    ///
    /// Returns the applied resource names in sync (name-sorted) order.
    pub fn sync(&self, store: &ResourceStore, definitions: &DefinitionSet) -> Result<Vec<String>> {
        let mut validated: Vec<(&str, Resource)> = Vec::with_capacity(definitions.len());
        for (name, definition) in &definitions.resources {
            validate_resource_name(name)?;
            validated.push((name.as_str(), definition.validate()?));
        }

        if validated.is_empty() {
            return Ok(Vec::new());
        }

        let resources: Vec<(&str, &Resource)> = validated
            .iter()
            .map(|(name, resource)| (*name, resource))
            .collect();
        store.apply_all(&resources)?;

        let applied: Vec<String> = validated
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect();
        info!(count = applied.len(), "synced resource definitions");
        Ok(applied)
    }
}
