//! Shared resources file and the sections written into it

use std::path::{Path, PathBuf};

use res_ini::{IniFile, SettingsBlock};
use res_model::Resource;
use tracing::debug;

use crate::error::{Error, Result};

/// Prefix for sections managed by the resource store.
const SECTION_PREFIX: &str = "resource-";

/// Store for connection resources in a shared INI file.
///
/// Each resource occupies one section named `resource-<name>`.
/// Sections without that prefix belong to other parts of the console
/// configuration and are left alone.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    file: IniFile,
}

impl ResourceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: IniFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The section a resource is stored under.
    pub fn section_name(name: &str) -> String {
        format!("{SECTION_PREFIX}{name}")
    }

    /// Write or replace the section for `name`.
    pub fn apply(&self, name: &str, resource: &Resource) -> Result<()> {
        self.apply_all(&[(name, resource)])
    }

    /// Write or replace several sections in one read-modify-write pass.
    pub fn apply_all(&self, resources: &[(&str, &Resource)]) -> Result<()> {
        for (name, _) in resources {
            validate_resource_name(name)?;
        }

        let mut document = self.file.load()?;
        for (name, resource) in resources {
            document.upsert_section(&Self::section_name(name), &resource.to_settings())?;
            debug!(
                resource = %name,
                kind = resource.kind().as_str(),
                "applied resource section"
            );
        }
        self.file.save(&document)?;
        Ok(())
    }

    /// Remove the section for `name`. Returns whether it existed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        validate_resource_name(name)?;

        let mut document = self.file.load()?;
        let removed = document.remove_section(&Self::section_name(name));
        if removed {
            self.file.save(&document)?;
            debug!(resource = name, "removed resource section");
        }
        Ok(removed)
    }

    /// Names of the resources currently stored, in file order.
    pub fn names(&self) -> Result<Vec<String>> {
        let document = self.file.load()?;
        Ok(document
            .section_names()
            .filter_map(|section| section.strip_prefix(SECTION_PREFIX))
            .map(str::to_string)
            .collect())
    }

    /// Settings currently stored for `name`, if present.
    pub fn get(&self, name: &str) -> Result<Option<SettingsBlock>> {
        validate_resource_name(name)?;

        let document = self.file.load()?;
        Ok(document
            .section(&Self::section_name(name))
            .map(|section| section.settings()))
    }
}

/// Resource names must form a valid section name once prefixed.
pub(crate) fn validate_resource_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.contains(['[', ']', '\n', '\r'])
        && name == name.trim();
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidResourceName {
            name: name.to_string(),
        })
    }
}
