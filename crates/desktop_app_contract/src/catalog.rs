//! Static application catalog and its TOML manifest loader.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AppDefinition, ApplicationId};

/// Manifest schema version accepted by [`AppCatalog::from_manifest_toml`].
pub const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised while building an [`AppCatalog`].
pub enum CatalogError {
    /// The manifest was not valid TOML or did not match the catalog shape.
    #[error("app catalog manifest parse failed: {0}")]
    Parse(String),
    /// The manifest declared an unsupported schema version.
    #[error("app catalog schema mismatch: expected {expected} found {found}")]
    SchemaMismatch {
        /// Supported schema version.
        expected: u32,
        /// Declared schema version.
        found: u32,
    },
    /// Two entries share the same app id.
    #[error("duplicate app id `{0}` in catalog")]
    DuplicateApp(ApplicationId),
    /// An entry declared a non-positive default size.
    #[error("app `{0}` declares an invalid default size")]
    InvalidSize(ApplicationId),
}

#[derive(Debug, Deserialize)]
struct CatalogManifest {
    schema_version: u32,
    #[serde(default)]
    apps: Vec<AppDefinition>,
}

/// Read-only collection of app definitions, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCatalog {
    apps: Vec<AppDefinition>,
}

impl AppCatalog {
    /// Builds a catalog, rejecting duplicate ids and non-positive default sizes.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateApp`] or [`CatalogError::InvalidSize`].
    pub fn new(apps: Vec<AppDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for app in &apps {
            if !seen.insert(app.id.clone()) {
                return Err(CatalogError::DuplicateApp(app.id.clone()));
            }
            if let Some(size) = app.default_size {
                if size.width <= 0 || size.height <= 0 {
                    return Err(CatalogError::InvalidSize(app.id.clone()));
                }
            }
        }
        Ok(Self { apps })
    }

    /// Parses a catalog manifest made of `[[apps]]` tables.
    ///
    /// ```toml
    /// schema_version = 1
    ///
    /// [[apps]]
    /// id = "system.notes"
    /// display_name = "Notes"
    /// icon = "notes"
    /// component = "notes"
    /// default_size = { width = 640, height = 480 }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when parsing or validation fails.
    pub fn from_manifest_toml(raw: &str) -> Result<Self, CatalogError> {
        let manifest: CatalogManifest =
            toml::from_str(raw).map_err(|err| CatalogError::Parse(err.to_string()))?;
        if manifest.schema_version != CATALOG_SCHEMA_VERSION {
            return Err(CatalogError::SchemaMismatch {
                expected: CATALOG_SCHEMA_VERSION,
                found: manifest.schema_version,
            });
        }
        Self::new(manifest.apps)
    }

    /// Looks up an app definition by id.
    pub fn get(&self, app_id: &ApplicationId) -> Option<&AppDefinition> {
        self.apps.iter().find(|app| &app.id == app_id)
    }

    /// Looks up an app definition by its raw string id.
    pub fn get_str(&self, raw: &str) -> Option<&AppDefinition> {
        self.apps.iter().find(|app| app.id.as_str() == raw)
    }

    /// Returns all definitions in declaration order.
    pub fn apps(&self) -> &[AppDefinition] {
        &self.apps
    }

    /// Returns definitions visible in the launcher.
    pub fn launcher_apps(&self) -> impl Iterator<Item = &AppDefinition> {
        self.apps.iter().filter(|app| app.show_in_launcher)
    }

    /// Returns definitions pinned to the dock.
    pub fn dock_apps(&self) -> impl Iterator<Item = &AppDefinition> {
        self.apps.iter().filter(|app| app.show_in_dock)
    }
}
