//! Shared contract types between the desktop window manager runtime and the apps it launches.
//!
//! Apps are described by static [`AppDefinition`] records collected in an [`AppCatalog`]. The
//! window manager only ever reads these definitions; it never mutates the catalog.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod catalog;

use serde::{Deserialize, Serialize};

pub use catalog::{AppCatalog, CatalogError, CATALOG_SCHEMA_VERSION};

/// Fallback window width used when an app declares no default size.
pub const FALLBACK_WINDOW_WIDTH: i32 = 720;
/// Fallback window height used when an app declares no default size.
pub const FALLBACK_WINDOW_HEIGHT: i32 = 540;

/// Stable identifier for an app package/module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` conforms to the `segment.segment...` policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected namespaced dotted segments"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for compile-time/runtime trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ApplicationId {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ApplicationId> for String {
    fn from(id: ApplicationId) -> Self {
        id.0
    }
}

const MAX_ID_LEN: usize = 120;
const MAX_SEGMENT_LEN: usize = 32;

fn is_valid_application_id(raw: &str) -> bool {
    raw.len() <= MAX_ID_LEN && raw.contains('.') && raw.split('.').all(is_valid_id_segment)
}

/// `[a-z][a-z0-9-]*`, not ending in `-`.
fn is_valid_id_segment(segment: &str) -> bool {
    let mut bytes = segment.bytes();
    let starts_lowercase = bytes.next().is_some_and(|b| b.is_ascii_lowercase());
    starts_lowercase
        && segment.len() <= MAX_SEGMENT_LEN
        && !segment.ends_with('-')
        && bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Declared default size of an app window, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width.
    pub width: i32,
    /// Window height.
    pub height: i32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: FALLBACK_WINDOW_WIDTH,
            height: FALLBACK_WINDOW_HEIGHT,
        }
    }
}

/// Static description of a launchable application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDefinition {
    /// Canonical app id.
    pub id: ApplicationId,
    /// Human-readable display name, copied into window titles.
    pub display_name: String,
    /// Icon token, copied onto opened windows.
    pub icon: String,
    /// Key of the view component the presentation layer mounts for this app.
    pub component: String,
    /// Declared default window size; [`WindowSize::default`] applies when absent.
    #[serde(default)]
    pub default_size: Option<WindowSize>,
    /// Whether more than one window may be open for this app at once.
    #[serde(default)]
    pub multi_instance: bool,
    /// Launcher visibility flag.
    #[serde(default = "default_true")]
    pub show_in_launcher: bool,
    /// Dock visibility flag for apps that are not running.
    #[serde(default)]
    pub show_in_dock: bool,
}

fn default_true() -> bool {
    true
}

impl AppDefinition {
    /// Creates a single-instance definition with the fallback window size.
    pub fn new(
        id: ApplicationId,
        display_name: impl Into<String>,
        icon: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            icon: icon.into(),
            component: component.into(),
            default_size: None,
            multi_instance: false,
            show_in_launcher: true,
            show_in_dock: false,
        }
    }

    /// Sets the declared default window size.
    pub fn with_default_size(mut self, width: i32, height: i32) -> Self {
        self.default_size = Some(WindowSize { width, height });
        self
    }

    /// Allows several concurrent windows of this app.
    pub fn multi_instance(mut self) -> Self {
        self.multi_instance = true;
        self
    }

    /// Pins the app to the dock even when not running.
    pub fn in_dock(mut self) -> Self {
        self.show_in_dock = true;
        self
    }
}
