//! Layout tunables for the window manager, loadable from TOML.

use desktop_app_contract::WindowSize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Viewport, WindowRect};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 220;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 140;
/// Largest cascade offset accepted from a config document.
pub const MAX_CASCADE_STEP: i32 = 4096;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised while loading a [`ShellConfig`].
pub enum ConfigError {
    /// The document was not valid TOML or had mistyped fields.
    #[error("shell config parse failed: {0}")]
    Parse(String),
    /// A field held a value the window manager cannot lay out with.
    #[error("shell config field `{field}` is invalid: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Human-readable reason.
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Geometry constants used when placing and sizing windows.
pub struct ShellConfig {
    /// Height of the menu bar drawn across the top of the desktop.
    pub top_chrome_height: i32,
    /// Gap kept between the menu bar and a newly opened window.
    pub chrome_margin: i32,
    /// How far above the vertical center new windows are placed.
    pub center_lift: i32,
    /// Per-window cascade offset applied to both axes.
    pub cascade_step: i32,
    /// Number of cascade positions before the offset wraps.
    pub cascade_cycle: u32,
    /// Size used for apps that declare none.
    pub fallback_window_size: WindowSize,
    /// Smallest size a window can be resized to.
    pub min_window_size: WindowSize,
    /// Viewport assumed until the presentation layer reports one.
    pub initial_viewport: Viewport,
    /// First z-index handed out.
    pub first_z_index: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            top_chrome_height: 28,
            chrome_margin: 10,
            center_lift: 40,
            cascade_step: 25,
            cascade_cycle: 10,
            fallback_window_size: WindowSize::default(),
            min_window_size: WindowSize {
                width: MIN_WINDOW_WIDTH,
                height: MIN_WINDOW_HEIGHT,
            },
            initial_viewport: Viewport::default(),
            first_z_index: 1,
        }
    }
}

impl ShellConfig {
    /// Parses a config document; omitted fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document cannot be parsed or fails validation.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field can be laid out with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cascade_cycle == 0 {
            return Err(ConfigError::Invalid {
                field: "cascade_cycle",
                reason: "must be at least 1",
            });
        }
        if !(-MAX_CASCADE_STEP..=MAX_CASCADE_STEP).contains(&self.cascade_step) {
            return Err(ConfigError::Invalid {
                field: "cascade_step",
                reason: "must be within 4096 pixels of zero",
            });
        }
        if self.top_chrome_height < 0 || self.chrome_margin < 0 {
            return Err(ConfigError::Invalid {
                field: "top_chrome_height",
                reason: "chrome height and margin must not be negative",
            });
        }
        for (field, size) in [
            ("fallback_window_size", self.fallback_window_size),
            ("min_window_size", self.min_window_size),
        ] {
            if size.width <= 0 || size.height <= 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "width and height must be positive",
                });
            }
        }
        Ok(())
    }

    /// Places a new window of `size`: centered, lifted, cascaded by the number of visible
    /// windows, and kept below the menu bar.
    pub fn cascade_rect(&self, size: WindowSize, viewport: Viewport, visible: usize) -> WindowRect {
        let cycle = self.cascade_cycle.max(1) as usize;
        let offset = self.cascade_step.saturating_mul((visible % cycle) as i32);
        let centered_x = viewport.width.saturating_sub(size.width).div_euclid(2);
        let centered_y = viewport.height.saturating_sub(size.height).div_euclid(2);
        WindowRect {
            x: centered_x.saturating_add(offset),
            y: centered_y
                .saturating_sub(self.center_lift)
                .saturating_add(offset)
                .max(self.top_chrome_height.saturating_add(self.chrome_margin)),
            w: size.width,
            h: size.height,
        }
    }
}
