//! Window manager core for the browser desktop shell.
//!
//! All window lifecycle, stacking, focus, geometry, and pairing transitions go through
//! [`reduce_desktop`]. [`DesktopProvider`] wraps the state in reactive signals for the
//! presentation layer.

pub mod apps;
pub mod config;
pub mod model;
pub mod projections;
pub mod reducer;
mod runtime_context;
pub mod shell_actions;
pub mod window_manager;

pub use config::{ConfigError, ShellConfig};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use shell_actions::{dispatch_shell_action, ShellAction, ShellActionEnvelope};
