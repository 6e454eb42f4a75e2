//! Generic action entry point for shell surfaces that only hold loosely-typed payloads
//! (launcher tiles, file double-clicks, assistant tool calls).

use desktop_app_contract::AppCatalog;
use leptos::logging;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::DesktopState;
use crate::reducer::{reduce_desktop, DesktopAction, RuntimeEffect};

/// Action kind token for opening an application.
pub const OPEN_APP_ACTION: &str = "open-app";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Tagged action payload as received from the presentation layer.
pub struct ShellActionEnvelope {
    /// Action kind token.
    #[serde(rename = "type")]
    pub kind: String,
    /// Kind-specific payload.
    #[serde(default)]
    pub payload: Value,
}

impl ShellActionEnvelope {
    /// Builds an `open-app` envelope.
    pub fn open_app(app_id: impl Into<String>, file_path: Option<String>) -> Self {
        Self {
            kind: OPEN_APP_ACTION.to_string(),
            payload: serde_json::json!({ "app_id": app_id.into(), "file_path": file_path }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded shell action.
pub enum ShellAction {
    /// Open an app by id, optionally with a document.
    OpenApp {
        /// Raw app id.
        app_id: String,
        /// Document to hand to the app.
        file_path: Option<String>,
    },
    /// Any kind this runtime does not handle.
    Unrecognized {
        /// The unhandled kind token.
        kind: String,
    },
}

#[derive(Debug, Deserialize)]
struct OpenAppPayload {
    #[serde(alias = "appId")]
    app_id: String,
    #[serde(default, alias = "filePath")]
    file_path: Option<String>,
}

impl ShellAction {
    /// Decodes an envelope.
    ///
    /// # Errors
    ///
    /// Returns the payload decode error for a recognized kind with a malformed payload.
    pub fn from_envelope(envelope: ShellActionEnvelope) -> Result<Self, serde_json::Error> {
        match envelope.kind.as_str() {
            OPEN_APP_ACTION => {
                let payload: OpenAppPayload = serde_json::from_value(envelope.payload)?;
                Ok(Self::OpenApp {
                    app_id: payload.app_id,
                    file_path: payload.file_path,
                })
            }
            _ => Ok(Self::Unrecognized {
                kind: envelope.kind,
            }),
        }
    }
}

/// Applies a shell action to `state`. Unknown kinds, malformed payloads, and unknown app ids are
/// logged and ignored; this never fails.
pub fn dispatch_shell_action(
    state: &mut DesktopState,
    catalog: &AppCatalog,
    envelope: ShellActionEnvelope,
) -> Vec<RuntimeEffect> {
    let action = match ShellAction::from_envelope(envelope) {
        Ok(action) => action,
        Err(err) => {
            logging::warn!("ignoring malformed shell action payload: {err}");
            return Vec::new();
        }
    };

    match action {
        ShellAction::OpenApp { app_id, file_path } => {
            let Some(app) = catalog.get_str(&app_id) else {
                logging::warn!("ignoring open-app for unknown app `{app_id}`");
                return Vec::new();
            };
            match reduce_desktop(
                state,
                DesktopAction::OpenApp {
                    app: app.clone(),
                    file_path,
                },
            ) {
                Ok(effects) => effects,
                Err(err) => {
                    logging::warn!("open-app for `{app_id}` failed: {err}");
                    Vec::new()
                }
            }
        }
        ShellAction::Unrecognized { kind } => {
            logging::warn!("ignoring unrecognized shell action `{kind}`");
            Vec::new()
        }
    }
}
