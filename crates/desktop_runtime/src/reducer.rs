//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::AppDefinition;
use thiserror::Error;

use crate::model::{
    DesktopState, ShelfItem, Viewport, WindowId, WindowPair, WindowRecord, WindowRect,
};
use crate::window_manager::{
    dissolve_pair_of, exit_full_screen, focus_window_internal, next_window_id, next_z_index,
    promote_next_active, window_group,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open an app, reusing its window when the app is single-instance.
    OpenApp {
        /// Definition of the app to open.
        app: AppDefinition,
        /// Document handed to the app window.
        file_path: Option<String>,
    },
    /// Close a window together with its pairing group.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize or restore a window together with its pairing group.
    ToggleMinimize {
        /// Window whose group is toggled.
        window_id: WindowId,
    },
    /// Maximize a window, or restore it when already maximized.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Enter or leave fullscreen.
    ToggleFullScreen {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Move a window (and its pairing group by the same delta).
    UpdateWindowPosition {
        /// Window being dragged.
        window_id: WindowId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Resize a single window. The size is clamped to the configured minimum window size.
    UpdateWindowSize {
        /// Window being resized.
        window_id: WindowId,
        /// New width.
        w: i32,
        /// New height.
        h: i32,
    },
    /// Begin a pairing gesture, or dissolve the window's pair when it already has one.
    StartPairing {
        /// Pairing source window.
        window_id: WindowId,
    },
    /// Finish a pairing gesture on a target window.
    CompletePairing {
        /// Pairing target window.
        window_id: WindowId,
    },
    /// Abandon a pairing gesture in progress.
    CancelPairing,
    /// Toggle the launcher overlay open/closed.
    ToggleLauncher,
    /// Close the launcher overlay if open.
    CloseLauncher,
    /// Click on empty desktop space.
    ClickDesktop,
    /// Record the viewport new windows are centered in.
    SetViewport {
        /// Current desktop viewport.
        viewport: Viewport,
    },
    /// Pin an item to the shelf.
    PinToShelf {
        /// Item to pin.
        item: ShelfItem,
    },
    /// Remove an item from the shelf.
    UnpinFromShelf {
        /// Item to remove.
        item: ShelfItem,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the presentation layer to execute.
pub enum RuntimeEffect {
    /// Move input focus into the newly active window.
    FocusWindowInput(WindowId),
    /// Hand a document path to an already mounted app window.
    DeliverFilePath {
        /// Receiving window.
        window_id: WindowId,
        /// Document path.
        file_path: String,
    },
    /// Windows were removed from the registry; their views can be torn down.
    WindowsClosed(Vec<WindowId>),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions (for example, referencing a missing window).
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window {0} not found")]
    WindowNotFound(WindowId),
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// Every action that names a window checks it exists before touching state, so an error always
/// leaves `state` unchanged.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when an action references a window that is not present.
pub fn reduce_desktop(
    state: &mut DesktopState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp { app, file_path } => {
            open_app(state, &app, file_path, &mut effects)?;
        }
        DesktopAction::CloseWindow { window_id } => {
            ensure_window(state, window_id)?;
            let group = window_group(state, window_id);
            if state
                .full_screen_window_id
                .is_some_and(|id| group.contains(&id))
            {
                state.full_screen_window_id = None;
            }
            if state
                .pairing_source_id
                .is_some_and(|id| group.contains(&id))
            {
                state.pairing_source_id = None;
            }
            state.windows.retain(|w| !group.contains(&w.id));
            dissolve_pair_of(state, window_id);
            if state.active_window_id.is_some_and(|id| group.contains(&id)) {
                promote_next_active(state);
            }
            effects.push(RuntimeEffect::WindowsClosed(group));
        }
        DesktopAction::FocusWindow { window_id } => {
            focus_window(state, window_id, &mut effects)?;
        }
        DesktopAction::ToggleMinimize { window_id } => {
            toggle_minimize(state, window_id, &mut effects)?;
        }
        DesktopAction::ToggleMaximize { window_id } => {
            restore_if_minimized(state, window_id, &mut effects)?;
            let window = find_window_mut(state, window_id)?;
            if window.maximized {
                if let Some(saved) = window.pre_maximized_rect {
                    window.rect = saved;
                }
                window.maximized = false;
                if !window.full_screen {
                    window.pre_maximized_rect = None;
                }
            } else {
                if !window.full_screen {
                    window.pre_maximized_rect = Some(window.rect);
                }
                window.maximized = true;
            }
            focus_window(state, window_id, &mut effects)?;
        }
        DesktopAction::ToggleFullScreen { window_id } => {
            restore_if_minimized(state, window_id, &mut effects)?;
            let entering = !find_window_mut(state, window_id)?.full_screen;
            if entering {
                if let Some(previous) = state.full_screen_window_id.take() {
                    if let Some(window) = state.windows.iter_mut().find(|w| w.id == previous) {
                        exit_full_screen(window);
                    }
                }
                let window = find_window_mut(state, window_id)?;
                if !window.maximized {
                    window.pre_maximized_rect = Some(window.rect);
                }
                window.full_screen = true;
                state.full_screen_window_id = Some(window_id);
            } else {
                if state.full_screen_window_id == Some(window_id) {
                    state.full_screen_window_id = None;
                }
                exit_full_screen(find_window_mut(state, window_id)?);
            }
            focus_window(state, window_id, &mut effects)?;
        }
        DesktopAction::UpdateWindowPosition { window_id, x, y } => {
            let current = find_window_mut(state, window_id)?.rect;
            let (dx, dy) = (x.saturating_sub(current.x), y.saturating_sub(current.y));
            for member in window_group(state, window_id) {
                if let Some(window) = state.windows.iter_mut().find(|w| w.id == member) {
                    window.rect = if member == window_id {
                        WindowRect { x, y, ..window.rect }
                    } else {
                        window.rect.offset(dx, dy)
                    };
                }
            }
        }
        DesktopAction::UpdateWindowSize { window_id, w, h } => {
            let min_size = state.config.min_window_size;
            let window = find_window_mut(state, window_id)?;
            window.rect = window.rect.resized(w, h).clamped_min(min_size);
        }
        DesktopAction::StartPairing { window_id } => {
            ensure_window(state, window_id)?;
            if !dissolve_pair_of(state, window_id) {
                state.pairing_source_id = Some(window_id);
            }
        }
        DesktopAction::CompletePairing { window_id } => {
            complete_pairing(state, window_id);
        }
        DesktopAction::CancelPairing => {
            state.pairing_source_id = None;
        }
        DesktopAction::ToggleLauncher => {
            state.launcher_open = !state.launcher_open;
            if state.launcher_open {
                state.pairing_source_id = None;
            }
        }
        DesktopAction::CloseLauncher => {
            state.launcher_open = false;
        }
        DesktopAction::ClickDesktop => {
            state.pairing_source_id = None;
            state.launcher_open = false;
        }
        DesktopAction::SetViewport { viewport } => {
            state.viewport = viewport;
        }
        DesktopAction::PinToShelf { item } => {
            if !state.shelf.contains(&item) {
                state.shelf.push(item);
            }
        }
        DesktopAction::UnpinFromShelf { item } => {
            state.shelf.retain(|pinned| pinned != &item);
        }
    }

    Ok(effects)
}

fn open_app(
    state: &mut DesktopState,
    app: &AppDefinition,
    file_path: Option<String>,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let existing = if app.multi_instance {
        None
    } else {
        state
            .windows_for_app(&app.id)
            .next()
            .map(|w| (w.id, w.minimized))
    };

    if let Some((window_id, minimized)) = existing {
        if minimized {
            toggle_minimize(state, window_id, effects)?;
        } else {
            focus_window(state, window_id, effects)?;
        }
        if let Some(file_path) = file_path {
            find_window_mut(state, window_id)?.file_path = Some(file_path.clone());
            effects.push(RuntimeEffect::DeliverFilePath {
                window_id,
                file_path,
            });
        }
        state.launcher_open = false;
        return Ok(());
    }

    let window_id = next_window_id(state);
    let size = app
        .default_size
        .unwrap_or(state.config.fallback_window_size);
    let rect = state
        .config
        .cascade_rect(size, state.viewport, state.visible_window_count());
    let z_index = next_z_index(state);
    state.windows.push(WindowRecord {
        id: window_id,
        app_id: app.id.clone(),
        title: app.display_name.clone(),
        icon: app.icon.clone(),
        rect,
        z_index,
        minimized: false,
        maximized: false,
        full_screen: false,
        pre_maximized_rect: None,
        file_path,
    });
    state.active_window_id = Some(window_id);
    state.pairing_source_id = None;
    state.launcher_open = false;
    effects.push(RuntimeEffect::FocusWindowInput(window_id));
    Ok(())
}

/// Focuses a window. Minimized windows are restored through the minimize toggle so a minimized
/// window never becomes active.
fn focus_window(
    state: &mut DesktopState,
    window_id: WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    if find_window_mut(state, window_id)?.minimized {
        return toggle_minimize(state, window_id, effects);
    }
    if focus_window_internal(state, window_id) {
        effects.push(RuntimeEffect::FocusWindowInput(window_id));
    }
    Ok(())
}

fn toggle_minimize(
    state: &mut DesktopState,
    window_id: WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let minimizing = !find_window_mut(state, window_id)?.minimized;
    let group = window_group(state, window_id);
    let active_affected = state
        .active_window_id
        .is_some_and(|id| group.contains(&id));

    for member in group {
        if state.full_screen_window_id == Some(member) {
            state.full_screen_window_id = None;
        }
        let Some(window) = state.windows.iter_mut().find(|w| w.id == member) else {
            continue;
        };
        exit_full_screen(window);
        window.minimized = !window.minimized;
        if !window.minimized && focus_window_internal(state, member) {
            effects.push(RuntimeEffect::FocusWindowInput(member));
        }
    }

    let active_minimized = state.active_window().is_some_and(|w| w.minimized);
    if (minimizing && active_affected) || active_minimized {
        promote_next_active(state);
    }
    Ok(())
}

fn restore_if_minimized(
    state: &mut DesktopState,
    window_id: WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    if find_window_mut(state, window_id)?.minimized {
        toggle_minimize(state, window_id, effects)?;
    }
    Ok(())
}

fn complete_pairing(state: &mut DesktopState, target: WindowId) {
    let Some(source) = state.pairing_source_id.take() else {
        return;
    };
    if source == target || !state.contains(source) || !state.contains(target) {
        return;
    }
    if state
        .pair_containing(source)
        .is_some_and(|pair| pair.contains(target))
    {
        return;
    }

    // A window belongs to at most one pair: the target leaves its previous group first.
    dissolve_pair_of(state, target);
    match state.pairs.iter_mut().find(|pair| pair.contains(source)) {
        Some(pair) => pair.members.push(target),
        None => state.pairs.push(WindowPair::new(source, target)),
    }
}

fn ensure_window(state: &DesktopState, window_id: WindowId) -> Result<(), ReducerError> {
    if state.contains(window_id) {
        Ok(())
    } else {
        Err(ReducerError::WindowNotFound(window_id))
    }
}

fn find_window_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound(window_id))
}
