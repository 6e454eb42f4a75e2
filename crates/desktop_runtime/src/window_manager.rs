//! Shared window-manager transition helpers used by the desktop reducer.

use crate::model::{DesktopState, WindowId, WindowRecord};

/// Resolves the set of windows an operation on `window_id` affects: its pairing group, or the
/// window alone when unpaired.
pub fn window_group(state: &DesktopState, window_id: WindowId) -> Vec<WindowId> {
    state
        .pair_containing(window_id)
        .map(|pair| pair.members.clone())
        .unwrap_or_else(|| vec![window_id])
}

/// Returns the non-minimized window with the highest z-index. The first window seen wins ties.
pub fn topmost_visible_window(windows: &[WindowRecord]) -> Option<WindowId> {
    let mut best: Option<&WindowRecord> = None;
    for window in windows.iter().filter(|w| !w.minimized) {
        match best {
            Some(current) if current.z_index >= window.z_index => {}
            _ => best = Some(window),
        }
    }
    best.map(|w| w.id)
}

/// Hands the active role to the topmost visible window, or clears it.
pub fn promote_next_active(state: &mut DesktopState) {
    state.active_window_id = topmost_visible_window(&state.windows);
}

/// Returns whether `window_id` is active and already drawn above every other window.
pub fn is_active_on_top(state: &DesktopState, window_id: WindowId) -> bool {
    if state.active_window_id != Some(window_id) {
        return false;
    }
    let Some(window) = state.window(window_id) else {
        return false;
    };
    state
        .windows
        .iter()
        .all(|other| other.id == window_id || other.z_index < window.z_index)
}

/// Takes the next z-index from the monotonic counter.
pub fn next_z_index(state: &mut DesktopState) -> u32 {
    let z_index = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    z_index
}

/// Takes the next window id from the monotonic counter.
pub fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

/// Activates and raises `window_id`, cancelling any pairing gesture and closing the launcher.
///
/// Returns `true` when focus or stacking changed. Minimized state is left untouched; callers
/// that may target a minimized window go through the reducer's minimize toggle instead.
pub fn focus_window_internal(state: &mut DesktopState, window_id: WindowId) -> bool {
    if !state.contains(window_id) {
        return false;
    }
    if is_active_on_top(state, window_id) && !state.launcher_open {
        return false;
    }

    state.pairing_source_id = None;
    state.launcher_open = false;
    state.active_window_id = Some(window_id);
    let z_index = next_z_index(state);
    if let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) {
        window.z_index = z_index;
    }
    true
}

/// Leaves fullscreen on a single window, restoring its saved bounds.
///
/// The saved bounds are kept while the window is still maximized so a later un-maximize can use
/// them.
pub fn exit_full_screen(window: &mut WindowRecord) {
    if !window.full_screen {
        return;
    }
    window.full_screen = false;
    if let Some(saved) = window.pre_maximized_rect {
        window.rect = saved;
    }
    if !window.maximized {
        window.pre_maximized_rect = None;
    }
}

/// Removes `window_id` from whichever pair holds it, dissolving the whole pair.
pub fn dissolve_pair_of(state: &mut DesktopState, window_id: WindowId) -> bool {
    let before = state.pairs.len();
    state.pairs.retain(|pair| !pair.contains(window_id));
    state.pairs.len() != before
}
