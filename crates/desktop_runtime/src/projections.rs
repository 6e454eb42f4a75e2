//! Read-only views of [`DesktopState`] for the dock, menu bar, and window layer.

use desktop_app_contract::{AppCatalog, AppDefinition, ApplicationId};

use crate::model::{DesktopState, WindowId, WindowRecord};

/// Menu bar title shown when no window is active.
pub const DESKTOP_MENU_TITLE: &str = "Finder";

#[derive(Debug, Clone, PartialEq, Eq)]
/// One dock slot.
pub struct DockEntry {
    pub app_id: ApplicationId,
    pub label: String,
    pub icon: String,
    /// Open windows of the app, in registry order.
    pub window_ids: Vec<WindowId>,
    /// Every open window of the app is minimized.
    pub all_minimized: bool,
}

impl DockEntry {
    pub fn is_running(&self) -> bool {
        !self.window_ids.is_empty()
    }
}

/// Windows in paint order (lowest z-index first).
pub fn stacked_windows(state: &DesktopState) -> Vec<&WindowRecord> {
    let mut windows: Vec<_> = state.windows.iter().collect();
    windows.sort_by_key(|w| w.z_index);
    windows
}

/// Dock slots: catalog dock apps first, then running apps that are not pinned, in the order
/// their first window was opened.
pub fn dock_entries(state: &DesktopState, catalog: &AppCatalog) -> Vec<DockEntry> {
    let mut entries: Vec<DockEntry> = catalog
        .dock_apps()
        .map(|app| DockEntry {
            app_id: app.id.clone(),
            label: app.display_name.clone(),
            icon: app.icon.clone(),
            window_ids: Vec::new(),
            all_minimized: false,
        })
        .collect();

    for window in &state.windows {
        let index = match entries.iter().position(|e| e.app_id == window.app_id) {
            Some(index) => index,
            None => {
                let (label, icon) = catalog
                    .get(&window.app_id)
                    .map(|app| (app.display_name.clone(), app.icon.clone()))
                    .unwrap_or_else(|| (window.title.clone(), window.icon.clone()));
                entries.push(DockEntry {
                    app_id: window.app_id.clone(),
                    label,
                    icon,
                    window_ids: Vec::new(),
                    all_minimized: false,
                });
                entries.len() - 1
            }
        };
        entries[index].window_ids.push(window.id);
    }

    for entry in &mut entries {
        entry.all_minimized = entry.is_running()
            && entry
                .window_ids
                .iter()
                .all(|id| state.window(*id).is_some_and(|w| w.minimized));
    }
    entries
}

/// Apps listed in the launcher overlay; empty while the launcher is closed.
pub fn launcher_apps<'a>(
    state: &DesktopState,
    catalog: &'a AppCatalog,
) -> Vec<&'a AppDefinition> {
    if !state.launcher_open {
        return Vec::new();
    }
    catalog.launcher_apps().collect()
}

/// Title shown in the menu bar: the active window's app name, or the desktop title.
pub fn menu_bar_title<'a>(state: &'a DesktopState, catalog: &'a AppCatalog) -> &'a str {
    state
        .active_window()
        .map(|window| {
            catalog
                .get(&window.app_id)
                .map(|app| app.display_name.as_str())
                .unwrap_or(window.title.as_str())
        })
        .unwrap_or(DESKTOP_MENU_TITLE)
}

/// Members of the pair holding `window_id` other than the window itself.
pub fn pair_partners(state: &DesktopState, window_id: WindowId) -> Vec<WindowId> {
    state
        .pair_containing(window_id)
        .map(|pair| {
            pair.members
                .iter()
                .copied()
                .filter(|id| *id != window_id)
                .collect()
        })
        .unwrap_or_default()
}
