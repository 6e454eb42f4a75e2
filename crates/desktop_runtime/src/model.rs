use desktop_app_contract::{ApplicationId, WindowSize};
use serde::{Deserialize, Serialize};

use crate::config::ShellConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "win-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    pub fn resized(self, w: i32, h: i32) -> Self {
        Self { w, h, ..self }
    }

    pub fn clamped_min(self, min: WindowSize) -> Self {
        Self {
            w: self.w.max(min.width),
            h: self.h.max(min.height),
            ..self
        }
    }
}

/// Size of the desktop area windows are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    pub icon: String,
    pub rect: WindowRect,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
    pub full_screen: bool,
    /// Bounds saved on maximize or fullscreen entry; `None` while the window is in neither state.
    pub pre_maximized_rect: Option<WindowRect>,
    pub file_path: Option<String>,
}

/// Windows linked by a pairing gesture. They move, minimize, and close together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPair {
    pub members: Vec<WindowId>,
}

impl WindowPair {
    pub fn new(first: WindowId, second: WindowId) -> Self {
        Self {
            members: vec![first, second],
        }
    }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.members.contains(&window_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum ShelfItem {
    App(ApplicationId),
    File(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopState {
    pub windows: Vec<WindowRecord>,
    pub active_window_id: Option<WindowId>,
    pub full_screen_window_id: Option<WindowId>,
    /// Window awaiting a pairing target, if a pairing gesture is in progress.
    pub pairing_source_id: Option<WindowId>,
    pub pairs: Vec<WindowPair>,
    pub next_z_index: u32,
    pub next_window_id: u64,
    pub launcher_open: bool,
    pub viewport: Viewport,
    pub shelf: Vec<ShelfItem>,
    pub config: ShellConfig,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

impl DesktopState {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            windows: Vec::new(),
            active_window_id: None,
            full_screen_window_id: None,
            pairing_source_id: None,
            pairs: Vec::new(),
            next_z_index: config.first_z_index,
            next_window_id: 1,
            launcher_open: false,
            viewport: config.initial_viewport,
            shelf: Vec::new(),
            config,
        }
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.window(window_id).is_some()
    }

    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.active_window_id.and_then(|id| self.window(id))
    }

    pub fn pair_containing(&self, window_id: WindowId) -> Option<&WindowPair> {
        self.pairs.iter().find(|pair| pair.contains(window_id))
    }

    pub fn windows_for_app<'a>(
        &'a self,
        app_id: &'a ApplicationId,
    ) -> impl Iterator<Item = &'a WindowRecord> + 'a {
        self.windows.iter().filter(move |w| &w.app_id == app_id)
    }

    pub fn visible_window_count(&self) -> usize {
        self.windows.iter().filter(|w| !w.minimized).count()
    }
}
