//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container and the runtime effect queue. Rendering of
//! windows, dock, launcher, and menu bar lives with the presentation layer, which reads state
//! through [`DesktopRuntimeContext`] and drains queued effects.
#![allow(clippy::clone_on_copy)]

use desktop_app_contract::{AppCatalog, ApplicationId};
use leptos::*;

use crate::{
    apps,
    config::ShellConfig,
    model::{DesktopState, WindowId, WindowPair, WindowRecord},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    shell_actions::{dispatch_shell_action, ShellActionEnvelope},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Queue of runtime effects emitted by the reducer and drained by the presentation layer.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Static app catalog used to resolve app ids.
    pub catalog: StoredValue<AppCatalog>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Creates the state container under the current reactive owner.
    pub fn new(config: ShellConfig, catalog: AppCatalog) -> Self {
        let state = create_rw_signal(DesktopState::new(config));
        let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
        let catalog = store_value(catalog);

        let dispatch = Callback::new(move |action: DesktopAction| {
            let mut desktop = state.get_untracked();
            let previous = desktop.clone();

            match reduce_desktop(&mut desktop, action) {
                Ok(new_effects) => {
                    if desktop != previous {
                        state.set(desktop);
                    }
                    enqueue_effects(effects, new_effects);
                }
                // Stale ids are expected when a close and a drag-end land in the same tick.
                Err(err) => logging::debug_warn!("desktop reducer ignored action: {err}"),
            }
        });

        Self {
            state,
            effects,
            catalog,
            dispatch,
        }
    }

    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Routes a loosely-typed shell action; unknown kinds are logged and dropped.
    pub fn dispatch_shell_action(&self, envelope: ShellActionEnvelope) {
        let mut desktop = self.state.get_untracked();
        let previous = desktop.clone();
        let new_effects = self
            .catalog
            .with_value(|catalog| dispatch_shell_action(&mut desktop, catalog, envelope));
        if desktop != previous {
            self.state.set(desktop);
        }
        enqueue_effects(self.effects, new_effects);
    }

    /// Opens a catalog app by id.
    pub fn open_app(&self, app_id: &ApplicationId, file_path: Option<String>) {
        let Some(app) = self.catalog.with_value(|catalog| catalog.get(app_id).cloned()) else {
            logging::warn!("open requested for unknown app `{app_id}`");
            return;
        };
        self.dispatch_action(DesktopAction::OpenApp { app, file_path });
    }

    pub fn close_window(&self, window_id: WindowId) {
        self.dispatch_action(DesktopAction::CloseWindow { window_id });
    }

    pub fn focus_window(&self, window_id: WindowId) {
        self.dispatch_action(DesktopAction::FocusWindow { window_id });
    }

    pub fn toggle_minimize(&self, window_id: WindowId) {
        self.dispatch_action(DesktopAction::ToggleMinimize { window_id });
    }

    pub fn toggle_maximize(&self, window_id: WindowId) {
        self.dispatch_action(DesktopAction::ToggleMaximize { window_id });
    }

    pub fn toggle_full_screen(&self, window_id: WindowId) {
        self.dispatch_action(DesktopAction::ToggleFullScreen { window_id });
    }

    pub fn update_window_position(&self, window_id: WindowId, x: i32, y: i32) {
        self.dispatch_action(DesktopAction::UpdateWindowPosition { window_id, x, y });
    }

    pub fn update_window_size(&self, window_id: WindowId, w: i32, h: i32) {
        self.dispatch_action(DesktopAction::UpdateWindowSize { window_id, w, h });
    }

    pub fn start_pairing(&self, window_id: WindowId) {
        self.dispatch_action(DesktopAction::StartPairing { window_id });
    }

    pub fn complete_pairing(&self, window_id: WindowId) {
        self.dispatch_action(DesktopAction::CompletePairing { window_id });
    }

    /// Current window list.
    pub fn windows(&self) -> Vec<WindowRecord> {
        self.state.with(|state| state.windows.clone())
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.state.with(|state| state.active_window_id)
    }

    pub fn full_screen_window_id(&self) -> Option<WindowId> {
        self.state.with(|state| state.full_screen_window_id)
    }

    pub fn pairing_source_id(&self) -> Option<WindowId> {
        self.state.with(|state| state.pairing_source_id)
    }

    pub fn pairs(&self) -> Vec<WindowPair> {
        self.state.with(|state| state.pairs.clone())
    }

    /// Takes every queued effect, leaving the queue empty.
    pub fn drain_effects(&self) -> Vec<RuntimeEffect> {
        let queued = self.effects.get_untracked();
        if !queued.is_empty() {
            self.effects.set(Vec::new());
        }
        queued
    }
}

fn enqueue_effects(effects: RwSignal<Vec<RuntimeEffect>>, new_effects: Vec<RuntimeEffect>) {
    if new_effects.is_empty() {
        return;
    }
    let mut queue = effects.get_untracked();
    queue.extend(new_effects);
    effects.set(queue);
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Layout tunables; defaults apply when omitted.
    #[prop(optional)]
    config: Option<ShellConfig>,
    /// App catalog; the built-in catalog applies when omitted.
    #[prop(optional)]
    catalog: Option<AppCatalog>,
    children: Children,
) -> impl IntoView {
    let runtime = DesktopRuntimeContext::new(
        config.unwrap_or_default(),
        catalog.unwrap_or_else(apps::builtin_catalog),
    );
    provide_context(runtime.clone());

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::apps::{builtin_catalog, NOTES_APP_ID, TERMINAL_APP_ID};

    fn with_runtime(test: impl FnOnce(DesktopRuntimeContext)) {
        let reactive = create_runtime();
        test(DesktopRuntimeContext::new(
            ShellConfig::default(),
            builtin_catalog(),
        ));
        reactive.dispose();
    }

    #[test]
    fn dispatch_commits_state_and_queues_effects() {
        with_runtime(|runtime| {
            runtime.open_app(&ApplicationId::trusted(NOTES_APP_ID), None);
            runtime.open_app(&ApplicationId::trusted(TERMINAL_APP_ID), None);

            let windows = runtime.windows();
            assert_eq!(windows.len(), 2);
            assert_eq!(runtime.active_window_id(), Some(windows[1].id));

            let effects = runtime.drain_effects();
            assert_eq!(
                effects,
                vec![
                    RuntimeEffect::FocusWindowInput(windows[0].id),
                    RuntimeEffect::FocusWindowInput(windows[1].id),
                ]
            );
            assert!(runtime.drain_effects().is_empty());
        });
    }

    #[test]
    fn stale_window_actions_are_silent_noops() {
        with_runtime(|runtime| {
            runtime.open_app(&ApplicationId::trusted(NOTES_APP_ID), None);
            runtime.drain_effects();
            let before = runtime.state.get_untracked();

            runtime.close_window(WindowId(99));
            runtime.update_window_position(WindowId(99), 5, 5);

            assert_eq!(runtime.state.get_untracked(), before);
            assert!(runtime.drain_effects().is_empty());
        });
    }

    #[test]
    fn pairing_commands_round_trip_through_context() {
        with_runtime(|runtime| {
            runtime.dispatch_shell_action(ShellActionEnvelope::open_app("system.finder", None));
            runtime.dispatch_shell_action(ShellActionEnvelope::open_app("system.finder", None));
            let ids: Vec<_> = runtime.windows().iter().map(|w| w.id).collect();

            runtime.start_pairing(ids[0]);
            assert_eq!(runtime.pairing_source_id(), Some(ids[0]));
            runtime.complete_pairing(ids[1]);
            assert_eq!(runtime.pairs(), vec![WindowPair::new(ids[0], ids[1])]);

            runtime.toggle_full_screen(ids[1]);
            assert_eq!(runtime.full_screen_window_id(), Some(ids[1]));
            runtime.toggle_minimize(ids[0]);
            assert_eq!(runtime.full_screen_window_id(), None);
            assert_eq!(runtime.active_window_id(), None);
        });
    }
}
