use desktop_app_contract::{AppCatalog, AppDefinition, ApplicationId};

pub const FINDER_APP_ID: &str = "system.finder";
pub const NOTES_APP_ID: &str = "system.notes";
pub const TERMINAL_APP_ID: &str = "system.terminal";
pub const BROWSER_APP_ID: &str = "system.browser";
pub const SETTINGS_APP_ID: &str = "system.settings";
pub const ASSISTANT_APP_ID: &str = "system.assistant";

fn builtin_apps() -> Vec<AppDefinition> {
    vec![
        AppDefinition::new(
            ApplicationId::trusted(FINDER_APP_ID),
            "Finder",
            "folder",
            "finder",
        )
        .with_default_size(800, 500)
        .multi_instance()
        .in_dock(),
        AppDefinition::new(
            ApplicationId::trusted(NOTES_APP_ID),
            "Notes",
            "notes",
            "notes",
        )
        .with_default_size(640, 480)
        .in_dock(),
        AppDefinition::new(
            ApplicationId::trusted(TERMINAL_APP_ID),
            "Terminal",
            "terminal",
            "terminal",
        )
        .with_default_size(680, 420)
        .in_dock(),
        AppDefinition::new(
            ApplicationId::trusted(BROWSER_APP_ID),
            "Browser",
            "globe",
            "browser",
        )
        .with_default_size(1024, 700)
        .multi_instance(),
        AppDefinition::new(
            ApplicationId::trusted(SETTINGS_APP_ID),
            "System Settings",
            "gear",
            "settings",
        ),
        AppDefinition::new(
            ApplicationId::trusted(ASSISTANT_APP_ID),
            "Assistant",
            "sparkles",
            "assistant",
        )
        .with_default_size(420, 600)
        .in_dock(),
    ]
}

/// Returns the catalog of apps shipped with the shell.
pub fn builtin_catalog() -> AppCatalog {
    AppCatalog::new(builtin_apps()).expect("built-in app catalog is valid")
}
