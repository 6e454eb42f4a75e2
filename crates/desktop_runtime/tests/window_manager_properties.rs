use desktop_app_contract::{AppDefinition, ApplicationId};
use desktop_runtime::{
    reduce_desktop, window_manager::topmost_visible_window, DesktopAction, DesktopState, WindowId,
    WindowRect,
};
use pretty_assertions::assert_eq;

fn notes() -> AppDefinition {
    AppDefinition::new(
        ApplicationId::trusted("system.notes"),
        "Notes",
        "notes",
        "notes",
    )
}

fn finder() -> AppDefinition {
    AppDefinition::new(
        ApplicationId::trusted("system.finder"),
        "Finder",
        "folder",
        "finder",
    )
    .multi_instance()
}

fn open(state: &mut DesktopState, app: AppDefinition) -> WindowId {
    reduce_desktop(
        state,
        DesktopAction::OpenApp {
            app,
            file_path: None,
        },
    )
    .expect("open app");
    state.active_window_id.expect("active window")
}

fn apply(state: &mut DesktopState, action: DesktopAction) {
    reduce_desktop(state, action).expect("reduce");
}

fn rect(state: &DesktopState, window_id: WindowId) -> WindowRect {
    state.window(window_id).expect("window").rect
}

/// Small deterministic generator so sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

fn assert_invariants(state: &DesktopState) {
    let full_screen: Vec<_> = state.windows.iter().filter(|w| w.full_screen).collect();
    assert!(full_screen.len() <= 1);
    assert_eq!(
        full_screen.first().map(|w| w.id),
        state.full_screen_window_id
    );

    if let Some(active) = state.active_window() {
        assert!(!active.minimized, "minimized window {} is active", active.id);
    }

    for window in &state.windows {
        let in_pairs = state
            .pairs
            .iter()
            .filter(|pair| pair.contains(window.id))
            .count();
        assert!(in_pairs <= 1, "{} is in {in_pairs} pairs", window.id);
        assert!(window.z_index < state.next_z_index);
        if window.pre_maximized_rect.is_some() {
            assert!(window.maximized || window.full_screen);
        }
    }

    for pair in &state.pairs {
        assert!(pair.members.len() >= 2);
        for member in &pair.members {
            assert!(state.contains(*member), "pair references closed {member}");
        }
    }
}

#[test]
fn single_instance_app_never_has_two_windows() {
    let mut state = DesktopState::default();
    let first = open(&mut state, notes());
    let _other = open(&mut state, finder());

    let second = open(&mut state, notes());

    assert_eq!(first, second);
    assert_eq!(state.windows_for_app(&notes().id).count(), 1);
    assert_eq!(state.active_window_id, Some(first));
}

#[test]
fn focus_always_gives_strictly_max_z_index() {
    let mut state = DesktopState::default();
    let ids: Vec<_> = (0..5).map(|_| open(&mut state, finder())).collect();
    apply(&mut state, DesktopAction::ToggleMinimize { window_id: ids[4] });

    for target in [ids[0], ids[3], ids[0], ids[2], ids[2], ids[4]] {
        apply(&mut state, DesktopAction::FocusWindow { window_id: target });
        let z = state.window(target).expect("window").z_index;
        for other in state.windows.iter().filter(|w| w.id != target) {
            assert!(z > other.z_index);
        }
        assert_eq!(state.active_window_id, Some(target));
    }
}

#[test]
fn closing_or_minimizing_active_promotes_topmost_visible() {
    let mut state = DesktopState::default();
    let ids: Vec<_> = (0..4).map(|_| open(&mut state, finder())).collect();
    apply(&mut state, DesktopAction::FocusWindow { window_id: ids[1] });

    apply(&mut state, DesktopAction::CloseWindow { window_id: ids[1] });
    assert_eq!(state.active_window_id, Some(ids[3]));
    assert_eq!(
        state.active_window_id,
        topmost_visible_window(&state.windows)
    );

    apply(&mut state, DesktopAction::ToggleMinimize { window_id: ids[3] });
    assert_eq!(state.active_window_id, Some(ids[2]));

    apply(&mut state, DesktopAction::CloseWindow { window_id: ids[2] });
    apply(&mut state, DesktopAction::CloseWindow { window_id: ids[0] });
    assert_eq!(state.active_window_id, None);
}

#[test]
fn paired_windows_share_move_delta() {
    let mut state = DesktopState::default();
    let a = open(&mut state, finder());
    let b = open(&mut state, finder());
    let loner = open(&mut state, finder());
    apply(&mut state, DesktopAction::StartPairing { window_id: a });
    apply(&mut state, DesktopAction::CompletePairing { window_id: b });
    let (ra, rb, rl) = (rect(&state, a), rect(&state, b), rect(&state, loner));

    apply(
        &mut state,
        DesktopAction::UpdateWindowPosition {
            window_id: a,
            x: 0,
            y: 500,
        },
    );
    let (dx, dy) = (0 - ra.x, 500 - ra.y);
    assert_eq!(rect(&state, b), rb.offset(dx, dy));
    assert_eq!(rect(&state, loner), rl);

    apply(
        &mut state,
        DesktopAction::UpdateWindowPosition {
            window_id: loner,
            x: 3,
            y: 4,
        },
    );
    assert_eq!(rect(&state, a), ra.offset(dx, dy));
    assert_eq!((rect(&state, loner).x, rect(&state, loner).y), (3, 4));
}

#[test]
fn maximize_scenario_restores_exact_bounds() {
    let mut state = DesktopState::default();
    let w1 = open(&mut state, notes().with_default_size(400, 300));
    apply(
        &mut state,
        DesktopAction::UpdateWindowPosition {
            window_id: w1,
            x: 10,
            y: 10,
        },
    );

    apply(&mut state, DesktopAction::ToggleMaximize { window_id: w1 });
    apply(&mut state, DesktopAction::ToggleMaximize { window_id: w1 });

    assert_eq!(
        rect(&state, w1),
        WindowRect {
            x: 10,
            y: 10,
            w: 400,
            h: 300
        }
    );
}

#[test]
fn fullscreen_round_trip_restores_bounds_from_either_start() {
    let mut state = DesktopState::default();
    let plain = open(&mut state, finder());
    let maxed = open(&mut state, finder());
    let plain_rect = rect(&state, plain);
    let maxed_rect = rect(&state, maxed);
    apply(&mut state, DesktopAction::ToggleMaximize { window_id: maxed });

    for window_id in [plain, maxed] {
        apply(&mut state, DesktopAction::ToggleFullScreen { window_id });
        assert_eq!(state.full_screen_window_id, Some(window_id));
        apply(&mut state, DesktopAction::ToggleFullScreen { window_id });
        assert_eq!(state.full_screen_window_id, None);
    }

    assert_eq!(rect(&state, plain), plain_rect);
    assert_eq!(rect(&state, maxed), maxed_rect);
    assert!(state.window(maxed).expect("window").maximized);
}

#[test]
fn pairing_toggle_and_group_close() {
    let mut state = DesktopState::default();
    let a = open(&mut state, finder());
    let b = open(&mut state, finder());

    apply(&mut state, DesktopAction::StartPairing { window_id: a });
    apply(&mut state, DesktopAction::CompletePairing { window_id: b });
    let pair = state.pair_containing(a).expect("pair");
    assert!(pair.contains(a) && pair.contains(b));

    apply(&mut state, DesktopAction::StartPairing { window_id: a });
    assert!(state.pairs.is_empty());

    let c = open(&mut state, finder());
    apply(&mut state, DesktopAction::StartPairing { window_id: b });
    apply(&mut state, DesktopAction::CompletePairing { window_id: c });
    apply(&mut state, DesktopAction::CloseWindow { window_id: c });
    assert!(state.pairs.is_empty());
    assert!(state.contains(a));
    assert!(!state.contains(b));
}

#[test]
fn random_event_sequences_preserve_invariants() {
    for seed in 1..=24u64 {
        let mut rng = Lcg(seed);
        let mut state = DesktopState::default();
        let mut last_z = state.next_z_index;

        for _ in 0..200 {
            let ids: Vec<_> = state.windows.iter().map(|w| w.id).collect();
            let pick = |rng: &mut Lcg| -> WindowId {
                if ids.is_empty() || rng.next(10) == 0 {
                    WindowId(9_999)
                } else {
                    ids[rng.next(ids.len())]
                }
            };
            let action = match rng.next(12) {
                0 | 1 => DesktopAction::OpenApp {
                    app: if rng.next(2) == 0 { notes() } else { finder() },
                    file_path: None,
                },
                2 => DesktopAction::CloseWindow {
                    window_id: pick(&mut rng),
                },
                3 => DesktopAction::FocusWindow {
                    window_id: pick(&mut rng),
                },
                4 => DesktopAction::ToggleMinimize {
                    window_id: pick(&mut rng),
                },
                5 => DesktopAction::ToggleMaximize {
                    window_id: pick(&mut rng),
                },
                6 => DesktopAction::ToggleFullScreen {
                    window_id: pick(&mut rng),
                },
                7 => DesktopAction::UpdateWindowPosition {
                    window_id: pick(&mut rng),
                    x: rng.next(900) as i32,
                    y: rng.next(600) as i32,
                },
                8 => DesktopAction::StartPairing {
                    window_id: pick(&mut rng),
                },
                9 => DesktopAction::CompletePairing {
                    window_id: pick(&mut rng),
                },
                10 => DesktopAction::ToggleLauncher,
                _ => DesktopAction::ClickDesktop,
            };

            let before = state.clone();
            if reduce_desktop(&mut state, action).is_err() {
                assert_eq!(state, before);
            }
            assert!(state.next_z_index >= last_z);
            last_z = state.next_z_index;
            assert_invariants(&state);
            assert!(state.windows_for_app(&notes().id).count() <= 1);
        }
    }
}
