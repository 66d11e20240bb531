//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.
//!
//! Every action is total: ids that do not name an open window (or a registered app) leave the
//! state untouched and emit no effects.

use desktop_app_contract::{ApplicationId, DesktopThemeId};

use crate::{
    apps,
    model::{
        DesktopState, Gesture, InteractionState, PointerPosition, WindowId, WindowRecord,
        WindowRect,
    },
    window_manager::{
        begin_drag, begin_resize, cascade_rect, drag_rect, focus_window_internal, resize_rect,
        topmost_visible_window, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Focus a visible window of the app, or open a new one.
    Launch {
        /// Registered app to launch.
        app_id: ApplicationId,
    },
    /// Close a window.
    Close {
        /// Window to close.
        window_id: WindowId,
    },
    /// Hide a window without closing it.
    Minimize {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Flip the maximized flag, then focus the window.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Raise, restore, and focus a window.
    Focus {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Overwrite stored geometry. Size is floored at the window minimum.
    Reposition {
        /// Window to move.
        window_id: WindowId,
        /// Requested geometry.
        rect: WindowRect,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window from its bottom-right handle.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Switch the desktop theme.
    SetTheme {
        /// New theme.
        theme: DesktopThemeId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Move keyboard focus into the newly focused window's primary input.
    FocusWindowInput(WindowId),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::Launch { app_id } => launch(state, &app_id, &mut effects),
        DesktopAction::Close { window_id } => {
            let before_len = state.windows.len();
            state.windows.retain(|w| w.id != window_id);
            if state.windows.len() == before_len {
                return effects;
            }
            end_gesture_for(interaction, window_id);
            if state.focused_window == Some(window_id) {
                state.focused_window = None;
                if state.config.policy.refocus_on_close {
                    if let Some(next) = topmost_visible_window(state) {
                        focus(state, next, &mut effects);
                    }
                }
            }
        }
        DesktopAction::Minimize { window_id } => {
            let Some(window) = state.window_mut(window_id) else {
                return effects;
            };
            window.minimized = true;
            end_gesture_for(interaction, window_id);
            if state.focused_window == Some(window_id) {
                state.focused_window = None;
            }
        }
        DesktopAction::ToggleMaximize { window_id } => {
            let Some(window) = state.window_mut(window_id) else {
                return effects;
            };
            window.maximized = !window.maximized;
            end_gesture_for(interaction, window_id);
            focus(state, window_id, &mut effects);
        }
        DesktopAction::Focus { window_id } => focus(state, window_id, &mut effects),
        DesktopAction::Reposition { window_id, rect } => {
            if let Some(window) = state.window_mut(window_id) {
                window.rect = rect.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
            }
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            if interaction.gesture.is_some() {
                return effects;
            }
            if let Some(window) = state.window(window_id).filter(|w| !w.maximized) {
                interaction.gesture = Some(Gesture::Dragging(begin_drag(
                    window_id,
                    window.rect,
                    pointer,
                )));
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            let Some(Gesture::Dragging(session)) = interaction.gesture else {
                return effects;
            };
            match state.window_mut(session.window_id) {
                Some(window) => window.rect = drag_rect(session, window.rect, pointer),
                None => interaction.gesture = None,
            }
        }
        DesktopAction::EndMove => {
            if interaction.is_dragging() {
                interaction.gesture = None;
            }
        }
        DesktopAction::BeginResize { window_id, pointer } => {
            if interaction.gesture.is_some() {
                return effects;
            }
            if let Some(window) = state.window(window_id).filter(|w| !w.maximized) {
                interaction.gesture = Some(Gesture::Resizing(begin_resize(
                    window_id,
                    window.rect,
                    pointer,
                )));
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            let Some(Gesture::Resizing(session)) = interaction.gesture else {
                return effects;
            };
            match state.window_mut(session.window_id) {
                Some(window) => window.rect = resize_rect(session, window.rect, pointer),
                None => interaction.gesture = None,
            }
        }
        DesktopAction::EndResize => {
            if interaction.is_resizing() {
                interaction.gesture = None;
            }
        }
        DesktopAction::SetTheme { theme } => {
            state.theme = theme;
        }
    }
    effects
}

fn focus(state: &mut DesktopState, window_id: WindowId, effects: &mut Vec<RuntimeEffect>) {
    if focus_window_internal(state, window_id) {
        effects.push(RuntimeEffect::FocusWindowInput(window_id));
    }
}

fn end_gesture_for(interaction: &mut InteractionState, window_id: WindowId) {
    if interaction.gesture.map(Gesture::window_id) == Some(window_id) {
        interaction.gesture = None;
    }
}

fn topmost_window_of_app(
    state: &DesktopState,
    app_id: &ApplicationId,
    minimized: bool,
) -> Option<WindowId> {
    state
        .windows
        .iter()
        .filter(|w| &w.app_id == app_id && w.minimized == minimized)
        .max_by_key(|w| w.stack_order)
        .map(|w| w.id)
}

fn launch(state: &mut DesktopState, app_id: &ApplicationId, effects: &mut Vec<RuntimeEffect>) {
    if let Some(existing) = topmost_window_of_app(state, app_id, false) {
        focus(state, existing, effects);
        return;
    }
    if state.config.policy.restore_minimized_on_launch {
        if let Some(minimized) = topmost_window_of_app(state, app_id, true) {
            focus(state, minimized, effects);
            return;
        }
    }

    let Some(descriptor) = apps::app_descriptor(app_id) else {
        return;
    };

    let window_id = WindowId(state.next_window_id);
    state.next_window_id += 1;
    let stack_order = state.next_stack_order;
    state.next_stack_order += 1;

    let rect = cascade_rect(
        state.config.layout,
        state.windows.len(),
        descriptor.default_width,
        descriptor.default_height,
    );
    state.windows.push(WindowRecord {
        id: window_id,
        app_id: descriptor.app_id.clone(),
        title: descriptor.title.clone(),
        icon: descriptor.icon,
        rect,
        stack_order,
        minimized: false,
        maximized: false,
    });
    state.focused_window = Some(window_id);
    effects.push(RuntimeEffect::FocusWindowInput(window_id));
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{ShellConfig, ShellPolicy};

    fn app(id: &str) -> ApplicationId {
        ApplicationId::trusted(id)
    }

    fn apply(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, interaction, action)
    }

    fn launch_app(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        id: &str,
    ) -> WindowId {
        apply(state, interaction, DesktopAction::Launch { app_id: app(id) });
        state.focused_window.expect("launch focuses a window")
    }

    fn record(state: &DesktopState, window_id: WindowId) -> &WindowRecord {
        state.window(window_id).expect("window exists")
    }

    fn running(ids: &[&str]) -> BTreeSet<ApplicationId> {
        ids.iter().map(|id| app(id)).collect()
    }

    fn topmost_holder(state: &DesktopState) -> Option<WindowId> {
        topmost_visible_window(state)
    }

    #[test]
    fn launching_distinct_apps_makes_exactly_those_apps_running() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let launched = ["ai-assistant", "browser", "notes", "camera", "settings"];

        for id in launched {
            launch_app(&mut state, &mut interaction, id);
        }

        assert_eq!(state.running_app_ids(), running(&launched));
        let ids: BTreeSet<_> = state.windows.iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), launched.len());
    }

    #[test]
    fn launch_uses_descriptor_geometry_with_cascade() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let notes = launch_app(&mut state, &mut interaction, "notes");
        let web = launch_app(&mut state, &mut interaction, "browser");

        assert_eq!(record(&state, notes).rect, WindowRect {
            x: 50,
            y: 50,
            w: 500,
            h: 400
        });
        assert_eq!(record(&state, web).rect, WindowRect {
            x: 80,
            y: 80,
            w: 800,
            h: 500
        });
        assert_eq!(record(&state, web).title, "Web");
    }

    #[test]
    fn relaunching_visible_app_only_refocuses() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let notes = launch_app(&mut state, &mut interaction, "notes");
        launch_app(&mut state, &mut interaction, "settings");
        let effects = apply(&mut state, &mut interaction, DesktopAction::Launch {
            app_id: app("notes"),
        });

        assert_eq!(state.windows.len(), 2);
        assert_eq!(state.focused_window, Some(notes));
        assert_eq!(record(&state, notes).stack_order, 3);
        assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(notes)]);
    }

    #[test]
    fn launching_unknown_app_is_a_noop() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let before = state.clone();

        let effects = apply(&mut state, &mut interaction, DesktopAction::Launch {
            app_id: app("paint"),
        });

        assert_eq!(state, before);
        assert!(effects.is_empty());
    }

    #[test]
    fn launching_app_with_only_minimized_window_opens_another_by_default() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = launch_app(&mut state, &mut interaction, "camera");
        apply(&mut state, &mut interaction, DesktopAction::Minimize {
            window_id: first,
        });
        let second = launch_app(&mut state, &mut interaction, "camera");

        assert_ne!(first, second);
        assert_eq!(state.windows.len(), 2);
        assert!(record(&state, first).minimized);
    }

    #[test]
    fn restore_policy_brings_back_minimized_window_on_launch() {
        let mut state = DesktopState::new(ShellConfig {
            policy: ShellPolicy {
                restore_minimized_on_launch: true,
                ..ShellPolicy::default()
            },
            ..ShellConfig::default()
        });
        let mut interaction = InteractionState::default();

        let first = launch_app(&mut state, &mut interaction, "camera");
        apply(&mut state, &mut interaction, DesktopAction::Minimize {
            window_id: first,
        });
        let again = launch_app(&mut state, &mut interaction, "camera");

        assert_eq!(again, first);
        assert_eq!(state.windows.len(), 1);
        assert!(!record(&state, first).minimized);
    }

    #[test]
    fn focus_makes_window_focused_and_topmost() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let a = launch_app(&mut state, &mut interaction, "notes");
        let b = launch_app(&mut state, &mut interaction, "browser");
        let c = launch_app(&mut state, &mut interaction, "camera");

        for target in [a, c, b, b, a] {
            apply(&mut state, &mut interaction, DesktopAction::Focus { window_id: target });
            assert_eq!(state.focused_window, Some(target));
            assert_eq!(topmost_holder(&state), Some(target));
            assert_eq!(
                state.max_stack_order(),
                Some(record(&state, target).stack_order)
            );
        }
    }

    #[test]
    fn focusing_topmost_window_does_not_advance_stack_counter() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = launch_app(&mut state, &mut interaction, "notes");
        let counter = state.next_stack_order;

        let effects = apply(&mut state, &mut interaction, DesktopAction::Focus { window_id: win });

        assert_eq!(state.next_stack_order, counter);
        assert_eq!(record(&state, win).stack_order, 1);
        assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(win)]);
    }

    #[test]
    fn minimize_then_focus_restores_window() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = launch_app(&mut state, &mut interaction, "settings");
        apply(&mut state, &mut interaction, DesktopAction::Minimize { window_id: win });
        assert!(record(&state, win).minimized);
        assert_eq!(state.focused_window, None);

        apply(&mut state, &mut interaction, DesktopAction::Focus { window_id: win });
        assert!(!record(&state, win).minimized);
        assert_eq!(state.focused_window, Some(win));
    }

    #[test]
    fn minimizing_unfocused_window_keeps_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let a = launch_app(&mut state, &mut interaction, "notes");
        let b = launch_app(&mut state, &mut interaction, "browser");
        apply(&mut state, &mut interaction, DesktopAction::Minimize { window_id: a });

        assert_eq!(state.focused_window, Some(b));
        assert_eq!(state.focused_app_id(), Some(&app("browser")));
    }

    #[test]
    fn toggle_maximize_twice_restores_flag_and_geometry() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = launch_app(&mut state, &mut interaction, "notes");
        apply(&mut state, &mut interaction, DesktopAction::Reposition {
            window_id: win,
            rect: WindowRect {
                x: -40,
                y: 900,
                w: 640,
                h: 480,
            },
        });
        let before = record(&state, win).clone();

        apply(&mut state, &mut interaction, DesktopAction::ToggleMaximize {
            window_id: win,
        });
        assert!(record(&state, win).maximized);
        assert_eq!(record(&state, win).rect, before.rect);

        apply(&mut state, &mut interaction, DesktopAction::ToggleMaximize {
            window_id: win,
        });
        assert_eq!(record(&state, win).maximized, before.maximized);
        assert_eq!(record(&state, win).rect, before.rect);
    }

    #[test]
    fn maximized_window_renders_at_viewport() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let viewport = WindowRect {
            x: 0,
            y: 0,
            w: 1280,
            h: 656,
        };

        let win = launch_app(&mut state, &mut interaction, "browser");
        let stored = record(&state, win).rect;
        assert_eq!(record(&state, win).effective_rect(viewport), stored);

        apply(&mut state, &mut interaction, DesktopAction::ToggleMaximize {
            window_id: win,
        });
        assert_eq!(record(&state, win).effective_rect(viewport), viewport);
    }

    #[test]
    fn reposition_floors_size_and_allows_offscreen_origin() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = launch_app(&mut state, &mut interaction, "camera");
        for (w, h) in [(0, 0), (-500, 150), (299, 199), (300, 200), (1200, 900)] {
            apply(&mut state, &mut interaction, DesktopAction::Reposition {
                window_id: win,
                rect: WindowRect {
                    x: -5000,
                    y: -20,
                    w,
                    h,
                },
            });
            let rect = record(&state, win).rect;
            assert!(rect.w >= MIN_WINDOW_WIDTH && rect.h >= MIN_WINDOW_HEIGHT);
            assert_eq!((rect.x, rect.y), (-5000, -20));
        }
        assert_eq!(record(&state, win).rect.w, 1200);
    }

    #[test]
    fn close_removes_one_window_and_clears_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let a = launch_app(&mut state, &mut interaction, "notes");
        let b = launch_app(&mut state, &mut interaction, "settings");
        apply(&mut state, &mut interaction, DesktopAction::Close { window_id: b });

        assert_eq!(state.windows.len(), 1);
        assert!(state.window(b).is_none());
        assert!(state.window(a).is_some());
        assert_eq!(state.focused_window, None);
    }

    #[test]
    fn closing_unfocused_window_keeps_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let a = launch_app(&mut state, &mut interaction, "notes");
        let b = launch_app(&mut state, &mut interaction, "settings");
        apply(&mut state, &mut interaction, DesktopAction::Close { window_id: a });

        assert_eq!(state.focused_window, Some(b));
    }

    #[test]
    fn refocus_policy_focuses_topmost_remaining_visible_window() {
        let mut state = DesktopState::new(ShellConfig {
            policy: ShellPolicy {
                refocus_on_close: true,
                ..ShellPolicy::default()
            },
            ..ShellConfig::default()
        });
        let mut interaction = InteractionState::default();

        let a = launch_app(&mut state, &mut interaction, "notes");
        let b = launch_app(&mut state, &mut interaction, "browser");
        let c = launch_app(&mut state, &mut interaction, "camera");
        apply(&mut state, &mut interaction, DesktopAction::Minimize { window_id: b });
        apply(&mut state, &mut interaction, DesktopAction::Focus { window_id: c });
        let effects = apply(&mut state, &mut interaction, DesktopAction::Close { window_id: c });

        assert_eq!(state.focused_window, Some(a));
        assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(a)]);
    }

    #[test]
    fn commands_on_unknown_windows_are_ignored() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        launch_app(&mut state, &mut interaction, "notes");
        let before = state.clone();
        let ghost = WindowId(99);

        for action in [
            DesktopAction::Close { window_id: ghost },
            DesktopAction::Minimize { window_id: ghost },
            DesktopAction::ToggleMaximize { window_id: ghost },
            DesktopAction::Focus { window_id: ghost },
            DesktopAction::Reposition {
                window_id: ghost,
                rect: WindowRect::default(),
            },
            DesktopAction::BeginMove {
                window_id: ghost,
                pointer: PointerPosition::default(),
            },
            DesktopAction::BeginResize {
                window_id: ghost,
                pointer: PointerPosition::default(),
            },
        ] {
            assert!(apply(&mut state, &mut interaction, action).is_empty());
        }

        assert_eq!(state, before);
        assert_eq!(interaction, InteractionState::default());
    }

    #[test]
    fn drag_moves_window_by_pointer_and_keeps_size() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = launch_app(&mut state, &mut interaction, "notes");
        apply(&mut state, &mut interaction, DesktopAction::BeginMove {
            window_id: win,
            pointer: PointerPosition { x: 70, y: 60 },
        });
        assert!(interaction.is_dragging());

        apply(&mut state, &mut interaction, DesktopAction::UpdateMove {
            pointer: PointerPosition { x: 220, y: 10 },
        });
        assert_eq!(record(&state, win).rect, WindowRect {
            x: 200,
            y: 0,
            w: 500,
            h: 400
        });

        apply(&mut state, &mut interaction, DesktopAction::EndMove);
        assert_eq!(interaction.gesture, None);

        apply(&mut state, &mut interaction, DesktopAction::UpdateMove {
            pointer: PointerPosition { x: 0, y: 0 },
        });
        assert_eq!(record(&state, win).rect.x, 200);
    }

    #[test]
    fn maximized_windows_ignore_drag_and_resize_start() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = launch_app(&mut state, &mut interaction, "notes");
        apply(&mut state, &mut interaction, DesktopAction::ToggleMaximize {
            window_id: win,
        });
        apply(&mut state, &mut interaction, DesktopAction::BeginMove {
            window_id: win,
            pointer: PointerPosition { x: 10, y: 10 },
        });
        apply(&mut state, &mut interaction, DesktopAction::BeginResize {
            window_id: win,
            pointer: PointerPosition { x: 10, y: 10 },
        });

        assert_eq!(interaction.gesture, None);
    }

    #[test]
    fn resize_floors_size_and_keeps_origin() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = launch_app(&mut state, &mut interaction, "browser");
        apply(&mut state, &mut interaction, DesktopAction::BeginResize {
            window_id: win,
            pointer: PointerPosition { x: 850, y: 550 },
        });
        apply(&mut state, &mut interaction, DesktopAction::UpdateResize {
            pointer: PointerPosition { x: 900, y: 500 },
        });
        assert_eq!(record(&state, win).rect, WindowRect {
            x: 50,
            y: 50,
            w: 850,
            h: 450
        });

        apply(&mut state, &mut interaction, DesktopAction::UpdateResize {
            pointer: PointerPosition { x: -2000, y: -2000 },
        });
        assert_eq!(record(&state, win).rect, WindowRect {
            x: 50,
            y: 50,
            w: MIN_WINDOW_WIDTH,
            h: MIN_WINDOW_HEIGHT
        });

        apply(&mut state, &mut interaction, DesktopAction::EndResize);
        assert_eq!(interaction.gesture, None);
    }

    #[test]
    fn gestures_are_mutually_exclusive() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = launch_app(&mut state, &mut interaction, "notes");
        apply(&mut state, &mut interaction, DesktopAction::BeginMove {
            window_id: win,
            pointer: PointerPosition { x: 60, y: 60 },
        });
        apply(&mut state, &mut interaction, DesktopAction::BeginResize {
            window_id: win,
            pointer: PointerPosition { x: 60, y: 60 },
        });
        assert!(interaction.is_dragging());

        apply(&mut state, &mut interaction, DesktopAction::EndResize);
        assert!(interaction.is_dragging());
        apply(&mut state, &mut interaction, DesktopAction::UpdateResize {
            pointer: PointerPosition { x: 900, y: 900 },
        });
        assert_eq!(record(&state, win).rect.w, 500);
    }

    #[test]
    fn closing_dragged_window_ends_gesture() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let win = launch_app(&mut state, &mut interaction, "notes");
        apply(&mut state, &mut interaction, DesktopAction::BeginMove {
            window_id: win,
            pointer: PointerPosition { x: 60, y: 60 },
        });
        apply(&mut state, &mut interaction, DesktopAction::Close { window_id: win });

        assert_eq!(interaction.gesture, None);
    }

    #[test]
    fn set_theme_replaces_theme() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        apply(&mut state, &mut interaction, DesktopAction::SetTheme {
            theme: DesktopThemeId::Midnight,
        });

        assert_eq!(state.theme, DesktopThemeId::Midnight);
    }

    #[test]
    fn notes_and_settings_session_scenario() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let n1 = launch_app(&mut state, &mut interaction, "notes");
        assert_eq!(record(&state, n1).stack_order, 1);
        assert_eq!(state.focused_window, Some(n1));

        let n2 = launch_app(&mut state, &mut interaction, "settings");
        assert_eq!(record(&state, n2).stack_order, 2);
        assert_eq!(state.focused_window, Some(n2));

        apply(&mut state, &mut interaction, DesktopAction::Focus { window_id: n1 });
        assert_eq!(record(&state, n1).stack_order, 3);
        assert_eq!(state.focused_window, Some(n1));

        apply(&mut state, &mut interaction, DesktopAction::ToggleMaximize {
            window_id: n1,
        });
        assert!(record(&state, n1).maximized);
        assert_eq!(state.focused_window, Some(n1));

        apply(&mut state, &mut interaction, DesktopAction::Minimize { window_id: n2 });
        assert!(record(&state, n2).minimized);
        assert_eq!(state.running_app_ids(), running(&["notes", "settings"]));

        apply(&mut state, &mut interaction, DesktopAction::Close { window_id: n1 });
        assert_eq!(state.running_app_ids(), running(&["settings"]));
        assert_eq!(state.focused_window, None);
        assert_eq!(state.focused_app_id(), None);
    }
}
