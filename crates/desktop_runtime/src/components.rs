//! Desktop shell UI composition and interaction surfaces.

mod taskbar;
mod window;

use std::time::Duration;

use desktop_app_contract::DesktopThemeId;
use leptos::*;
use platform_host::ClockSnapshot;

use self::{taskbar::Taskbar, window::DesktopWindow};

use crate::{
    apps,
    icons::{FluentIcon, IconSize},
    model::PointerPosition,
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// Stacking base for window z-indices, below the top bar and taskbar layers.
const WINDOW_Z_BASE: u64 = 10;

const TOP_BAR_MENUS: [&str; 4] = ["File", "Edit", "View", "Help"];

fn theme_backdrop_class(theme: DesktopThemeId) -> String {
    format!("desktop-shell theme-{}", theme.token())
}

#[component]
/// Renders the full desktop shell UI and processes queued [`crate::RuntimeEffect`] values.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.is_dragging() {
            runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
        }
        if interaction.is_resizing() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    view! {
        <div
            id="desktop-shell-root"
            class=move || theme_backdrop_class(state.with(|desktop| desktop.theme))
            data-ui-kind="desktop-root"
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <TopBar />

            <div class="desktop-icon-grid" data-ui-kind="desktop-icons">
                <For each=move || apps::desktop_icon_apps() key=|app| app.app_id.to_string() let:app>
                    {{
                        let app_id = app.app_id.clone();
                        view! {
                            <div
                                class="desktop-icon"
                                role="button"
                                aria-label=format!("Open {}", app.title)
                                on:dblclick=move |_| {
                                    runtime.dispatch_action(DesktopAction::Launch {
                                        app_id: app_id.clone(),
                                    });
                                }
                            >
                                <span class="desktop-icon-glyph">
                                    <FluentIcon icon=app.icon size=IconSize::Lg />
                                </span>
                                <span class="desktop-icon-label">{app.title.clone()}</span>
                            </div>
                        }
                    }}
                </For>
            </div>

            <div class="desktop-window-layer" data-ui-kind="window-layer">
                <For
                    each=move || state.with(|desktop| desktop.windows.iter().map(|w| w.id).collect::<Vec<_>>())
                    key=|window_id| window_id.0
                    let:window_id
                >
                    <DesktopWindow window_id=window_id />
                </For>
            </div>

            <Taskbar />
        </div>
    }
}

#[component]
fn TopBar() -> impl IntoView {
    let clock_now = create_rw_signal(ClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    view! {
        <div class="desktop-top-bar" data-ui-kind="top-bar">
            <div class="top-bar-menus">
                <span class="top-bar-brand">"NebulaOS"</span>
                {TOP_BAR_MENUS
                    .iter()
                    .map(|label| view! { <span class="top-bar-menu">{*label}</span> })
                    .collect_view()}
            </div>
            <div
                class="top-bar-clock"
                aria-label=move || {
                    let now = clock_now.get();
                    format!("{}, {}", now.date(), now.long_time())
                }
            >
                <span>{move || clock_now.get().date()}</span>
                <span>{move || clock_now.get().short_time()}</span>
            </div>
        </div>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.is_dragging() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.is_resizing() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn backdrop_class_tracks_theme() {
        assert_eq!(
            theme_backdrop_class(DesktopThemeId::Default),
            "desktop-shell theme-default"
        );
        assert_eq!(
            theme_backdrop_class(DesktopThemeId::Sunset),
            "desktop-shell theme-sunset"
        );
    }
}
