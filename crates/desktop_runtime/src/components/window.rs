use super::*;
use crate::{
    icons::IconName,
    model::{WindowId, WindowRecord, WindowRect},
};
use desktop_app_contract::AppMountContext;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Only the primary button of a mouse, or the primary touch/pen contact, starts a gesture.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn window_style(win: &WindowRecord, viewport: WindowRect) -> String {
    let rect = win.effective_rect(viewport);
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        rect.x,
        rect.y,
        rect.w,
        rect.h,
        WINDOW_Z_BASE + win.stack_order
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowControl {
    Minimize,
    ToggleMaximize,
    Close,
}

impl WindowControl {
    const ALL: [Self; 3] = [Self::Minimize, Self::ToggleMaximize, Self::Close];

    fn label(self, maximized: bool) -> &'static str {
        match self {
            Self::Minimize => "Minimize window",
            Self::ToggleMaximize if maximized => "Restore window",
            Self::ToggleMaximize => "Maximize window",
            Self::Close => "Close window",
        }
    }

    fn icon(self, maximized: bool) -> IconName {
        match self {
            Self::Minimize => IconName::WindowMinimize,
            Self::ToggleMaximize if maximized => IconName::WindowRestore,
            Self::ToggleMaximize => IconName::WindowMaximize,
            Self::Close => IconName::Dismiss,
        }
    }

    /// The only action a press on this control dispatches.
    fn action(self, window_id: WindowId) -> DesktopAction {
        match self {
            Self::Minimize => DesktopAction::Minimize { window_id },
            Self::ToggleMaximize => DesktopAction::ToggleMaximize { window_id },
            Self::Close => DesktopAction::Close { window_id },
        }
    }
}

fn window_class(win: &WindowRecord, focused: bool) -> String {
    let focused_class = if focused { " focused" } else { "" };
    let maximized_class = if win.maximized { " maximized" } else { "" };
    format!("desktop-window{focused_class}{maximized_class}")
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let window = create_memo(move |_| {
        runtime
            .state
            .with(|desktop| desktop.window(window_id).cloned())
    });
    let is_focused =
        create_memo(move |_| runtime.state.with(|desktop| desktop.focused_window == Some(window_id)));
    let is_visible = move || window.with(|win| win.as_ref().is_some_and(|w| !w.minimized));

    let is_maximized =
        Signal::derive(move || window.with(|win| win.as_ref().is_some_and(|w| w.maximized)));

    let focus = move |_| runtime.dispatch_action(DesktopAction::Focus { window_id });
    let toggle_maximize = move || runtime.dispatch_action(DesktopAction::ToggleMaximize { window_id });
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        if window.with_untracked(|win| win.as_ref().map_or(true, |w| w.maximized)) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        toggle_maximize();
    };

    view! {
        <Show when=is_visible fallback=|| ()>
            <section
                class=move || {
                    window
                        .with(|win| win.as_ref().map(|w| window_class(w, is_focused.get())))
                        .unwrap_or_default()
                }
                style=move || {
                    let viewport = runtime.viewport.get();
                    window
                        .with(|win| win.as_ref().map(|w| window_style(w, viewport)))
                        .unwrap_or_default()
                }
                on:pointerdown=focus
                role="dialog"
                aria-label=move || window.with(|win| win.as_ref().map(|w| w.title.clone()))
            >
                <header
                    class="titlebar"
                    on:pointerdown=begin_move
                    on:dblclick=titlebar_double_click
                >
                    <div class="titlebar-title">
                        {move || {
                            window
                                .with(|win| win.as_ref().map(|w| (w.icon, w.title.clone())))
                                .map(|(icon, title)| {
                                    view! {
                                        <span class="titlebar-app-icon" aria-hidden="true">
                                            <FluentIcon icon=icon size=IconSize::Sm />
                                        </span>
                                        <span>{title}</span>
                                    }
                                })
                        }}
                    </div>
                    <div class="titlebar-controls">
                        {WindowControl::ALL
                            .into_iter()
                            .map(|control| {
                                view! {
                                    <WindowControlButton
                                        window_id=window_id
                                        control=control
                                        maximized=is_maximized
                                    />
                                }
                            })
                            .collect_view()}
                    </div>
                </header>
                <div class="window-body">
                    <WindowBody window_id=window_id />
                </div>
                <Show
                    when=move || window.with(|win| win.as_ref().is_some_and(|w| !w.maximized))
                    fallback=|| ()
                >
                    <WindowResizeHandle window_id=window_id />
                </Show>
            </section>
        </Show>
    }
}

#[component]
fn WindowControlButton(
    window_id: WindowId,
    control: WindowControl,
    maximized: Signal<bool>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();

    // The section's pointerdown focuses and the header's starts a drag. A control press must
    // reach neither, so it only ever dispatches `control.action`.
    view! {
        <button
            type="button"
            aria-label=move || control.label(maximized.get())
            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
            on:mousedown=move |ev| stop_mouse_event(&ev)
            on:dblclick=move |ev| stop_mouse_event(&ev)
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(control.action(window_id));
            }
        >
            {move || view! { <FluentIcon icon=control.icon(maximized.get()) size=IconSize::Xs /> }}
        </button>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::Focus { window_id });
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class="window-resize-handle"
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        >
            <span class="window-resize-grip"></span>
        </div>
    }
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let contents = runtime
        .state
        .with_untracked(|desktop| desktop.window(window_id).map(|w| w.app_id.clone()))
        .and_then(|app_id| apps::app_descriptor(&app_id))
        .map(|descriptor| {
            descriptor.module.mount(AppMountContext {
                app_id: descriptor.app_id.clone(),
                window_id: window_id.0,
                services: runtime.app_services(descriptor),
            })
        })
        .unwrap_or_else(|| view! { <p class="window-body-missing">"Application unavailable"</p> }.into_view());

    view! {
        <div class="window-body-content">
            {contents}
        </div>
    }
}
