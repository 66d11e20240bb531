//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! The reducer stays pure; anything that touches the DOM or the injected [`HostServices`] bundle
//! runs here after a dispatch settles.

#[cfg(target_arch = "wasm32")]
use desktop_app_contract::window_primary_input_dom_id;
use platform_host::HostServices;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    model::{WindowId, WindowRect},
    reducer::RuntimeEffect,
};

const FALLBACK_VIEWPORT_WIDTH: i32 = 1024;
const FALLBACK_VIEWPORT_HEIGHT: i32 = 768;

#[derive(Clone, Debug, Default)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    services: HostServices,
}

impl DesktopHostContext {
    /// Creates a host context around an injected service bundle.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Injected host services shared with mounted apps.
    pub fn services(&self) -> &HostServices {
        &self.services
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::FocusWindowInput(window_id) => self.focus_window_input(window_id),
        }
    }

    /// Moves keyboard focus into a window's primary input, if the mounted app rendered one.
    ///
    /// Apps opt in by rendering [`desktop_app_contract::window_primary_input_dom_id`] on their
    /// primary text field. Focus is deferred a tick so a freshly mounted view is in the DOM.
    pub fn focus_window_input(&self, window_id: WindowId) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(document) = window.document() else {
                return;
            };
            let callback = Closure::once_into_js(move || {
                let Some(element) =
                    document.get_element_by_id(&window_primary_input_dom_id(window_id.0))
                else {
                    return;
                };
                if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
                    let _ = element.focus();
                }
            });
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = window_id;
    }

    /// Area a maximized window occupies: the browser viewport minus the reserved shell band.
    pub fn desktop_viewport_rect(&self, reserved_band_px: i32) -> WindowRect {
        viewport_rect_for(browser_viewport_size(), reserved_band_px)
    }
}

fn viewport_rect_for((width, height): (i32, i32), reserved_band_px: i32) -> WindowRect {
    WindowRect {
        x: 0,
        y: 0,
        w: width.max(0),
        h: (height - reserved_band_px).max(0),
    }
}

fn browser_viewport_size() -> (i32, i32) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(FALLBACK_VIEWPORT_WIDTH);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(FALLBACK_VIEWPORT_HEIGHT);
            return (width, height);
        }
    }

    (FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn viewport_withholds_reserved_band() {
        assert_eq!(viewport_rect_for((1280, 800), 64), WindowRect {
            x: 0,
            y: 0,
            w: 1280,
            h: 736
        });
        assert_eq!(viewport_rect_for((200, 40), 64).h, 0);
    }

    #[test]
    fn off_browser_viewport_uses_fallback_size() {
        let host = DesktopHostContext::default();
        assert_eq!(host.desktop_viewport_rect(64), WindowRect {
            x: 0,
            y: 0,
            w: 1024,
            h: 704
        });
        host.run_runtime_effect(RuntimeEffect::FocusWindowInput(WindowId(1)));
    }
}
