//! Web desktop app: an address bar driving a sandboxed iframe.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{window_primary_input_dom_id, WindowRuntimeId};
use leptos::*;

/// Address shown in the bar when the window opens.
pub const INITIAL_ADDRESS: &str = "https://google.com";
/// Page loaded when the window opens. The `igu=1` variant permits framing.
pub const INITIAL_FRAME_SRC: &str = "https://www.google.com/webhp?igu=1";
/// Capabilities granted to framed pages.
pub const FRAME_SANDBOX: &str = "allow-scripts allow-same-origin allow-forms";

/// Turns address-bar text into a frame URL, adding `https://` when no scheme is present.
///
/// Returns `None` for blank input.
pub fn normalize_address(raw: &str) -> Option<String> {
    let address = raw.trim();
    if address.is_empty() {
        return None;
    }
    if address.starts_with("http") {
        Some(address.to_string())
    } else {
        Some(format!("https://{address}"))
    }
}

#[component]
/// Web app window contents.
pub fn BrowserApp(
    /// Runtime window id, used for the address bar's focus target.
    window_id: WindowRuntimeId,
) -> impl IntoView {
    let address = create_rw_signal(INITIAL_ADDRESS.to_string());
    let frame_src = create_rw_signal(INITIAL_FRAME_SRC.to_string());

    let navigate = move || {
        if let Some(target) = address.with_untracked(|raw| normalize_address(raw)) {
            frame_src.set(target);
        }
    };

    view! {
        <div class="app-browser">
            <div class="browser-toolbar">
                <div class="browser-traffic-lights" aria-hidden="true">
                    <span class="light red"></span>
                    <span class="light yellow"></span>
                    <span class="light green"></span>
                </div>
                <input
                    id=window_primary_input_dom_id(window_id)
                    class="browser-address"
                    type="text"
                    aria-label="Address"
                    spellcheck="false"
                    prop:value=move || address.get()
                    on:input=move |ev| address.set(event_target_value(&ev))
                    on:keydown=move |ev: ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            navigate();
                        }
                    }
                />
                <button
                    type="button"
                    class="browser-go"
                    aria-label="Go"
                    on:click=move |_| navigate()
                >
                    "Go"
                </button>
            </div>
            <div class="browser-viewport">
                <iframe
                    class="browser-frame"
                    title="browser"
                    src=move || frame_src.get()
                    sandbox=FRAME_SANDBOX
                />
            </div>
        </div>
    }
}
