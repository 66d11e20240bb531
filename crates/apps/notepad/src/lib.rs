//! Notes desktop app: a single plain-text note persisted through the storage capability.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{
    window_primary_input_dom_id, AppServices, StorageService, WindowRuntimeId,
};
use leptos::*;
use platform_host::ClockSnapshot;

/// Storage key holding the note text.
pub const NOTE_STORAGE_KEY: &str = "nebula-notepad";

fn save_status_text(last_saved: Option<&str>) -> String {
    match last_saved {
        Some(time) => format!("Saved at {time}"),
        None => "Ready".to_string(),
    }
}

async fn load_note(storage: &StorageService) -> Result<Option<String>, String> {
    storage.load(NOTE_STORAGE_KEY).await
}

async fn save_note(storage: &StorageService, text: &str) -> Result<(), String> {
    storage.save(NOTE_STORAGE_KEY, text).await
}

#[component]
/// Notes app window contents.
///
/// Restores the stored note on mount and writes every edit back immediately.
pub fn NotepadApp(
    /// Runtime window id, used for the editor's focus target.
    window_id: WindowRuntimeId,
    /// Capability-scoped services; notes needs `storage`.
    services: AppServices,
) -> impl IntoView {
    let content = create_rw_signal(String::new());
    let edited = create_rw_signal(false);
    let last_saved = create_rw_signal(None::<String>);
    let storage = services.storage;

    if let Some(storage) = storage.clone() {
        spawn_local(async move {
            match load_note(&storage).await {
                Ok(Some(saved)) => {
                    // Typing before the load settles wins over the stored text.
                    if !edited.get_untracked() {
                        content.set(saved);
                    }
                }
                Ok(None) => {}
                Err(err) => logging::warn!("notes load failed: {err}"),
            }
        });
    }

    let on_input = move |ev: ev::Event| {
        let text = event_target_value(&ev);
        edited.set(true);
        content.set(text.clone());
        let Some(storage) = storage.clone() else {
            return;
        };
        spawn_local(async move {
            match save_note(&storage, &text).await {
                Ok(()) => last_saved.set(Some(ClockSnapshot::now().long_time())),
                Err(err) => logging::warn!("notes save failed: {err}"),
            }
        });
    };

    view! {
        <div class="app-notepad">
            <div class="notepad-statusbar">
                <span class="notepad-encoding">"UTF-8"</span>
                <span class="notepad-save-status">
                    {move || last_saved.with(|saved| save_status_text(saved.as_deref()))}
                </span>
            </div>
            <textarea
                id=window_primary_input_dom_id(window_id)
                class="notepad-editor"
                placeholder="Start typing..."
                spellcheck="false"
                aria-label="Note text"
                prop:value=move || content.get()
                on:input=on_input
            />
        </div>
    }
}
