//! Settings desktop app: desktop theme picker and product information.
//!
//! Theme changes go through the injected [`desktop_app_contract::ThemeService`], so the
//! selection highlighted here always mirrors the runtime's theme.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{AppServices, DesktopThemeId};
use leptos::*;

/// Product name and version shown in the About section.
pub const PRODUCT_VERSION: &str = "NebulaOS v1.0";

fn theme_tile_class(theme: DesktopThemeId, current: DesktopThemeId) -> String {
    let selected = if theme == current { " selected" } else { "" };
    format!("settings-theme-tile theme-{}{selected}", theme.token())
}

#[component]
/// Settings app window contents.
pub fn SettingsApp(
    /// Capability-scoped services; settings needs `theme`.
    services: AppServices,
) -> impl IntoView {
    let theme_service = services.theme;
    if theme_service.is_none() {
        logging::warn!("settings mounted without theme capability");
    }
    let current = Signal::derive(move || {
        theme_service
            .map(|service| service.current.get())
            .unwrap_or_default()
    });

    view! {
        <div class="app-settings">
            <h2 class="settings-title">"Settings"</h2>

            <section class="settings-section" aria-labelledby="settings-personalization">
                <h3 id="settings-personalization" class="settings-heading">"Personalization"</h3>
                <div class="settings-theme-grid" role="radiogroup" aria-label="Desktop theme">
                    {DesktopThemeId::ALL
                        .into_iter()
                        .map(|theme| {
                            view! {
                                <button
                                    type="button"
                                    role="radio"
                                    class=move || theme_tile_class(theme, current.get())
                                    aria-checked=move || (current.get() == theme).to_string()
                                    disabled=theme_service.is_none()
                                    on:click=move |_| {
                                        if let Some(service) = theme_service {
                                            service.set_theme(theme);
                                        }
                                    }
                                >
                                    <span class="settings-theme-swatch" aria-hidden="true"></span>
                                    <span class="settings-theme-name">{theme.label()}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="settings-section" aria-labelledby="settings-about">
                <h3 id="settings-about" class="settings-heading">"About"</h3>
                <div class="settings-about-card">
                    <p class="settings-about-name">{PRODUCT_VERSION}</p>
                    <p class="settings-about-summary">"Web-based Desktop Environment simulation."</p>
                    <p class="settings-about-credits">"Powered by Rust, Leptos & Gemini API."</p>
                </div>
            </section>
        </div>
    }
}
