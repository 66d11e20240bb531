//! Application registry built from the compiled app manifests.
//!
//! `build.rs` validates every `app.manifest.toml` and `desktop.toml` and embeds them as JSON. This
//! module decodes that catalog once, binds each entry to its mount function, and exposes the
//! ordered descriptor list consumed by the reducer, taskbar, and desktop icons.

use std::sync::OnceLock;

use desktop_app_assistant::AssistantApp;
use desktop_app_browser::BrowserApp;
use desktop_app_camera::CameraApp;
use desktop_app_contract::{AppCapability, AppModule, AppMountContext, ApplicationId};
use desktop_app_notepad::NotepadApp;
use desktop_app_settings::SettingsApp;
use leptos::*;
use serde::Deserialize;
use thiserror::Error;

use crate::{icons::IconName, model::ShellConfig};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));
}

pub use generated::{APP_MANIFEST_CATALOG_JSON, DESKTOP_CONFIG_JSON};

#[derive(Debug, Clone)]
/// Immutable registration for one application.
pub struct AppDescriptor {
    pub app_id: ApplicationId,
    pub title: String,
    pub icon: IconName,
    pub default_width: i32,
    pub default_height: i32,
    pub requested_capabilities: Vec<AppCapability>,
    pub show_on_desktop: bool,
    pub launcher_order: u32,
    pub module: AppModule,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failures while decoding the embedded catalog or shell config.
pub enum CatalogError {
    #[error("catalog JSON is invalid: {0}")]
    Json(String),
    #[error("app `{app_id}` names unknown icon `{icon}`")]
    UnknownIcon { app_id: String, icon: String },
    #[error("no module is registered for app `{0}`")]
    UnknownModule(String),
    #[error("app id `{0}` is registered twice")]
    DuplicateAppId(String),
}

#[derive(Debug, Deserialize)]
struct WindowDefaultsEntry {
    width: i32,
    height: i32,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    app_id: ApplicationId,
    display_name: String,
    icon: String,
    launcher_order: u32,
    show_on_desktop: bool,
    requested_capabilities: Vec<AppCapability>,
    window_defaults: WindowDefaultsEntry,
}

/// Decodes a manifest catalog, binding each entry through `resolve_module`.
///
/// The result is ordered by `launcher_order`, then app id.
///
/// # Errors
///
/// Fails on malformed JSON, unknown icons, unresolved modules, and duplicate ids.
pub fn parse_catalog(
    json: &str,
    resolve_module: impl Fn(&ApplicationId) -> Option<AppModule>,
) -> Result<Vec<AppDescriptor>, CatalogError> {
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(json).map_err(|err| CatalogError::Json(err.to_string()))?;

    let mut descriptors: Vec<AppDescriptor> = Vec::with_capacity(entries.len());
    for entry in entries {
        if descriptors.iter().any(|d| d.app_id == entry.app_id) {
            return Err(CatalogError::DuplicateAppId(entry.app_id.to_string()));
        }
        let icon = IconName::from_token(&entry.icon).ok_or_else(|| CatalogError::UnknownIcon {
            app_id: entry.app_id.to_string(),
            icon: entry.icon.clone(),
        })?;
        let module = resolve_module(&entry.app_id)
            .ok_or_else(|| CatalogError::UnknownModule(entry.app_id.to_string()))?;
        descriptors.push(AppDescriptor {
            app_id: entry.app_id,
            title: entry.display_name,
            icon,
            default_width: entry.window_defaults.width,
            default_height: entry.window_defaults.height,
            requested_capabilities: entry.requested_capabilities,
            show_on_desktop: entry.show_on_desktop,
            launcher_order: entry.launcher_order,
            module,
        });
    }

    descriptors.sort_by(|a, b| {
        a.launcher_order
            .cmp(&b.launcher_order)
            .then_with(|| a.app_id.cmp(&b.app_id))
    });
    Ok(descriptors)
}

/// Decodes shell layout and policy configuration.
///
/// # Errors
///
/// Fails on malformed JSON.
pub fn parse_shell_config(json: &str) -> Result<ShellConfig, CatalogError> {
    serde_json::from_str(json).map_err(|err| CatalogError::Json(err.to_string()))
}

/// Mount function for each built-in app id.
pub fn builtin_module(app_id: &ApplicationId) -> Option<AppModule> {
    let module = match app_id.as_str() {
        "ai-assistant" => AppModule::new(mount_assistant_app),
        "browser" => AppModule::new(mount_browser_app),
        "notes" => AppModule::new(mount_notepad_app),
        "camera" => AppModule::new(mount_camera_app),
        "settings" => AppModule::new(mount_settings_app),
        _ => return None,
    };
    Some(module)
}

/// Registered applications in launcher order. Empty when the embedded catalog fails to decode.
pub fn app_registry() -> &'static [AppDescriptor] {
    static REGISTRY: OnceLock<Vec<AppDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        parse_catalog(APP_MANIFEST_CATALOG_JSON, builtin_module).unwrap_or_else(|err| {
            logging::warn!("app catalog unavailable: {err}");
            Vec::new()
        })
    })
}

pub fn app_descriptor(app_id: &ApplicationId) -> Option<&'static AppDescriptor> {
    app_registry().iter().find(|entry| &entry.app_id == app_id)
}

pub fn desktop_icon_apps() -> impl Iterator<Item = &'static AppDescriptor> {
    app_registry().iter().filter(|entry| entry.show_on_desktop)
}

/// Shell configuration from `desktop.toml`, or defaults when it fails to decode.
pub fn shell_config() -> ShellConfig {
    parse_shell_config(DESKTOP_CONFIG_JSON).unwrap_or_else(|err| {
        logging::warn!("desktop config unavailable, using defaults: {err}");
        ShellConfig::default()
    })
}

fn mount_assistant_app(context: AppMountContext) -> View {
    view! { <AssistantApp window_id=context.window_id services=context.services /> }.into_view()
}

fn mount_browser_app(context: AppMountContext) -> View {
    view! { <BrowserApp window_id=context.window_id /> }.into_view()
}

fn mount_notepad_app(context: AppMountContext) -> View {
    view! { <NotepadApp window_id=context.window_id services=context.services /> }.into_view()
}

fn mount_camera_app(_context: AppMountContext) -> View {
    view! { <CameraApp /> }.into_view()
}

fn mount_settings_app(context: AppMountContext) -> View {
    view! { <SettingsApp services=context.services /> }.into_view()
}
