//! Shared contract types between the desktop window manager runtime and hosted apps.
//!
//! Apps are mounted through [`AppModule`] with an [`AppMountContext`]. Services are injected
//! uniformly: every app manifest declares its [`AppCapability`] list and the runtime fills exactly
//! those slots of [`AppServices`], leaving the rest `None`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::rc::Rc;

use leptos::{Callable, Callback, Signal, SignalGetUntracked, View};
use platform_host::{ChatStream, ChatStreamService, ChatTurn, HostServices, PrefsStore};
use serde::{Deserialize, Serialize};

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Stable identifier for an app package/module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` is one or more dot-separated lowercase kebab segments.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected id.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected lowercase kebab-case segments"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ApplicationId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApplicationId> for String {
    fn from(value: ApplicationId) -> Self {
        value.0
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 120 {
        return false;
    }

    raw.split('.').all(|part| {
        let bytes = part.as_bytes();
        !part.is_empty()
            && part.len() <= 32
            && bytes[0].is_ascii_lowercase()
            && !part.ends_with('-')
            && bytes
                .iter()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Declared app capability scopes. Each grants one slot of [`AppServices`].
pub enum AppCapability {
    /// Read the current desktop theme and request changes.
    Theme,
    /// Key-value text storage.
    Storage,
    /// Streaming chat completions.
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Desktop background theme.
pub enum DesktopThemeId {
    /// Deep blue/purple nebula gradient.
    #[default]
    Default,
    /// Teal and green gradient.
    Aurora,
    /// Near-black purple gradient.
    Midnight,
    /// Orange and pink gradient.
    Sunset,
}

impl DesktopThemeId {
    /// Every theme in settings-grid order.
    pub const ALL: [Self; 4] = [Self::Default, Self::Aurora, Self::Midnight, Self::Sunset];

    /// Human-readable theme name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Nebula Default",
            Self::Aurora => "Aurora Borealis",
            Self::Midnight => "Midnight Purple",
            Self::Sunset => "Electric Sunset",
        }
    }

    /// Stable token used in CSS class names.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Aurora => "aurora",
            Self::Midnight => "midnight",
            Self::Sunset => "sunset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Requests an app may send to the desktop runtime.
pub enum AppCommand {
    /// Switch the desktop theme.
    SetTheme(DesktopThemeId),
}

#[derive(Clone, Copy)]
/// Theme service granted by [`AppCapability::Theme`].
pub struct ThemeService {
    sender: Callback<AppCommand>,
    /// Current desktop theme.
    pub current: Signal<DesktopThemeId>,
}

impl ThemeService {
    /// Requests a theme change.
    pub fn set_theme(&self, theme: DesktopThemeId) {
        self.sender.call(AppCommand::SetTheme(theme));
    }

    /// Returns the current theme without subscribing.
    pub fn current_untracked(&self) -> DesktopThemeId {
        self.current.get_untracked()
    }
}

#[derive(Clone)]
/// Key-value text storage granted by [`AppCapability::Storage`].
pub struct StorageService {
    store: Rc<dyn PrefsStore>,
}

impl StorageService {
    /// Wraps a host store.
    pub fn new(store: Rc<dyn PrefsStore>) -> Self {
        Self { store }
    }

    /// Loads the text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns the host store error.
    pub async fn load(&self, key: &str) -> Result<Option<String>, String> {
        self.store.load_value(key).await
    }

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns the host store error.
    pub async fn save(&self, key: &str, value: &str) -> Result<(), String> {
        self.store.save_value(key, value).await
    }
}

#[derive(Clone)]
/// Streaming chat completions granted by [`AppCapability::Assistant`].
pub struct AssistantService {
    chat: Rc<dyn ChatStreamService>,
}

impl AssistantService {
    /// Wraps a host chat transport.
    pub fn new(chat: Rc<dyn ChatStreamService>) -> Self {
        Self { chat }
    }

    /// Streams a reply to `prompt` given every earlier turn in `history`.
    pub fn stream_reply(&self, history: Vec<ChatTurn>, prompt: String) -> ChatStream {
        self.chat.stream_reply(history, prompt)
    }
}

#[derive(Clone, Default)]
/// Injected app services bundle. Only capabilities declared by the app's manifest are `Some`.
pub struct AppServices {
    /// Theme query/change service.
    pub theme: Option<ThemeService>,
    /// Text storage service.
    pub storage: Option<StorageService>,
    /// Chat completion service.
    pub assistant: Option<AssistantService>,
}

impl AppServices {
    /// Builds the bundle granted by `capabilities`.
    pub fn for_capabilities(
        capabilities: &[AppCapability],
        sender: Callback<AppCommand>,
        theme: Signal<DesktopThemeId>,
        host: &HostServices,
    ) -> Self {
        let mut services = Self::default();
        for capability in capabilities {
            match capability {
                AppCapability::Theme => {
                    services.theme = Some(ThemeService {
                        sender,
                        current: theme,
                    });
                }
                AppCapability::Storage => {
                    services.storage = Some(StorageService::new(host.prefs.clone()));
                }
                AppCapability::Assistant => {
                    services.assistant = Some(AssistantService::new(host.chat.clone()));
                }
            }
        }
        services
    }
}

#[derive(Clone)]
/// App mount context injected by the desktop runtime per window instance.
pub struct AppMountContext {
    /// Stable app id from the runtime catalog.
    pub app_id: ApplicationId,
    /// Stable runtime window id.
    pub window_id: WindowRuntimeId,
    /// Capability-scoped services.
    pub services: AppServices,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mounted app module descriptor used by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

/// DOM id an app gives its primary text input so the runtime can focus it after launch/focus.
pub fn window_primary_input_dom_id(window_id: WindowRuntimeId) -> String {
    format!("window-{window_id}-primary-input")
}

#[cfg(test)]
mod tests {
    use leptos::{create_runtime, create_rw_signal, SignalGet, SignalUpdate};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn application_id_accepts_kebab_segments() {
        assert!(ApplicationId::new("notes").is_ok());
        assert!(ApplicationId::new("ai-assistant").is_ok());
        assert!(ApplicationId::new("nebula.settings").is_ok());
        assert!(ApplicationId::new("").is_err());
        assert!(ApplicationId::new("Notes").is_err());
        assert!(ApplicationId::new("notes-").is_err());
        assert!(ApplicationId::new("nebula..notes").is_err());
        assert!(ApplicationId::new("1notes").is_err());
    }

    #[test]
    fn application_id_deserialization_validates() {
        let id: ApplicationId = serde_json::from_str("\"camera\"").expect("valid id");
        assert_eq!(id.as_str(), "camera");
        assert!(serde_json::from_str::<ApplicationId>("\"Bad Id\"").is_err());
    }

    #[test]
    fn capabilities_use_kebab_case_tokens() {
        let caps: Vec<AppCapability> =
            serde_json::from_str(r#"["theme","storage","assistant"]"#).expect("caps");
        assert_eq!(caps, vec![
            AppCapability::Theme,
            AppCapability::Storage,
            AppCapability::Assistant
        ]);
    }

    #[test]
    fn services_are_granted_only_for_declared_capabilities() {
        let runtime = create_runtime();
        let theme = create_rw_signal(DesktopThemeId::Aurora);
        let sent = create_rw_signal(Vec::<AppCommand>::new());
        let sender = Callback::new(move |command| sent.update(|all| all.push(command)));
        let host = HostServices::in_memory();

        let none = AppServices::for_capabilities(&[], sender, theme.into(), &host);
        assert!(none.theme.is_none() && none.storage.is_none() && none.assistant.is_none());

        let settings =
            AppServices::for_capabilities(&[AppCapability::Theme], sender, theme.into(), &host);
        assert!(settings.storage.is_none() && settings.assistant.is_none());
        let theme_service = settings.theme.expect("theme granted");
        assert_eq!(theme_service.current_untracked(), DesktopThemeId::Aurora);
        theme_service.set_theme(DesktopThemeId::Sunset);
        assert_eq!(sent.get(), vec![AppCommand::SetTheme(DesktopThemeId::Sunset)]);

        let notes =
            AppServices::for_capabilities(&[AppCapability::Storage], sender, theme.into(), &host);
        assert!(notes.storage.is_some() && notes.theme.is_none());

        runtime.dispose();
    }

    #[test]
    fn storage_service_round_trips_through_host_store() {
        let host = HostServices::in_memory();
        let storage = StorageService::new(host.prefs.clone());
        futures::executor::block_on(async {
            storage.save("nebula-notepad", "draft").await.expect("save");
            assert_eq!(
                storage.load("nebula-notepad").await.expect("load"),
                Some("draft".to_string())
            );
        });
    }

    #[test]
    fn theme_labels_match_settings_grid() {
        let labels: Vec<_> = DesktopThemeId::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec![
            "Nebula Default",
            "Aurora Borealis",
            "Midnight Purple",
            "Electric Sunset"
        ]);
    }
}
