use std::rc::Rc;

use platform_host::HostServices;

use crate::{WebGeminiChatService, WebPrefsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters: localStorage prefs and fetch-based chat.
    Browser,
    /// Placeholder adapters that store nothing and have no chat transport.
    Stub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Stub => "stub",
    }
}

/// Builds the host-service bundle for the compile-time selected host strategy.
pub fn build_host_services() -> HostServices {
    match selected_host_strategy() {
        HostStrategy::Browser => HostServices::new(
            Rc::new(WebPrefsStore),
            Rc::new(WebGeminiChatService::default()),
        ),
        HostStrategy::Stub => HostServices::noop(),
    }
}
