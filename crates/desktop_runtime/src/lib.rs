//! Browser desktop shell runtime: window-manager state, reducer, app registry, and shell UI.
//!
//! [`DesktopProvider`] owns the reducer container and injects host services; [`DesktopShell`]
//! renders the top bar, desktop icons, window layer, and taskbar against that context.

pub mod apps;
pub mod components;
mod effect_executor;
pub mod host;
pub mod icons;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
