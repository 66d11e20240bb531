//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, runtime effect queue, viewport tracking, and
//! the capability-scoped services handed to mounted apps. UI composition stays in
//! [`crate::components`].

use desktop_app_contract::{AppCommand, AppServices};
use leptos::*;
use platform_host::HostServices;

use crate::{
    apps::{self, AppDescriptor},
    effect_executor,
    host::DesktopHostContext,
    model::{DesktopState, InteractionState, WindowRect},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag/resize interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the shell.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Area available to maximized windows, refreshed on browser resize.
    pub viewport: RwSignal<WindowRect>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
    /// Receiver for commands sent by mounted apps.
    pub app_commands: Callback<AppCommand>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Builds the services granted to an app by its declared capabilities.
    pub fn app_services(&self, descriptor: &AppDescriptor) -> AppServices {
        let state = self.state;
        let theme = Signal::derive(move || state.with(|desktop| desktop.theme));
        self.host.with_value(|host| {
            AppServices::for_capabilities(
                &descriptor.requested_capabilities,
                self.app_commands,
                theme,
                host.services(),
            )
        })
    }
}

fn app_command_action(command: AppCommand) -> DesktopAction {
    match command {
        AppCommand::SetTheme(theme) => DesktopAction::SetTheme { theme },
    }
}

fn install_viewport_tracking(runtime: DesktopRuntimeContext) {
    let refresh = move || {
        let band = runtime
            .state
            .with_untracked(|desktop| desktop.config.layout.reserved_band_px);
        let next = runtime.host.with_value(|host| host.desktop_viewport_rect(band));
        if runtime.viewport.get_untracked() != next {
            runtime.viewport.set(next);
        }
    };
    refresh();
    #[cfg(target_arch = "wasm32")]
    {
        let handle = window_event_listener(ev::resize, move |_| refresh());
        on_cleanup(move || handle.remove());
    }
}

fn build_runtime(host_services: HostServices) -> DesktopRuntimeContext {
    let host = store_value(DesktopHostContext::new(host_services));
    let state = create_rw_signal(DesktopState::new(apps::shell_config()));
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let viewport = create_rw_signal(WindowRect::default());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui;

        let new_effects = reduce_desktop(&mut desktop, &mut ui, action);
        if desktop != previous_desktop {
            state.set(desktop);
        }
        if ui != previous_ui {
            interaction.set(ui);
        }
        if !new_effects.is_empty() {
            effects.update(|queue| queue.extend(new_effects));
        }
    });
    let app_commands = Callback::new(move |command: AppCommand| {
        dispatch.call(app_command_action(command));
    });

    DesktopRuntimeContext {
        host,
        state,
        interaction,
        effects,
        viewport,
        dispatch,
        app_commands,
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Injected browser or test host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let runtime = build_runtime(host_services);

    provide_context(runtime);

    install_viewport_tracking(runtime);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{ApplicationId, DesktopThemeId};
    use leptos::create_runtime;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn app_commands_map_to_reducer_actions() {
        assert_eq!(
            app_command_action(AppCommand::SetTheme(DesktopThemeId::Aurora)),
            DesktopAction::SetTheme {
                theme: DesktopThemeId::Aurora
            }
        );
    }

    #[test]
    fn dispatch_reduces_and_queues_effects() {
        let runtime = create_runtime();
        let context = build_runtime(HostServices::noop());

        context.dispatch_action(DesktopAction::Launch {
            app_id: ApplicationId::trusted("settings"),
        });
        let desktop = context.state.get_untracked();
        assert_eq!(desktop.windows.len(), 1);
        let window_id = desktop.windows[0].id;
        assert_eq!(context.effects.get_untracked(), vec![
            RuntimeEffect::FocusWindowInput(window_id)
        ]);

        context.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: Default::default(),
        });
        assert!(context.interaction.get_untracked().is_dragging());

        runtime.dispose();
    }

    #[test]
    fn theme_capability_routes_through_dispatch() {
        let runtime = create_runtime();
        let context = build_runtime(HostServices::in_memory());

        let settings = apps::app_descriptor(&ApplicationId::trusted("settings")).expect("settings");
        let services = context.app_services(settings);
        let theme = services.theme.expect("theme capability granted");
        assert!(services.storage.is_none());
        assert!(services.assistant.is_none());

        theme.set_theme(DesktopThemeId::Sunset);
        assert_eq!(context.state.get_untracked().theme, DesktopThemeId::Sunset);
        assert_eq!(theme.current_untracked(), DesktopThemeId::Sunset);

        let notes = apps::app_descriptor(&ApplicationId::trusted("notes")).expect("notes");
        let services = context.app_services(notes);
        assert!(services.storage.is_some());
        assert!(services.theme.is_none());

        runtime.dispose();
    }
}
