use super::*;
use crate::apps::AppDescriptor;
use desktop_app_contract::ApplicationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct LauncherState {
    running: bool,
    focused: bool,
}

fn launcher_class(app_id: &ApplicationId, status: LauncherState) -> String {
    let running_class = if status.running { " running" } else { "" };
    let focused_class = if status.focused { " focused" } else { "" };
    format!("taskbar-launcher launcher-{app_id}{running_class}{focused_class}")
}

fn launcher_aria_label(descriptor: &AppDescriptor, status: LauncherState) -> String {
    if status.running {
        format!("{} (running)", descriptor.title)
    } else {
        descriptor.title.clone()
    }
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let running_apps = create_memo(move |_| state.with(|desktop| desktop.running_app_ids()));
    let focused_app = create_memo(move |_| state.with(|desktop| desktop.focused_app_id().cloned()));

    view! {
        <nav class="taskbar" data-ui-kind="taskbar" aria-label="Applications">
            <div class="taskbar-launchers">
                {apps::app_registry()
                    .iter()
                    .map(|descriptor| {
                        let app_id = descriptor.app_id.clone();
                        let status = {
                            let app_id = app_id.clone();
                            Signal::derive(move || LauncherState {
                                running: running_apps.with(|running| running.contains(&app_id)),
                                focused: focused_app.with(|focused| focused.as_ref() == Some(&app_id)),
                            })
                        };
                        let class_app_id = app_id.clone();
                        view! {
                            <button
                                type="button"
                                class=move || launcher_class(&class_app_id, status.get())
                                aria-label=move || launcher_aria_label(descriptor, status.get())
                                aria-pressed=move || status.get().focused.to_string()
                                on:click=move |_| {
                                    runtime.dispatch_action(DesktopAction::Launch {
                                        app_id: app_id.clone(),
                                    });
                                }
                            >
                                <span class="taskbar-launcher-glyph">
                                    <FluentIcon icon=descriptor.icon size=IconSize::Md />
                                </span>
                                <span class="taskbar-running-dot" aria-hidden="true"></span>
                                <span class="taskbar-tooltip" role="tooltip">
                                    {descriptor.title.clone()}
                                </span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </nav>
    }
}
