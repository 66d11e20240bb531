use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use platform_host_web::{build_host_services, host_strategy_name};

const DESKTOP_STYLES: &str = include_str!("../styles/desktop.css");

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="NebulaOS" />
        <Meta name="description" content="A browser-hosted desktop environment." />
        <Style>{DESKTOP_STYLES}</Style>

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    logging::log!("starting desktop with `{}` host services", host_strategy_name());

    view! {
        <DesktopProvider host_services=build_host_services()>
            <DesktopShell />
        </DesktopProvider>
    }
}
