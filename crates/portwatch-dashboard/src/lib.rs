//! Portwatch Dashboard: Leptos CSR WASM application.
//!
//! Single-page app served next to the portwatch backend. Lists the host's
//! listening services split into TCP/UDP and IPv4/IPv6 tables, with
//! per-service names and URL paths, per-interface link toggles and a
//! shared column layout, all persisted through the backend REST API.

pub mod api;
pub mod clipboard;
pub mod pages;
pub mod state;

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use pages::interfaces::InterfacesPage;
use pages::services::ServicesPage;
use state::DashboardState;

// ── App Root ────────────────────────────────────────────────────────

/// Leptos application root.
#[component]
pub fn App() -> impl IntoView {
    let config = state::load_config();
    log::debug!("using API base {}", config.api_base);
    let state = DashboardState::new(config);
    provide_context(state);

    // Initial load
    state.refresh_interfaces();
    state.refresh_services();

    view! {
        <Router>
            <DashboardShell />
        </Router>
    }
}

// ── Dashboard Shell (sidebar + content) ─────────────────────────────

#[component]
fn DashboardShell() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    view! {
        <div class="app-layout">
            <nav class="sidebar">
                <div class="sidebar-brand">
                    <h1>"Portwatch"</h1>
                    <span class="version">{concat!("v", env!("CARGO_PKG_VERSION"))}</span>
                </div>
                <div class="sidebar-nav">
                    <a href="/services">
                        <span class="icon">"🔌"</span>
                        "Services"
                    </a>
                    <a href="/interfaces">
                        <span class="icon">"🌐"</span>
                        "Interfaces"
                    </a>
                </div>
                <div class="sidebar-footer">
                    {move || match state.last_refresh.get() {
                        Some(at) => view! { <span class="text-muted">"Updated " {at}</span> }.into_any(),
                        None => view! { <span class="text-muted">"Not loaded yet"</span> }.into_any(),
                    }}
                </div>
            </nav>
            <main class="main-content">
                <Routes fallback=|| view! { <ServicesPage /> }>
                    <Route path=path!("/") view=ServicesPage />
                    <Route path=path!("/services") view=ServicesPage />
                    <Route path=path!("/interfaces") view=InterfacesPage />
                </Routes>
            </main>
            <ToastView />
        </div>
    }
}

// ── Toast ───────────────────────────────────────────────────────────

#[component]
fn ToastView() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    move || {
        state.toast.get().map(|toast| {
            let class = if toast.ok { "toast toast-ok" } else { "toast toast-err" };
            view! { <div class=class>{toast.message}</div> }
        })
    }
}

/// WASM entry point.
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("Portwatch Dashboard starting");
    leptos::mount::mount_to_body(App);
}
