//! Interfaces page: every host interface with a toggle controlling whether
//! it contributes access links.

use leptos::prelude::*;
use portwatch_common::models::Interface;
use portwatch_common::view::{LOAD_INTERFACES_FAILED, NO_INTERFACES};

use crate::state::{DashboardState, Load};

#[component]
pub fn InterfacesPage() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    view! {
        <div>
            <div class="page-header">
                <div>
                    <h2>"Network Interfaces"</h2>
                    <p class="subtitle">"Choose which interfaces appear in access links"</p>
                </div>
                <button class="btn btn-primary" on:click=move |_| state.refresh_interfaces()>
                    "Refresh Interfaces"
                </button>
            </div>

            {move || match state.interfaces.get() {
                Load::Loading => view! { <p class="text-muted">"Loading…"</p> }.into_any(),
                Load::Failed => view! { <p class="load-error">{LOAD_INTERFACES_FAILED}</p> }.into_any(),
                Load::Ready(list) => view! {
                    <table class="interfaces">
                        <thead>
                            <tr>
                                <th>"Interface"</th>
                                <th>"IP Address"</th>
                                <th>"Show Links"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {if list.is_empty() {
                                view! { <tr><td class="empty" colspan="3">{NO_INTERFACES}</td></tr> }.into_any()
                            } else {
                                list.into_iter()
                                    .map(|iface| view! { <InterfaceRow iface=iface /> })
                                    .collect::<Vec<_>>()
                                    .into_any()
                            }}
                        </tbody>
                    </table>
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn InterfaceRow(iface: Interface) -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let name = iface.name.clone();
    let name_toggle = iface.name.clone();
    let shown = move || state.cache.with(|cache| cache.shows_links(&name));
    let ip = if iface.has_ip() { iface.ip } else { "—".to_string() };

    view! {
        <tr>
            <td class="iface-name">{iface.name}</td>
            <td class="mono">{ip}</td>
            <td>
                <label class="toggle">
                    <input
                        type="checkbox"
                        prop:checked=shown
                        on:change=move |ev| {
                            state.toggle_interface(name_toggle.clone(), event_target_checked(&ev));
                        }
                    />
                    <span class="slider"></span>
                </label>
            </td>
        </tr>
    }
}
