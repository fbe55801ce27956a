//! Services page: one tab per protocol/address-family table.

mod column_modal;
mod editable;
mod table;

use leptos::prelude::*;
use portwatch_common::bucket::TableBucket;

use crate::state::{DashboardState, Load};
use column_modal::ColumnConfigModal;
use table::ServiceTable;

#[component]
pub fn ServicesPage() -> impl IntoView {
    let state = expect_context::<DashboardState>();

    let count = move |bucket: TableBucket| {
        state.services.with(|load| match load {
            Load::Ready(snap) => Some(snap.buckets.get(bucket).len()),
            _ => None,
        })
    };

    view! {
        <div>
            <div class="page-header">
                <div>
                    <h2>"Listening Services"</h2>
                    <p class="subtitle">
                        {move || match state.last_refresh.get() {
                            Some(at) => format!("Last refreshed at {at}"),
                            None => "Loading…".to_string(),
                        }}
                    </p>
                </div>
                <button class="btn btn-primary" on:click=move |_| state.refresh_services()>
                    "Refresh Services"
                </button>
            </div>

            <div class="tabs">
                {TableBucket::ALL.into_iter().map(|bucket| {
                    let class = move || {
                        if state.active_tab.get() == bucket { "tab active" } else { "tab" }
                    };
                    view! {
                        <button class=class on:click=move |_| state.select_tab(bucket)>
                            {bucket.label()}
                            {move || count(bucket).map(|n| view! { <span class="tab-count">{n}</span> })}
                        </button>
                    }
                }).collect::<Vec<_>>()}
            </div>

            {move || {
                let bucket = state.active_tab.get();
                view! { <ServiceTable bucket=bucket /> }
            }}

            {move || state.column_modal.get().then(|| view! { <ColumnConfigModal /> })}
        </div>
    }
}
