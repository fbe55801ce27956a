//! One services table with client-side sorting.

use leptos::prelude::*;
use portwatch_common::bucket::TableBucket;
use portwatch_common::columns::Column;
use portwatch_common::editor::EditField;
use portwatch_common::html::SETTINGS_GLYPH;
use portwatch_common::sort::{SortController, SortKey};
use portwatch_common::view::{
    CellView, LINK_SEPARATOR, LOAD_SERVICES_FAILED, LinkSet, NO_SERVICES, RowView,
};

use super::editable::EditableCell;
use crate::state::{DashboardState, Load};

#[component]
pub fn ServiceTable(bucket: TableBucket) -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let table = Memo::new(move |_| state.table_view(bucket));

    // Sorting only reorders these rows; any rebuild starts unsorted again.
    let initial = match table.get_untracked() {
        Load::Ready(view) => view.rows,
        _ => Vec::new(),
    };
    let rows = RwSignal::new(initial);
    let sort = RwSignal::new(SortController::default());
    Effect::new(move || {
        if let Load::Ready(view) = table.get() {
            rows.set(view.rows);
            sort.set(SortController::default());
        }
    });

    let on_sort = move |key: SortKey| {
        let mut controller = sort.get_untracked();
        rows.update(|rows| controller.click_and_sort(key, rows));
        sort.set(controller);
    };

    move || match table.get() {
        Load::Loading => view! { <p class="text-muted">"Loading…"</p> }.into_any(),
        Load::Failed => view! { <p class="load-error">{LOAD_SERVICES_FAILED}</p> }.into_any(),
        Load::Ready(view) => {
            let colspan = view.colspan().to_string();
            let headers = view
                .columns
                .iter()
                .map(|&col| header_cell(col, sort, on_sort))
                .collect::<Vec<_>>();

            view! {
                <table class="services" id=format!("{bucket}-services")>
                    <thead>
                        <tr>
                            {headers}
                            <th class="settings">
                                <span
                                    class="gear-icon"
                                    title="Configure columns"
                                    on:click=move |_| state.column_modal.set(true)
                                >
                                    {SETTINGS_GLYPH}
                                </span>
                            </th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let current = rows.get();
                            if current.is_empty() {
                                view! {
                                    <tr><td class="empty" colspan=colspan.clone()>{NO_SERVICES}</td></tr>
                                }.into_any()
                            } else {
                                current
                                    .into_iter()
                                    .map(|row| view! { <ServiceRow row=row /> })
                                    .collect::<Vec<_>>()
                                    .into_any()
                            }
                        }}
                    </tbody>
                </table>
            }
            .into_any()
        }
    }
}

fn header_cell(
    col: Column,
    sort: RwSignal<SortController>,
    on_sort: impl Fn(SortKey) + Copy + 'static,
) -> AnyView {
    match SortKey::for_column(col) {
        Some(key) => view! {
            <th class="sortable" on:click=move |_| on_sort(key)>
                {col.label()}
                " "
                <span class="sort-arrow">{move || sort.get().glyph(key)}</span>
            </th>
        }
        .into_any(),
        None => view! { <th>{col.label()}</th> }.into_any(),
    }
}

#[component]
fn ServiceRow(row: RowView) -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let id = row.service_id;

    let cells = row
        .cells
        .into_iter()
        .map(|cell| match cell {
            CellView::ProcessName { name, pid } => {
                let copy = pid.clone();
                view! {
                    <td class="copyable" title=pid on:click=move |_| state.copy(copy.clone())>
                        {name}
                    </td>
                }
                .into_any()
            }
            CellView::ServiceName { value } => view! {
                <EditableCell field=EditField::ServiceName service_id=id.clone() value=value />
            }
            .into_any(),
            CellView::Protocol(protocol) => view! { <td>{protocol}</td> }.into_any(),
            CellView::ListenAddr { display, full } => {
                let copy = full.clone();
                view! {
                    <td class="copyable mono" title=full on:click=move |_| state.copy(copy.clone())>
                        {display}
                    </td>
                }
                .into_any()
            }
            CellView::State(s) => view! { <td>{s}</td> }.into_any(),
            CellView::UrlPath { value } => view! {
                <EditableCell field=EditField::UrlPath service_id=id.clone() value=value />
            }
            .into_any(),
            CellView::AccessLinks(set) => view! { <td>{link_list(set)}</td> }.into_any(),
        })
        .collect::<Vec<_>>();

    view! {
        <tr>
            {cells}
            <td></td>
        </tr>
    }
}

fn link_list(set: LinkSet) -> AnyView {
    let state = expect_context::<DashboardState>();
    match set {
        LinkSet::Links(links) => links
            .into_iter()
            .enumerate()
            .map(|(i, link)| {
                let copy = link.copy_text;
                view! {
                    {(i > 0).then_some(LINK_SEPARATOR)}
                    <a href=link.href target="_blank" rel="noopener">{link.label}</a>
                    " "
                    <button
                        class="copy-btn"
                        title="Copy address"
                        on:click=move |_| state.copy(copy.clone())
                    >
                        "copy"
                    </button>
                }
            })
            .collect::<Vec<_>>()
            .into_any(),
        other => view! {
            <span class="text-muted">{other.empty_message().unwrap_or_default()}</span>
        }
        .into_any(),
    }
}
