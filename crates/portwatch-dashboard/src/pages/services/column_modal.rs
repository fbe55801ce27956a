//! Column visibility dialog. One layout applies to all four tables.

use leptos::prelude::*;
use portwatch_common::columns::Column;
use portwatch_common::prefs::PreferenceCache;

use crate::state::DashboardState;

#[component]
pub fn ColumnConfigModal() -> impl IntoView {
    let state = expect_context::<DashboardState>();
    // Seeded once per opening; edits stay local until saved.
    let draft = RwSignal::new(state.cache.with_untracked(PreferenceCache::unified_columns));
    let close = move || state.column_modal.set(false);

    view! {
        <div class="modal-backdrop" on:click=move |_| close()>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <h3>"Visible Columns"</h3>
                <p class="text-muted">"Applies to every services table."</p>
                <div class="column-options">
                    {Column::ALL.into_iter().map(|col| view! {
                        <label class="form-check">
                            <input
                                type="checkbox"
                                prop:checked=move || draft.with(|d| d.is_visible(col))
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    draft.update(|d| d.set(col, on));
                                }
                            />
                            " "
                            {col.label()}
                        </label>
                    }).collect::<Vec<_>>()}
                </div>
                <div class="modal-actions">
                    <button class="btn btn-ghost" on:click=move |_| close()>"Cancel"</button>
                    <button
                        class="btn btn-primary"
                        on:click=move |_| state.save_columns(draft.get_untracked())
                    >
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}
