//! Click-to-edit table cell for service names and URL paths.

use leptos::prelude::*;
use portwatch_common::editor::{EditField, InlineEditor};
use portwatch_common::models::ServiceId;

use crate::state::DashboardState;

#[component]
pub fn EditableCell(field: EditField, service_id: ServiceId, value: String) -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let editor = RwSignal::new(InlineEditor::new(field, service_id, value));
    // Only mode switches rebuild the cell; typing must not recreate the input.
    let editing = Memo::new(move |_| editor.with(InlineEditor::is_editing));
    let input_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move || {
        if editing.get() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
                input.select();
            }
        }
    });

    let save = move || {
        let mut ed = editor.get_untracked();
        let commit = ed.commit();
        editor.set(ed);
        if let Some(commit) = commit {
            state.commit_edit(commit);
        }
    };

    let on_key = move |ev: leptos::ev::KeyboardEvent| {
        let mut ed = editor.get_untracked();
        let commit = ed.handle_key(&ev.key());
        editor.set(ed);
        if let Some(commit) = commit {
            state.commit_edit(commit);
        }
    };

    move || {
        if editing.get() {
            let draft = editor.with_untracked(|ed| ed.value().to_string());
            view! {
                <td class="editing">
                    <input
                        class="edit-input"
                        type="text"
                        node_ref=input_ref
                        prop:value=draft
                        on:input=move |ev| editor.update(|ed| ed.set_draft(event_target_value(&ev)))
                        on:keydown=on_key
                    />
                    <span class="save-icon" title="Save" on:click=move |_| save()>"✔"</span>
                    <span class="cancel-icon" title="Cancel" on:click=move |_| editor.update(InlineEditor::cancel)>"✖"</span>
                </td>
            }
            .into_any()
        } else {
            view! {
                <td>
                    {move || editor.with(|ed| ed.value().to_string())}
                    " "
                    <span class="edit-icon" title="Edit" on:click=move |_| editor.update(InlineEditor::begin)>"✎"</span>
                </td>
            }
            .into_any()
        }
    }
}
