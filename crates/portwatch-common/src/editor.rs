//! Inline cell editor state machine.
//!
//! ```text
//! Display(v) --begin--> Editing{original: v, draft: v}
//! Editing    --commit-> Display(normalize(draft))   (emits an EditCommit)
//! Editing    --cancel-> Display(original)           (no side effects)
//! ```

use crate::models::{SavePreference, ServiceId};
use crate::prefs::{PreferenceCache, normalize_url_path};

/// Which per-service preference a cell edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    ServiceName,
    UrlPath,
}

impl EditField {
    /// Value stored for raw input: trimmed, and for URL paths forced to
    /// start with `/`.
    pub fn normalize(self, raw: &str) -> String {
        match self {
            EditField::ServiceName => raw.trim().to_string(),
            EditField::UrlPath => normalize_url_path(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Display { value: String },
    Editing { original: String, draft: String },
}

/// A committed edit, ready to apply locally and persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommit {
    pub service_id: ServiceId,
    pub field: EditField,
    pub value: String,
}

impl EditCommit {
    pub fn to_update(&self) -> SavePreference {
        match self.field {
            EditField::ServiceName => SavePreference::ServiceName {
                service_id: self.service_id.clone(),
                name: self.value.clone(),
            },
            EditField::UrlPath => SavePreference::UrlPath {
                service_id: self.service_id.clone(),
                path: self.value.clone(),
            },
        }
    }

    pub fn apply(&self, cache: &mut PreferenceCache) {
        cache.apply(&self.to_update());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEditor {
    field: EditField,
    service_id: ServiceId,
    state: EditorState,
}

impl InlineEditor {
    pub fn new(field: EditField, service_id: ServiceId, value: impl Into<String>) -> Self {
        Self {
            field,
            service_id,
            state: EditorState::Display {
                value: value.into(),
            },
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    /// Shown value in display mode, or the current draft while editing.
    pub fn value(&self) -> &str {
        match &self.state {
            EditorState::Display { value } => value,
            EditorState::Editing { draft, .. } => draft,
        }
    }

    /// Enter edit mode preloaded with the current value. No-op if already
    /// editing.
    pub fn begin(&mut self) {
        if let EditorState::Display { value } = &self.state {
            let value = value.clone();
            self.state = EditorState::Editing {
                original: value.clone(),
                draft: value,
            };
        }
    }

    pub fn set_draft(&mut self, input: impl Into<String>) {
        if let EditorState::Editing { draft, .. } = &mut self.state {
            *draft = input.into();
        }
    }

    /// Save the draft. Returns `None` when not editing.
    pub fn commit(&mut self) -> Option<EditCommit> {
        let EditorState::Editing { draft, .. } = &self.state else {
            return None;
        };
        let value = self.field.normalize(draft);
        self.state = EditorState::Display {
            value: value.clone(),
        };
        Some(EditCommit {
            service_id: self.service_id.clone(),
            field: self.field,
            value,
        })
    }

    /// Discard the draft and show the value from before editing.
    pub fn cancel(&mut self) {
        if let EditorState::Editing { original, .. } = &self.state {
            self.state = EditorState::Display {
                value: original.clone(),
            };
        }
    }

    /// Keyboard handling for the edit input: Enter saves, Escape cancels.
    pub fn handle_key(&mut self, key: &str) -> Option<EditCommit> {
        match key {
            "Enter" => self.commit(),
            "Escape" => {
                self.cancel();
                None
            }
            _ => None,
        }
    }
}
