use serde::Serialize;
use site_core::presentation::dto::FormView;

use crate::domain::note::{Note, NoteDraft};

pub const NOTE_FORM: &str = "NoteForm";

pub fn note_form(draft: &NoteDraft) -> FormView {
    FormView::new(
        NOTE_FORM,
        &[
            ("title", draft.title.as_str()),
            ("text", draft.text.as_str()),
            ("slug", draft.slug.as_str()),
        ],
    )
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NoteListPage {
    pub object_list: Vec<Note>,
}

/// Add and edit share one page; `note` is the record being edited.
#[derive(Debug, Serialize)]
pub struct NoteFormPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    pub form: FormView,
}

#[derive(Debug, Serialize)]
pub struct NotePage {
    pub note: Note,
}

#[derive(Debug, Serialize)]
pub struct SuccessPage {
    pub done: bool,
}
