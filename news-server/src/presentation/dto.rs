use serde::{Deserialize, Serialize};
use site_core::presentation::dto::FormView;

use crate::domain::comment::Comment;
use crate::domain::news::News;

pub const COMMENT_FORM: &str = "CommentForm";

pub fn comment_form(text: &str) -> FormView {
    FormView::new(COMMENT_FORM, &[("text", text)])
}

#[derive(Debug, Deserialize)]
pub struct CommentPayload {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub object_list: Vec<News>,
}

#[derive(Debug, Serialize)]
pub struct NewsDetailPage {
    pub news: News,
    pub comments: Vec<Comment>,
    /// Only offered to authenticated visitors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormView>,
}

#[derive(Debug, Serialize)]
pub struct CommentEditPage {
    pub comment: Comment,
    pub form: FormView,
}

#[derive(Debug, Serialize)]
pub struct CommentDeletePage {
    pub comment: Comment,
}
