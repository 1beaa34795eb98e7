use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::form::FormErrors;

/// A form as a page would render it: its kind, current values, and the
/// errors from the last submission.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub name: &'static str,
    pub fields: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "FormErrors::is_empty")]
    pub errors: FormErrors,
}

impl FormView {
    pub fn new(name: &'static str, fields: &[(&'static str, &str)]) -> Self {
        Self {
            name,
            fields: fields
                .iter()
                .map(|(field, value)| (*field, (*value).to_owned()))
                .collect(),
            errors: FormErrors::new(),
        }
    }

    pub fn with_errors(mut self, errors: FormErrors) -> Self {
        self.errors = errors;
        self
    }
}

// ======================= AUTH =======================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormPage {
    pub form: FormView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoggedOutPage {
    pub logged_out: bool,
}
