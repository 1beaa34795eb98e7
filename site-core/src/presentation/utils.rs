use actix_web::{HttpMessage, HttpRequest, HttpResponse, http::header};

use crate::presentation::middleware::RequestId;

pub const LOGIN_URL: &str = "/auth/login/";
pub const LOGIN_REDIRECT_URL: &str = "/";
pub const SESSION_COOKIE: &str = "session";

/// `/auth/login/?next=<target>`, the target percent-encoded except for `/`.
pub fn login_url_with_next(next: &str) -> String {
    let encoded = next
        .split('/')
        .map(|segment| url::form_urlencoded::byte_serialize(segment.as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join("/");
    format!("{LOGIN_URL}?next={encoded}")
}

/// Only same-site absolute paths are followed after login.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => LOGIN_REDIRECT_URL,
    }
}

pub fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
