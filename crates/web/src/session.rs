//! Cookie-carried session identity.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use quiz_core::model::SessionId;

/// Cookie holding the opaque session id
pub const SESSION_COOKIE: &str = "quiz_session";

/// Session id resolved for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookie {
    pub id: SessionId,
    /// No valid cookie came in; the response must set one.
    pub is_new: bool,
}

impl SessionCookie {
    /// Read the session cookie, or mint a new id if it is missing or invalid.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match extract_session_id(headers) {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: SessionId::generate(),
                is_new: true,
            },
        }
    }

    /// `Set-Cookie` value for this session.
    #[must_use]
    pub fn set_cookie_value(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id)
    }

    /// Attach `Set-Cookie` to the response when the session is new.
    pub fn attach(&self, body: impl IntoResponse) -> Response {
        let mut response = body.into_response();
        if self.is_new {
            if let Ok(value) = HeaderValue::from_str(&self.set_cookie_value()) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}

/// Extract the session id from the `Cookie` header(s)
fn extract_session_id(headers: &HeaderMap) -> Option<SessionId> {
    let prefix = format!("{SESSION_COOKIE}=");
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()))
        .find_map(|value| value.parse::<SessionId>().ok())
}
