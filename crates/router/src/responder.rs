//! Response values produced by route handlers.
//!
//! Handlers return anything implementing [`Responder`]; the router converts it into an
//! [`ApiResponse`] and copies its status, headers and text body onto the outgoing response.

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// A status code plus a textual body, the value a handler resolves with
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self { status, headers: HeaderMap::new(), body: body.into() }
    }

    /// A `200 OK` plain text response
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body).with_header(CONTENT_TYPE, text_plain())
    }

    /// Serializes `value` as the json body
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(value)?;
        Ok(Self::new(status, body).with_header(CONTENT_TYPE, application_json()))
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body text
    pub fn text(&self) -> &str {
        &self.body
    }

    pub(crate) fn into_parts(self) -> (StatusCode, HeaderMap, String) {
        (self.status, self.headers, self.body)
    }
}

const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

fn text_plain() -> HeaderValue {
    HeaderValue::from_static(TEXT_PLAIN_UTF_8)
}

fn application_json() -> HeaderValue {
    HeaderValue::from_static(APPLICATION_JSON)
}

/// A trait for types that can be converted into an [`ApiResponse`].
pub trait Responder {
    fn into_api_response(self) -> ApiResponse;
}

impl Responder for ApiResponse {
    fn into_api_response(self) -> ApiResponse {
        self
    }
}

/// None case returns an empty `200 OK`.
impl<T: Responder> Responder for Option<T> {
    fn into_api_response(self) -> ApiResponse {
        match self {
            Some(t) => t.into_api_response(),
            None => ApiResponse::new(StatusCode::OK, String::new()),
        }
    }
}

impl<T: Responder> Responder for (StatusCode, T) {
    fn into_api_response(self) -> ApiResponse {
        let (status, responder) = self;
        let mut response = responder.into_api_response();
        response.status = status;
        response
    }
}

impl<T: Responder> Responder for (T, StatusCode) {
    fn into_api_response(self) -> ApiResponse {
        let (responder, status) = self;
        (status, responder).into_api_response()
    }
}

impl Responder for () {
    fn into_api_response(self) -> ApiResponse {
        ApiResponse::new(StatusCode::OK, String::new())
    }
}

impl Responder for &'static str {
    fn into_api_response(self) -> ApiResponse {
        ApiResponse::ok(self)
    }
}

impl Responder for String {
    fn into_api_response(self) -> ApiResponse {
        ApiResponse::ok(self)
    }
}

impl Responder for Value {
    fn into_api_response(self) -> ApiResponse {
        ApiResponse::new(StatusCode::OK, self.to_string()).with_header(CONTENT_TYPE, application_json())
    }
}
