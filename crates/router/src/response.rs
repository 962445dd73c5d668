//! The outgoing response a request is written to.
//!
//! A [`ResponseWriter`] can be ended exactly once. Middleware may set the status or headers
//! before the handler runs; the first `end` wins and every later `end` is rejected with
//! [`ResponseError::AlreadyEnded`].

use crate::body::ResponseBody;
use crate::error::ResponseError;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Response, StatusCode};
use tracing::warn;

#[derive(Debug)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self { status: StatusCode::OK, headers: HeaderMap::new(), body: None }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Sets the status code, has no effect once the response is ended
    pub fn set_status(&mut self, status: StatusCode) {
        if self.is_ended() {
            warn!(%status, "ignore status change on an ended response");
            return;
        }
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.body.is_some()
    }

    /// The written body, `None` until the response is ended
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Finalizes the response with `body`
    pub fn end(&mut self, body: impl Into<Bytes>) -> Result<(), ResponseError> {
        if self.is_ended() {
            return Err(ResponseError::AlreadyEnded);
        }
        self.body = Some(body.into());
        Ok(())
    }

    /// Sets `status` and ends with `body` unless the response is already ended.
    ///
    /// Returns whether anything was written.
    pub(crate) fn end_if_open(&mut self, status: StatusCode, body: &'static str) -> bool {
        if self.is_ended() {
            return false;
        }
        self.status = status;
        self.body = Some(Bytes::from_static(body.as_bytes()));
        true
    }

    /// Converts into an http response, an unended response is sent with an empty body
    pub fn into_response(self) -> Response<ResponseBody> {
        let body = match self.body {
            Some(bytes) => ResponseBody::once(bytes),
            None => {
                warn!(status = %self.status, "response was never ended, sending an empty body");
                ResponseBody::empty()
            }
        };

        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}
