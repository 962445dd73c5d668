//! Functions working directly on the request head and the outgoing response.
//!
//! [`RawHandler`] is the shape of both the middleware list and the not-found policy. Middleware
//! is registered through [`MiddlewareOrPrefix`], the argument of [`Router::using`], which either
//! appends a middleware or extends the route prefix.
//!
//! [`Router::using`]: crate::Router::using

use crate::error::BoxError;
use crate::request::RequestHead;
use crate::response::ResponseWriter;
use http::StatusCode;
use std::fmt;

#[cfg_attr(test, mockall::automock)]
pub trait RawHandler: Send + Sync {
    fn call(&self, req: &RequestHead, res: &mut ResponseWriter) -> Result<(), BoxError>;
}

pub struct FnRaw<F> {
    f: F,
}

impl<F> RawHandler for FnRaw<F>
where
    F: Fn(&RequestHead, &mut ResponseWriter) -> Result<(), BoxError> + Send + Sync,
{
    #[inline]
    fn call(&self, req: &RequestHead, res: &mut ResponseWriter) -> Result<(), BoxError> {
        (self.f)(req, res)
    }
}

impl<F> fmt::Debug for FnRaw<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRaw").field("f", &std::any::type_name::<F>()).finish()
    }
}

pub fn raw_fn<F>(f: F) -> FnRaw<F>
where
    F: Fn(&RequestHead, &mut ResponseWriter) -> Result<(), BoxError> + Send + Sync,
{
    FnRaw { f }
}

/// The not-found policy used unless the router is built with another one:
/// `404` with body `Not found: <METHOD> <URL>`
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultNotFound;

impl RawHandler for DefaultNotFound {
    fn call(&self, req: &RequestHead, res: &mut ResponseWriter) -> Result<(), BoxError> {
        res.set_status(StatusCode::NOT_FOUND);
        res.end(format!("Not found: {} {}", req.method(), req.url()))?;
        Ok(())
    }
}

/// Argument of [`Router::using`](crate::Router::using)
pub enum MiddlewareOrPrefix {
    Middleware(Box<dyn RawHandler>),
    Prefix(String),
}

impl MiddlewareOrPrefix {
    pub fn middleware<M: RawHandler + 'static>(middleware: M) -> Self {
        Self::Middleware(Box::new(middleware))
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }
}

impl From<&str> for MiddlewareOrPrefix {
    fn from(prefix: &str) -> Self {
        Self::Prefix(prefix.to_owned())
    }
}

impl From<String> for MiddlewareOrPrefix {
    fn from(prefix: String) -> Self {
        Self::Prefix(prefix)
    }
}

impl From<Box<dyn RawHandler>> for MiddlewareOrPrefix {
    fn from(middleware: Box<dyn RawHandler>) -> Self {
        Self::Middleware(middleware)
    }
}

impl<F> From<FnRaw<F>> for MiddlewareOrPrefix
where
    F: Fn(&RequestHead, &mut ResponseWriter) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn from(middleware: FnRaw<F>) -> Self {
        Self::middleware(middleware)
    }
}

impl fmt::Debug for MiddlewareOrPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Middleware(_) => f.write_str("Middleware(..)"),
            Self::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
        }
    }
}
