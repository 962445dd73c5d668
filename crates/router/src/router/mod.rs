//! Route registration and request dispatch.
//!
//! A [`Router`] is assembled once at startup through chained registration calls and then shared
//! read-only while serving:
//!
//! ```no_run
//! use micro_router::{BodyReader, RequestHead, Router, handler_fn, raw_fn};
//! use micro_router::error::BodyError;
//! use std::convert::Infallible;
//! use std::sync::Arc;
//!
//! async fn get_user(req: Arc<RequestHead>) -> Result<String, Infallible> {
//!     Ok(format!("user from {}", req.url()))
//! }
//!
//! async fn rename_user(_req: Arc<RequestHead>, body: BodyReader) -> Result<String, BodyError> {
//!     let name = body.text().await?;
//!     Ok(format!("renamed to {name}"))
//! }
//!
//! let router = Router::new()
//!     .using(raw_fn(|req, _res| {
//!         println!("{} {}", req.method(), req.url());
//!         Ok(())
//!     }))
//!     .using("/api")
//!     .get("/user", handler_fn(get_user))
//!     .patch("/user", handler_fn(rename_user));
//! ```
//!
//! Routes are matched by exact path equality against `prefix + path`, where the prefix is the
//! concatenation of every string passed to [`Router::using`] before the route was registered.

mod table;

use crate::body::{BodyReader, ResponseBody};
use crate::config::RouterConfig;
use crate::error::{BoxError, DispatchError};
use crate::handler::{BodyHandler, GetHandler};
use crate::method::RouteMethod;
use crate::middleware::{DefaultNotFound, MiddlewareOrPrefix, RawHandler};
use crate::parser::BodyParser;
use crate::request::RequestHead;
use crate::response::ResponseWriter;
use bytes::Bytes;
use futures::FutureExt;
use http::{Method, Request, Response, StatusCode};
use http_body::Body as HttpBody;
use serde_json::Value;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use table::{Matched, RouteTables};
use tracing::{debug, error};

/// Body of the response sent when dispatch fails
pub const INTERNAL_SERVER_ERROR_BODY: &str = "Internal server error";

pub struct Router {
    routes: RouteTables,
    middlewares: Vec<Box<dyn RawHandler>>,
    prefix: String,
    not_found: Box<dyn RawHandler>,
    config: RouterConfig,
}

macro_rules! body_route {
    ($method:ident, $table:ident, $route_method:expr) => {
        #[doc = concat!("Registers `handler` for ", stringify!($table), " requests to `prefix + path`, replacing any previous one")]
        #[must_use]
        pub fn $method<H: BodyHandler + 'static>(mut self, path: &str, handler: H) -> Self {
            let key = self.route_key(path);
            let replaced = self.routes.$table.insert(key.clone(), Box::new(handler));
            log_registered($route_method, &key, replaced);
            self
        }
    };
}

impl Router {
    /// A router with the default not-found policy and config
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Appends a middleware, or extends the route prefix when given a string
    #[must_use]
    pub fn using(mut self, value: impl Into<MiddlewareOrPrefix>) -> Self {
        match value.into() {
            MiddlewareOrPrefix::Middleware(middleware) => self.middlewares.push(middleware),
            MiddlewareOrPrefix::Prefix(prefix) => {
                self.prefix.push_str(&prefix);
                debug!(prefix = %self.prefix, "route prefix extended");
            }
        }
        self
    }

    #[must_use]
    pub fn middleware<M: RawHandler + 'static>(self, middleware: M) -> Self {
        self.using(MiddlewareOrPrefix::middleware(middleware))
    }

    #[must_use]
    pub fn prefix(self, prefix: impl Into<String>) -> Self {
        self.using(MiddlewareOrPrefix::prefix(prefix))
    }

    /// Registers `handler` for GET requests to `prefix + path`, replacing any previous one
    #[must_use]
    pub fn get<H: GetHandler + 'static>(mut self, path: &str, handler: H) -> Self {
        let key = self.route_key(path);
        let replaced = self.routes.get.insert(key.clone(), Box::new(handler));
        log_registered(RouteMethod::Get, &key, replaced);
        self
    }

    body_route!(post, post, RouteMethod::Post);
    body_route!(put, put, RouteMethod::Put);
    body_route!(patch, patch, RouteMethod::Patch);
    body_route!(delete, delete, RouteMethod::Delete);

    fn route_key(&self, path: &str) -> String {
        let mut key = String::with_capacity(self.prefix.len() + path.len());
        key.push_str(&self.prefix);
        key.push_str(path);
        key
    }

    /// The accumulated route prefix
    pub fn current_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn route_count(&self, method: RouteMethod) -> usize {
        self.routes.len(method)
    }

    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    fn run_middlewares(&self, head: &RequestHead, res: &mut ResponseWriter) -> Result<(), DispatchError> {
        for middleware in &self.middlewares {
            middleware.call(head, res).map_err(DispatchError::middleware)?;
        }
        Ok(())
    }

    /// Dispatches `req`, writing the outcome to `res`; failures are returned to the caller
    pub async fn execute_no_catch<B>(&self, req: Request<B>, res: &mut ResponseWriter) -> Result<(), DispatchError>
    where
        B: HttpBody<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();
        let head = Arc::new(RequestHead::from(parts));
        let body = BodyReader::new(body, self.config.max_body_size(), Arc::clone(self.config.default_parser()));

        if *head.method() == Method::OPTIONS {
            self.run_middlewares(&head, res)?;
            res.set_status(StatusCode::OK);
            res.end(Bytes::new())?;
            return Ok(());
        }

        let matched = RouteMethod::from_http(head.method()).and_then(|method| self.routes.find(method, head.path()));

        let Some(matched) = matched else {
            debug!(method = %head.method(), url = head.url(), "no route matched");
            return self.not_found.call(&head, res).map_err(DispatchError::not_found);
        };

        self.run_middlewares(&head, res)?;

        let response = match matched {
            Matched::Get(handler) => handler.invoke(Arc::clone(&head)).await,
            Matched::Body(handler) => handler.invoke(Arc::clone(&head), body).await,
        }
        .map_err(DispatchError::handler)?;

        let (status, headers, text) = response.into_parts();
        res.set_status(status);
        res.headers_mut().extend(headers);
        res.end(text)?;
        Ok(())
    }

    /// Dispatches `req` behind the failure boundary: any error or panic is logged once and, unless
    /// the response was already ended, answered with `500 Internal server error`
    pub async fn execute<B>(&self, req: Request<B>, res: &mut ResponseWriter)
    where
        B: HttpBody<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let url = req.uri().path_and_query().map_or_else(String::new, |pq| pq.as_str().to_owned());

        let result = match AssertUnwindSafe(self.execute_no_catch(req, res)).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(DispatchError::panic(payload)),
        };

        if let Err(e) = result {
            let written = res.end_if_open(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_BODY);
            error!(cause = %e, response_already_ended = !written, "Error in {}", url);
        }
    }

    /// Runs [`Router::execute`] against a fresh [`ResponseWriter`] and returns the http response
    pub async fn handle<B>(&self, req: Request<B>) -> Response<ResponseBody>
    where
        B: HttpBody<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let mut res = ResponseWriter::new();
        self.execute(req, &mut res).await;
        res.into_response()
    }
}

fn log_registered(method: RouteMethod, key: &str, replaced: bool) {
    if replaced {
        debug!(%method, route = key, "route replaced");
    } else {
        debug!(%method, route = key, "route registered");
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &RouteMethod::ALL.map(|method| (method, self.routes.len(method))))
            .field("prefix", &self.prefix)
            .field("middlewares", &self.middlewares.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Construction-time settings of a [`Router`]
pub struct RouterBuilder {
    not_found: Box<dyn RawHandler>,
    config: RouterConfig,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { not_found: Box::new(DefaultNotFound), config: RouterConfig::default() }
    }

    /// Replaces the not-found policy
    #[must_use]
    pub fn not_found<H: RawHandler + 'static>(mut self, handler: H) -> Self {
        self.not_found = Box::new(handler);
        self
    }

    #[must_use]
    pub fn max_body_size(mut self, max_body_size: usize) -> Self {
        self.config.set_max_body_size(max_body_size);
        self
    }

    /// Replaces the parser used by [`BodyReader::parse`]
    #[must_use]
    pub fn default_parser<P>(mut self, parser: P) -> Self
    where
        P: BodyParser<Output = Value> + 'static,
    {
        self.config.set_default_parser(parser);
        self
    }

    pub fn build(self) -> Router {
        Router {
            routes: RouteTables::new(),
            middlewares: vec![],
            prefix: String::new(),
            not_found: self.not_found,
            config: self.config,
        }
    }
}

impl fmt::Debug for RouterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterBuilder").field("config", &self.config).finish_non_exhaustive()
    }
}
