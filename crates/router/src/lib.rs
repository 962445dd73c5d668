//! An async HTTP request router with exact-path route tables, ordered middleware, path prefixes
//! and a consume-once request body.
//!
//! See [`Router`] for registration and dispatch, and [`Server`] for serving a router over HTTP/1.

mod body;
mod config;
mod handler;
mod method;
mod middleware;
mod request;
mod responder;
mod response;
mod router;
mod server;

pub mod error;
pub mod parser;

pub use body::BodyReader;
pub use body::ResponseBody;
pub use config::{DEFAULT_MAX_BODY_SIZE, RouterConfig};
pub use handler::{BodyHandler, FnHandler, GetHandler, HandlerResult, handler_fn};
pub use method::RouteMethod;
pub use middleware::{DefaultNotFound, FnRaw, MiddlewareOrPrefix, RawHandler, raw_fn};
pub use request::RequestHead;
pub use responder::{ApiResponse, Responder};
pub use response::ResponseWriter;
pub use router::{INTERNAL_SERVER_ERROR_BODY, Router, RouterBuilder};
pub use server::{Server, ServerBuildError, ServerBuilder};
