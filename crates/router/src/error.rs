use std::any::Any;
use std::error::Error;
use thiserror::Error;

/// Boxed error used at the handler and middleware seams
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Errors raised while draining or parsing a request body
#[derive(Error, Debug)]
pub enum BodyError {
    #[error("body has been consumed")]
    Consumed,

    #[error("body size exceed the limit {limit}")]
    TooLarge { limit: usize },

    #[error("request body is not utf8")]
    NotUtf8,

    #[error("invalid json body: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("read body error: {source}")]
    Read { source: BoxError },
}

impl BodyError {
    pub fn too_large(limit: usize) -> Self {
        Self::TooLarge { limit }
    }

    pub fn read<E: Into<BoxError>>(e: E) -> Self {
        Self::Read { source: e.into() }
    }
}

/// Errors raised when writing the outgoing response
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResponseError {
    #[error("response has already been ended")]
    AlreadyEnded,
}

/// Everything the uncaught dispatch path can fail with
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("middleware error: {source}")]
    Middleware { source: BoxError },

    #[error("handler error: {source}")]
    Handler { source: BoxError },

    #[error("not found handler error: {source}")]
    NotFound { source: BoxError },

    #[error("panicked: {message}")]
    Panic { message: String },

    #[error("response error: {source}")]
    Response {
        #[from]
        source: ResponseError,
    },
}

impl DispatchError {
    pub fn middleware(e: BoxError) -> Self {
        Self::Middleware { source: e }
    }

    pub fn handler(e: BoxError) -> Self {
        Self::Handler { source: e }
    }

    pub fn not_found(e: BoxError) -> Self {
        Self::NotFound { source: e }
    }

    /// Wraps the payload of a panic caught while dispatching
    pub fn panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_owned(),
                Err(_) => "unknown panic payload".to_owned(),
            },
        };
        Self::Panic { message }
    }
}
