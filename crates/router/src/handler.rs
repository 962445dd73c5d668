use crate::body::BodyReader;
use crate::error::BoxError;
use crate::request::RequestHead;
use crate::responder::{ApiResponse, Responder};
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

pub type HandlerResult = Result<ApiResponse, BoxError>;

/// Handler for GET routes, it never sees the request body
#[async_trait]
pub trait GetHandler: Send + Sync {
    async fn invoke(&self, req: Arc<RequestHead>) -> HandlerResult;
}

/// Handler for POST, PUT, PATCH and DELETE routes, it receives the body reader of the request
#[async_trait]
pub trait BodyHandler: Send + Sync {
    async fn invoke(&self, req: Arc<RequestHead>, body: BodyReader) -> HandlerResult;
}

/// an async Fn holder usable as either kind of handler, depending on its arity
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F> {
    fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").field("f", &std::any::type_name::<F>()).finish()
    }
}

/// Wraps an async fn taking `Arc<RequestHead>` (GET) or `(Arc<RequestHead>, BodyReader)`
/// (mutation methods) and returning `Result<impl Responder, impl Into<BoxError>>`
pub fn handler_fn<F>(f: F) -> FnHandler<F> {
    FnHandler::new(f)
}

#[async_trait]
impl<F, Fut, R, E> GetHandler for FnHandler<F>
where
    F: Fn(Arc<RequestHead>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Responder + Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    async fn invoke(&self, req: Arc<RequestHead>) -> HandlerResult {
        let responder = (self.f)(req).await.map_err(Into::<BoxError>::into)?;
        Ok(responder.into_api_response())
    }
}

#[async_trait]
impl<F, Fut, R, E> BodyHandler for FnHandler<F>
where
    F: Fn(Arc<RequestHead>, BodyReader) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Responder + Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    async fn invoke(&self, req: Arc<RequestHead>, body: BodyReader) -> HandlerResult {
        let responder = (self.f)(req, body).await.map_err(Into::<BoxError>::into)?;
        Ok(responder.into_api_response())
    }
}

#[cfg(test)]
mod test {
    use super::{BodyHandler, GetHandler, handler_fn};
    use crate::body::BodyReader;
    use crate::error::{BodyError, BoxError};
    use crate::parser::{IdentityParser, JsonParser};
    use crate::request::RequestHead;
    use crate::router::Router;
    use bytes::Bytes;
    use http::{Method, Request, StatusCode};
    use http_body_util::{BodyExt, Full};
    use serde_json::Value;
    use std::convert::Infallible;
    use std::sync::Arc;

    fn assert_is_get_handler<T: GetHandler>(_handler: &T) {
        // no op
    }

    fn assert_is_body_handler<T: BodyHandler>(_handler: &T) {
        // no op
    }

    fn head(method: Method, uri: &str) -> Arc<RequestHead> {
        let parts = Request::builder().method(method).uri(uri).body(()).unwrap().into_parts().0;
        Arc::new(parts.into())
    }

    async fn get_hello(req: Arc<RequestHead>) -> Result<String, Infallible> {
        Ok(format!("Hello from {}", req.url()))
    }

    async fn post_hello(_req: Arc<RequestHead>, body: BodyReader) -> Result<String, BodyError> {
        let name = body.parse_with(IdentityParser).await?;
        Ok(format!("Hello {name}!"))
    }

    async fn post_text(_req: Arc<RequestHead>, body: BodyReader) -> Result<String, BodyError> {
        body.text().await
    }

    async fn post_value(_req: Arc<RequestHead>, body: BodyReader) -> Result<Value, BodyError> {
        body.parse().await
    }

    async fn post_typed(_req: Arc<RequestHead>, body: BodyReader) -> Result<String, BodyError> {
        let names: Vec<String> = body.json().await?;
        Ok(names.join(","))
    }

    async fn failing(_req: Arc<RequestHead>) -> Result<&'static str, BoxError> {
        Err("boom".into())
    }

    #[test]
    fn assert_fn_is_handler() {
        assert_is_get_handler(&handler_fn(get_hello));
        assert_is_body_handler(&handler_fn(post_hello));
        assert_is_body_handler(&handler_fn(post_text));
        assert_is_body_handler(&handler_fn(post_value));
        assert_is_body_handler(&handler_fn(post_typed));
    }

    #[tokio::test]
    async fn test_body_reading_handlers_on_router() {
        let router = Router::new()
            .post("/text", handler_fn(post_text))
            .put("/value", handler_fn(post_value))
            .patch("/typed", handler_fn(post_typed));

        let body = Full::new(Bytes::from_static(br#"["a","b"]"#));
        let req = Request::builder().method(Method::PATCH).uri("/typed").body(body).unwrap();
        let response = tokio::spawn(async move { router.handle(req).await }).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.into_body().collect().await.unwrap().to_bytes().as_ref(), b"a,b");
    }

    #[tokio::test]
    async fn test_get_handler_invoke() {
        let response = GetHandler::invoke(&handler_fn(get_hello), head(Method::GET, "/hello?x=1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text(), "Hello from /hello?x=1");
    }

    #[tokio::test]
    async fn test_body_handler_invoke() {
        let body = BodyReader::new(Full::new(Bytes::from_static(b"Alice")), 1024, Arc::new(JsonParser));
        let response =
            BodyHandler::invoke(&handler_fn(post_hello), head(Method::POST, "/hello"), body).await.unwrap();
        assert_eq!(response.text(), "Hello Alice!");
    }

    #[tokio::test]
    async fn test_handler_error_is_propagated() {
        let result = GetHandler::invoke(&handler_fn(failing), head(Method::GET, "/")).await;
        assert_eq!(result.unwrap_err().to_string(), "boom");
    }
}
