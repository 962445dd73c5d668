use micro_router::error::BodyError;
use micro_router::parser::IdentityParser;
use micro_router::{BodyReader, RequestHead, Router, Server, handler_fn, raw_fn};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::info;

async fn get_hello(req: Arc<RequestHead>) -> Result<String, Infallible> {
    Ok(format!("Hello from {}", req.url()))
}

async fn post_hello(_req: Arc<RequestHead>, body: BodyReader) -> Result<String, BodyError> {
    let name = body.parse_with(IdentityParser).await?;
    Ok(format!("Hello {name}!"))
}

#[tokio::main]
async fn main() {
    let router = Router::new()
        .using(raw_fn(|req, _res| {
            info!(method = %req.method(), url = req.url(), "incoming request");
            Ok(())
        }))
        .get("/hello", handler_fn(get_hello))
        .post("/hello", handler_fn(post_hello));

    let server = match Server::builder().router(router).address("127.0.0.1:3000").build() {
        Ok(server) => server,
        Err(e) => {
            eprintln!("failed to build server: {e}");
            return;
        }
    };

    if let Err(e) = server.start().await {
        eprintln!("server stopped: {e}");
    }
}
