//! Middleware chain: method restriction plus request logging around one handler.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example chain
//!
//! Try:
//!   curl http://localhost:8080/            → hello world
//!   curl -X POST http://localhost:8080/    → 400 Bad Request
//!
//! Both requests produce one `weft::request` log line with path and latency.

use tracing_subscriber::EnvFilter;
use weft::middleware::{method_guard, request_logger};
use weft::{Chain, Config, Method, Request, Router, Server};

#[tokio::main]
async fn main() -> Result<(), weft::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let hello_chain = Chain::new()
        .layer(request_logger())
        .layer(method_guard(Method::Get))
        .handler(hello)
        .build()?;

    let app = Router::new().route("/", hello_chain);

    Server::bind(&Config::from_env()?.addr())?.serve(app).await
}

async fn hello(_req: Request) -> &'static str {
    "hello world"
}
