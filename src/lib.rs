//! # weft
//!
//! Composable request middleware on a minimal hyper server, with just enough
//! around it to build small sites: form decoding, encrypted cookie sessions
//! and HTML templates.
//!
//! ## The model
//!
//! - A **handler** is any `async fn(Request) -> impl IntoOutcome`.
//! - A **middleware** turns one handler ([`Endpoint`]) into another.
//! - A [`Chain`] stacks middleware around a terminal handler. The first layer
//!   declared is the outermost.
//! - A [`Router`] maps paths to endpoints and is handed to a [`Server`].
//!
//! Nothing is global: every router, chain and store is a value you build at
//! startup and pass where it is needed.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use weft::middleware::{method_guard, request_logger};
//! use weft::{Chain, Method, Request, Router, Server};
//!
//! async fn hello(_req: Request) -> &'static str {
//!     "hello world"
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), weft::Error> {
//!     let app = Chain::new()
//!         .layer(request_logger())
//!         .layer(method_guard(Method::Get))
//!         .handler(hello)
//!         .build()?;
//!
//!     Server::bind("127.0.0.1:8080")?
//!         .serve(Router::new().route("/", app))
//!         .await
//! }
//! ```

mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod view;

pub mod middleware;
pub mod session;

pub use config::Config;
pub use error::Error;
pub use handler::{BoxFuture, Endpoint, Handler};
pub use http::StatusCode;
pub use method::Method;
pub use middleware::{Chain, Middleware};
pub use request::Request;
pub use response::{ContentType, IntoOutcome, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use view::Templates;
