//! Middleware layer.
//!
//! A [`Middleware`] turns one [`Endpoint`] into another. It is the place for
//! cross-cutting concerns that do not belong in any single handler: request
//! logging, method restriction, authentication-header inspection.
//!
//! Layers are stacked with a [`Chain`]. The first layer declared is the
//! outermost: it sees the request first and the response (or failure) last.
//!
//! ```rust
//! use weft::middleware::{method_guard, request_logger};
//! use weft::{Chain, Method, Request};
//!
//! async fn hello(_req: Request) -> &'static str {
//!     "hello world"
//! }
//!
//! # fn main() -> Result<(), weft::Error> {
//! let endpoint = Chain::new()
//!     .layer(request_logger())
//!     .layer(method_guard(Method::Get))
//!     .handler(hello)
//!     .build()?;
//! # let _ = endpoint;
//! # Ok(())
//! # }
//! ```
//!
//! Built-in layers:
//! - [`method_guard`]: answers `400 Bad Request` unless the method matches
//! - [`request_logger`]: one `weft::request` event per request with path and latency

mod chain;
mod guard;
mod logging;

pub use chain::{compose, Chain};
pub use guard::{method_guard, MethodGuard};
pub use logging::{request_logger, RequestLogger};

use crate::handler::Endpoint;

/// A transformation from one handler to another.
///
/// Implement it on a small struct holding whatever configuration the layer
/// needs, or pass a closure `Fn(Endpoint) -> Endpoint`:
///
/// ```rust
/// use weft::{Chain, Endpoint, Request};
///
/// let tag = |inner: Endpoint| {
///     Endpoint::new(move |req: Request| {
///         let inner = inner.clone();
///         async move {
///             let mut res = inner.call(req).await?;
///             res.append_header("x-served-by", "weft");
///             Ok::<_, weft::Error>(res)
///         }
///     })
/// };
///
/// let chain = Chain::new().layer(tag);
/// # let _ = chain;
/// ```
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, inner: Endpoint) -> Endpoint;
}

impl<F> Middleware for F
where
    F: Fn(Endpoint) -> Endpoint + Send + Sync + 'static,
{
    fn wrap(&self, inner: Endpoint) -> Endpoint {
        self(inner)
    }
}
