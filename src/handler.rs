//! Handler trait, type erasure, and the [`Endpoint`] every chain produces.
//!
//! # How async handlers are stored
//!
//! A middleware layer must accept whatever it wraps (a user `async fn`, or
//! another layer's output) through one type. Handlers are therefore erased
//! behind a trait object and shared through an `Arc`:
//!
//! ```text
//! async fn hello(req: Request) -> &'static str { … }   ← user writes this
//!        ↓ Endpoint::new(hello)
//! hello.into_boxed_handler()                          ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(hello))                          ← stored as BoxedHandler
//!        ↓
//! endpoint.call(req) at request time                  ← one vtable dispatch
//!        ↓
//! Box::pin(async { hello(req).await.into_outcome() }) ← BoxFuture
//! ```
//!
//! Wrapping an endpoint in a layer adds one `Arc` and one boxed future per
//! request. A composed chain is still a single [`Endpoint`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Error;
use crate::request::Request;
use crate::response::{IntoOutcome, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future resolving to a response or a failure.
///
/// `Send + 'static` lets tokio move the future across threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Result<Response, Error>> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` because it appears in the public `Handler` trait.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid request handler.
///
/// Satisfied automatically by any `async fn` (or closure returning a future)
/// with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoOutcome
/// ```
///
/// and by [`Endpoint`], so a composed chain can be wrapped again or
/// registered on a [`Router`](crate::Router) like any plain handler.
///
/// The trait is sealed; only the impls in this module satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Bridges a concrete handler `F` to [`ErasedHandler`].
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_outcome() })
    }
}

// ── Endpoint ──────────────────────────────────────────────────────────────────

/// A type-erased handler, cheap to clone and safe to share across tasks.
///
/// Middleware receives the handler it wraps as an `Endpoint` and returns a new
/// one; [`Chain`](crate::Chain) hands back the outermost.
#[derive(Clone)]
pub struct Endpoint(BoxedHandler);

impl Endpoint {
    /// Erases `handler`. An `Endpoint` passed in is returned as-is, not
    /// double-wrapped.
    pub fn new(handler: impl Handler) -> Self {
        Self(handler.into_boxed_handler())
    }

    /// Invokes the handler. The future owns everything it needs.
    pub fn call(&self, req: Request) -> BoxFuture {
        self.0.call(req)
    }
}

impl private::Sealed for Endpoint {}

impl Handler for Endpoint {
    fn into_boxed_handler(self) -> BoxedHandler {
        self.0
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Endpoint")
    }
}
