use std::time::{Duration, Instant};

use tracing::info;

use crate::handler::Endpoint;
use crate::middleware::Middleware;
use crate::request::Request;

/// Logs every request's path and how long the wrapped handler took.
///
/// Emits exactly one `info` event on target `weft::request` per invocation,
/// whether the inner handler returns a response, returns an error, panics,
/// or is dropped before finishing. Never touches the response.
///
/// Declare it first in a [`Chain`](crate::Chain) to time the whole stack.
/// A layer declared before it that short-circuits, such as
/// [`method_guard`](crate::middleware::method_guard), answers without it
/// ever running, so those requests are not logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLogger {
    _priv: (),
}

pub fn request_logger() -> RequestLogger {
    RequestLogger::default()
}

impl Middleware for RequestLogger {
    fn wrap(&self, inner: Endpoint) -> Endpoint {
        Endpoint::new(move |req: Request| {
            let inner = inner.clone();
            async move {
                let _timer = RequestTimer::start(req.path());
                inner.call(req).await
            }
        })
    }
}

/// Emits the request event when dropped, so early returns, `?`, unwinding
/// and cancellation all log.
struct RequestTimer {
    path: String,
    start: Instant,
}

impl RequestTimer {
    fn start(path: &str) -> Self {
        Self { path: path.to_owned(), start: Instant::now() }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        info!(target: "weft::request", path = %self.path, elapsed = ?self.elapsed());
    }
}
