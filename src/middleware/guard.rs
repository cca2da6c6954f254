use std::sync::Arc;

use http::StatusCode;

use crate::handler::Endpoint;
use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::Response;

/// Restricts a handler to one request method.
///
/// Anything else is answered with `400 Bad Request` and a plain-text reason
/// body, without calling the wrapped handler. Note the status is 400, not the
/// more conventional 405; existing clients depend on it.
#[derive(Clone, Debug)]
pub struct MethodGuard {
    expected: Arc<str>,
}

impl MethodGuard {
    pub fn new(expected: impl AsRef<str>) -> Self {
        Self { expected: Arc::from(expected.as_ref()) }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }
}

/// Only lets requests through whose method equals `expected` exactly
/// (case-sensitive). Accepts a string or a [`Method`](crate::Method).
pub fn method_guard(expected: impl AsRef<str>) -> MethodGuard {
    MethodGuard::new(expected)
}

impl Middleware for MethodGuard {
    fn wrap(&self, inner: Endpoint) -> Endpoint {
        let expected = Arc::clone(&self.expected);
        Endpoint::new(move |req: Request| {
            let inner = inner.clone();
            let allowed = req.method() == &*expected;
            async move {
                if !allowed {
                    return Ok(Response::error(StatusCode::BAD_REQUEST));
                }
                inner.call(req).await
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::method::Method;

    fn counting(calls: Arc<AtomicUsize>) -> Endpoint {
        Endpoint::new(move |_req: Request| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { "reached" }
        })
    }

    #[tokio::test]
    async fn mismatch_short_circuits_with_400() {
        let calls = Arc::new(AtomicUsize::new(0));
        let guarded = method_guard(Method::Get).wrap(counting(Arc::clone(&calls)));

        let res = guarded.call(Request::new("POST", "/")).await.unwrap();

        // 400 rather than 405 is deliberate; see `MethodGuard`.
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(res.status_code().as_u16(), 400);
        assert_eq!(res.body(), b"Bad Request\n");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn match_calls_inner_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let guarded = method_guard("GET").wrap(counting(Arc::clone(&calls)));

        let res = guarded.call(Request::new("GET", "/")).await.unwrap();

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"reached");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn comparison_is_case_sensitive() {
        let calls = Arc::new(AtomicUsize::new(0));
        let guarded = method_guard("GET").wrap(counting(Arc::clone(&calls)));

        let res = guarded.call(Request::new("get", "/")).await.unwrap();

        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn guard_keeps_its_configuration() {
        assert_eq!(method_guard(Method::Post).expected(), "POST");
    }
}
