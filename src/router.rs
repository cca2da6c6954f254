//! Request router and dispatch.
//!
//! An explicit value, not a process-wide registry: build one at startup, hand
//! it to [`Server::serve`](crate::Server::serve). Tests can build as many
//! independent routers as they like and drive them with [`Router::handle`].
//!
//! Patterns are matched linearly. A pattern ending in `/` matches every path
//! below it as well as itself; otherwise the path must match exactly. The
//! longest matching pattern wins, so `"/"` is a catch-all fallback.

use http::StatusCode;
use tracing::error;

use crate::handler::{Endpoint, Handler};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Each [`Router::route`] call returns `self` so registrations chain naturally.
#[derive(Clone, Debug, Default)]
pub struct Router {
    routes: Vec<(String, Endpoint)>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `pattern`. Any method reaches the handler;
    /// restrict methods with [`method_guard`](crate::middleware::method_guard).
    ///
    /// ```rust
    /// # use weft::{Request, Response, Router};
    /// # async fn secret(_: Request) -> Response { Response::text("") }
    /// # async fn login(_: Request) -> Response { Response::text("") }
    /// # async fn index(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .route("/secret", secret)
    ///     .route("/login",  login)
    ///     .route("/",       index);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `pattern` does not start with `/` or is already registered.
    /// Both are programmer errors caught on the first startup.
    pub fn route(mut self, pattern: &str, handler: impl Handler) -> Self {
        if !pattern.starts_with('/') {
            panic!("invalid route `{pattern}`: must start with `/`");
        }
        if self.routes.iter().any(|(p, _)| p == pattern) {
            panic!("invalid route `{pattern}`: already registered");
        }
        self.routes.push((pattern.to_owned(), Endpoint::new(handler)));
        self
    }

    pub(crate) fn lookup(&self, path: &str) -> Option<&Endpoint> {
        self.routes.iter()
            .filter(|(pattern, _)| matches(pattern, path))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, endpoint)| endpoint)
    }

    /// Routes one request and produces one response.
    ///
    /// The handler runs on its own tokio task. A handler `Err` or panic is
    /// logged and answered with `500 Internal Server Error`; an unmatched
    /// path gets `404`.
    pub async fn handle(&self, req: Request) -> Response {
        let Some(endpoint) = self.lookup(req.path()) else {
            return Response::error_text(StatusCode::NOT_FOUND, "404 page not found");
        };

        let method = req.method().to_owned();
        let path = req.path().to_owned();

        match tokio::spawn(endpoint.call(req)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!(%method, %path, "handler failed: {e}");
                Response::error(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Err(e) if e.is_panic() => {
                error!(%method, %path, "handler panicked");
                Response::error(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Err(e) => {
                error!(%method, %path, "handler task aborted: {e}");
                Response::error(StatusCode::SERVICE_UNAVAILABLE)
            }
        }
    }
}

fn matches(pattern: &str, path: &str) -> bool {
    if pattern.ends_with('/') {
        path.starts_with(pattern) || path == pattern.trim_end_matches('/')
    } else {
        path == pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    async fn index(_req: Request) -> &'static str { "index" }
    async fn secret(_req: Request) -> &'static str { "secret" }
    async fn assets(_req: Request) -> &'static str { "assets" }

    async fn failing(_req: Request) -> Result<Response, Error> {
        Err(Error::handler("disk full"))
    }

    async fn panicking(_req: Request) -> Response {
        panic!("unreachable state")
    }

    fn router() -> Router {
        Router::new()
            .route("/", index)
            .route("/secret", secret)
            .route("/assets/", assets)
            .route("/fail", failing)
            .route("/panic", panicking)
    }

    async fn body(router: &Router, path: &str) -> (StatusCode, String) {
        let res = router.handle(Request::new("GET", path)).await;
        (res.status_code(), String::from_utf8_lossy(res.body()).into_owned())
    }

    #[tokio::test]
    async fn exact_and_subtree_patterns() {
        let router = router();
        assert_eq!(body(&router, "/secret").await.1, "secret");
        assert_eq!(body(&router, "/assets/app.css").await.1, "assets");
        assert_eq!(body(&router, "/assets").await.1, "assets");
        assert_eq!(body(&router, "/secret/nested").await.1, "index");
        assert_eq!(body(&router, "/anything").await.1, "index");
    }

    #[tokio::test]
    async fn unmatched_path_is_404() {
        let router = Router::new().route("/only", index);
        let (status, text) = body(&router, "/other").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(text, "404 page not found\n");
    }

    #[tokio::test]
    async fn handler_errors_become_500() {
        let (status, text) = body(&router(), "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text, "Internal Server Error\n");
    }

    #[tokio::test]
    async fn handler_panics_become_500() {
        let (status, _) = body(&router(), "/panic").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn routers_are_independent() {
        let a = Router::new().route("/", index);
        let b = Router::new().route("/", secret);
        assert_eq!(body(&a, "/").await.1, "index");
        assert_eq!(body(&b, "/").await.1, "secret");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_pattern_panics() {
        let _ = Router::new().route("/", index).route("/", secret);
    }

    #[test]
    #[should_panic(expected = "must start with `/`")]
    fn relative_pattern_panics() {
        let _ = Router::new().route("secret", secret);
    }
}
