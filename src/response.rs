//! Outgoing HTTP response type and the conversion traits handlers return through.
//!
//! A handler builds a [`Response`] and returns it; that value is the response
//! sink. Status, headers and body are all set on it before it leaves the
//! handler, and middleware sees the finished value on the way out.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;

use crate::error::Error;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`ResponseBuilder::bytes`].
pub enum ContentType {
    Html,         // text/html; charset=utf-8
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Text,         // text/plain; charset=utf-8
}

impl ContentType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain; charset=utf-8",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use weft::{ContentType, Response, StatusCode};
///
/// Response::text("hello world");
/// Response::error(StatusCode::FORBIDDEN);
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/todos/4")
///     .bytes(ContentType::Json, br#"{"id":4}"#.to_vec());
/// ```
#[derive(Clone, Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// `200 OK`, `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// `200 OK`, `text/html; charset=utf-8`.
    pub fn html(body: impl Into<String>) -> Self {
        Self::builder().bytes(ContentType::Html, body.into().into_bytes())
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    /// Plain-text error reply: the status reason phrase followed by a newline.
    pub fn error(code: StatusCode) -> Self {
        Self::error_text(code, code.canonical_reason().unwrap_or("Unknown Status"))
    }

    /// Plain-text error reply with a custom message.
    pub fn error_text(code: StatusCode, message: &str) -> Self {
        Self::builder()
            .status(code)
            .header("x-content-type-options", "nosniff")
            .text(format!("{message}\n"))
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Appends a header, keeping any existing values of the same name.
    pub fn append_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status;
        for (name, value) in self.headers {
            match (
                http::header::HeaderName::from_bytes(name.as_bytes()),
                http::header::HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    res.headers_mut().append(name, value);
                }
                _ => tracing::warn!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`.
/// Terminated by a typed body method.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.bytes(ContentType::Text, body.into().into_bytes())
    }

    /// Terminate with a typed body.
    pub fn bytes(self, content_type: ContentType, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.as_str().to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }

    /// Terminate with no body (e.g. `204 No Content`, redirects).
    pub fn no_body(self) -> Response {
        Response { body: Vec::new(), headers: self.headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a bare status from a handler: `return StatusCode::NO_CONTENT`
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

// ── IntoOutcome ───────────────────────────────────────────────────────────────

/// What a handler's future resolves to: a response, or a failure that
/// propagates outward through every middleware layer.
///
/// Satisfied by anything that is [`IntoResponse`] (never fails) and by
/// `Result<T, E>` where `T: IntoResponse` and `E: Into<Error>`.
pub trait IntoOutcome {
    fn into_outcome(self) -> Result<Response, Error>;
}

impl<T: IntoResponse> IntoOutcome for T {
    fn into_outcome(self) -> Result<Response, Error> {
        Ok(self.into_response())
    }
}

impl<T: IntoResponse, E: Into<Error>> IntoOutcome for Result<T, E> {
    fn into_outcome(self) -> Result<Response, Error> {
        self.map(IntoResponse::into_response).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_is_reason_phrase_with_newline() {
        let res = Response::error(StatusCode::BAD_REQUEST);
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(res.body(), b"Bad Request\n");
        assert_eq!(res.header("Content-Type"), Some("text/plain; charset=utf-8"));
        assert_eq!(res.header("x-content-type-options"), Some("nosniff"));
    }

    #[test]
    fn builder_puts_content_type_first() {
        let res = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/todos/1")
            .bytes(ContentType::Json, b"{}".to_vec());
        assert_eq!(res.headers()[0].0, "content-type");
        assert_eq!(res.header("location"), Some("/todos/1"));
    }

    #[test]
    fn append_header_keeps_repeats() {
        let mut res = Response::status(StatusCode::OK);
        res.append_header("set-cookie", "a=1");
        res.append_header("set-cookie", "b=2");
        let inner = res.into_inner();
        assert_eq!(inner.headers().get_all("set-cookie").iter().count(), 2);
    }

    #[test]
    fn invalid_headers_are_dropped_on_conversion() {
        let res = Response::builder().header("bad header", "x").no_body();
        assert!(res.into_inner().headers().is_empty());
    }

    #[test]
    fn results_carry_failures() {
        let ok: Result<&'static str, Error> = Ok("fine");
        assert_eq!(ok.into_outcome().unwrap().body(), b"fine");

        let failed: Result<Response, Error> = Err(Error::handler("boom"));
        assert!(matches!(failed.into_outcome(), Err(Error::Handler(_))));
    }
}
