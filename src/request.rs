//! Incoming HTTP request type.

use std::fmt;

use http::StatusCode;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::method::Method;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Largest request body the server buffers, in bytes.
pub(crate) const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a request body could not be buffered.
#[derive(Debug)]
pub(crate) enum BodyError {
    TooLarge,
    Read(BoxError),
}

impl BodyError {
    fn from_boxed(e: BoxError) -> Self {
        if e.is::<LengthLimitError>() { Self::TooLarge } else { Self::Read(e) }
    }

    /// Status the client is answered with.
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Read(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge => write!(f, "body exceeds {MAX_BODY_BYTES} bytes"),
            Self::Read(e) => write!(f, "failed to read body: {e}"),
        }
    }
}

/// An incoming HTTP request with its body fully buffered.
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
}

impl Request {
    /// Builds a request by hand. `target` is a path with an optional query
    /// string, e.g. `"/search?q=weft"`.
    ///
    /// The server builds requests from the wire; this constructor exists for
    /// tests and for invoking a handler in-process.
    ///
    /// ```rust
    /// use weft::{Method, Request};
    ///
    /// let req = Request::new(Method::Post, "/login?next=/secret")
    ///     .with_header("content-type", "application/x-www-form-urlencoded")
    ///     .with_body("user=alice");
    /// assert_eq!(req.path(), "/login");
    /// assert_eq!(req.query(), Some("next=/secret"));
    /// ```
    pub fn new(method: impl AsRef<str>, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_owned())),
            None => (target, None),
        };
        Self {
            method: method.as_ref().to_owned(),
            path: path.to_owned(),
            query,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub(crate) async fn from_hyper<B>(req: hyper::Request<B>) -> Result<Self, BodyError>
    where
        B: hyper::body::Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();
        let body = Limited::new(body, MAX_BODY_BYTES)
            .collect()
            .await
            .map_err(BodyError::from_boxed)?
            .to_bytes()
            .to_vec();

        // Non-visible-ASCII header values are dropped rather than lossily decoded.
        let headers = parts.headers.iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_owned(), v.to_owned())))
            .collect();

        Ok(Self {
            method: parts.method.as_str().to_owned(),
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            headers,
            body,
        })
    }

    /// The raw method token, exactly as sent by the client.
    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterates every value of a repeated header, e.g. `cookie`.
    pub fn header_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers.iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Deserializes submitted form fields into `T`.
    ///
    /// A `POST`, `PUT` or `PATCH` with an `application/x-www-form-urlencoded`
    /// body is read from the body; any other request is read from the query
    /// string.
    pub fn form<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if self.has_form_body() {
            Ok(serde_urlencoded::from_bytes(&self.body)?)
        } else {
            Ok(serde_urlencoded::from_str(self.query().unwrap_or(""))?)
        }
    }

    /// First value submitted for `name`. Body fields take precedence over the
    /// query string. Malformed encodings are treated as absent.
    pub fn form_value(&self, name: &str) -> Option<String> {
        let body: Vec<(String, String)> = if self.has_form_body() {
            serde_urlencoded::from_bytes(&self.body).unwrap_or_default()
        } else {
            Vec::new()
        };
        let query: Vec<(String, String)> =
            serde_urlencoded::from_str(self.query().unwrap_or("")).unwrap_or_default();

        body.into_iter()
            .chain(query)
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    fn has_form_body(&self) -> bool {
        let carries_form = self.method.parse::<Method>().is_ok_and(Method::carries_form);
        let is_urlencoded = self.header("content-type")
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED));
        carries_form && is_urlencoded
    }
}
