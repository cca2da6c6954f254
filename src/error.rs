//! Unified error type.

/// The error type returned by weft's fallible operations.
///
/// Application-level outcomes (400, 403, 404) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures, programmer errors caught at startup, and failures
/// a handler chooses to propagate instead of answering itself.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{0}`")]
    InvalidAddress(String),

    /// A [`Chain`](crate::Chain) was built without a terminal handler.
    #[error("middleware chain has no terminal handler")]
    MissingHandler,

    #[error("template: {0}")]
    Template(#[from] tera::Error),

    #[error("form: {0}")]
    Form(#[from] serde_urlencoded::de::Error),

    #[error("session key: {0}")]
    SessionKey(String),

    #[error("session encoding: {0}")]
    SessionEncoding(#[from] serde_json::Error),

    /// A failure raised by application code inside a handler.
    #[error("handler: {0}")]
    Handler(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Wraps an application failure so it can be returned from a handler.
    ///
    /// ```rust
    /// use weft::{Error, Request, Response};
    ///
    /// async fn flaky(_req: Request) -> Result<Response, Error> {
    ///     Err(Error::handler("upstream unavailable"))
    /// }
    /// ```
    pub fn handler(err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self::Handler(err.into())
    }
}
