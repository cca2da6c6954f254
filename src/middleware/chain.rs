use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::handler::{Endpoint, Handler};
use crate::middleware::Middleware;

/// An ordered stack of middleware, optionally with the terminal handler it wraps.
///
/// Build it once at startup. [`Chain::build`] and [`Chain::wrap`] borrow the
/// chain, so the same stack can wrap several handlers; every build produces
/// an independent [`Endpoint`] with no state shared between builds beyond
/// the layers' own immutable configuration.
#[derive(Clone, Default)]
pub struct Chain {
    layers: Vec<Arc<dyn Middleware>>,
    terminal: Option<Endpoint>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer. Earlier layers wrap later ones.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    /// Sets the terminal handler, replacing any previous one.
    pub fn handler(mut self, handler: impl Handler) -> Self {
        self.terminal = Some(Endpoint::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Composes the layers around the terminal handler set with
    /// [`Chain::handler`].
    ///
    /// Fails with [`Error::MissingHandler`] when no terminal handler was set.
    pub fn build(&self) -> Result<Endpoint, Error> {
        let terminal = self.terminal.clone().ok_or(Error::MissingHandler)?;
        Ok(self.wrap(terminal))
    }

    /// Composes the layers around `terminal`.
    ///
    /// The last-declared layer is applied first so the first-declared one
    /// ends up outermost. With no layers this returns `terminal` itself.
    pub fn wrap(&self, terminal: impl Handler) -> Endpoint {
        self.layers
            .iter()
            .rev()
            .fold(Endpoint::new(terminal), |inner, layer| layer.wrap(inner))
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("layers", &self.layers.len())
            .field("has_handler", &self.terminal.is_some())
            .finish()
    }
}

impl<M: Middleware> FromIterator<M> for Chain {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Chain::layer)
    }
}

/// Wraps `terminal` in `middlewares`, first item outermost.
///
/// ```rust
/// use std::sync::Arc;
/// use weft::middleware::{compose, method_guard, request_logger, Middleware};
/// use weft::Request;
///
/// async fn hello(_req: Request) -> &'static str { "hello world" }
///
/// let layers: Vec<Arc<dyn Middleware>> = vec![
///     Arc::new(method_guard("GET")),
///     Arc::new(request_logger()),
/// ];
/// let endpoint = compose(hello, layers);
/// # let _ = endpoint;
/// ```
pub fn compose<I>(terminal: impl Handler, middlewares: I) -> Endpoint
where
    I: IntoIterator<Item = Arc<dyn Middleware>>,
{
    let chain = Chain {
        layers: middlewares.into_iter().collect(),
        terminal: None,
    };
    chain.wrap(terminal)
}
