//! Server-side HTML templates backed by [`tera`].
//!
//! Templates are loaded once at startup and shared read-only by every request.
//! Files ending in `.html` are autoescaped.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::Error;
use crate::response::Response;

/// A compiled set of templates, cheap to clone into handlers.
#[derive(Clone)]
pub struct Templates {
    inner: Arc<Tera>,
}

impl Templates {
    /// Loads every file matched by `glob`, e.g. `"templates/**/*.html"`.
    pub fn from_glob(glob: &str) -> Result<Self, Error> {
        Ok(Self { inner: Arc::new(Tera::new(glob)?) })
    }

    /// Compiles `(name, source)` pairs, e.g. sources embedded with `include_str!`.
    pub fn from_raw<'a>(templates: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self, Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        Ok(Self { inner: Arc::new(tera) })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.get_template_names()
    }

    /// Renders `name` with the fields of `data` as the template context.
    /// `data` must serialize to a map (a struct or a map type).
    pub fn render(&self, name: &str, data: &impl Serialize) -> Result<String, Error> {
        let context = Context::from_serialize(data)?;
        Ok(self.inner.render(name, &context)?)
    }

    /// Renders `name` into a `200 OK` HTML response.
    pub fn page(&self, name: &str, data: &impl Serialize) -> Result<Response, Error> {
        self.render(name, data).map(Response::html)
    }
}

impl fmt::Debug for Templates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
