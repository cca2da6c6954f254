//! Encrypted cookie sessions.
//!
//! The whole session lives in the client's cookie: a JSON object sealed with
//! AES-256-GCM through [`cookie`]'s private jar. The server stores nothing, so
//! any instance holding the same key can read any session.
//!
//! ```rust
//! use weft::session::SessionStore;
//! use weft::{Request, Response};
//!
//! # fn main() -> Result<(), weft::Error> {
//! let store = SessionStore::generate();
//!
//! let mut session = store.load(&Request::new("GET", "/login"), "auth");
//! session.insert("authenticated", true)?;
//! let mut res = Response::text("welcome");
//! store.save(&session, &mut res)?;
//! assert!(res.header("set-cookie").is_some());
//! # Ok(())
//! # }
//! ```

use cookie::time::Duration;
use cookie::{Cookie, CookieJar, Key, SameSite};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

/// Attributes written on every session cookie.
#[derive(Clone, Debug)]
pub struct CookieOptions {
    pub path: String,
    pub max_age: Duration,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/".to_owned(),
            max_age: Duration::days(30),
            http_only: true,
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

/// Loads and saves [`Session`]s in encrypted cookies.
#[derive(Clone)]
pub struct SessionStore {
    key: Key,
    options: CookieOptions,
}

impl SessionStore {
    /// Builds a store from a 64-byte master key. The first half signs, the
    /// second half encrypts.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        let key = Key::try_from(key).map_err(|e| Error::SessionKey(e.to_string()))?;
        Ok(Self { key, options: CookieOptions::default() })
    }

    /// Builds a store with a random key. Sessions do not survive a restart.
    pub fn generate() -> Self {
        Self { key: Key::generate(), options: CookieOptions::default() }
    }

    pub fn with_options(mut self, options: CookieOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CookieOptions {
        &self.options
    }

    /// Reads the session cookie `name` from `req`.
    ///
    /// Never fails: a missing, tampered, or undecodable cookie yields an empty
    /// new session.
    pub fn load(&self, req: &Request, name: &str) -> Session {
        let mut jar = CookieJar::new();
        for header in req.header_all("cookie") {
            for cookie in Cookie::split_parse(header).filter_map(Result::ok) {
                if cookie.name() == name {
                    jar.add_original(cookie.into_owned());
                }
            }
        }

        let values = jar.private(&self.key)
            .get(name)
            .and_then(|cookie| match serde_json::from_str::<Map<String, Value>>(cookie.value()) {
                Ok(values) => Some(values),
                Err(e) => {
                    debug!(session = name, "discarding undecodable session: {e}");
                    None
                }
            });

        match values {
            Some(values) => Session { name: name.to_owned(), values, is_new: false },
            None => Session::new(name),
        }
    }

    /// Seals `session` and appends the `Set-Cookie` header to `res`.
    pub fn save(&self, session: &Session, res: &mut Response) -> Result<(), Error> {
        let value = serde_json::to_string(&session.values)?;
        let cookie = Cookie::build((session.name.clone(), value))
            .path(self.options.path.clone())
            .max_age(self.options.max_age)
            .http_only(self.options.http_only)
            .secure(self.options.secure)
            .same_site(self.options.same_site)
            .build();

        let mut jar = CookieJar::new();
        jar.private_mut(&self.key).add(cookie);
        for sealed in jar.delta() {
            res.append_header("set-cookie", &sealed.to_string());
        }
        Ok(())
    }
}

/// A named bag of JSON values carried in one cookie.
#[derive(Clone, Debug)]
pub struct Session {
    name: String,
    values: Map<String, Value>,
    is_new: bool,
}

impl Session {
    fn new(name: &str) -> Self {
        Self { name: name.to_owned(), values: Map::new(), is_new: true }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` when no valid cookie was presented.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Returns the value under `key` when present and of type `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values.get(key).cloned().and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn insert(&mut self, key: &str, value: impl Serialize) -> Result<(), Error> {
        self.values.insert(key.to_owned(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }
}
