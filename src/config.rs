//! Server configuration from the environment.
//!
//! | Variable    | Default     |
//! |-------------|-------------|
//! | `WEFT_HOST` | `127.0.0.1` |
//! | `WEFT_PORT` | `8080`      |

use std::env;

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_owned(), port: 8080 }
    }
}

impl Config {
    /// Reads `WEFT_HOST` and `WEFT_PORT`, falling back to the defaults.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let defaults = Self::default();
        let host = lookup("WEFT_HOST").unwrap_or(defaults.host);
        let port = match lookup("WEFT_PORT") {
            Some(raw) => raw.parse().map_err(|_| Error::InvalidAddress(format!("port `{raw}`")))?,
            None => defaults.port,
        };
        Ok(Self { host, port })
    }

    /// `host:port`, ready for [`Server::bind`](crate::Server::bind).
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
