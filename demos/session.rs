//! Cookie session authentication: log in, read the secret, log out.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example session
//!
//! Try:
//!   curl -i http://localhost:8080/secret                   → 403
//!   curl -c jar http://localhost:8080/login
//!   curl -b jar http://localhost:8080/secret               → secret message
//!   curl -b jar -c jar http://localhost:8080/logout
//!   curl -b jar http://localhost:8080/secret               → 403

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use weft::session::SessionStore;
use weft::{Config, Request, Response, Router, Server, StatusCode};

const SESSION: &str = "cookie-name";

#[tokio::main]
async fn main() -> Result<(), weft::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Random per process: every restart logs everyone out.
    let store = Arc::new(SessionStore::generate());

    let app = Router::new()
        .route("/secret", with_store(Arc::clone(&store), secret))
        .route("/login", with_store(Arc::clone(&store), login))
        .route("/logout", with_store(store, logout));

    Server::bind(&Config::from_env()?.addr())?.serve(app).await
}

/// Adapts `f(&store, req)` into a request handler.
fn with_store(
    store: Arc<SessionStore>,
    f: fn(&SessionStore, Request) -> Result<Response, weft::Error>,
) -> impl weft::Handler {
    move |req: Request| {
        let store = Arc::clone(&store);
        async move { f(&store, req) }
    }
}

fn secret(store: &SessionStore, req: Request) -> Result<Response, weft::Error> {
    let session = store.load(&req, SESSION);
    if session.get::<bool>("authenticated") != Some(true) {
        return Ok(Response::error_text(StatusCode::FORBIDDEN, "Forbidden, login first!"));
    }
    Ok(Response::text("This is the super secret message, you are fooled\n"))
}

fn login(store: &SessionStore, req: Request) -> Result<Response, weft::Error> {
    let mut session = store.load(&req, SESSION);
    // A real application authenticates the user here.
    session.insert("authenticated", true)?;

    let mut res = Response::text("logged in\n");
    store.save(&session, &mut res)?;
    info!("user logged in");
    Ok(res)
}

fn logout(store: &SessionStore, req: Request) -> Result<Response, weft::Error> {
    let mut session = store.load(&req, SESSION);
    session.insert("authenticated", false)?;

    let mut res = Response::text("logged out\n");
    store.save(&session, &mut res)?;
    info!("user logged out");
    Ok(res)
}
