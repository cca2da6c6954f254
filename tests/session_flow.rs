mod common;

use std::sync::Arc;

use common::{body_text, send};
use weft::session::SessionStore;
use weft::{Error, Handler, Request, Response, Router, StatusCode};

const SESSION: &str = "cookie-name";

fn secret(store: &SessionStore, req: Request) -> Result<Response, Error> {
    let session = store.load(&req, SESSION);
    if session.get::<bool>("authenticated") != Some(true) {
        return Ok(Response::error_text(StatusCode::FORBIDDEN, "Forbidden, login first!"));
    }
    Ok(Response::text("This is the super secret message"))
}

fn set_authenticated(value: bool) -> impl Fn(&SessionStore, Request) -> Result<Response, Error> + Send + Sync + 'static {
    move |store, req| {
        let mut session = store.load(&req, SESSION);
        session.insert("authenticated", value)?;
        let mut res = Response::status(StatusCode::OK);
        store.save(&session, &mut res)?;
        Ok(res)
    }
}

fn with_store<F>(store: Arc<SessionStore>, f: F) -> impl Handler
where
    F: Fn(&SessionStore, Request) -> Result<Response, Error> + Send + Sync + 'static,
{
    let f = Arc::new(f);
    move |req: Request| {
        let store = Arc::clone(&store);
        let f = Arc::clone(&f);
        async move { f(&*store, req) }
    }
}

fn app(store: &Arc<SessionStore>) -> Router {
    Router::new()
        .route("/secret", with_store(Arc::clone(store), secret))
        .route("/login", with_store(Arc::clone(store), set_authenticated(true)))
        .route("/logout", with_store(Arc::clone(store), set_authenticated(false)))
}

/// `name=value` from the response's `Set-Cookie`.
fn cookie_pair(res: &Response) -> String {
    let set_cookie = res.header("set-cookie").expect("set-cookie header");
    set_cookie.split(';').next().unwrap().to_owned()
}

fn get(path: &str, cookie: Option<&str>) -> Request {
    let req = Request::new("GET", path);
    match cookie {
        Some(cookie) => req.with_header("cookie", cookie),
        None => req,
    }
}

#[tokio::test]
async fn secret_requires_login() {
    let store = Arc::new(SessionStore::generate());
    let res = send(&app(&store), get("/secret", None)).await;

    assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(&res), "Forbidden, login first!\n");
}

#[tokio::test]
async fn login_then_logout() {
    let store = Arc::new(SessionStore::generate());
    let app = app(&store);

    let login = send(&app, get("/login", None)).await;
    let cookie = cookie_pair(&login);

    let res = send(&app, get("/secret", Some(&cookie))).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(body_text(&res), "This is the super secret message");

    let logout = send(&app, get("/logout", Some(&cookie))).await;
    let cookie = cookie_pair(&logout);

    let res = send(&app, get("/secret", Some(&cookie))).await;
    assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn cookie_from_another_store_is_refused() {
    let login = send(&app(&Arc::new(SessionStore::generate())), get("/login", None)).await;
    let cookie = cookie_pair(&login);

    let other = app(&Arc::new(SessionStore::generate()));
    let res = send(&other, get("/secret", Some(&cookie))).await;
    assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
}
