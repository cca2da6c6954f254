//! Contact form: GET renders the form, POST logs the submitted fields and
//! thanks the sender.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example contact
//!
//! Try:
//!   curl http://localhost:8080/
//!   curl -d 'email=a@b.c&subject=hi&message=hello' http://localhost:8080/

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;
use weft::{Config, Method, Request, Response, Router, Server, Templates};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContactDetails {
    email: String,
    subject: String,
    message: String,
}

#[derive(Serialize)]
struct FormPage {
    success: bool,
}

#[tokio::main]
async fn main() -> Result<(), weft::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let templates = Templates::from_raw([("form.html", include_str!("templates/form.html"))])?;

    let app = Router::new().route("/", move |req: Request| {
        let templates = templates.clone();
        async move { contact(&templates, req) }
    });

    Server::bind(&Config::from_env()?.addr())?.serve(app).await
}

fn contact(templates: &Templates, req: Request) -> Result<Response, weft::Error> {
    if req.method() != Method::Post.as_str() {
        return templates.page("form.html", &FormPage { success: false });
    }

    let details: ContactDetails = req.form()?;
    info!(
        email = %details.email,
        subject = %details.subject,
        message = %details.message,
        "contact form submitted",
    );

    templates.page("form.html", &FormPage { success: true })
}
