//! Server-side rendering of a todo list.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example todos
//!
//! Try:
//!   curl http://localhost:8080/

use serde::Serialize;
use tracing_subscriber::EnvFilter;
use weft::middleware::request_logger;
use weft::{Chain, Config, Request, Response, Router, Server, Templates};

#[derive(Serialize)]
struct Todo {
    title: &'static str,
    done: bool,
}

#[derive(Serialize)]
struct TodoPageData {
    page_title: &'static str,
    todos: Vec<Todo>,
}

#[tokio::main]
async fn main() -> Result<(), weft::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let templates = Templates::from_raw([("todos.html", include_str!("templates/todos.html"))])?;

    let list = Chain::new()
        .layer(request_logger())
        .handler(move |_req: Request| {
            let templates = templates.clone();
            async move { todo_list(&templates) }
        })
        .build()?;

    Server::bind(&Config::from_env()?.addr())?
        .serve(Router::new().route("/", list))
        .await
}

fn todo_list(templates: &Templates) -> Result<Response, weft::Error> {
    let data = TodoPageData {
        page_title: "My Todo List",
        todos: vec![
            Todo { title: "Task 1", done: true },
            Todo { title: "Task 2", done: false },
            Todo { title: "Task 3", done: true },
        ],
    };
    templates.page("todos.html", &data)
}
