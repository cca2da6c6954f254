use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use weft::middleware::{method_guard, request_logger};
use weft::{Chain, Request, Router, Server};

async fn hello(_req: Request) -> &'static str {
    "hello world"
}

/// Sends one HTTP/1.1 request with `Connection: close` and returns the raw reply.
async fn exchange(addr: std::net::SocketAddr, method: &str, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("{method} {path} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\ncontent-length: 0\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();
    String::from_utf8(reply).unwrap()
}

#[tokio::test]
async fn serves_chain_over_tcp_and_shuts_down() {
    let app = Chain::new()
        .layer(request_logger())
        .layer(method_guard("GET"))
        .handler(hello)
        .build()
        .unwrap();
    let router = Router::new().route("/hello", app);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(Server::serve_listener(listener, router, async move {
        let _ = stopped.await;
    }));

    let ok = exchange(addr, "GET", "/hello").await;
    assert!(ok.starts_with("HTTP/1.1 200 OK\r\n"), "{ok}");
    assert!(ok.ends_with("\r\n\r\nhello world"), "{ok}");

    let rejected = exchange(addr, "POST", "/hello").await;
    assert!(rejected.starts_with("HTTP/1.1 400 Bad Request\r\n"), "{rejected}");
    assert!(rejected.ends_with("Bad Request\n"), "{rejected}");

    let missing = exchange(addr, "GET", "/nowhere").await;
    assert!(missing.starts_with("HTTP/1.1 404 Not Found\r\n"), "{missing}");
    assert!(missing.ends_with("\r\n\r\n404 page not found\n"), "{missing}");

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[test]
fn bind_rejects_malformed_addresses() {
    assert!(Server::bind("localhost").is_err());
    assert_eq!(Server::bind("127.0.0.1:3000").unwrap().addr().port(), 3000);
}
