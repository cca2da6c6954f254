//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use weft::{Request, Response, Router};

/// In-memory sink for a scoped `tracing` subscriber.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    /// Lines emitted on the `weft::request` target.
    pub fn request_lines(&self) -> Vec<String> {
        self.lines().into_iter().filter(|l| l.contains("weft::request")).collect()
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

/// Routes this thread's `tracing` events into a fresh buffer until the guard drops.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}

pub async fn send(router: &Router, req: Request) -> Response {
    router.handle(req).await
}

pub fn body_text(res: &Response) -> String {
    String::from_utf8_lossy(res.body()).into_owned()
}
