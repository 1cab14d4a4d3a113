//! In-process HTTP stub server for tests.
//!
//! Serves canned responses keyed by request target (path plus query),
//! falling back to the bare path, then to a 404.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A canned response.
#[derive(Debug, Clone)]
pub struct Stub {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Stub {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn bytes(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: br#"{"message": "error"}"#.to_vec(),
        }
    }
}

pub struct StubServer {
    base: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(routes: Vec<(&str, Stub)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let routes: Arc<HashMap<String, Stub>> = Arc::new(
            routes
                .into_iter()
                .map(|(target, stub)| (target.to_string(), stub))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        let handle = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let routes = routes.clone();
                let seen = seen.clone();
                tokio::spawn(async move {
                    let _ = serve(socket, &routes, &seen).await;
                });
            }
        });

        Self {
            base: format!("http://{}", addr),
            requests,
            handle,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Request targets received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    mut socket: TcpStream,
    routes: &HashMap<String, Stub>,
    seen: &Mutex<Vec<String>>,
) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&chunk[..n]);
        if request.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let request = String::from_utf8_lossy(&request);
    let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
    seen.lock().unwrap().push(target.clone());

    let path = target.split('?').next().unwrap_or("/");
    let stub = routes
        .get(&target)
        .or_else(|| routes.get(path))
        .cloned()
        .unwrap_or_else(|| Stub::status(404));

    let reason = match stub.status {
        200 => "OK",
        404 => "Not Found",
        _ => "Error",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        stub.status,
        reason,
        stub.content_type,
        stub.body.len()
    );

    socket.write_all(head.as_bytes()).await?;
    socket.write_all(&stub.body).await?;
    socket.shutdown().await
}

/// A URL on a port nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/image.png", addr)
}

/// Encode a small horizontal gradient as PNG.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::GrayImage::from_fn(width, height, |x, _| {
        let level = if width > 1 { x * 255 / (width - 1) } else { 0 };
        image::Luma([level as u8])
    });

    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut bytes, image::ImageOutputFormat::Png)
        .unwrap();
    bytes.into_inner()
}
