//! End-to-end: load a CSV from disk, serve it on an ephemeral port, and talk
//! raw HTTP/1.1 to it.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use college_cost::{CollegeDirectory, app, serve_listener};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const DATASET: &str = "\
College,Tuition (in-state),Tuition (out-of-state),Room & Board
Test U,10000,20000,5000
Half U,20000,30000,12000.5
\"Comma College, East\",1234.567,2000,0
Broken U,10000,20000,n/a
";

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
    _dataset: tempfile::NamedTempFile,
}

impl TestServer {
    async fn start() -> Self {
        let mut dataset = tempfile::NamedTempFile::new().unwrap();
        dataset.write_all(DATASET.as_bytes()).unwrap();
        let directory = Arc::new(CollegeDirectory::load(dataset.path()).unwrap());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            serve_listener(listener, app::router(directory), async {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });

        Self { addr, shutdown: Some(tx), handle, _dataset: dataset }
    }

    /// Sends one request and returns `(status, head, body)`.
    async fn send(&self, method: &str, target: &str) -> (u16, String, String) {
        let mut stream = TcpStream::connect(self.addr).await.unwrap();
        let req = format!("{method} {target} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n");
        stream.write_all(req.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        let raw = String::from_utf8(raw).unwrap();

        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        let status = head
            .split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap();
        (status, head.to_ascii_lowercase(), body.to_owned())
    }

    /// Sends one request and returns `(status, body)`.
    async fn request(&self, method: &str, target: &str) -> (u16, String) {
        let (status, _, body) = self.send(method, target).await;
        (status, body)
    }

    async fn get(&self, target: &str) -> (u16, String) {
        self.request("GET", target).await
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap();
    }
}

#[tokio::test]
async fn lookup_includes_room_and_board_by_default() {
    let server = TestServer::start().await;
    assert_eq!(
        server.get("/lookup?college=Test%20U").await,
        (200, r#"{"Cost":"15000.00"}"#.to_owned())
    );
    assert_eq!(
        server.get("/lookup?college=Test+U&room_and_board=true").await,
        (200, r#"{"Cost":"15000.00"}"#.to_owned())
    );
    server.stop().await;
}

#[tokio::test]
async fn lookup_excludes_room_and_board_when_false() {
    let server = TestServer::start().await;
    assert_eq!(
        server.get("/lookup?college=Test%20U&room_and_board=false").await,
        (200, r#"{"Cost":"10000.00"}"#.to_owned())
    );
    server.stop().await;
}

#[tokio::test]
async fn cost_has_exactly_two_decimals() {
    let server = TestServer::start().await;
    assert_eq!(
        server.get("/lookup?college=Half%20U").await,
        (200, r#"{"Cost":"32000.50"}"#.to_owned())
    );
    assert_eq!(
        server.get("/lookup?college=Comma%20College%2C%20East").await,
        (200, r#"{"Cost":"1234.57"}"#.to_owned())
    );
    server.stop().await;
}

#[tokio::test]
async fn missing_college_is_400() {
    let server = TestServer::start().await;
    let expected = (400, r#"{"message":"Error: College name is required"}"#.to_owned());
    assert_eq!(server.get("/lookup").await, expected);
    assert_eq!(server.get("/lookup?college=").await, expected);
    server.stop().await;
}

#[tokio::test]
async fn unknown_college_is_400_not_404() {
    let server = TestServer::start().await;
    let expected = (400, r#"{"message":"Error: College not found"}"#.to_owned());
    assert_eq!(server.get("/lookup?college=Nonexistent").await, expected);
    assert_eq!(server.get("/lookup?college=test%20u").await, expected);
    server.stop().await;
}

#[tokio::test]
async fn malformed_record_is_500() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/lookup?college=Broken%20U").await;
    assert_eq!(status, 500);
    assert!(body.contains("invalid"));
    assert!(!body.contains("NaN"));
    server.stop().await;
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let server = TestServer::start().await;
    let first = server.get("/lookup?college=Half%20U&room_and_board=false").await;
    for _ in 0..5 {
        assert_eq!(server.get("/lookup?college=Half%20U&room_and_board=false").await, first);
    }
    server.stop().await;
}

#[tokio::test]
async fn other_routes_and_methods() {
    let server = TestServer::start().await;
    assert_eq!(server.get("/healthz").await, (200, "ok".to_owned()));
    assert_eq!(
        server.get("/readyz").await,
        (200, r#"{"status":"ready","colleges":4}"#.to_owned())
    );
    assert_eq!(server.get("/nope").await.0, 404);
    assert_eq!(server.request("PURGE", "/nope").await.0, 404);
    server.stop().await;
}

#[tokio::test]
async fn wrong_method_on_lookup_is_405_with_allow() {
    let server = TestServer::start().await;
    for method in ["POST", "HEAD", "PURGE"] {
        let (status, head, body) = server.send(method, "/lookup?college=Test%20U").await;
        assert_eq!(status, 405, "{method}");
        assert!(head.lines().any(|l| l.trim() == "allow: get"), "{method}: {head}");
        assert!(body.is_empty());
    }
    server.stop().await;
}
