//! End-to-end tests: a real server on an ephemeral port, driven with reqwest.

use std::net::SocketAddr;

use serde_json::{json, Value};
use showtrack::{api, Server, ShowStore};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), showtrack::Error>>,
}

impl TestServer {
    async fn start(store: ShowStore) -> Self {
        let server = Server::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr();
        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve_with_shutdown(api::router(store), async move {
            let _ = stopped.await;
        }));
        Self { addr, stop, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn shutdown(self) {
        let _ = self.stop.send(());
        self.handle.await.unwrap().unwrap();
    }
}

async fn body(resp: reqwest::Response) -> Value {
    resp.json().await.unwrap()
}

#[tokio::test]
async fn show_lifecycle_over_http() {
    let server = TestServer::start(ShowStore::seeded()).await;
    let client = reqwest::Client::new();

    // Create
    let resp = client
        .post(server.url("/shows"))
        .form(&[("name", "Breaking Bad"), ("episodes_seen", "62")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created = body(resp).await;
    assert_eq!(created["success"], true);
    assert_eq!(created["result"]["name"], "Breaking Bad");
    assert_eq!(created["result"]["episodes_seen"], 62);
    let id = created["result"]["id"].as_u64().unwrap();

    // Fetch
    let resp = client.get(server.url(&format!("/shows/{id}"))).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body(resp).await["result"], created["result"]);

    // Partial update
    let resp = client
        .put(server.url(&format!("/shows/{id}")))
        .form(&[("name", "Better Call Saul"), ("episodes_seen", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(
        body(resp).await["result"],
        json!({"id": id, "name": "Better Call Saul", "episodes_seen": 62})
    );

    // Delete
    let resp = client.delete(server.url(&format!("/shows/{id}"))).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let deleted = body(resp).await;
    assert_eq!(deleted["message"], "Show deleted");
    assert_eq!(deleted["result"], Value::Null);

    // Gone
    let resp = client.get(server.url(&format!("/shows/{id}"))).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(body(resp).await["success"], false);

    server.shutdown().await;
}

#[tokio::test]
async fn every_response_is_an_envelope() {
    let server = TestServer::start(ShowStore::seeded()).await;
    let client = reqwest::Client::new();

    let cases = [
        (reqwest::Method::GET, "/", 200),
        (reqwest::Method::GET, "/mirror/kai", 200),
        (reqwest::Method::GET, "/shows", 200),
        (reqwest::Method::GET, "/shows/9999", 404),
        (reqwest::Method::DELETE, "/shows/-1", 404),
        (reqwest::Method::GET, "/shows/nine", 400),
        (reqwest::Method::POST, "/shows", 422),
        (reqwest::Method::GET, "/nowhere", 404),
        (reqwest::Method::PATCH, "/shows", 405),
    ];

    for (method, path, code) in cases {
        let resp = client.request(method.clone(), server.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), code, "{method} {path}");
        assert_eq!(resp.headers()["content-type"], "application/json");
        let env = body(resp).await;
        let keys: Vec<_> = env.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["code", "message", "result", "success"], "{method} {path}");
        assert_eq!(env["code"], code);
        assert_eq!(env["success"], (200..300).contains(&code));
    }

    server.shutdown().await;
}

#[tokio::test]
async fn mirror_and_hello() {
    let server = TestServer::start(ShowStore::default()).await;

    let hello = body(reqwest::get(server.url("/")).await.unwrap()).await;
    assert_eq!(hello["result"], json!({"content": "hello world!"}));

    let mirror = body(reqwest::get(server.url("/mirror/hack4impact")).await.unwrap()).await;
    assert_eq!(mirror["result"], json!({"name": "hack4impact"}));

    server.shutdown().await;
}

#[tokio::test]
async fn empty_post_lists_both_problems() {
    let server = TestServer::start(ShowStore::default()).await;

    let resp = reqwest::Client::new()
        .post(server.url("/shows"))
        .form(&[("name", ""), ("episodes_seen", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let env = body(resp).await;
    let message = env["message"].as_str().unwrap();
    assert!(message.contains("name"));
    assert!(message.contains("episodes_seen"));
    assert_eq!(env["result"], Value::Null);

    server.shutdown().await;
}
