//! Real-time broadcast integration tests
//!
//! Serves the router on an ephemeral port and connects real WebSocket
//! clients with tokio-tungstenite.

mod common;

use assert_matches::assert_matches;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Duration};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use common::TestApp;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn serve(app: &TestApp) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn connect(app: &TestApp, addr: SocketAddr, user_id: &str) -> Client {
    let before = app.state.sessions.len().await;
    let (client, _) = connect_async(format!("ws://{}/ws?userId={}", addr, user_id)).await.unwrap();
    // the session subscribes before it is registered
    timeout(Duration::from_secs(5), async {
        while app.state.sessions.len().await <= before {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("session registered");
    client
}

async fn next_frame(client: &mut Client) -> Value {
    loop {
        let message = timeout(Duration::from_secs(5), client.next())
            .await
            .expect("frame within timeout")
            .expect("socket open")
            .unwrap();
        if let Message::Text(text) = message {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

#[tokio::test]
async fn test_http_mutation_reaches_every_session() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let alice = app.create_test_user("alice").await;

    let mut first = connect(&app, addr, "alice").await;
    let mut second = connect(&app, addr, "bob").await;

    let (status, body) = app
        .post("/boards", &alice.token, json!({ "name": "Sprint" }))
        .await;
    assert_eq!(status, axum::http::StatusCode::CREATED);
    let board_id = body["board"]["id"].clone();

    for client in [&mut first, &mut second] {
        let frame = next_frame(client).await;
        assert_eq!(frame["event"], "boardUpdated");
        assert_eq!(frame["data"]["action"], "created");
        assert_eq!(frame["data"]["board"]["id"], board_id);
    }
}

#[tokio::test]
async fn test_client_frame_is_relayed_to_sender_and_peers() {
    let app = TestApp::new();
    let addr = serve(&app).await;

    let mut sender = connect(&app, addr, "alice").await;
    let mut peer = connect(&app, addr, "").await;

    let data = json!({ "columnId": "c1", "taskId": "t1" });
    let frame = json!({ "event": "deleteTask", "data": data }).to_string();
    sender.send(Message::Text(frame.into())).await.unwrap();

    for client in [&mut sender, &mut peer] {
        let frame = next_frame(client).await;
        assert_eq!(frame["event"], "taskUpdated");
        assert_eq!(frame["data"], json!({ "columnId": "c1", "taskId": "t1", "action": "deleted" }));
    }
}

#[tokio::test]
async fn test_unknown_frames_are_dropped() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let mut client = connect(&app, addr, "alice").await;

    client.send(Message::Text("not json".into())).await.unwrap();
    client
        .send(Message::Text(json!({ "event": "dropTables", "data": {} }).to_string().into()))
        .await
        .unwrap();
    client
        .send(Message::Text(json!({ "event": "moveColumn", "data": { "columnId": "c1" } }).to_string().into()))
        .await
        .unwrap();

    // only the known event comes back
    let frame = next_frame(&mut client).await;
    assert_eq!(frame["event"], "columnUpdated");
    assert_eq!(frame["data"], json!({ "columnId": "c1" }));
}

#[tokio::test]
async fn test_disconnect_removes_session() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let mut client = connect(&app, addr, "alice").await;
    assert_eq!(app.state.sessions.len().await, 1);

    client.close(None).await.unwrap();
    let closed = timeout(Duration::from_secs(5), async {
        while !app.state.sessions.is_empty().await {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert_matches!(closed, Ok(()));

    let (status, body) = app.request(axum::http::Method::GET, "/health", None, None).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body["sessions"], 0);
}
