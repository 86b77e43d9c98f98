//! Drives the WebSocket connection against a local tokio-tungstenite server.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message, WebSocketStream};

use rpsls_player::application::services::{PlayDisposition, SessionReconciler};
use rpsls_player::infrastructure::messaging::{ConnectionEvent, ConnectionState, EventBus};
use rpsls_player::infrastructure::session_link::UrlSessionLink;
use rpsls_player::infrastructure::websocket::create_connection;
use rpsls_player::session_types::{PlayerIdentity, SessionPhase};
use rpsls_protocol::{ClientMessage, Move};

type ServerSocket = WebSocketStream<TcpStream>;

/// Accept one client and hand its socket to `script`. Returns the ws:// URL.
async fn spawn_server<F, Fut>(script: F) -> String
where
    F: FnOnce(ServerSocket) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let socket = accept_async(stream).await.unwrap();
        script(socket).await;
    });
    format!("ws://{addr}")
}

async fn next_event(events: &mut mpsc::UnboundedReceiver<ConnectionEvent>) -> ConnectionEvent {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for connection event")
        .expect("connection event channel closed")
}

async fn next_text(socket: &mut ServerSocket) -> Value {
    loop {
        match socket.next().await {
            Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).unwrap(),
            Some(Ok(_)) => continue,
            other => panic!("expected a text frame, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_connection_reports_open_frames_and_close() {
    let url = spawn_server(|mut socket| async move {
        socket
            .send(Message::Text(r#"{"gameId":"g1","round":0}"#.into()))
            .await
            .unwrap();
        socket.close(None).await.unwrap();
    })
    .await;

    let mut connection = create_connection(&url);

    assert_eq!(next_event(&mut connection.events).await, ConnectionEvent::Opened);
    assert_eq!(
        next_event(&mut connection.events).await,
        ConnectionEvent::Message(r#"{"gameId":"g1","round":0}"#.into())
    );
    assert_eq!(next_event(&mut connection.events).await, ConnectionEvent::Closed);

    // The bridge gives up (no reconnect) and drops its sender.
    let rest = tokio::time::timeout(Duration::from_secs(5), connection.events.recv())
        .await
        .unwrap();
    assert_eq!(rest, None);
    assert_eq!(
        connection.state_observer.state(),
        ConnectionState::Disconnected
    );
}

#[tokio::test]
async fn test_commands_are_written_as_tagged_json() {
    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
    let url = spawn_server(move |mut socket| async move {
        let frame = next_text(&mut socket).await;
        seen_tx.send(frame).unwrap();
    })
    .await;

    let mut connection = create_connection(&url);
    assert_eq!(next_event(&mut connection.events).await, ConnectionEvent::Opened);

    connection
        .command_bus
        .send(ClientMessage::Join {
            user_id: "u2".into(),
            game_id: "g1".into(),
        })
        .unwrap();

    let frame = tokio::time::timeout(Duration::from_secs(5), seen_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        frame,
        json!({"action": "join", "userId": "u2", "gameId": "g1"})
    );
}

#[tokio::test]
async fn test_unreachable_service_surfaces_transport_error() {
    // Grab a free port, then close it again.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut connection = create_connection(&format!("ws://{addr}"));

    assert!(matches!(
        next_event(&mut connection.events).await,
        ConnectionEvent::Error(_)
    ));
    let rest = tokio::time::timeout(Duration::from_secs(5), connection.events.recv())
        .await
        .unwrap();
    assert_eq!(rest, None);
    assert_eq!(connection.state_observer.state(), ConnectionState::Failed);
}

#[tokio::test]
async fn test_disconnect_sends_close_frame() {
    let (closed_tx, mut closed_rx) = mpsc::unbounded_channel();
    let url = spawn_server(move |mut socket| async move {
        while let Some(frame) = socket.next().await {
            if matches!(frame, Ok(Message::Close(_))) {
                closed_tx.send(()).unwrap();
                break;
            }
        }
    })
    .await;

    let mut connection = create_connection(&url);
    assert_eq!(next_event(&mut connection.events).await, ConnectionEvent::Opened);

    connection.handle.disconnect();

    assert_eq!(next_event(&mut connection.events).await, ConnectionEvent::Closed);
    tokio::time::timeout(Duration::from_secs(5), closed_rx.recv())
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_originator_plays_a_round_over_the_wire() {
    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
    let url = spawn_server(move |mut socket| async move {
        let created = next_text(&mut socket).await;
        seen_tx.send(created).unwrap();
        socket
            .send(Message::Text(r#"{"gameId":"g1","round":0}"#.into()))
            .await
            .unwrap();

        let play = next_text(&mut socket).await;
        seen_tx.send(play).unwrap();
        socket
            .send(Message::Text(
                json!({
                    "gameId": "g1",
                    "round": 1,
                    "yourScore": 1,
                    "theirScore": 0,
                    "winner": true,
                    "yourPlay": "spock",
                    "theirPlay": "lizard",
                    "roundSummary": "spock poisons lizard"
                })
                .to_string(),
            ))
            .await
            .unwrap();
        socket.close(None).await.unwrap();
    })
    .await;

    let mut connection = create_connection(&url);
    let base = url::Url::parse("https://rpsls.local/").unwrap();
    let mut session = SessionReconciler::new(
        PlayerIdentity::new("u1"),
        Arc::new(connection.command_bus.clone()),
        Box::new(UrlSessionLink::from_input(None, &base).unwrap()),
        EventBus::new(),
    );

    // open -> new
    let opened = next_event(&mut connection.events).await;
    session.handle_connection_event(opened).unwrap();
    assert_eq!(session.state().phase(), SessionPhase::Created);

    // gameId assigned
    let assigned = next_event(&mut connection.events).await;
    session.handle_connection_event(assigned).unwrap();
    assert_eq!(session.state().game_id(), Some("g1"));
    assert_eq!(session.share_link(), "https://rpsls.local/#g1");

    assert_eq!(
        session.request_play(Move::Spock).unwrap(),
        PlayDisposition::Submitted { round: 0 }
    );

    let resolved = next_event(&mut connection.events).await;
    session.handle_connection_event(resolved).unwrap();

    let state = session.state();
    assert!(!state.submission_guard());
    assert_eq!(state.round_id(), 1);
    assert_eq!((state.your_score(), state.their_score()), (1, 0));
    assert_eq!(state.phase(), SessionPhase::RoundPending);

    let closed = next_event(&mut connection.events).await;
    assert_eq!(closed, ConnectionEvent::Closed);
    session.handle_connection_event(closed).unwrap();

    assert_eq!(
        seen_rx.recv().await.unwrap(),
        json!({"action": "new", "userId": "u1"})
    );
    assert_eq!(
        seen_rx.recv().await.unwrap(),
        json!({
            "action": "play",
            "userId": "u1",
            "gameId": "g1",
            "round": 0,
            "play": "spock"
        })
    );
}
