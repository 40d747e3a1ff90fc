use super::helpers::{InMemoryLikeRepository, UnavailableLikeRepository, spawn_server};
use futures_util::{SinkExt, StreamExt};
use portfolio_api::domain::like::{
    events::LikeFeedMessage, repository::LikeRepository, value_objects::VisitorId,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type FeedStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(ws_url: &str) -> FeedStream {
    let (stream, _) = connect_async(ws_url).await.expect("feed connect failed");
    stream
}

async fn next_event(stream: &mut FeedStream) -> LikeFeedMessage {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("timed out waiting for a feed event")
            .expect("feed closed")
            .expect("feed errored");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("invalid feed payload");
        }
    }
}

async fn assert_no_event(stream: &mut FeedStream) {
    let outcome = tokio::time::timeout(Duration::from_millis(300), stream.next()).await;
    assert!(outcome.is_err(), "expected no further feed event");
}

async fn seed_like(repo: &dyn LikeRepository, visitor: &str) {
    let visitor = VisitorId::new(visitor.to_string()).unwrap();
    repo.insert(&visitor).await.expect("seed insert failed");
}

#[tokio::test]
async fn subscriber_receives_the_current_count_on_connect() {
    let repo = Arc::new(InMemoryLikeRepository::default());
    seed_like(repo.as_ref(), "1.2.3.4").await;
    let server = spawn_server(repo).await;

    let mut feed = connect(&server.ws_url()).await;
    assert_eq!(
        next_event(&mut feed).await,
        LikeFeedMessage::InitialLikes {
            count: 1,
            error: false
        }
    );
}

#[tokio::test]
async fn initial_push_fails_soft_when_the_store_is_down() {
    let server = spawn_server(Arc::new(UnavailableLikeRepository)).await;

    let mut feed = connect(&server.ws_url()).await;
    assert_eq!(
        next_event(&mut feed).await,
        LikeFeedMessage::InitialLikes {
            count: 0,
            error: true
        }
    );
}

#[tokio::test]
async fn one_like_fans_out_exactly_once_to_every_subscriber() {
    let server = spawn_server(Arc::new(InMemoryLikeRepository::default())).await;

    let mut feeds = Vec::new();
    for _ in 0..3 {
        let mut feed = connect(&server.ws_url()).await;
        assert_eq!(
            next_event(&mut feed).await,
            LikeFeedMessage::InitialLikes {
                count: 0,
                error: false
            }
        );
        feeds.push(feed);
    }

    let res = reqwest::Client::new()
        .post(format!("{}/api/likes", server.base_url()))
        .header("x-forwarded-for", "9.9.9.9")
        .send()
        .await
        .expect("submit failed");
    assert!(res.status().is_success());

    for feed in feeds.iter_mut() {
        assert_eq!(
            next_event(feed).await,
            LikeFeedMessage::LikeUpdate { count: 1 }
        );
        assert_no_event(feed).await;
    }
}

#[tokio::test]
async fn the_submitter_also_receives_the_broadcast() {
    let server = spawn_server(Arc::new(InMemoryLikeRepository::default())).await;

    let mut feed = connect(&server.ws_url()).await;
    next_event(&mut feed).await;

    reqwest::Client::new()
        .post(format!("{}/api/likes", server.base_url()))
        .header("x-forwarded-for", "9.9.9.9")
        .send()
        .await
        .expect("submit failed");

    assert_eq!(
        next_event(&mut feed).await,
        LikeFeedMessage::LikeUpdate { count: 1 }
    );
}

#[tokio::test]
async fn ping_is_acknowledged_with_a_server_timestamp() {
    let server = spawn_server(Arc::new(InMemoryLikeRepository::default())).await;

    let mut feed = connect(&server.ws_url()).await;
    next_event(&mut feed).await;

    feed.send(Message::Text(r#"{"type":"ping"}"#.to_string().into()))
        .await
        .expect("ping send failed");

    match next_event(&mut feed).await {
        LikeFeedMessage::Pong { status, time } => {
            assert_eq!(status, "ok");
            assert!(time > 0, "expected an epoch-millisecond timestamp");
        }
        other => panic!("expected pong, got {:?}", other),
    }
}
