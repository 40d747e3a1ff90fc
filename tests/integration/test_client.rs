use super::helpers::{InMemoryLikeRepository, UnavailableLikeRepository, spawn_server};
use portfolio_api::client::{
    ChannelStatus, ClientLikeState, LikeClient, LikeClientConfig, LikeError,
};
use portfolio_api::domain::like::{repository::LikeRepository, value_objects::VisitorId};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

fn temp_snapshot_path() -> PathBuf {
    std::env::temp_dir().join(format!("portfolio-client-{}.json", Uuid::now_v7()))
}

fn test_config(base_url: String) -> LikeClientConfig {
    let mut config = LikeClientConfig::new(base_url);
    config.request_timeout = Duration::from_secs(2);
    config.connect_timeout = Duration::from_millis(500);
    config.reconnect_delay = Duration::from_millis(50);
    config.max_reconnect_attempts = 2;
    config.snapshot_path = Some(temp_snapshot_path());
    config
}

async fn wait_for_state(
    rx: &mut watch::Receiver<ClientLikeState>,
    what: &str,
    predicate: impl Fn(&ClientLikeState) -> bool,
) {
    let outcome = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let current = rx.borrow().clone();
            if predicate(&current) {
                return;
            }
            rx.changed().await.expect("state channel closed");
        }
    })
    .await;
    assert!(outcome.is_ok(), "timed out waiting for {what}");
}

async fn seed_likes(repo: &dyn LikeRepository, visitors: &[&str]) {
    for visitor in visitors {
        let visitor = VisitorId::new(visitor.to_string()).unwrap();
        repo.insert(&visitor).await.expect("seed insert failed");
    }
}

#[tokio::test]
async fn client_goes_live_and_syncs_the_count() {
    let repo = Arc::new(InMemoryLikeRepository::default());
    seed_likes(repo.as_ref(), &["1.2.3.4", "5.6.7.8"]).await;
    let server = spawn_server(repo).await;

    let client = LikeClient::spawn(test_config(server.base_url())).unwrap();
    let mut state = client.state();

    wait_for_state(&mut state, "live feed with synced count", |s| {
        s.channel == ChannelStatus::Live && s.count == 2 && !s.has_liked
    })
    .await;
}

#[tokio::test]
async fn like_is_optimistic_and_confirmed_by_the_server() {
    let server = spawn_server(Arc::new(InMemoryLikeRepository::default())).await;
    let client = LikeClient::spawn(test_config(server.base_url())).unwrap();
    let mut state = client.state();
    wait_for_state(&mut state, "live feed", |s| s.channel == ChannelStatus::Live).await;

    let count = client.like().await.expect("like failed");
    assert_eq!(count, 1);

    wait_for_state(&mut state, "confirmed like", |s| {
        s.count == 1 && s.has_liked && !s.is_loading && s.error.is_none()
    })
    .await;
}

#[tokio::test]
async fn second_like_is_rejected_without_a_request() {
    let server = spawn_server(Arc::new(InMemoryLikeRepository::default())).await;
    let client = LikeClient::spawn(test_config(server.base_url())).unwrap();
    let mut state = client.state();
    wait_for_state(&mut state, "live feed", |s| s.channel == ChannelStatus::Live).await;

    client.like().await.expect("like failed");
    let err = client.like().await.unwrap_err();
    assert_eq!(err, LikeError::AlreadyLiked);
    assert_eq!(client.current().count, 1);
}

#[tokio::test]
async fn failed_submission_rolls_back_to_the_exact_prior_state() {
    let server = spawn_server(Arc::new(UnavailableLikeRepository)).await;
    let client = LikeClient::spawn(test_config(server.base_url())).unwrap();
    let mut state = client.state();
    wait_for_state(&mut state, "live feed", |s| s.channel == ChannelStatus::Live).await;

    let before = client.current();
    let err = client.like().await.unwrap_err();
    assert_eq!(err, LikeError::StoreUnavailable);

    wait_for_state(&mut state, "rolled-back like", |s| {
        s.count == before.count
            && s.has_liked == before.has_liked
            && !s.is_loading
            && s.error == Some(LikeError::StoreUnavailable)
    })
    .await;
}

#[tokio::test]
async fn client_converges_over_rest_when_the_feed_never_connects() {
    let repo = Arc::new(InMemoryLikeRepository::default());
    seed_likes(repo.as_ref(), &["1.1.1.1", "2.2.2.2", "3.3.3.3"]).await;
    let server = spawn_server(repo.clone()).await;

    let mut config = test_config(server.base_url());
    // Nothing listens here; every connect attempt is refused.
    config.ws_url = Some("ws://127.0.0.1:1/ws/likes".to_string());
    let client = LikeClient::spawn(config).unwrap();
    let mut state = client.state();

    wait_for_state(&mut state, "degraded client with REST count", |s| {
        s.channel == ChannelStatus::Degraded && s.count == 3
    })
    .await;

    // Once the attempt cap is spent, counts only move via explicit calls.
    seed_likes(repo.as_ref(), &["4.4.4.4"]).await;
    let refreshed = client.refresh_count().await.expect("refresh failed");
    assert_eq!(refreshed, 4);
    assert_eq!(client.current().count, 4);
}

#[tokio::test]
async fn snapshot_backfills_when_server_and_feed_are_both_down() {
    let path = temp_snapshot_path();
    std::fs::write(&path, r#"{"count":4,"has_liked":true}"#).unwrap();

    // Nothing listens on port 1; REST and the feed both fail.
    let mut config = test_config("http://127.0.0.1:1".to_string());
    config.snapshot_path = Some(path);
    let client = LikeClient::spawn(config).unwrap();
    let mut state = client.state();

    wait_for_state(&mut state, "snapshot fallback", |s| {
        s.count == 4 && s.has_liked
    })
    .await;
}

#[tokio::test]
async fn a_like_from_one_client_reaches_the_other_over_the_feed() {
    let server = spawn_server(Arc::new(InMemoryLikeRepository::default())).await;

    let liker = LikeClient::spawn(test_config(server.base_url())).unwrap();
    let watcher = LikeClient::spawn(test_config(server.base_url())).unwrap();

    let mut liker_state = liker.state();
    let mut watcher_state = watcher.state();
    wait_for_state(&mut liker_state, "liker live", |s| {
        s.channel == ChannelStatus::Live
    })
    .await;
    wait_for_state(&mut watcher_state, "watcher live", |s| {
        s.channel == ChannelStatus::Live
    })
    .await;

    liker.like().await.expect("like failed");

    // Both clients share the loopback identity, so only the count is
    // asserted here; the broadcast never carries hasLiked.
    wait_for_state(&mut watcher_state, "broadcast count on the watcher", |s| {
        s.count == 1
    })
    .await;

    // An explicit re-check picks up the shared identity's like over REST.
    let has_liked = watcher.check_liked().await.expect("check failed");
    assert!(has_liked);
    assert!(watcher.current().has_liked);
}
