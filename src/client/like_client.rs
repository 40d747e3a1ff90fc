use super::{
    rest::LikeApi,
    snapshot::{LikeSnapshot, SnapshotStore},
    state::{ChannelStatus, ClientLikeState, LikeError, PendingLike},
};
use crate::domain::like::events::LikeFeedMessage;
use futures_util::{SinkExt, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, timeout};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};

#[derive(Debug, Clone)]
pub struct LikeClientConfig {
    /// HTTP base, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Feed endpoint; derived from `base_url` when unset.
    pub ws_url: Option<String>,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Fixed interval between reconnection attempts.
    pub reconnect_delay: Duration,
    /// After this many consecutive failed attempts the client stays in
    /// HTTP-only mode for good.
    pub max_reconnect_attempts: u32,
    pub ping_interval: Duration,
    pub snapshot_path: Option<PathBuf>,
}

impl LikeClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ws_url: None,
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            reconnect_delay: Duration::from_secs(3),
            max_reconnect_attempts: 5,
            ping_interval: Duration::from_secs(25),
            snapshot_path: SnapshotStore::default_path(),
        }
    }

    fn feed_url(&self) -> String {
        self.ws_url.clone().unwrap_or_else(|| {
            let base = self.base_url.trim_end_matches('/');
            let ws_base = if let Some(rest) = base.strip_prefix("https://") {
                format!("wss://{}", rest)
            } else if let Some(rest) = base.strip_prefix("http://") {
                format!("ws://{}", rest)
            } else {
                format!("ws://{}", base)
            };
            format!("{}/ws/likes", ws_base)
        })
    }
}

struct ClientShared {
    api: LikeApi,
    state: watch::Sender<ClientLikeState>,
    snapshot: SnapshotStore,
    /// Set once any server-derived value has landed; the local snapshot may
    /// only fill state before that, never overwrite fresher data.
    authoritative: AtomicBool,
    /// Set when a submission was confirmed in this session. A slower
    /// `hasLiked:false` that started before the submission must not clear
    /// the fresher local value.
    liked_locally: AtomicBool,
}

impl ClientShared {
    fn set_channel(&self, status: ChannelStatus) {
        self.state.send_modify(|s| s.channel = status);
    }

    fn apply_count(&self, count: u64) {
        self.authoritative.store(true, Ordering::Relaxed);
        let mut mirror = LikeSnapshot {
            count,
            has_liked: false,
        };
        self.state.send_modify(|s| {
            s.count = count;
            mirror.has_liked = s.has_liked;
        });
        self.snapshot.save(&mirror);
    }

    fn apply_has_liked(&self, has_liked: bool) {
        self.authoritative.store(true, Ordering::Relaxed);
        let mut mirror = LikeSnapshot::default();
        self.state.send_modify(|s| {
            let stale_clear = !has_liked
                && (s.is_loading || self.liked_locally.load(Ordering::Relaxed));
            if !stale_clear {
                s.has_liked = has_liked;
            }
            mirror.count = s.count;
            mirror.has_liked = s.has_liked;
        });
        self.snapshot.save(&mirror);
    }

    fn apply_snapshot_fallback(&self) {
        let Some(snap) = self.snapshot.load() else {
            return;
        };
        self.state.send_modify(|s| {
            if self.authoritative.load(Ordering::Relaxed) {
                return;
            }
            s.count = snap.count;
            s.has_liked = snap.has_liked;
        });
    }

    async fn refresh_count(&self) -> Result<u64, LikeError> {
        let count = self.api.get_count().await?;
        self.apply_count(count);
        Ok(count)
    }
}

/// Handle on the like feature. Owns the bootstrap and subscription tasks;
/// dropping the handle tears both down, so no background work outlives it.
pub struct LikeClient {
    shared: Arc<ClientShared>,
    init_task: JoinHandle<()>,
    feed_task: JoinHandle<()>,
}

impl LikeClient {
    /// Spawns the client and returns immediately. Observe progress through
    /// [`LikeClient::state`].
    pub fn spawn(config: LikeClientConfig) -> Result<Self, LikeError> {
        let api = LikeApi::new(config.base_url.clone(), config.request_timeout)?;
        let (state_tx, _) = watch::channel(ClientLikeState::default());
        let shared = Arc::new(ClientShared {
            api,
            state: state_tx,
            snapshot: SnapshotStore::new(config.snapshot_path.clone()),
            authoritative: AtomicBool::new(false),
            liked_locally: AtomicBool::new(false),
        });

        let init_task = tokio::spawn(bootstrap(shared.clone()));
        let feed_task = tokio::spawn(subscribe(shared.clone(), config));
        Ok(Self {
            shared,
            init_task,
            feed_task,
        })
    }

    pub fn state(&self) -> watch::Receiver<ClientLikeState> {
        self.shared.state.subscribe()
    }

    pub fn current(&self) -> ClientLikeState {
        self.shared.state.borrow().clone()
    }

    /// Submits a like, optimistically. The count bumps and `has_liked` flips
    /// immediately; a failed submission restores the exact pre-click values
    /// and sets `error`.
    pub async fn like(&self) -> Result<u64, LikeError> {
        let mut pending = None;
        self.shared.state.send_modify(|s| {
            if !s.has_liked && !s.is_loading {
                pending = Some(PendingLike::apply(s));
            }
        });
        let Some(pending) = pending else {
            return Err(LikeError::AlreadyLiked);
        };

        match self.shared.api.submit_like().await {
            Ok(server_count) => {
                self.shared.authoritative.store(true, Ordering::Relaxed);
                self.shared.liked_locally.store(true, Ordering::Relaxed);
                self.shared
                    .state
                    .send_modify(|s| pending.confirm(s, server_count));
                self.shared.snapshot.save(&LikeSnapshot {
                    count: server_count,
                    has_liked: true,
                });
                Ok(server_count)
            }
            Err(err) => {
                self.shared.state.send_modify(|s| pending.roll_back(s, err));
                Err(err)
            }
        }
    }

    /// Re-reads the count over REST; the only way counts move once the feed
    /// has given up.
    pub async fn refresh_count(&self) -> Result<u64, LikeError> {
        self.shared.refresh_count().await
    }

    pub async fn check_liked(&self) -> Result<bool, LikeError> {
        let has_liked = self.shared.api.check_liked().await?;
        self.shared.apply_has_liked(has_liked);
        Ok(has_liked)
    }

    pub fn shutdown(&self) {
        self.init_task.abort();
        self.feed_task.abort();
    }
}

impl Drop for LikeClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Initial REST reads, concurrent with the feed connect. `has_liked` is
/// authoritative from REST (or the snapshot when nothing answers); the count
/// may race with the feed's initial push, last arrival wins.
async fn bootstrap(shared: Arc<ClientShared>) {
    let (liked, count) = tokio::join!(shared.api.check_liked(), shared.api.get_count());

    let mut any_ok = false;
    if let Ok(has_liked) = liked {
        shared.apply_has_liked(has_liked);
        any_ok = true;
    }
    if let Ok(count) = count {
        shared.apply_count(count);
        any_ok = true;
    }
    if !any_ok {
        shared.apply_snapshot_fallback();
    }
}

async fn subscribe(shared: Arc<ClientShared>, config: LikeClientConfig) {
    let ws_url = config.feed_url();
    shared.set_channel(ChannelStatus::Subscribing);

    let mut attempts: u32 = 0;
    loop {
        match timeout(config.connect_timeout, connect_async(ws_url.as_str())).await {
            Ok(Ok((stream, _))) => {
                attempts = 0;
                shared.set_channel(ChannelStatus::Live);
                run_feed(&shared, stream, config.ping_interval).await;
                tracing::debug!("like feed disconnected");
            }
            Ok(Err(err)) => {
                tracing::debug!(error = %err, "like feed connect failed");
            }
            Err(_) => {
                tracing::debug!("like feed connect timed out");
            }
        }

        enter_degraded(&shared).await;

        attempts += 1;
        if attempts >= config.max_reconnect_attempts {
            // Out of attempts: HTTP-only from here on, counts move only via
            // explicit REST calls.
            tracing::warn!("like feed reconnect attempts exhausted, staying on HTTP only");
            return;
        }
        tokio::time::sleep(config.reconnect_delay).await;
        shared.set_channel(ChannelStatus::Subscribing);
    }
}

/// The channel is down: flip to degraded and fetch one REST count as the
/// substitute for the push we will not get.
async fn enter_degraded(shared: &ClientShared) {
    shared.set_channel(ChannelStatus::Degraded);
    if let Err(err) = shared.refresh_count().await {
        tracing::debug!(error = %err, "substitute count fetch failed");
    }
}

async fn run_feed(
    shared: &ClientShared,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    ping_interval: Duration,
) {
    let (mut sink, mut source) = stream.split();
    let mut ping = tokio::time::interval(ping_interval);
    ping.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ping.tick() => {
                let Ok(payload) = serde_json::to_string(&LikeFeedMessage::Ping) else {
                    break;
                };
                if sink.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
            inbound = source.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<LikeFeedMessage>(text.as_str()) {
                        Ok(LikeFeedMessage::InitialLikes { count, error }) => {
                            // The fail-soft zero is a placeholder, not data.
                            if !error {
                                shared.apply_count(count);
                            }
                        }
                        Ok(LikeFeedMessage::LikeUpdate { count }) => shared.apply_count(count),
                        Ok(LikeFeedMessage::Pong { .. }) | Ok(LikeFeedMessage::Ping) => {}
                        Err(err) => {
                            tracing::debug!(error = %err, "unrecognized feed payload");
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::debug!(error = %err, "feed stream error");
                    break;
                }
            },
        }
    }
}
