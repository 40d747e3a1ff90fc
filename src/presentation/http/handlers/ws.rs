use crate::domain::like::events::LikeFeedMessage;
use crate::presentation::http::state::AppState;
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use chrono::Utc;
use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use tokio::sync::broadcast;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// One feed subscription. No per-subscriber state is kept: a reconnect is
/// indistinguishable from a fresh subscribe, and all retry logic lives on the
/// client side.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, receiver) = socket.split();

    // The subscriber must never be left without an initial value: if the
    // store cannot answer, push a zero count with the error flag set.
    let initial = match state.likes.get_count().await {
        Ok(count) => LikeFeedMessage::InitialLikes {
            count,
            error: false,
        },
        Err(err) => {
            tracing::warn!(error = %err, "initial like count unavailable, sending fail-soft default");
            LikeFeedMessage::InitialLikes {
                count: 0,
                error: true,
            }
        }
    };
    if send_event(&mut sender, &initial).await.is_err() {
        return;
    }

    let rx = state.ws_broadcaster.subscribe();
    run_feed(sender, receiver, rx).await;
}

async fn run_feed(
    mut sender: SplitSink<WebSocket, Message>,
    mut receiver: SplitStream<WebSocket>,
    mut rx: broadcast::Receiver<String>,
) {
    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Ok(payload) => {
                    if sender.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Slow subscriber: drop the missed updates, the next
                    // like-update carries the full count anyway.
                    tracing::debug!(skipped, "feed subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = receiver.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    if let Ok(LikeFeedMessage::Ping) = serde_json::from_str(text.as_str()) {
                        let ack = LikeFeedMessage::Pong {
                            status: "ok".into(),
                            time: Utc::now().timestamp_millis(),
                        };
                        if send_event(&mut sender, &ack).await.is_err() {
                            break;
                        }
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    let reason = frame
                        .map(|f| f.reason.to_string())
                        .unwrap_or_default();
                    tracing::debug!(reason, "feed subscriber disconnected");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::debug!(error = %err, "feed socket error");
                    break;
                }
                None => break,
            },
        }
    }
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &LikeFeedMessage,
) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(event).map_err(axum::Error::new)?;
    sender.send(Message::Text(payload.into())).await
}
