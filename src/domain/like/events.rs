use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Wire messages on the like feed socket, shared by server and client.
///
/// `initial-likes` is pushed once per subscription; `like-update` fans out to
/// every subscriber after a successful submission and carries the full count,
/// never a delta. `ping`/`pong` exist only to defeat idle-connection timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[ts(export)]
pub enum LikeFeedMessage {
    InitialLikes {
        count: u64,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        error: bool,
    },
    LikeUpdate {
        count: u64,
    },
    Ping,
    Pong {
        status: String,
        time: i64,
    },
}
