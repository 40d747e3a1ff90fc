use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Feed subscription status, client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelStatus {
    Initializing,
    Subscribing,
    Live,
    /// HTTP-only mode: the feed could not be (re)established. Entered on any
    /// channel failure, left again on a successful resubscription.
    Degraded,
}

/// Failures surfaced to the UI. All are non-fatal; the button stays usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LikeError {
    #[error("Network unavailable")]
    NetworkUnavailable,
    #[error("You have already liked this portfolio")]
    AlreadyLiked,
    #[error("Like store is unavailable")]
    StoreUnavailable,
    #[error("Something went wrong")]
    Unknown,
}

/// The UI's view of the like feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientLikeState {
    pub count: u64,
    pub has_liked: bool,
    pub is_loading: bool,
    pub error: Option<LikeError>,
    pub channel: ChannelStatus,
}

impl Default for ClientLikeState {
    fn default() -> Self {
        Self {
            count: 0,
            has_liked: false,
            is_loading: false,
            error: None,
            channel: ChannelStatus::Initializing,
        }
    }
}

/// An optimistic submission in flight.
///
/// Captures the exact pre-click values so a failed submission restores them
/// verbatim; resolution is either `confirm` or `roll_back`, never both.
#[derive(Debug, Clone)]
pub struct PendingLike {
    prior_count: u64,
    prior_has_liked: bool,
}

impl PendingLike {
    /// Applies the optimistic edit and returns the record needed to undo it.
    pub fn apply(state: &mut ClientLikeState) -> Self {
        let pending = Self {
            prior_count: state.count,
            prior_has_liked: state.has_liked,
        };
        state.is_loading = true;
        state.has_liked = true;
        state.count += 1;
        state.error = None;
        pending
    }

    /// The server's count wins over the optimistic guess; other likes may
    /// have landed while ours was in flight.
    pub fn confirm(self, state: &mut ClientLikeState, server_count: u64) {
        state.count = server_count;
        state.has_liked = true;
        state.is_loading = false;
        state.error = None;
    }

    pub fn roll_back(self, state: &mut ClientLikeState, error: LikeError) {
        state.count = self.prior_count;
        state.has_liked = self.prior_has_liked;
        state.is_loading = false;
        state.error = Some(error);
    }
}
