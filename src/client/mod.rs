//! Embeddable like-counter client.
//!
//! Mirrors what the portfolio frontend keeps in component state: the count,
//! whether this visitor already liked, loading/error flags, and the feed
//! subscription status. REST is the authoritative path; the WebSocket feed is
//! a low-latency hint layered on top, with capped client-driven reconnection
//! and a local snapshot as the last-resort offline value.

pub mod rest;
pub mod snapshot;
pub mod state;

mod like_client;

pub use like_client::{LikeClient, LikeClientConfig};
pub use state::{ChannelStatus, ClientLikeState, LikeError};
