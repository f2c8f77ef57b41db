pub mod accumulator;
pub mod auth;
pub mod filter;
pub mod normalize;
pub mod state;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use accumulator::{FeedAccumulator, LoadOutcome};
pub use auth::StaticSession;
pub use filter::{filter_hazardous, FeedSummary};
pub use normalize::{normalize_feed, normalize_neo, NormalizeError};
pub use state::{FeedState, LoadPhase, ViewState};
pub use traits::{FeedSource, Session};
