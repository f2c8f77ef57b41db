// Trait seams for the accumulator's two external collaborators.
//
// FeedSource is the upstream NeoWs feed; NeoWsClient implements it.
// Session is the auth provider's view of the signed-in user.
//
// Both are injected as Arc<dyn ..> so tests can swap in MockFeedSource and
// StaticSession without touching the network.

use anyhow::Result;
use async_trait::async_trait;

use cosmic_common::{DateWindow, User};
use neows_client::{FeedResponse, NeoWsClient};

// ---------------------------------------------------------------------------
// FeedSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the raw feed page for an inclusive date window.
    async fn feed(&self, window: DateWindow) -> Result<FeedResponse>;
}

#[async_trait]
impl FeedSource for NeoWsClient {
    async fn feed(&self, window: DateWindow) -> Result<FeedResponse> {
        Ok(NeoWsClient::feed(self, window.start, window.end).await?)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Session: Send + Sync {
    /// The signed-in user, or `None` when signed out.
    fn current_user(&self) -> Option<User>;

    /// End the session with the provider.
    async fn sign_out(&self) -> Result<()>;
}
