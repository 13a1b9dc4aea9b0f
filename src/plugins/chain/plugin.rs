use axum::{Router, routing::get, routing::post, Extension};
use std::sync::Arc;

use crate::kernel::Plugin;
use crate::plugins::chain::client::StoryChain;
use crate::plugins::chain::handlers::{self, StoryFeed};

pub struct ChainPlugin {
    pub chain: Arc<dyn StoryChain>,
    pub feed: Arc<StoryFeed>,
}

impl ChainPlugin {
    pub fn new(chain: Arc<dyn StoryChain>) -> Self {
        Self { chain, feed: Arc::new(StoryFeed::new()) }
    }
}

#[async_trait::async_trait]
impl Plugin for ChainPlugin {
    async fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::list_stories))
            .route("/feed", get(handlers::feed_stories))
            .route("/mint", post(handlers::mint_story))
            .route("/:token_id", get(handlers::get_story))
            .route("/:token_id/reports", get(handlers::get_report_count))
            .layer(Extension(self.chain.clone()))
            .layer(Extension(self.feed.clone()))
    }

    fn name(&self) -> &'static str {
        "api/stories"
    }
}

pub struct ReputationPlugin {
    pub chain: Arc<dyn StoryChain>,
}

impl ReputationPlugin {
    pub fn new(chain: Arc<dyn StoryChain>) -> Self {
        Self { chain }
    }
}

#[async_trait::async_trait]
impl Plugin for ReputationPlugin {
    async fn router(&self) -> Router {
        Router::new()
            .route("/:address", get(handlers::get_reputation))
            .layer(Extension(self.chain.clone()))
    }

    fn name(&self) -> &'static str {
        "api/reputation"
    }
}
