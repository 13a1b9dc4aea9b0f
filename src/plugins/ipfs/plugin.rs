use axum::{Router, routing::get, routing::post, Extension};
use std::sync::Arc;

use crate::kernel::Plugin;
use crate::plugins::ipfs::handlers::*;
use crate::plugins::ipfs::pinata::PinataClient;

pub struct IpfsPlugin {
    pub client: Arc<PinataClient>,
}

impl IpfsPlugin {
    pub fn new(client: Arc<PinataClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Plugin for IpfsPlugin {
    async fn router(&self) -> Router {
        Router::new()
            .route("/upload", post(upload_story))
            .route("/fetch", get(fetch_story))
            .layer(Extension(self.client.clone()))
    }

    fn name(&self) -> &'static str {
        "api/ipfs"
    }
}
