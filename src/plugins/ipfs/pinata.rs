use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::PinataConfig;
use crate::plugins::ipfs::models::StorySubmission;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("upload rejected by pinning service: {0}")]
    Upload(String),
    #[error("gateway fetch failed: {0}")]
    Fetch(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug)]
pub struct PinResult {
    pub cid: String,
    pub gateway_url: String,
}

#[derive(Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Client for the pinning API and its public gateway. Stateless; no caching,
/// no retries, no request timeout.
pub struct PinataClient {
    http: reqwest::Client,
    jwt: String,
    api_base: String,
    gateway_base: String,
}

impl PinataClient {
    pub fn new(cfg: &PinataConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            jwt: cfg.jwt.clone(),
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            gateway_base: cfg.gateway_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn gateway_url(&self, cid: &str) -> String {
        format!("{}/ipfs/{}", self.gateway_base, cid)
    }

    /// Pins the whole submission as JSON, with pin metadata built from its
    /// title/author/category. Callers validate title and content first.
    pub async fn upload_json(&self, submission: &StorySubmission) -> Result<PinResult, StoreError> {
        let title = submission.title.as_deref().unwrap_or_default();
        let body = json!({
            "pinataContent": submission,
            "pinataMetadata": {
                "name": format!("{} - QuillNode Story", title),
                "keyvalues": {
                    "author": submission.author.as_deref().unwrap_or("Anonymous"),
                    "category": submission.category.as_deref().unwrap_or("Uncategorized"),
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "platform": "QuillNode",
                },
            },
        });

        let resp = self
            .http
            .post(format!("{}/pinning/pinJSONToIPFS", self.api_base))
            .bearer_auth(&self.jwt)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(StoreError::Upload(format!("{}: {}", status, detail)));
        }

        let pinned: PinResponse = resp.json().await?;
        let gateway_url = self.gateway_url(&pinned.ipfs_hash);
        Ok(PinResult { cid: pinned.ipfs_hash, gateway_url })
    }

    /// Resolves a CID to its JSON content through the gateway.
    pub async fn fetch_json(&self, cid: &str) -> Result<serde_json::Value, StoreError> {
        let resp = self
            .http
            .get(self.gateway_url(cid))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            let status_text = resp
                .status()
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string();
            return Err(StoreError::Fetch(format!("Failed to fetch from IPFS: {}", status_text)));
        }

        Ok(resp.json().await?)
    }
}
