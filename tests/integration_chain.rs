use async_trait::async_trait;
use ethers::types::Address;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;

use quillnode_api::kernel::{build_app, Plugin};
use quillnode_api::plugins::chain::client::{ChainError, StoryChain};
use quillnode_api::plugins::chain::models::{ChainStory, MintReceipt, MintRequest};
use quillnode_api::plugins::chain::{ChainPlugin, ReputationPlugin};
use quillnode_api::plugins::search::catalog::STORIES;
use quillnode_api::plugins::shared::is_chain_id;

const OWNER: &str = "0x6Cf4207cd5CFD107718e22A46E66B1b12ec5f81c";

/// Chain double backed by an in-memory story list. `fail_reads` makes every
/// read error so the propagation policy can be observed end to end.
#[derive(Default)]
struct MockChain {
    stories: Vec<ChainStory>,
    reputations: HashMap<Address, u64>,
    reports: HashMap<u64, u64>,
    fail_reads: bool,
    signer_configured: bool,
}

impl MockChain {
    fn with_stories(n: u64) -> Self {
        let stories = (0..n)
            .map(|token_id| ChainStory {
                token_id,
                ipfs_cid: format!("bafyStory{}", token_id),
                title: format!("Chain Story {}", token_id),
                category: "Fantasy".to_string(),
                author: OWNER.to_string(),
                is_premium: token_id % 2 == 1,
                timestamp: 1_700_000_000 + token_id as i64,
            })
            .collect();
        Self { stories, signer_configured: true, ..Default::default() }
    }

    fn failing() -> Self {
        Self { fail_reads: true, ..Default::default() }
    }
}

#[async_trait]
impl StoryChain for MockChain {
    async fn total_supply(&self) -> Result<u64, ChainError> {
        if self.fail_reads {
            return Err(ChainError::Contract("execution reverted".to_string()));
        }
        Ok(self.stories.len() as u64)
    }

    async fn stories_window(&self, offset: u64, limit: u64) -> Result<Vec<ChainStory>, ChainError> {
        if self.fail_reads {
            return Err(ChainError::Contract("execution reverted".to_string()));
        }
        Ok(self
            .stories
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn story_by_token(&self, token_id: u64) -> Result<ChainStory, ChainError> {
        self.stories
            .iter()
            .find(|s| s.token_id == token_id)
            .cloned()
            .ok_or_else(|| ChainError::Contract("ERC721: invalid token ID".to_string()))
    }

    async fn reputation(&self, address: Address) -> Result<u64, ChainError> {
        if self.fail_reads {
            return Err(ChainError::Provider("connection refused".to_string()));
        }
        Ok(self.reputations.get(&address).copied().unwrap_or(0))
    }

    async fn report_count(&self, token_id: u64) -> Result<u64, ChainError> {
        if self.fail_reads {
            return Err(ChainError::Provider("connection refused".to_string()));
        }
        Ok(self.reports.get(&token_id).copied().unwrap_or(0))
    }

    async fn mint(&self, req: &MintRequest) -> Result<MintReceipt, ChainError> {
        if !self.signer_configured {
            return Err(ChainError::NoSigner);
        }
        assert!(!req.cid.is_empty());
        Ok(MintReceipt {
            token_id: self.stories.len() as u64,
            tx_hash: "0xdeadbeef".to_string(),
            block_explorer: "https://sepolia.etherscan.io/tx/0xdeadbeef".to_string(),
        })
    }
}

async fn spawn_chain_app(chain: MockChain) -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    let chain: Arc<dyn StoryChain> = Arc::new(chain);
    let plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(ChainPlugin::new(chain.clone())),
        Box::new(ReputationPlugin::new(chain)),
    ];
    let app = build_app(&plugins, None).await;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });
    Ok((format!("http://{}", addr), handle))
}

#[tokio::test]
async fn list_clamps_window_to_supply() -> anyhow::Result<()> {
    let (base, _srv) = spawn_chain_app(MockChain::with_stories(5)).await?;
    let http = reqwest::Client::new();

    let all: Vec<Value> = http.get(format!("{}/api/stories", base)).send().await?.json().await?;
    assert_eq!(all.len(), 5);

    let tail: Vec<Value> =
        http.get(format!("{}/api/stories?offset=3&limit=100", base)).send().await?.json().await?;
    assert_eq!(tail.len(), 2);
    assert_eq!(tail[0]["id"], "nft-3");
    assert_eq!(tail[1]["id"], "nft-4");

    let out_of_range: Vec<Value> =
        http.get(format!("{}/api/stories?offset=9", base)).send().await?.json().await?;
    assert!(out_of_range.is_empty());

    let first_two: Vec<Value> =
        http.get(format!("{}/api/stories?limit=2", base)).send().await?.json().await?;
    assert_eq!(first_two.len(), 2);
    Ok(())
}

#[tokio::test]
async fn empty_supply_lists_as_empty_not_error() -> anyhow::Result<()> {
    let (base, _srv) = spawn_chain_app(MockChain::with_stories(0)).await?;
    let resp = reqwest::get(format!("{}/api/stories", base)).await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Vec<Value> = resp.json().await?;
    assert!(body.is_empty());
    Ok(())
}

#[tokio::test]
async fn chain_ids_never_collide_with_catalog_ids() -> anyhow::Result<()> {
    let (base, _srv) = spawn_chain_app(MockChain::with_stories(8)).await?;
    let records: Vec<Value> =
        reqwest::get(format!("{}/api/stories", base)).await?.json().await?;

    for record in &records {
        let id = record["id"].as_str().expect("id");
        assert!(is_chain_id(id));
        assert!(STORIES.iter().all(|s| s.id != id));
    }
    for story in STORIES.iter() {
        assert!(!is_chain_id(story.id));
    }
    Ok(())
}

#[tokio::test]
async fn get_story_reports_owner_as_author() -> anyhow::Result<()> {
    let (base, _srv) = spawn_chain_app(MockChain::with_stories(3)).await?;
    let resp = reqwest::get(format!("{}/api/stories/2", base)).await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["id"], "nft-2");
    assert_eq!(body["tokenId"], 2);
    assert_eq!(body["author"], OWNER);
    assert_eq!(body["ipfsCid"], "bafyStory2");
    Ok(())
}

#[tokio::test]
async fn unknown_token_surfaces_contract_error() -> anyhow::Result<()> {
    let (base, _srv) = spawn_chain_app(MockChain::with_stories(1)).await?;
    let resp = reqwest::get(format!("{}/api/stories/99", base)).await?;
    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "chain_upstream");
    Ok(())
}

#[tokio::test]
async fn report_count_is_read_through() -> anyhow::Result<()> {
    let mut chain = MockChain::with_stories(3);
    chain.reports.insert(2, 4);
    let (base, _srv) = spawn_chain_app(chain).await?;

    let body: Value = reqwest::get(format!("{}/api/stories/2/reports", base)).await?.json().await?;
    assert_eq!(body["tokenId"], 2);
    assert_eq!(body["reportCount"], 4);

    let body: Value = reqwest::get(format!("{}/api/stories/0/reports", base)).await?.json().await?;
    assert_eq!(body["reportCount"], 0);
    Ok(())
}

#[tokio::test]
async fn read_failures_propagate_instead_of_degrading() -> anyhow::Result<()> {
    let (base, _srv) = spawn_chain_app(MockChain::failing()).await?;
    let http = reqwest::Client::new();

    // listing must not silently degrade to an empty list
    let resp = http.get(format!("{}/api/stories", base)).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

    // report counts must not silently degrade to zero
    let resp = http.get(format!("{}/api/stories/1/reports", base)).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);

    let resp = http.get(format!("{}/api/reputation/{}", base, OWNER)).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn reputation_reads_and_validates_address() -> anyhow::Result<()> {
    let mut chain = MockChain::with_stories(0);
    chain.reputations.insert(OWNER.parse()?, 120);
    let (base, _srv) = spawn_chain_app(chain).await?;
    let http = reqwest::Client::new();

    let resp = http.get(format!("{}/api/reputation/{}", base, OWNER)).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["address"], OWNER);
    assert_eq!(body["reputation"], 120);

    let resp = http.get(format!("{}/api/reputation/not-an-address", base)).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn mint_returns_receipt_and_validates_input() -> anyhow::Result<()> {
    let (base, _srv) = spawn_chain_app(MockChain::with_stories(5)).await?;
    let http = reqwest::Client::new();

    let resp = http
        .post(format!("{}/api/stories/mint", base))
        .json(&json!({"cid": "bafyNew", "title": "T", "category": "Fantasy", "isPremium": true}))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["tokenId"], 5);
    assert_eq!(body["txHash"], "0xdeadbeef");
    assert!(body["blockExplorer"].as_str().expect("url").contains("/tx/0xdeadbeef"));

    let resp = http
        .post(format!("{}/api/stories/mint", base))
        .json(&json!({"cid": "", "title": "T", "category": "Fantasy"}))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn mint_without_signer_is_unavailable() -> anyhow::Result<()> {
    let mut chain = MockChain::with_stories(1);
    chain.signer_configured = false;
    let (base, _srv) = spawn_chain_app(chain).await?;

    let resp = reqwest::Client::new()
        .post(format!("{}/api/stories/mint", base))
        .json(&json!({"cid": "bafyNew", "title": "T", "category": "Fantasy"}))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], "no_signer");
    Ok(())
}

#[tokio::test]
async fn feed_snapshot_reflects_latest_refresh() -> anyhow::Result<()> {
    let (base, _srv) = spawn_chain_app(MockChain::with_stories(2)).await?;
    let body: Value = reqwest::get(format!("{}/api/stories/feed", base)).await?.json().await?;
    assert_eq!(body["isLoading"], false);
    assert!(body["error"].is_null());
    assert_eq!(body["data"].as_array().expect("data").len(), 2);
    Ok(())
}

#[tokio::test]
async fn feed_snapshot_carries_error_on_failure() -> anyhow::Result<()> {
    let (base, _srv) = spawn_chain_app(MockChain::failing()).await?;
    let body: Value = reqwest::get(format!("{}/api/stories/feed", base)).await?.json().await?;
    assert_eq!(body["isLoading"], false);
    assert!(body["data"].is_null());
    assert!(body["error"].as_str().expect("error").contains("execution reverted"));
    Ok(())
}
