use async_trait::async_trait;
use ethers::abi::RawLog;
use ethers::contract::EthLogDecode;
use ethers::prelude::*;
use ethers::utils::to_checksum;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::ChainConfig;
use crate::plugins::chain::models::{ChainStory, MintReceipt, MintRequest};
use crate::plugins::shared::{StoryRecord, StorySource};

// JSON ABI rather than the human-readable form: the parser behind `abigen!`
// flattens tuple-array return types, which breaks `getAllStories`.
abigen!(
    StoryNft,
    r#"[
        {"type":"event","name":"StoryMinted","anonymous":false,"inputs":[
            {"name":"tokenId","type":"uint256","indexed":true},
            {"name":"author","type":"address","indexed":true},
            {"name":"ipfsCID","type":"string","indexed":false}]},
        {"type":"function","name":"mintStory","stateMutability":"nonpayable","inputs":[
            {"name":"ipfsCID","type":"string"},{"name":"title","type":"string"},
            {"name":"category","type":"string"},{"name":"isPremium","type":"bool"}],
         "outputs":[{"name":"","type":"uint256"}]},
        {"type":"function","name":"totalSupply","stateMutability":"view","inputs":[],
         "outputs":[{"name":"","type":"uint256"}]},
        {"type":"function","name":"getAllStories","stateMutability":"view","inputs":[
            {"name":"offset","type":"uint256"},{"name":"limit","type":"uint256"}],
         "outputs":[{"name":"rows","type":"tuple[]","components":[
            {"name":"tokenId","type":"uint256"},{"name":"ipfsCID","type":"string"},
            {"name":"title","type":"string"},{"name":"category","type":"string"},
            {"name":"author","type":"address"},{"name":"isPremium","type":"bool"},
            {"name":"timestamp","type":"uint256"}]}]},
        {"type":"function","name":"getStoryMetadata","stateMutability":"view","inputs":[
            {"name":"tokenId","type":"uint256"}],
         "outputs":[{"name":"ipfsCID","type":"string"},{"name":"title","type":"string"},
            {"name":"category","type":"string"},{"name":"isPremium","type":"bool"},
            {"name":"timestamp","type":"uint256"}]},
        {"type":"function","name":"ownerOf","stateMutability":"view","inputs":[
            {"name":"tokenId","type":"uint256"}],
         "outputs":[{"name":"","type":"address"}]}
    ]"#
);

abigen!(
    ReputationSystem,
    r#"[
        function getReputation(address user) view returns (uint256)
    ]"#
);

abigen!(
    PlagiarismCourt,
    r#"[
        function getReportCount(uint256 tokenId) view returns (uint256)
    ]"#
);

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("rpc provider error: {0}")]
    Provider(String),
    #[error("contract call failed: {0}")]
    Contract(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid signing key: {0}")]
    Signer(String),
    #[error("signing key not configured")]
    NoSigner,
    #[error("transaction dropped before a receipt was produced")]
    MissingReceipt,
    #[error("mint confirmed but no StoryMinted event was emitted")]
    MissingMintEvent,
}

fn contract_err<E: std::fmt::Display>(e: E) -> ChainError {
    ChainError::Contract(e.to_string())
}

pub fn parse_address(addr: &str) -> Result<Address, ChainError> {
    addr.parse::<Address>().map_err(|_| ChainError::InvalidAddress(addr.to_string()))
}

/// Read/write surface of the story contracts. The provider and signer are
/// injected at construction so tests can substitute the whole chain.
#[async_trait]
pub trait StoryChain: Send + Sync {
    async fn total_supply(&self) -> Result<u64, ChainError>;
    async fn stories_window(&self, offset: u64, limit: u64) -> Result<Vec<ChainStory>, ChainError>;
    async fn story_by_token(&self, token_id: u64) -> Result<ChainStory, ChainError>;
    async fn reputation(&self, address: Address) -> Result<u64, ChainError>;
    async fn report_count(&self, token_id: u64) -> Result<u64, ChainError>;
    async fn mint(&self, req: &MintRequest) -> Result<MintReceipt, ChainError>;
}

/// Clamps a paging window against the current supply. `None` means the window
/// is empty: zero supply or an offset at/past the end.
pub fn clamp_window(offset: u64, limit: u64, total: u64) -> Option<(u64, u64)> {
    if total == 0 || offset >= total {
        return None;
    }
    Some((offset, limit.min(total - offset)))
}

/// Reads total supply, clamps the requested window and maps each row into a
/// display record. An out-of-range window yields an empty list; read failures
/// propagate so callers can tell "confirmed empty" from "unknown".
pub async fn list_all(
    chain: &dyn StoryChain,
    offset: u64,
    limit: u64,
) -> Result<Vec<StoryRecord>, ChainError> {
    let total = chain.total_supply().await?;
    let Some((offset, limit)) = clamp_window(offset, limit, total) else {
        return Ok(Vec::new());
    };
    let stories = chain.stories_window(offset, limit).await?;
    Ok(stories.into_iter().map(|s| StorySource::Chain(s).into_record()).collect())
}

type StoryRow = (U256, String, String, String, Address, bool, U256);

fn story_from_row(row: StoryRow) -> ChainStory {
    let (token_id, ipfs_cid, title, category, author, is_premium, timestamp) = row;
    ChainStory {
        token_id: token_id.as_u64(),
        ipfs_cid,
        title,
        category,
        author: to_checksum(&author, None),
        is_premium,
        timestamp: timestamp.as_u64() as i64,
    }
}

pub struct EthersStoryChain {
    provider: Provider<Http>,
    story_nft: Address,
    reputation_system: Address,
    plagiarism_court: Address,
    explorer_base: String,
    signer: Option<LocalWallet>,
}

impl EthersStoryChain {
    pub fn new(cfg: &ChainConfig) -> Result<Self, ChainError> {
        let provider = Provider::<Http>::try_from(cfg.rpc_url.as_str())
            .map_err(|e| ChainError::Provider(e.to_string()))?;
        let signer = match &cfg.wallet_key {
            Some(key) => Some(
                key.parse::<LocalWallet>()
                    .map_err(|e| ChainError::Signer(e.to_string()))?
                    .with_chain_id(cfg.chain_id),
            ),
            None => None,
        };
        Ok(Self {
            provider,
            story_nft: parse_address(&cfg.story_nft)?,
            reputation_system: parse_address(&cfg.reputation_system)?,
            plagiarism_court: parse_address(&cfg.plagiarism_court)?,
            explorer_base: cfg.explorer_base.trim_end_matches('/').to_string(),
            signer,
        })
    }

    fn nft(&self) -> StoryNft<Provider<Http>> {
        StoryNft::new(self.story_nft, Arc::new(self.provider.clone()))
    }
}

#[async_trait]
impl StoryChain for EthersStoryChain {
    async fn total_supply(&self) -> Result<u64, ChainError> {
        let supply = self.nft().total_supply().call().await.map_err(contract_err)?;
        Ok(supply.as_u64())
    }

    async fn stories_window(&self, offset: u64, limit: u64) -> Result<Vec<ChainStory>, ChainError> {
        let rows = self
            .nft()
            .get_all_stories(offset.into(), limit.into())
            .call()
            .await
            .map_err(contract_err)?;
        Ok(rows.into_iter().map(story_from_row).collect())
    }

    async fn story_by_token(&self, token_id: u64) -> Result<ChainStory, ChainError> {
        let nft = self.nft();
        let (ipfs_cid, title, category, is_premium, timestamp) = nft
            .get_story_metadata(token_id.into())
            .call()
            .await
            .map_err(contract_err)?;
        let owner = nft.owner_of(token_id.into()).call().await.map_err(contract_err)?;
        Ok(ChainStory {
            token_id,
            ipfs_cid,
            title,
            category,
            author: to_checksum(&owner, None),
            is_premium,
            timestamp: timestamp.as_u64() as i64,
        })
    }

    async fn reputation(&self, address: Address) -> Result<u64, ChainError> {
        let contract = ReputationSystem::new(self.reputation_system, Arc::new(self.provider.clone()));
        let score = contract.get_reputation(address).call().await.map_err(contract_err)?;
        Ok(score.as_u64())
    }

    async fn report_count(&self, token_id: u64) -> Result<u64, ChainError> {
        let contract = PlagiarismCourt::new(self.plagiarism_court, Arc::new(self.provider.clone()));
        let count = contract.get_report_count(token_id.into()).call().await.map_err(contract_err)?;
        Ok(count.as_u64())
    }

    async fn mint(&self, req: &MintRequest) -> Result<MintReceipt, ChainError> {
        let wallet = self.signer.clone().ok_or(ChainError::NoSigner)?;
        let client = Arc::new(SignerMiddleware::new(self.provider.clone(), wallet));
        let contract = StoryNft::new(self.story_nft, client);

        let call = contract.mint_story(
            req.cid.clone(),
            req.title.clone(),
            req.category.clone(),
            req.is_premium,
        );
        let pending = call.send().await.map_err(contract_err)?;
        let receipt = pending
            .confirmations(1)
            .await
            .map_err(|e| ChainError::Provider(e.to_string()))?
            .ok_or(ChainError::MissingReceipt)?;

        let mut token_id = None;
        for log in receipt.logs.iter() {
            let raw = RawLog { topics: log.topics.clone(), data: log.data.to_vec() };
            if let Ok(event) = <StoryMintedFilter as EthLogDecode>::decode_log(&raw) {
                token_id = Some(event.token_id.as_u64());
                break;
            }
        }
        let token_id = token_id.ok_or(ChainError::MissingMintEvent)?;

        let tx_hash = format!("{:#x}", receipt.transaction_hash);
        info!(token_id, tx_hash = %tx_hash, "story NFT minted");
        Ok(MintReceipt {
            token_id,
            block_explorer: format!("{}/tx/{}", self.explorer_base, tx_hash),
            tx_hash,
        })
    }
}
