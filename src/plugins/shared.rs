use serde::{Serialize, Deserialize};

use crate::plugins::chain::models::ChainStory;
use crate::plugins::search::catalog::MockStory;

/// Reserved marker for chain-sourced display ids. Catalog ids are plain
/// numerals, so the two id spaces cannot collide.
pub const CHAIN_ID_PREFIX: &str = "nft-";

pub fn is_chain_id(id: &str) -> bool {
    id.starts_with(CHAIN_ID_PREFIX)
}

/// A story with its provenance still attached. The two sources stay distinct
/// types until the display-record mapping boundary below.
#[derive(Debug, Clone)]
pub enum StorySource {
    Mock(MockStory),
    Chain(ChainStory),
}

/// The display shape both sources converge into.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<u64>,
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub premium: bool,
    pub cover: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipfs_cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl StorySource {
    pub fn display_id(&self) -> String {
        match self {
            StorySource::Mock(s) => s.id.to_string(),
            StorySource::Chain(s) => format!("{}{}", CHAIN_ID_PREFIX, s.token_id),
        }
    }

    pub fn into_record(self) -> StoryRecord {
        let id = self.display_id();
        match self {
            StorySource::Mock(s) => StoryRecord {
                id,
                token_id: None,
                title: s.title.to_string(),
                author: s.author.to_string(),
                description: s.description.to_string(),
                category: s.category.to_string(),
                tags: s.tags.iter().map(|t| t.to_string()).collect(),
                premium: s.premium,
                cover: s.cover.to_string(),
                ipfs_cid: None,
                timestamp: None,
            },
            StorySource::Chain(s) => StoryRecord {
                id,
                token_id: Some(s.token_id),
                title: s.title,
                author: s.author,
                description: "Stored on blockchain as NFT - Click to read from IPFS".to_string(),
                category: s.category.clone(),
                tags: vec![s.category],
                premium: s.is_premium,
                cover: "/placeholder.svg".to_string(),
                ipfs_cid: Some(s.ipfs_cid),
                timestamp: chrono::DateTime::from_timestamp(s.timestamp, 0)
                    .map(|t| t.to_rfc3339()),
            },
        }
    }
}
