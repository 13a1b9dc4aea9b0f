use serde::{Serialize, Deserialize};

/// One minted story NFT as read from the contract. The owner address doubles
/// as the displayed author.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChainStory {
    pub token_id: u64,
    pub ipfs_cid: String,
    pub title: String,
    pub category: String,
    pub author: String,
    pub is_premium: bool,
    /// Unix seconds from the mint block.
    pub timestamp: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub cid: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub is_premium: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    pub token_id: u64,
    pub tx_hash: String,
    pub block_explorer: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReportCountResponse {
    pub token_id: u64,
    pub report_count: u64,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReputationResponse {
    pub address: String,
    pub reputation: u64,
}
