use std::env;

/// Pinning service + gateway endpoints. The JWT authorizes pin requests; the
/// gateway base serves `/ipfs/<cid>` reads.
#[derive(Clone, Debug)]
pub struct PinataConfig {
    pub jwt: String,
    pub api_base: String,
    pub gateway_base: String,
}

#[derive(Clone, Debug)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub story_nft: String,
    pub reputation_system: String,
    pub plagiarism_court: String,
    pub explorer_base: String,
    /// Hex private key for the server-side signer. Minting is unavailable
    /// without it; reads work regardless.
    pub wallet_key: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub pinata: PinataConfig,
    pub chain: ChainConfig,
}

impl AppConfig {
    /// Reads configuration from the environment, falling back to the Sepolia
    /// deployment the platform was launched against.
    pub fn from_env() -> Self {
        let pinata = PinataConfig {
            jwt: env::var("PINATA_JWT").unwrap_or_default(),
            api_base: env::var("PINATA_API_URL")
                .unwrap_or_else(|_| "https://api.pinata.cloud".to_string()),
            gateway_base: env::var("PINATA_GATEWAY_URL")
                .unwrap_or_else(|_| "https://gateway.pinata.cloud".to_string()),
        };
        let chain = ChainConfig {
            rpc_url: env::var("RPC_URL")
                .unwrap_or_else(|_| "https://eth-sepolia.g.alchemy.com/v2/demo".to_string()),
            chain_id: env::var("CHAIN_ID").ok().and_then(|s| s.parse().ok()).unwrap_or(11155111),
            story_nft: env::var("STORY_NFT_ADDRESS")
                .unwrap_or_else(|_| "0x82018421063d7c0eFE8a362638bF0D35bA7C0C0d".to_string()),
            reputation_system: env::var("REPUTATION_SYSTEM_ADDRESS")
                .unwrap_or_else(|_| "0x96AAB2B7C4cAdFbc0bf8fE784eB093aaEa4a53B2".to_string()),
            plagiarism_court: env::var("PLAGIARISM_COURT_ADDRESS")
                .unwrap_or_else(|_| "0xfbe38a67F463d989E1b7398578dE52E8FbE5c7e5".to_string()),
            explorer_base: env::var("BLOCK_EXPLORER_URL")
                .unwrap_or_else(|_| "https://sepolia.etherscan.io".to_string()),
            wallet_key: env::var("WALLET_PRIVATE_KEY").ok().filter(|s| !s.is_empty()),
        };
        let port: u16 = env::var("PORT").ok().and_then(|s| s.parse().ok()).unwrap_or(3000);

        AppConfig { port, pinata, chain }
    }
}
