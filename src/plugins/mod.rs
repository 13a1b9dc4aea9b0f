pub mod chain;
pub mod health;
pub mod ipfs;
pub mod metrics;
pub mod search;
pub mod shared;
