pub mod config;
pub mod feed;
pub mod http_error;
pub mod kernel;
pub mod plugins;

pub use crate::config::*;
pub use crate::kernel::*;
