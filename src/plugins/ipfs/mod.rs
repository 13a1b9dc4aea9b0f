pub mod handlers;
pub mod models;
pub mod pinata;
pub mod plugin;

pub use plugin::IpfsPlugin;
