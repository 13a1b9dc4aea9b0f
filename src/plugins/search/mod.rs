pub mod catalog;
pub mod handlers;
pub mod plugin;

pub use plugin::SearchPlugin;
