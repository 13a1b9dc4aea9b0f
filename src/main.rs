mod config;
mod feed;
mod http_error;
mod kernel;
mod plugins;

use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use config::AppConfig;
use kernel::{build_app, Plugin};
use plugins::chain::client::{EthersStoryChain, StoryChain};
use plugins::chain::{ChainPlugin, ReputationPlugin};
use plugins::health::HealthPlugin;
use plugins::ipfs::pinata::PinataClient;
use plugins::ipfs::IpfsPlugin;
use plugins::metrics::MetricsPlugin;
use plugins::search::SearchPlugin;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    dotenv().ok();
    let cfg = AppConfig::from_env();

    let pinata = Arc::new(PinataClient::new(&cfg.pinata));
    let chain: Arc<dyn StoryChain> = Arc::new(EthersStoryChain::new(&cfg.chain)?);
    let metrics_plugin = MetricsPlugin::new();

    let plugins_vec: Vec<Box<dyn Plugin>> = vec![
        Box::new(HealthPlugin),
        Box::new(IpfsPlugin::new(pinata)),
        Box::new(SearchPlugin),
        Box::new(ChainPlugin::new(chain.clone())),
        Box::new(ReputationPlugin::new(chain)),
    ];

    let plugin_names: Vec<&'static str> = plugins_vec.iter().map(|p| p.name()).collect();
    tracing::info!("mounting plugins: {:?}", plugin_names);

    let mut app: Router = build_app(&plugins_vec, Some(metrics_plugin.clone())).await;

    // expose metrics at /metrics (not instrumented to avoid double-counting)
    app = app.nest("/metrics", metrics_plugin.router());

    let addr: SocketAddr = format!("0.0.0.0:{}", cfg.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            for p in plugins_vec.iter() {
                p.on_shutdown().await;
            }
        })
        .await?;

    Ok(())
}
