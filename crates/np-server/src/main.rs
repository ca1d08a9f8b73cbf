//! Network Portal server - main entry point

use anyhow::Result;
use np_common::logging::{init_logging, LogConfig};
use tracing::info;

use np_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Environment variables override the built-in defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("np-server")
        .filter_directives("np_server=debug,tower_http=debug,sqlx=info")
        .build()
        .merge_env()?;
    let _guard = init_logging(&log_config)?;

    info!("Starting Network Portal server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    api::serve(config).await
}
