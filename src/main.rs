use anyhow::Result;
use tilescope::app::TilescopeApp;
use tilescope::config::Config;
use tilescope::logging;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let log_filter = logging::init();

    let config = Config::load()?;
    log_filter.apply(&config.logging)?;

    info!("Starting tilescope");

    let app = TilescopeApp::new(config)?;
    app.run().await?;

    Ok(())
}
