mod config;

use std::path::Path;

use anyhow::Context;
use article_engine::{Harvester, LogProgressSink};
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    engine_logging::initialize(&LogDestination::default(), LevelFilter::Info);

    let config = config::load_config(Path::new(config::CONFIG_FILENAME)).into_run_config();
    engine_info!(
        "Harvesting {} into {}",
        config.listing_url(),
        config.output_dir.display()
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let mut harvester = Harvester::new(config).context("failed to build http client")?;
    runtime
        .block_on(harvester.run(&LogProgressSink))
        .context("failed to write articles")?;
    Ok(())
}
