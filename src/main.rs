use anyhow::{Context, Result};
use sentinel_console::{Console, ConsoleConfig, spawn_stdin_reader};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config =
        ConsoleConfig::from_args(std::env::args().skip(1)).context("invalid command line")?;
    info!(
        workers = config.max_workers,
        games = config.games_to_play,
        "sentinel starting"
    );

    let console = Console::new(config, spawn_stdin_reader(), std::io::stdout(), std::io::stderr());
    let tally = console.run().context("console session failed")?;
    info!(games = tally.games(), "sentinel exiting");
    Ok(())
}
