use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use keysquare::Strategy;
use tracing::debug;

/// Reads a strategy from a JSON file and checks that it covers all regions.
pub fn load_strategy(path: &Path) -> anyhow::Result<Strategy> {
    let file = File::open(path)
        .with_context(|| format!("Could not open strategy file '{}'", path.display()))?;
    let strategy: Strategy = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Could not parse strategy file '{}'", path.display()))?;
    strategy.validate()?;
    debug!(path = %path.display(), "Loaded strategy");
    Ok(strategy)
}

/// Like [`load_strategy()`], for JSON that is already in memory.
pub fn parse_strategy(json: &str) -> anyhow::Result<Strategy> {
    let strategy: Strategy = serde_json::from_str(json).context("Could not parse strategy")?;
    strategy.validate()?;
    Ok(strategy)
}
