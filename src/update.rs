use anyhow::{Context, Result};
use log::{debug, info, warn};
use semver::Version;
use serde::Deserialize;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const RELEASES_URL: &str = "https://api.github.com/repos/anton-yurchenko/version-bump/releases/latest";
pub const DOWNLOAD_URL: &str = "https://github.com/anton-yurchenko/version-bump/releases/tag";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);
const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Returns the release tag if it is newer than `current`.
pub fn newer_release(tag: &str, current: &Version) -> Result<Option<Version>> {
    let latest = Version::parse(tag.trim_start_matches(['v', 'V']))
        .with_context(|| format!("unexpected release tag '{tag}'"))?;
    Ok((latest > *current).then_some(latest))
}

async fn latest_release() -> Result<Option<Version>> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let release: Release = client
        .get(RELEASES_URL)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let current = Version::parse(env!("CARGO_PKG_VERSION"))?;
    newer_release(&release.tag_name, &current)
}

/// Starts the release check in the background. It never blocks the bump.
pub fn spawn_check() -> JoinHandle<Result<Option<Version>>> {
    tokio::spawn(latest_release())
}

/// Waits a bounded time for the background check and reports its outcome.
/// Failures only produce a warning.
pub async fn report(check: JoinHandle<Result<Option<Version>>>) {
    match tokio::time::timeout(WAIT_TIMEOUT, check).await {
        Ok(Ok(Ok(Some(version)))) => {
            info!("The new version is available! Download from {}/v{}", DOWNLOAD_URL, version)
        }
        Ok(Ok(Ok(None))) => debug!("Running the latest version"),
        Ok(Ok(Err(err))) => warn!("Error checking for update: {:#}", err),
        Ok(Err(err)) => warn!("Error checking for update: {}", err),
        Err(_) => warn!("Error checking for update: timed out"),
    }
}
