use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use version_bump::{
    arguments::Arguments, bump::Bump, config::Configuration, git::GitTracker, update,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Arguments::parse();
    pretty_env_logger::env_logger::builder()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .init();

    // runs alongside the bump, never gates it
    let check = update::spawn_check();

    let config = Configuration::load(&args.path).context("error preparing project configuration")?;
    let git = GitTracker::open(&args.path).context("error preparing project configuration")?;

    let mut bump = Bump::new(&args.path, config, git);
    bump.run(args.command.level()).context("error bumping a version")?;

    update::report(check).await;
    Ok(())
}
