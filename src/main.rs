use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{command::Cli, create::TorrentCreate, mirror::MirrorLister};

mod command;
mod create;
mod mirror;
#[cfg(test)]
mod testing;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}

/// Lists the mirrors, then creates the torrent. Stops at the first failure.
fn run(cli: Cli) -> Result<()> {
    if !cli.extra.is_empty() {
        tracing::debug!(count = cli.extra.len(), "ignoring extra arguments");
    }

    let mirrors = MirrorLister::new(&cli.mirror_list_url)
        .context("setting up mirror list client")?
        .list()
        .context("listing webseed mirrors")?;

    let create = TorrentCreate::new(
        cli.tool,
        &cli.release,
        &cli.output_stem,
        cli.source_path,
        mirrors,
    );

    if cli.dry_run {
        println!("{create}");
        return Ok(());
    }

    create.run().context("creating torrent")?;
    println!("Created {}", create.outfile().display());

    Ok(())
}
