use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

use crate::{create::DEFAULT_TOOL, mirror::DEFAULT_MIRROR_LIST_URL};

/// Create a KDE Linux image torrent with every listed mirror as a webseed.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    /// Release version, recorded in the torrent comment.
    #[arg(value_name = "VERSION")]
    pub release: String,
    /// Output path without the `.torrent` suffix.
    pub output_stem: OsString,
    /// Image file or directory to create the torrent from.
    pub source_path: PathBuf,

    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<OsString>,

    #[arg(long, env = "KDE_LINUX_MIRROR_LIST_URL", default_value = DEFAULT_MIRROR_LIST_URL)]
    pub mirror_list_url: String,

    /// Torrent creation program to invoke.
    #[arg(long, env = "KDE_LINUX_TORRENT_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: OsString,

    /// Print the assembled command instead of running it.
    #[arg(long)]
    pub dry_run: bool,
}
