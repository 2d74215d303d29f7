use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use thiserror::Error;

pub const DEFAULT_TOOL: &str = "transmission-create";

/// Announce urls embedded into every torrent, in order.
pub const TRACKERS: [&str; 8] = [
    "udp://tracker.opentrackr.org:1337/announce",
    "udp://open.demonii.com:1337/announce",
    "udp://open.tracker.cl:1337/announce",
    "udp://open.stealth.si:80/announce",
    "udp://tracker.torrent.eu.org:451/announce",
    "udp://tracker-udp.gbitt.info:80/announce",
    "udp://opentracker.io:6969/announce",
    "udp://explodie.org:6969/announce",
];

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("failed to start `{}`", program.to_string_lossy())]
    Spawn {
        program: OsString,
        #[source]
        source: std::io::Error,
    },
    #[error("`{}` failed with {status}", program.to_string_lossy())]
    Failed { program: OsString, status: ExitStatus },
}

/// A fully assembled torrent creation command.
#[derive(Debug, Clone)]
pub struct TorrentCreate {
    program: OsString,
    webseeds: Vec<String>,
    comment: String,
    outfile: PathBuf,
    source_path: PathBuf,
}

impl TorrentCreate {
    pub fn new(
        program: impl Into<OsString>,
        version: &str,
        output_stem: impl AsRef<OsStr>,
        source_path: impl Into<PathBuf>,
        webseeds: Vec<String>,
    ) -> Self {
        // Appended verbatim, stems like `kde-linux_202410.1` keep their dots.
        let mut outfile = output_stem.as_ref().to_os_string();
        outfile.push(".torrent");

        Self {
            program: program.into(),
            webseeds,
            comment: format!("KDE Linux {version}"),
            outfile: PathBuf::from(outfile),
            source_path: source_path.into(),
        }
    }

    pub fn outfile(&self) -> &Path {
        &self.outfile
    }

    /// Arguments passed to the program, excluding the program itself.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(TRACKERS.len() * 2 + self.webseeds.len() * 2 + 5);

        for tracker in TRACKERS {
            args.push("--tracker".into());
            args.push(tracker.into());
        }
        for webseed in self.webseeds.iter() {
            args.push("--webseed".into());
            args.push(webseed.into());
        }
        args.push("--comment".into());
        args.push(self.comment.as_str().into());
        args.push("--outfile".into());
        args.push(self.outfile.clone().into_os_string());
        args.push(self.source_path.clone().into_os_string());

        args
    }

    /// Runs the program and blocks until it exits.
    pub fn run(&self) -> Result<(), CreateError> {
        tracing::info!(
            program = %self.program.to_string_lossy(),
            webseeds = self.webseeds.len(),
            outfile = %self.outfile.display(),
            "creating torrent"
        );
        tracing::debug!(command = %self, "running");

        let status = Command::new(&self.program)
            .args(self.args())
            .status()
            .map_err(|source| CreateError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(CreateError::Failed {
                program: self.program.clone(),
                status,
            });
        }

        tracing::info!(outfile = %self.outfile.display(), "torrent created");
        Ok(())
    }
}

impl std::fmt::Display for TorrentCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in self.args() {
            write!(f, " {}", quote(&arg))?;
        }
        Ok(())
    }
}

/// Single-quotes an argument for display when a shell would split or expand it.
fn quote(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@+,%".contains(c));

    if plain {
        arg.into_owned()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
