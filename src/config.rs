//! Command line options and config file locations.
//!
//! Runtime options come from the command line (with environment fallbacks).
//! The theme and keybindings live in small `key = value` files under the
//! platform config directory, e.g. `~/.config/usrdir-manager/` on Linux.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::Parser;
use directories::ProjectDirs;
use url::Url;

use crate::remote::DEFAULT_COLLECTION_URL;

/// Terminal front-end for a remote user directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "usrdir-manager", version, about)]
pub struct Cli {
    /// URL of the remote user collection
    #[arg(long, env = "USRDIR_API_URL", default_value = DEFAULT_COLLECTION_URL)]
    pub api_url: Url,

    /// Rows per page
    #[arg(long, env = "USRDIR_PAGE_SIZE", default_value = "5")]
    pub page_size: NonZeroUsize,

    /// Log file path (defaults to usrdir-manager.log in the temp dir)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print the users table as HTML and exit instead of starting the TUI
    #[arg(long)]
    pub html: bool,

    /// Search term applied before printing (with --html)
    #[arg(long, requires = "html")]
    pub search: Option<String>,

    /// Page to print (with --html)
    #[arg(long, requires = "html", default_value = "1")]
    pub page: NonZeroUsize,
}

impl Cli {
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("usrdir-manager.log"))
    }

    /// Level used when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "usrdir-manager")
}

/// Directory holding `theme.conf` and `keybinds.conf`.
pub fn config_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path of an existing config file: the config dir first, then the working
/// directory.
pub fn config_file_read_path(name: &str) -> Option<PathBuf> {
    [config_dir().join(name), PathBuf::from(name)]
        .into_iter()
        .find(|p| p.is_file())
}

/// Where a fresh config file should be written. Creates the config dir.
pub fn config_file_write_path(name: &str) -> PathBuf {
    let dir = config_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "cannot create config dir");
        return Path::new(name).to_path_buf();
    }
    dir.join(name)
}
