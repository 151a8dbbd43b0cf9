pub mod host;
pub mod hosts;
pub mod plugins;
pub mod preferences;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use nessusfile_common::severity::Severity;
use nessusfile_core::ScanSource;

#[derive(Parser)]
#[command(name = "nessusfile")]
#[command(about = "Browse the hosts and findings of a Nessus scan report.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output, repeat for less (-qq)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every host in the report
    #[command(alias = "hs")]
    Hosts { file: PathBuf },
    /// Show the findings recorded against one host
    #[command(alias = "h")]
    Host {
        file: PathBuf,
        name: String,
        /// Hide findings below this severity (0-4 or a level name)
        #[arg(short, long, default_value = "info")]
        min_severity: Severity,
    },
    /// Group findings across hosts by plugin
    #[command(alias = "p")]
    Plugins {
        file: PathBuf,
        /// Hide plugins below this severity (0-4 or a level name)
        #[arg(short, long, default_value = "info")]
        min_severity: Severity,
    },
    /// Show the server preferences of the scan policy
    #[command(alias = "pref")]
    Preferences { file: PathBuf },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

pub fn load(path: &Path) -> anyhow::Result<ScanSource> {
    ScanSource::load(path).with_context(|| format!("could not load '{}'", path.display()))
}
