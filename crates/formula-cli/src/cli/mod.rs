//! CLI for the rusty-relay-client formula.

mod args;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formula_core::config::{self, FormulaConfig};
use std::path::PathBuf;

pub use args::{PlatformArgs, VarsArgs};
use commands::{
    run_checksum, run_completions, run_install, run_man, run_render, run_resolve, run_test,
};

/// Top-level CLI for the rusty-relay-client formula.
#[derive(Debug, Parser)]
#[command(name = "relay-formula")]
#[command(about = "Resolve, verify and install rusty-relay-client release binaries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show the download URL and checksum selected for a platform.
    Resolve {
        #[command(flatten)]
        vars: VarsArgs,
        #[command(flatten)]
        platform: PlatformArgs,
        /// Release download prefix (overrides config).
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Print the target as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Download, verify and install the binary, then smoke-test it.
    Install {
        #[command(flatten)]
        vars: VarsArgs,
        #[command(flatten)]
        platform: PlatformArgs,
        /// Release download prefix (overrides config).
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Directory to install into (default: config bin_dir or ~/.local/bin).
        #[arg(long, value_name = "DIR")]
        bin_dir: Option<PathBuf>,
        /// Do not run `rusty-relay-client --help` after installing.
        #[arg(long)]
        skip_test: bool,
    },

    /// Print the package-manager recipe with template variables filled in.
    Render {
        #[command(flatten)]
        vars: VarsArgs,
    },

    /// Run the smoke test against an installed binary.
    Test {
        /// Directory the binary was installed into.
        #[arg(long, value_name = "DIR")]
        bin_dir: Option<PathBuf>,
    },

    /// Compute SHA-256 of a file (e.g. a release archive).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print shell completions.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Print a man page.
    Man,
}

impl CliCommand {
    /// Commands that read bin_dir, base_url or transfer limits from config.toml.
    pub fn needs_config(&self) -> bool {
        matches!(
            self,
            CliCommand::Resolve { .. } | CliCommand::Install { .. } | CliCommand::Test { .. }
        )
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = if cli.command.needs_config() {
            let cfg = config::load_or_init()?;
            tracing::debug!("loaded config: {:?}", cfg);
            cfg
        } else {
            FormulaConfig::default()
        };

        match cli.command {
            CliCommand::Resolve {
                vars,
                platform,
                base_url,
                json,
            } => run_resolve(&cfg, &vars, &platform, base_url.as_deref(), json)?,
            CliCommand::Install {
                vars,
                platform,
                base_url,
                bin_dir,
                skip_test,
            } => run_install(&cfg, &vars, &platform, base_url.as_deref(), bin_dir, skip_test)?,
            CliCommand::Render { vars } => run_render(&vars)?,
            CliCommand::Test { bin_dir } => run_test(&cfg, bin_dir)?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
