//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::draft_cmd::{self, GenerateArgs};
use super::logging::init_logging;
use super::output::{Output, OutputFormat};
use super::session;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "inkan")]
#[command(author, version, about = "Assemble document drafts and hand them off for generation")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply an edit script and show the resulting draft
    Replay {
        /// JSONL edit script ("-" for stdin)
        script: PathBuf,
    },

    /// Apply an edit script and show whether the draft can be generated
    Check {
        /// JSONL edit script ("-" for stdin)
        script: PathBuf,

        /// Exit with an error unless the draft can be generated
        #[arg(long)]
        strict: bool,
    },

    /// Apply an edit script and hand the draft off for generation
    Generate {
        /// JSONL edit script ("-" for stdin)
        script: PathBuf,

        #[command(flatten)]
        sink: GenerateArgs,
    },

    /// Edit a draft interactively, one command per line
    Session {
        #[command(flatten)]
        sink: GenerateArgs,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    let format = cli.format.unwrap_or(config.global.default_format);
    let output = Output::new(format);

    output.verbose("Inkan starting");
    if let Some(path) = &config.project_file {
        output.verbose_ctx("config", &format!("Using project config: {}", path.display()));
    }

    match cli.command {
        Commands::Replay { script } => draft_cmd::replay(&output, &script)?,
        Commands::Check { script, strict } => draft_cmd::check(&output, &script, strict)?,
        Commands::Generate { script, sink } => {
            draft_cmd::generate(&output, &config, &script, &sink)?
        }
        Commands::Session { sink: args } => {
            let policy = args.policy(&config);
            let sink = args.session_sink(&config, output.format())?;
            output.verbose_ctx(
                "session",
                &format!("Starting session, hand-off to {} ({})", sink.name(), policy.as_str()),
            );
            session::run(policy, sink, output.format())?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
