//! Script-driven draft commands: replay, check, generate

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use super::output::{Output, OutputFormat};
use crate::domain::{DraftStore, SectionPolicy};
use crate::generate::{hand_off, CommandSink, GenerateError, GenerationSink, JsonSink};
use crate::storage::{Config, EditScript};

/// Options selecting where a finished draft goes
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Write the snapshot to a file instead of stdout
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// External generator program (overrides generate.command)
    #[arg(long)]
    pub command: Option<String>,

    /// Argument for the generator program (repeatable)
    #[arg(long = "arg", requires = "command", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Hand off only complete sections
    #[arg(long)]
    pub complete_only: bool,

    /// Pretty-print the JSON snapshot
    #[arg(long)]
    pub pretty: bool,
}

impl GenerateArgs {
    /// Section policy from the flag, falling back to config
    pub fn policy(&self, config: &Config) -> SectionPolicy {
        if self.complete_only {
            SectionPolicy::Complete
        } else {
            config.project.generate.sections
        }
    }

    /// Returns true if the snapshot is printed on stdout
    pub fn writes_stdout(&self, config: &Config) -> bool {
        self.command.is_none() && config.project.generate.command.is_none() && self.out.is_none()
    }

    /// Builds the sink: a generator command, a file, or stdout
    pub fn sink(&self, config: &Config) -> Result<Box<dyn GenerationSink>> {
        if let Some(program) = &self.command {
            return Ok(Box::new(CommandSink::new(program, self.args.clone())));
        }
        if let Some(program) = &config.project.generate.command {
            return Ok(Box::new(CommandSink::new(
                program,
                config.project.generate.args.clone(),
            )));
        }

        let pretty = self.pretty || config.global.pretty;
        match &self.out {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Box::new(
                    JsonSink::new(path.display().to_string(), BufWriter::new(file)).pretty(pretty),
                ))
            }
            None => Ok(Box::new(JsonSink::stdout().pretty(pretty))),
        }
    }

    /// Builds the sink for an interactive session. JSON replies own stdout,
    /// so a snapshot that would go there is written to stderr instead.
    pub fn session_sink(
        &self,
        config: &Config,
        format: OutputFormat,
    ) -> Result<Box<dyn GenerationSink>> {
        if format == OutputFormat::Json && self.writes_stdout(config) {
            let pretty = self.pretty || config.global.pretty;
            return Ok(Box::new(JsonSink::stderr().pretty(pretty)));
        }
        self.sink(config)
    }
}

fn load(output: &Output, script: &Path) -> Result<DraftStore> {
    let script = EditScript::new(script);
    output.verbose_ctx("script", &format!("Replaying {}", script.path().display()));

    let (store, applied) = script.replay()?;
    output.verbose_ctx(
        "script",
        &format!("{} edits applied, version {}", applied, store.version()),
    );
    Ok(store)
}

/// Applies a script and prints the resulting draft
pub fn replay(output: &Output, script: &Path) -> Result<()> {
    let store = load(output, script)?;
    output.draft(&store)?;
    Ok(())
}

/// Applies a script and prints the gates; with `strict`, fails unless
/// the draft can be generated
pub fn check(output: &Output, script: &Path, strict: bool) -> Result<()> {
    let store = load(output, script)?;
    output.gates(&store)?;

    if strict && !store.can_generate() {
        anyhow::bail!("Draft is not ready to generate");
    }
    Ok(())
}

/// Applies a script and hands the draft to the configured sink
pub fn generate(output: &Output, config: &Config, script: &Path, args: &GenerateArgs) -> Result<()> {
    let store = load(output, script)?;
    let policy = args.policy(config);

    // Check the gate before creating output files
    store.snapshot(policy).map_err(GenerateError::from)?;

    let mut sink = args.sink(config)?;
    output.verbose_ctx("generate", &format!("Handing off to {}", sink.name()));
    let receipt = hand_off(&store, policy, sink.as_mut())?;

    // The snapshot itself is the output when it went to stdout
    if args.writes_stdout(config) {
        return Ok(());
    }

    if output.is_json() {
        output.data(&receipt);
    } else {
        output.success(&format!(
            "Handed off {} section(s) to {}",
            receipt.sections, receipt.sink
        ));
        if let Some(response) = &receipt.response {
            output.data(response);
        }
    }

    Ok(())
}
