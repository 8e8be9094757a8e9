//! # Command-Line Interface
//!
//! The presentation layer: binds textual edits to a [`DraftStore`] and
//! renders the result.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `replay <script>` | Apply a JSONL edit script, print the draft |
//! | `check <script>` | Apply a script, print gates and blockers |
//! | `generate <script>` | Apply a script, hand the draft off |
//! | `session` | Interactive editing on stdin |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr:
//! ```bash
//! inkan --verbose check draft.jsonl
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.
//!
//! [`DraftStore`]: crate::domain::DraftStore

mod app;
mod draft_cmd;
mod logging;
mod output;
mod session;

pub use app::{run, Cli, Commands};
pub use draft_cmd::GenerateArgs;
pub use output::{Output, OutputFormat};
pub use session::Session;
