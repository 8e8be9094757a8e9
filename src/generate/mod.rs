//! # Generation Hand-off
//!
//! The boundary between a finished draft and whatever turns it into a
//! document.
//!
//! ## Protocol
//!
//! ```text
//! inkan                        Generator Binary
//!  │                               │
//!  ├── Spawn: <generate.command>   │
//!  │                               │
//!  ├── Stdin: {"operation": "generate", "params": {"documentInfo": {...}, "sections": [...]}}
//!  │                               │
//!  └── Stdout: {"success": true, "data": {...}}
//! ```
//!
//! Without a configured command the snapshot is written as JSON to stdout
//! or a file.
//!
//! ## Key Types
//!
//! - [`GenerationSink`] - Trait for anything that receives a snapshot
//! - [`JsonSink`] - Writes snapshots to a writer
//! - [`CommandSink`] - Pipes snapshots to an external program
//! - [`hand_off`] - Gate-checked snapshot + sink call

mod protocol;
mod sink;

pub use protocol::{GenerationReceipt, GenerationRequest, GenerationResponse};
pub use sink::{hand_off, CommandSink, GenerateError, GenerationSink, JsonSink};
