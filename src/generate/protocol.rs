//! Generator protocol types
//!
//! External generators communicate via JSON messages over stdin/stdout:
//! one request line in, one response line out.

use serde::{Deserialize, Serialize};

use crate::domain::DraftSnapshot;

/// A message sent to an external generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The operation to perform (always `generate` today)
    pub operation: String,

    /// The draft to generate from
    pub params: DraftSnapshot,
}

impl GenerationRequest {
    pub fn generate(snapshot: DraftSnapshot) -> Self {
        Self {
            operation: "generate".to_string(),
            params: snapshot,
        }
    }
}

/// A response from an external generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Whether the generator accepted the draft
    pub success: bool,

    /// Result data (if success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Error message (if failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What a sink reports after accepting a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReceipt {
    /// Name of the sink that took the snapshot
    pub sink: String,

    /// Number of sections handed off
    pub sections: usize,

    /// Data returned by the generator, if it replied with any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}
