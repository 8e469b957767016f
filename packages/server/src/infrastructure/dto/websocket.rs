//! Frames synthesized by the relay.
//!
//! Everything else on the wire is client payload relayed verbatim.

use serde::{Deserialize, Serialize};

/// Sent to a client whose frame could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFrame {
    pub error: String,
}

impl ErrorFrame {
    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        Self {
            error: format!("malformed frame: {}", reason),
        }
    }
}
