use serde::{Deserialize, Serialize};

use crate::log::{LogEvent, LogKind};

/// Message pushed to a streaming client.
///
/// Serialises as `{"type": "log", "message", "logType"}`,
/// `{"type": "complete", "readme"}` or `{"type": "error", "message"}`. A
/// stream carries any number of `Log` messages followed by exactly one
/// terminal message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamMessage {
    Log {
        message: String,
        #[serde(rename = "logType")]
        log_type: LogKind,
    },
    Complete {
        readme: String,
    },
    Error {
        message: String,
    },
}

impl StreamMessage {
    pub fn complete(readme: impl Into<String>) -> Self {
        Self::Complete { readme: readme.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }

    /// `Complete` and `Error` close the stream
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Log { .. })
    }
}

impl From<LogEvent> for StreamMessage {
    fn from(event: LogEvent) -> Self {
        Self::Log { message: event.message, log_type: event.kind }
    }
}
