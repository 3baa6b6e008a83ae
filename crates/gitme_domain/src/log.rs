//! Progress notifications flowing from the pipeline to its caller

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogKind {
    Info,
    Success,
    Error,
    Warning,
}

/// A single progress message; never mutated after emission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub message: String,
    pub kind: LogKind,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    pub fn new(message: impl Into<String>, kind: LogKind) -> Self {
        Self { message: message.into(), kind, timestamp: Utc::now() }
    }
}

/// Caller-supplied destination for progress messages
pub trait LogSink: Send + Sync {
    fn emit(&self, event: LogEvent);

    fn info(&self, message: &str) {
        self.emit(LogEvent::new(message, LogKind::Info));
    }

    fn success(&self, message: &str) {
        self.emit(LogEvent::new(message, LogKind::Success));
    }

    fn warning(&self, message: &str) {
        self.emit(LogEvent::new(message, LogKind::Warning));
    }

    fn error(&self, message: &str) {
        self.emit(LogEvent::new(message, LogKind::Error));
    }
}

/// Writes progress to the process log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, event: LogEvent) {
        match event.kind {
            LogKind::Info => tracing::info!("{}", event.message),
            LogKind::Success => tracing::info!("✅ {}", event.message),
            LogKind::Warning => tracing::warn!("{}", event.message),
            LogKind::Error => tracing::error!("{}", event.message),
        }
    }
}

/// Keeps every event in emission order
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, event: LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
