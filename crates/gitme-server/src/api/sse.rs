//! Progress sink backed by the SSE channel

use gitme_domain::{LogEvent, LogSink, StreamMessage};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Forwards every log event to the streaming client as a `log` message
pub struct ChannelSink {
    sender: UnboundedSender<StreamMessage>,
    request_id: String,
}

impl ChannelSink {
    pub fn new(sender: UnboundedSender<StreamMessage>, request_id: impl Into<String>) -> Self {
        Self { sender, request_id: request_id.into() }
    }

    /// Send a message; a disconnected client is not an error
    pub fn send(&self, message: StreamMessage) {
        if self.sender.send(message).is_err() {
            debug!(request_id = %self.request_id, "Stream client disconnected");
        }
    }
}

impl LogSink for ChannelSink {
    fn emit(&self, event: LogEvent) {
        debug!(request_id = %self.request_id, kind = %event.kind, "{}", event.message);
        self.send(StreamMessage::from(event));
    }
}

#[cfg(test)]
mod tests {
    use gitme_domain::LogKind;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn test_channel_sink_forwards_log_messages() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let fixture = ChannelSink::new(tx, "req");

        fixture.warning("Skipping large file: big.txt");
        fixture.send(StreamMessage::complete("# done"));
        drop(fixture);

        let mut actual = Vec::new();
        while let Ok(message) = rx.try_recv() {
            actual.push(message);
        }
        let expected = vec![
            StreamMessage::Log {
                message: "Skipping large file: big.txt".to_string(),
                log_type: LogKind::Warning,
            },
            StreamMessage::complete("# done"),
        ];

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_send_after_disconnect_is_silent() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let fixture = ChannelSink::new(tx, "req");

        fixture.info("nobody is listening");
    }
}
