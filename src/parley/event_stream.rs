//! Live event channel between one debate session and one HTTP consumer.
//!
//! Single producer (the session's task), single consumer (the transport layer
//! turning frames into wire lines). Frames are delivered in emission order;
//! the channel is unbounded because the source design carries no backpressure
//! policy of its own — the transport's queue is the only buffer.
//!
//! A disconnected consumer is not an error: `push` silently drops and the
//! producer keeps running unless the session's disconnect policy says
//! otherwise (see [`DisconnectPolicy`](crate::parley::orchestrator::DisconnectPolicy)).

use tokio::sync::mpsc;

use crate::parley::transcript::DebateEvent;

/// One frame on the live stream: an event, or one of the two terminal
/// signals.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    Event(DebateEvent),
    /// Normal end-of-stream.
    Completed,
    /// Fatal end-of-stream with a human-readable message.
    Failed(String),
}

/// Producer half, owned by the session task.
pub struct EventStream {
    tx: mpsc::UnboundedSender<StreamFrame>,
}

impl EventStream {
    /// Push an event to the consumer. If the consumer is gone the frame is
    /// dropped; the session does not stop here.
    pub fn push(&self, event: DebateEvent) {
        let _ = self.tx.send(StreamFrame::Event(event));
    }

    /// Close the stream with a normal end-of-stream signal.
    pub fn complete(self) {
        let _ = self.tx.send(StreamFrame::Completed);
    }

    /// Close the stream with an error signal.
    pub fn fail(self, message: impl Into<String>) {
        let _ = self.tx.send(StreamFrame::Failed(message.into()));
    }

    /// Whether the consumer has hung up. Used by the cooperative disconnect
    /// policy to abandon a session nobody is watching.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half, handed to the transport layer.
pub struct EventSubscriber {
    rx: mpsc::UnboundedReceiver<StreamFrame>,
}

impl EventSubscriber {
    /// Next frame in emission order, or `None` once the producer is done and
    /// the channel has drained.
    pub async fn next_frame(&mut self) -> Option<StreamFrame> {
        self.rx.recv().await
    }
}

/// Create a connected producer/consumer pair for one session.
pub fn event_stream() -> (EventStream, EventSubscriber) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventStream { tx }, EventSubscriber { rx })
}
