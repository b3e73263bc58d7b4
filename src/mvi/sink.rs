//! Write-only input handles feeding a reducer's action stream.

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Cloneable handle for pushing actions into a reducer.
///
/// Every clone feeds the same stream, so input from several sources (text
/// fields, buttons, timers) is merged in arrival order. Sending never blocks
/// and never fails loudly: once the reducer is gone the action is dropped.
pub struct ActionSink<A> {
    sender: mpsc::UnboundedSender<A>,
}

impl<A: Send + 'static> ActionSink<A> {
    /// Create a sink and the action stream it feeds.
    pub fn channel() -> (Self, UnboundedReceiverStream<A>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, UnboundedReceiverStream::new(receiver))
    }

    /// Push an action. Returns false when the reducer has stopped reading.
    pub fn send(&self, action: A) -> bool {
        if self.sender.send(action).is_err() {
            tracing::debug!("action dropped, reducer no longer running");
            return false;
        }
        true
    }

    /// Whether the receiving reducer has gone away.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<A> Clone for ActionSink<A> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn clones_merge_into_one_stream() {
        let (sink, mut actions) = ActionSink::channel();
        let other = sink.clone();

        assert!(sink.send(1));
        assert!(other.send(2));
        assert!(sink.send(3));
        drop(sink);
        drop(other);

        let received: Vec<i32> = actions.by_ref().collect().await;
        assert_eq!(received, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn send_after_receiver_dropped_reports_false() {
        let (sink, actions) = ActionSink::<u8>::channel();
        drop(actions);
        assert!(sink.is_closed());
        assert!(!sink.send(1));
    }
}
