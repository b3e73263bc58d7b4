//! Read-only stream adapters for derived observables.
//!
//! State streams replay the latest value and then every change. Consumers
//! derive their own views with `map` and these adapters:
//! - [`ObserveExt::distinct_until_changed`] drops consecutive duplicates
//! - [`ObserveExt::debounce`] waits for a quiet period before emitting

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use tokio::time::{Instant, Sleep};

/// Extension methods for derived state streams.
pub trait ObserveExt: Stream + Sized {
    /// Skip items equal to the previously emitted one.
    fn distinct_until_changed(self) -> DistinctUntilChanged<Self>
    where
        Self::Item: Clone + PartialEq,
    {
        DistinctUntilChanged {
            inner: self,
            last: None,
        }
    }

    /// Emit an item only after `delay` has passed without a newer one.
    ///
    /// When the source ends, a pending item is flushed immediately.
    fn debounce(self, delay: Duration) -> Debounce<Self> {
        Debounce {
            inner: self,
            delay,
            pending: None,
            deadline: Box::pin(tokio::time::sleep(delay)),
            source_done: false,
        }
    }
}

impl<S: Stream> ObserveExt for S {}

/// Stream returned by [`ObserveExt::distinct_until_changed`].
pub struct DistinctUntilChanged<S: Stream> {
    inner: S,
    last: Option<S::Item>,
}

impl<S> Stream for DistinctUntilChanged<S>
where
    S: Stream + Unpin,
    S::Item: Clone + PartialEq + Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if this.last.as_ref() == Some(&item) {
                        continue;
                    }
                    this.last = Some(item.clone());
                    return Poll::Ready(Some(item));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Stream returned by [`ObserveExt::debounce`].
pub struct Debounce<S: Stream> {
    inner: S,
    delay: Duration,
    pending: Option<S::Item>,
    deadline: Pin<Box<Sleep>>,
    source_done: bool,
}

impl<S> Stream for Debounce<S>
where
    S: Stream + Unpin,
    S::Item: Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        // Take everything the source has ready; only the newest survives.
        while !this.source_done {
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    this.pending = Some(item);
                    let next_deadline = Instant::now() + this.delay;
                    this.deadline.as_mut().reset(next_deadline);
                }
                Poll::Ready(None) => this.source_done = true,
                Poll::Pending => break,
            }
        }

        if this.source_done {
            return Poll::Ready(this.pending.take());
        }

        if this.pending.is_some() && this.deadline.as_mut().poll(cx).is_ready() {
            return Poll::Ready(this.pending.take());
        }

        Poll::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream::{self, StreamExt};
    use tokio::sync::mpsc;
    use tokio_stream::wrappers::UnboundedReceiverStream;

    #[tokio::test]
    async fn distinct_drops_consecutive_duplicates_only() {
        let items: Vec<u8> = stream::iter(vec![1, 1, 2, 2, 2, 1, 3, 3])
            .distinct_until_changed()
            .collect()
            .await;
        assert_eq!(items, vec![1, 2, 1, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_coalesces_rapid_values() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut debounced = UnboundedReceiverStream::new(rx).debounce(Duration::from_millis(100));

        tx.send("a").unwrap();
        tx.send("ab").unwrap();
        tx.send("abc").unwrap();

        let started = Instant::now();
        assert_eq!(debounced.next().await, Some("abc"));
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_restarts_timer_on_new_value() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut debounced = UnboundedReceiverStream::new(rx).debounce(Duration::from_millis(100));

        let producer = tokio::spawn(async move {
            tx.send(1).unwrap();
            tokio::time::sleep(Duration::from_millis(60)).await;
            tx.send(2).unwrap();
            tokio::time::sleep(Duration::from_millis(60)).await;
            tx.send(3).unwrap();
            tokio::time::sleep(Duration::from_millis(500)).await;
            tx.send(4).unwrap();
        });

        assert_eq!(debounced.next().await, Some(3));
        assert_eq!(debounced.next().await, Some(4));
        producer.await.unwrap();
        assert_eq!(debounced.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_flushes_pending_when_source_ends() {
        let items: Vec<u8> = stream::iter(vec![1, 2, 3])
            .debounce(Duration::from_secs(10))
            .collect()
            .await;
        assert_eq!(items, vec![3]);
    }
}
