use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Periodic tick source for hosts that drive `QuizSession::tick` from a tokio runtime.
///
/// Each period sends `()` on the returned channel. Cancelling or dropping the ticker
/// aborts the task, which closes the channel, so a discarded session never receives a
/// late tick.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn start(period: Duration) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately
            ticks.tick().await;
            loop {
                ticks.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        (Self { handle }, rx)
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticker_sends_ticks() {
        let (ticker, mut rx) = Ticker::start(Duration::from_millis(5));
        assert_eq!(rx.recv().await, Some(()));
        assert_eq!(rx.recv().await, Some(()));
        assert!(ticker.is_running());
    }

    #[tokio::test]
    async fn test_dropping_ticker_closes_channel() {
        let (ticker, mut rx) = Ticker::start(Duration::from_millis(5));
        drop(ticker);
        // buffered ticks may still drain, then the channel reports closed
        let drained = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_stops_task() {
        let (ticker, mut rx) = Ticker::start(Duration::from_millis(5));
        ticker.cancel();
        let drained = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }
}
