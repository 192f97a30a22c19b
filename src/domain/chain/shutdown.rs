//! Cooperative shutdown signal used to cancel pending backoff delays

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Owner side of the shutdown signal, held by the host process
#[derive(Debug)]
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self { sender }
    }

    /// New signal handle observing this controller
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            receiver: Some(self.sender.subscribe()),
        }
    }

    /// Trigger shutdown; idempotent
    pub fn shutdown(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.sender.borrow()
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable observer of a [`ShutdownController`]
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    receiver: Option<watch::Receiver<bool>>,
}

impl ShutdownSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        Self::default()
    }

    pub fn is_triggered(&self) -> bool {
        self.receiver
            .as_ref()
            .map(|receiver| *receiver.borrow())
            .unwrap_or(false)
    }

    /// Sleep for `duration` unless shutdown fires first.
    ///
    /// Returns `true` when the full delay elapsed and `false` when it was
    /// interrupted.
    pub async fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;

        let Some(receiver) = &self.receiver else {
            tokio::time::sleep_until(deadline).await;
            return true;
        };

        let mut receiver = receiver.clone();

        let interrupted = tokio::select! {
            _ = tokio::time::sleep_until(deadline) => false,
            changed = receiver.wait_for(|stopped| *stopped) => changed.is_ok(),
        };

        if interrupted {
            return false;
        }

        // Controller dropped without firing: finish the delay
        tokio::time::sleep_until(deadline).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant as StdInstant;

    #[tokio::test]
    async fn test_never_signal_sleeps_full_duration() {
        let signal = ShutdownSignal::never();
        let start = StdInstant::now();

        assert!(signal.sleep(Duration::from_millis(30)).await);
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert!(!signal.is_triggered());
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_sleep() {
        let controller = ShutdownController::new();
        let signal = controller.signal();

        let sleeper = tokio::spawn(async move {
            let start = StdInstant::now();
            let completed = signal.sleep(Duration::from_secs(30)).await;
            (completed, start.elapsed())
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.shutdown();

        let (completed, elapsed) = sleeper.await.unwrap();
        assert!(!completed);
        assert!(elapsed < Duration::from_secs(5));
        assert!(controller.is_shutdown());
    }

    #[tokio::test]
    async fn test_already_triggered_returns_immediately() {
        let controller = ShutdownController::new();
        controller.shutdown();

        let signal = controller.signal();
        assert!(signal.is_triggered());
        assert!(!signal.sleep(Duration::from_secs(30)).await);
    }
}
