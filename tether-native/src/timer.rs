//! Cancellable settle timers.
//!
//! Native layout needs a short fixed delay between "position computed
//! from the real size" and "reveal" so the position is stable when it
//! is read again. The timer runs on a tokio task and delivers the
//! positioner's token back to the UI loop over a channel; it never
//! touches the positioner directly. Dropping the handle aborts the
//! task, so a close racing the timer can at worst deliver a token the
//! positioner already invalidated.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use tether_core::{SettleDelay, TaskToken};

/// Events delivered back to the UI loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The settle delay for this token elapsed; forward it to
    /// [`tether_core::Positioner::reveal_due`].
    RevealDue(TaskToken),
}

/// Nominal frame duration used when a web-style `NextFrame` settle
/// delay reaches a native surface.
pub const FRAME_MILLIS: u64 = 16;

/// A running settle timer; aborted when dropped.
#[derive(Debug)]
pub struct SettleTimer {
    handle: Option<JoinHandle<()>>,
}

impl SettleTimer {
    /// Start a timer that sends `RevealDue(token)` on `events` after
    /// the delay.
    ///
    /// Must be called within a tokio runtime.
    #[must_use]
    pub fn start(events: UnboundedSender<HostEvent>, token: TaskToken, delay: SettleDelay) -> Self {
        let duration = match delay {
            SettleDelay::NextFrame => Duration::from_millis(FRAME_MILLIS),
            SettleDelay::Millis(ms) => Duration::from_millis(ms),
        };
        tracing::debug!(?token, ?duration, "settle timer started");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            // Receiver gone means the host shut down; nothing to do.
            let _ = events.send(HostEvent::RevealDue(token));
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Abort the timer. Harmless if it already fired.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for SettleTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::{ContentSize, Directive, Positioner};

    fn reveal_token(positioner: &mut Positioner) -> TaskToken {
        use tether_core::{AnchorRect, SafeAreaInsets, Viewport};
        let _ = positioner.open();
        let _ = positioner.anchor_measured(
            AnchorRect::new(100.0, 50.0, 200.0, 32.0),
            Viewport::new(800.0, 600.0),
            SafeAreaInsets::ZERO,
        );
        match positioner.content_measured(ContentSize::new(150.0, 80.0)) {
            Directive::ScheduleReveal(token, _) => token,
            other => panic!("expected reveal directive, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn timer_delivers_token_after_delay() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut positioner = Positioner::new();
        let token = reveal_token(&mut positioner);

        let _timer = SettleTimer::start(tx, token, SettleDelay::Millis(5));
        let event = rx.recv().await.expect("timer event");
        assert_eq!(event, HostEvent::RevealDue(token));
        assert!(positioner.reveal_due(token));
    }

    #[tokio::test]
    async fn cancelled_timer_never_fires() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut positioner = Positioner::new();
        let token = reveal_token(&mut positioner);

        let mut timer = SettleTimer::start(tx, token, SettleDelay::Millis(50));
        timer.cancel();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn late_delivery_after_reset_is_ignored() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut positioner = Positioner::new();
        let token = reveal_token(&mut positioner);

        let _timer = SettleTimer::start(tx, token, SettleDelay::Millis(5));
        positioner.reset();

        let event = rx.recv().await.expect("timer event");
        let HostEvent::RevealDue(token) = event;
        // Token invalidated by the reset: dead on arrival.
        assert!(!positioner.reveal_due(token));
        assert!(!positioner.is_positioned());
    }
}
