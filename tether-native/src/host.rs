//! Native composition host.
//!
//! On native surfaces there are no global scroll listeners: the
//! anchor's own layout-change callback drives re-measurement, and the
//! modal host reports the content size once its layout completes.
//! [`NativeFloating`] owns one positioner plus the settle timer and
//! is driven entirely from the UI loop; the only cross-task traffic
//! is the timer token coming back over the event channel.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use tether_core::{
    AnchorRect, ContentSize, Directive, FitPolicy, Positioner, PositionerConfig, PositioningState,
    SafeAreaInsets, SettleDelay, Viewport,
};

use crate::timer::{HostEvent, SettleTimer};

/// Settle delay native surfaces use before revealing, giving layout a
/// moment to stabilize.
pub const NATIVE_SETTLE_MILLIS: u64 = 50;

/// The native default configuration: header-tolerant bounds, a short
/// fixed settle delay, and a size-zero placeholder until the first
/// layout pass.
#[must_use]
pub fn native_config() -> PositionerConfig {
    PositionerConfig {
        policy: FitPolicy::HeaderTolerant,
        settle: SettleDelay::Millis(NATIVE_SETTLE_MILLIS),
        estimated_size: ContentSize::ZERO,
        ..PositionerConfig::default()
    }
}

/// One open-able floating element on a native surface.
#[derive(Debug)]
pub struct NativeFloating {
    positioner: Positioner,
    events: UnboundedSender<HostEvent>,
    timer: Option<SettleTimer>,
}

impl NativeFloating {
    /// Create a floating element and the event receiver the UI loop
    /// drains into [`Self::handle_event`].
    #[must_use]
    pub fn new(config: PositionerConfig) -> (Self, UnboundedReceiver<HostEvent>) {
        let (events, receiver) = unbounded_channel();
        (
            Self {
                positioner: Positioner::with_config(config),
                events,
                timer: None,
            },
            receiver,
        )
    }

    /// Open with the anchor measurements the trigger's layout
    /// callback reported.
    ///
    /// Native anchors arrive already measured, so the frame-wait the
    /// positioner requests on open collapses into an immediate
    /// measurement report.
    pub fn open_with_anchor(
        &mut self,
        anchor: AnchorRect,
        viewport: Viewport,
        insets: SafeAreaInsets,
    ) {
        let _ = self.positioner.open();
        let directive = self.positioner.anchor_measured(anchor, viewport, insets);
        self.drive(directive);
    }

    /// Report the content size from the modal's layout callback.
    pub fn content_layout(&mut self, size: ContentSize) {
        let directive = self.positioner.content_measured(size);
        self.drive(directive);
    }

    /// Report a fresh anchor measurement from the trigger's
    /// layout-change callback (rotation, keyboard, re-layout).
    pub fn anchor_layout_changed(
        &mut self,
        anchor: AnchorRect,
        viewport: Viewport,
        insets: SafeAreaInsets,
    ) {
        self.positioner.anchor_moved(anchor, viewport, insets);
    }

    /// Handle a timer event from the channel. Returns true when the
    /// content became visible.
    pub fn handle_event(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::RevealDue(token) => {
                self.timer = None;
                self.positioner.reveal_due(token)
            }
        }
    }

    /// Close the floating element, aborting any running settle timer.
    pub fn close(&mut self) {
        self.timer = None;
        self.positioner.reset();
    }

    /// Current externally visible state.
    #[must_use]
    pub fn state(&self) -> PositioningState {
        self.positioner.state()
    }

    /// Whether the content may be revealed.
    #[must_use]
    pub fn is_positioned(&self) -> bool {
        self.positioner.is_positioned()
    }

    fn drive(&mut self, directive: Directive) {
        match directive {
            Directive::None | Directive::ScheduleMeasure(_) => {}
            Directive::ScheduleReveal(token, delay) => {
                // Replacing a running timer aborts it; only the newest
                // token is live anyway.
                self.timer = Some(SettleTimer::start(self.events.clone(), token, delay));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::Phase;

    fn anchor() -> AnchorRect {
        AnchorRect::new(100.0, 50.0, 200.0, 32.0)
    }

    const VIEWPORT: Viewport = Viewport::new(390.0, 844.0);

    #[tokio::test]
    async fn full_native_open_cycle_reveals_after_settle() {
        let (mut floating, mut events) = NativeFloating::new(native_config());
        floating.open_with_anchor(anchor(), VIEWPORT, SafeAreaInsets::new(47.0, 0.0, 34.0, 0.0));
        assert!(!floating.is_positioned());
        // Provisional position exists for the invisible render.
        assert!(floating.state().position.is_some());

        floating.content_layout(ContentSize::new(280.0, 240.0));
        assert!(!floating.is_positioned());

        let event = events.recv().await.expect("settle event");
        assert!(floating.handle_event(event));
        assert!(floating.is_positioned());
    }

    #[tokio::test]
    async fn close_before_settle_keeps_content_hidden() {
        let (mut floating, mut events) = NativeFloating::new(native_config());
        floating.open_with_anchor(anchor(), VIEWPORT, SafeAreaInsets::ZERO);
        floating.content_layout(ContentSize::new(280.0, 240.0));

        floating.close();

        // Whether or not the aborted timer got its message out, the
        // token is dead and nothing reveals.
        if let Ok(event) = events.try_recv() {
            assert!(!floating.handle_event(event));
        }
        assert!(!floating.is_positioned());
        assert_eq!(floating.state().content, ContentSize::ZERO);
    }

    #[tokio::test]
    async fn anchor_relayout_tracks_without_remeasuring() {
        let (mut floating, mut events) = NativeFloating::new(native_config());
        floating.open_with_anchor(anchor(), VIEWPORT, SafeAreaInsets::ZERO);
        floating.content_layout(ContentSize::new(280.0, 240.0));
        let event = events.recv().await.expect("settle event");
        assert!(floating.handle_event(event));

        let before = floating.state().position;
        floating.anchor_layout_changed(
            AnchorRect::new(100.0, 90.0, 200.0, 32.0),
            VIEWPORT,
            SafeAreaInsets::ZERO,
        );
        assert_ne!(floating.state().position, before);
        assert!(floating.is_positioned());
    }

    #[tokio::test]
    async fn reopen_supersedes_stale_settle_timer() {
        let (mut floating, mut events) = NativeFloating::new(native_config());
        floating.open_with_anchor(anchor(), VIEWPORT, SafeAreaInsets::ZERO);
        floating.content_layout(ContentSize::new(280.0, 240.0));

        // Immediately reopen; the first cycle's timer is aborted and
        // its token invalidated.
        floating.open_with_anchor(anchor(), VIEWPORT, SafeAreaInsets::ZERO);
        floating.content_layout(ContentSize::new(280.0, 240.0));

        let event = events.recv().await.expect("settle event");
        let revealed = floating.handle_event(event);
        if revealed {
            assert!(floating.is_positioned());
        } else {
            // A stale first-cycle message slipped out before the
            // abort; the live one is still queued.
            let event = events.recv().await.expect("second settle event");
            assert!(floating.handle_event(event));
        }
        assert_eq!(floating.positioner.phase(), Phase::Revealed);
    }
}
