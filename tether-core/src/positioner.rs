//! The two-phase measure/reveal positioner.
//!
//! Content size is generally unknowable before layout (text wrapping,
//! dynamic item counts), yet position depends on size — whether
//! `bottom` flips to `top` changes with the content height. The
//! positioner therefore drives an open floating element through two
//! phases: render invisibly at a provisional position, measure the
//! real size, recompute, then reveal. A naive single pass produces a
//! visible jump; this protocol does not.
//!
//! ```text
//! Closed ──open──▶ Measuring ──content measured──▶ Positioned
//!    ▲                                                  │
//!    │                                            settle delay
//!    └────────────────reset──────────────── Revealed ◀──┘
//! ```
//!
//! The positioner never touches a platform scheduler itself. Mutation
//! methods return a [`Directive`] the host must act on, and every
//! scheduled task carries a [`TaskToken`]; [`Positioner::reset`]
//! invalidates all outstanding tokens, so a timer that fires after
//! close is dead on arrival. That makes cancellation deterministic
//! without the state machine owning timers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bounds::FitPolicy;
use crate::error::TetherResult;
use crate::geometry::{AnchorRect, ContentSize, Position, SafeAreaInsets, Viewport};
use crate::placement::Placement;
use crate::resolve::{resolve, ResolveOptions};

/// Content-size changes at or below this tolerance (in pixels, per
/// axis) are ignored to avoid oscillation from measurement jitter.
pub const SIZE_TOLERANCE: f32 = 1.0;

/// Unique identifier for a positioner instance, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionerId(Uuid);

impl PositionerId {
    /// Create a new unique positioner ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PositionerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PositionerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle phase of an open floating element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing is open; no position is held.
    Closed,
    /// Open and rendered invisibly at a provisional position while
    /// the real content size is measured.
    Measuring,
    /// Final position computed from the real size; waiting out the
    /// settle delay before revealing.
    Positioned,
    /// Visible at its final position; viewport changes keep the
    /// position current without re-entering `Measuring`.
    Revealed,
}

/// How long to wait between computing the final position and
/// revealing the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettleDelay {
    /// One rendering frame (web).
    NextFrame,
    /// A short fixed delay in milliseconds (native, lets layout
    /// stabilize before the position is read again).
    Millis(u64),
}

/// Token identifying one scheduled task.
///
/// Tokens are never reused; a token is live only while the positioner
/// still expects it. Stale tokens (superseded or cancelled by
/// [`Positioner::reset`]) are ignored on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskToken(u64);

/// Work the host must schedule on behalf of the positioner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    /// Nothing to schedule.
    None,
    /// Wait one frame/microtask so the anchor and content handles are
    /// attached, then measure the anchor (and content, if available)
    /// and report back.
    ScheduleMeasure(TaskToken),
    /// Wait out the settle delay, then deliver the token to
    /// [`Positioner::reveal_due`].
    ScheduleReveal(TaskToken, SettleDelay),
}

/// Configuration for a positioner instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionerConfig {
    /// Requested placement.
    pub placement: Placement,
    /// Gap between anchor edge and content, in pixels.
    pub offset: f32,
    /// Force the content width to the anchor width.
    pub match_width: bool,
    /// Minimum distance kept from the viewport edges.
    pub padding: f32,
    /// Bounds policy for this surface.
    pub policy: FitPolicy,
    /// Assumed content size for the provisional position, used until
    /// the real size is measured. Zero renders a size-less
    /// placeholder.
    pub estimated_size: ContentSize,
    /// Settle delay between final positioning and reveal.
    pub settle: SettleDelay,
}

impl Default for PositionerConfig {
    fn default() -> Self {
        Self {
            placement: Placement::Bottom,
            offset: 8.0,
            match_width: false,
            padding: 12.0,
            policy: FitPolicy::default(),
            estimated_size: ContentSize::ZERO,
            settle: SettleDelay::NextFrame,
        }
    }
}

/// Snapshot of a positioner's externally visible state.
///
/// `is_positioned` is the single flag gating visual reveal: it is
/// true only once a position has been computed from a real measured
/// content size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositioningState {
    /// Anchor snapshot, if measured.
    pub anchor: Option<AnchorRect>,
    /// Last known content size (zero until measured).
    pub content: ContentSize,
    /// Current position, if any.
    pub position: Option<Position>,
    /// Gate for opacity/visibility.
    pub is_positioned: bool,
}

impl PositioningState {
    /// Serialize the snapshot to JSON (debug overlays, logging).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> TetherResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> TetherResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-instance two-phase positioner.
///
/// Single-threaded by construction: each open floating element owns
/// one positioner, and all methods take `&mut self` on the UI thread.
/// Re-entrant viewport events are safe — recomputation is a pure
/// function of the current snapshot, so running twice with the latest
/// inputs is idempotent.
#[derive(Debug)]
pub struct Positioner {
    id: PositionerId,
    config: PositionerConfig,
    phase: Phase,
    anchor: Option<AnchorRect>,
    viewport: Option<Viewport>,
    insets: SafeAreaInsets,
    content: ContentSize,
    position: Option<Position>,
    is_positioned: bool,
    next_token: u64,
    pending_measure: Option<TaskToken>,
    pending_reveal: Option<TaskToken>,
}

impl Positioner {
    /// Create a positioner with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PositionerConfig::default())
    }

    /// Create a positioner with a custom configuration.
    #[must_use]
    pub fn with_config(config: PositionerConfig) -> Self {
        Self {
            id: PositionerId::new(),
            config,
            phase: Phase::Closed,
            anchor: None,
            viewport: None,
            insets: SafeAreaInsets::ZERO,
            content: ContentSize::ZERO,
            position: None,
            is_positioned: false,
            next_token: 0,
            pending_measure: None,
            pending_reveal: None,
        }
    }

    /// This instance's diagnostic ID.
    #[must_use]
    pub const fn id(&self) -> PositionerId {
        self.id
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &PositionerConfig {
        &self.config
    }

    /// Replace the configuration (placement/offset props changed).
    ///
    /// Takes effect on the next recomputation; does not reposition by
    /// itself.
    pub fn set_config(&mut self, config: PositionerConfig) {
        self.config = config;
    }

    /// The current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The current position, if one has been computed.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Whether the content may be revealed.
    #[must_use]
    pub const fn is_positioned(&self) -> bool {
        self.is_positioned
    }

    /// Snapshot of the externally visible state.
    #[must_use]
    pub const fn state(&self) -> PositioningState {
        PositioningState {
            anchor: self.anchor,
            content: self.content,
            position: self.position,
            is_positioned: self.is_positioned,
        }
    }

    /// Open the floating element.
    ///
    /// Re-opening an already open positioner resets it first, so a
    /// fresh open cycle always starts from `Closed`.
    pub fn open(&mut self) -> Directive {
        if self.phase != Phase::Closed {
            self.reset();
        }
        let token = self.issue_token();
        self.pending_measure = Some(token);
        self.phase = Phase::Measuring;
        tracing::debug!(instance = %self.id, "open: waiting a frame before measuring");
        Directive::ScheduleMeasure(token)
    }

    /// Report the anchor measurement taken after [`Self::open`].
    ///
    /// Stores the snapshot and computes a provisional position from
    /// the configured estimated size (or the real size, if the
    /// content happened to be measured first — in that case the
    /// returned directive schedules the reveal).
    pub fn anchor_measured(
        &mut self,
        anchor: AnchorRect,
        viewport: Viewport,
        insets: SafeAreaInsets,
    ) -> Directive {
        if self.phase == Phase::Closed {
            tracing::debug!(instance = %self.id, "anchor measurement after close, ignoring");
            return Directive::None;
        }
        self.pending_measure = None;
        self.anchor = Some(anchor);
        self.viewport = Some(viewport);
        self.insets = insets;
        self.recompute();

        if self.phase == Phase::Measuring && self.content.is_measured() {
            return self.schedule_reveal();
        }
        Directive::None
    }

    /// Report the measured content size from the layout callback.
    ///
    /// Unmeasured sizes (zero height) are ignored, as are changes
    /// within [`SIZE_TOLERANCE`] of the last known size. A real
    /// change re-resolves the position; the first one after opening
    /// also schedules the reveal.
    pub fn content_measured(&mut self, size: ContentSize) -> Directive {
        if self.phase == Phase::Closed {
            tracing::debug!(instance = %self.id, "content layout after close, ignoring");
            return Directive::None;
        }
        if !size.is_measured() {
            return Directive::None;
        }
        if self.content.is_measured()
            && (size.width - self.content.width).abs() <= SIZE_TOLERANCE
            && (size.height - self.content.height).abs() <= SIZE_TOLERANCE
        {
            return Directive::None;
        }

        self.content = size;
        if self.anchor.is_none() {
            // Anchor not measurable yet: hold the size, stay hidden.
            return Directive::None;
        }
        self.recompute();

        match self.phase {
            Phase::Measuring => self.schedule_reveal(),
            // Already positioned or revealed: the element resizes in
            // place (menu filtering, wrapped text); no second reveal.
            Phase::Positioned | Phase::Revealed => Directive::None,
            Phase::Closed => Directive::None,
        }
    }

    /// Deliver a due reveal task.
    ///
    /// Returns true exactly when the token is still live and the
    /// positioner was waiting to reveal; the host then makes the
    /// content visible. Stale tokens (reset, superseded) return
    /// false.
    pub fn reveal_due(&mut self, token: TaskToken) -> bool {
        if self.pending_reveal != Some(token) || self.phase != Phase::Positioned {
            tracing::debug!(instance = %self.id, ?token, "stale reveal token, ignoring");
            return false;
        }
        self.pending_reveal = None;
        self.phase = Phase::Revealed;
        self.is_positioned = true;
        tracing::debug!(instance = %self.id, position = ?self.position, "revealed");
        true
    }

    /// Report a fresh anchor measurement while open (scroll, resize,
    /// anchor re-layout).
    ///
    /// Recomputes the position with the already-known content size
    /// without re-entering `Measuring`.
    pub fn anchor_moved(
        &mut self,
        anchor: AnchorRect,
        viewport: Viewport,
        insets: SafeAreaInsets,
    ) {
        if self.phase == Phase::Closed {
            return;
        }
        self.anchor = Some(anchor);
        self.viewport = Some(viewport);
        self.insets = insets;
        self.recompute();
    }

    /// Close the floating element.
    ///
    /// Invalidates every outstanding task token, clears the content
    /// size back to zero, discards the anchor snapshot, and drops the
    /// reveal gate.
    pub fn reset(&mut self) {
        self.pending_measure = None;
        self.pending_reveal = None;
        self.phase = Phase::Closed;
        self.anchor = None;
        self.viewport = None;
        self.insets = SafeAreaInsets::ZERO;
        self.content = ContentSize::ZERO;
        self.position = None;
        self.is_positioned = false;
        tracing::debug!(instance = %self.id, "reset to closed");
    }

    fn issue_token(&mut self) -> TaskToken {
        self.next_token += 1;
        TaskToken(self.next_token)
    }

    fn schedule_reveal(&mut self) -> Directive {
        let token = self.issue_token();
        self.pending_reveal = Some(token);
        self.phase = Phase::Positioned;
        tracing::debug!(instance = %self.id, settle = ?self.config.settle, "positioned, settling");
        Directive::ScheduleReveal(token, self.config.settle)
    }

    /// Recompute the position from the current snapshot. Uses the
    /// estimated size until the content is actually measured.
    fn recompute(&mut self) {
        let (Some(anchor), Some(viewport)) = (self.anchor, self.viewport) else {
            return;
        };
        let content = if self.content.is_measured() {
            self.content
        } else {
            self.config.estimated_size
        };
        let options = ResolveOptions {
            placement: self.config.placement,
            offset: self.config.offset,
            match_width: self.config.match_width,
            padding: self.config.padding,
            policy: self.config.policy,
        };
        self.position = Some(resolve(&anchor, content, viewport, self.insets, &options));
    }
}

impl Default for Positioner {
    fn default() -> Self {
        Self::new()
    }
}
