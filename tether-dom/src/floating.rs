//! Composition host tying the positioner to the DOM.
//!
//! [`FloatingElement`] is what Popover, Menu, Select, Tooltip, and
//! the breadcrumb overflow menu build on: it owns one
//! [`Positioner`], measures the anchor through
//! [`DomAnchorProvider`], schedules the measure/settle suspension
//! points, and keeps the position current through scroll and resize
//! while open. The caller renders the content at the reported
//! position and gates visibility on `is_positioned`.

use std::cell::RefCell;
use std::rc::Rc;

use tether_core::{
    ContentSize, Directive, AnchorProvider, Positioner, PositionerConfig, PositioningState,
    TetherResult,
};

use crate::measure::DomAnchorProvider;
use crate::schedule::{next_frame, schedule, ScheduledTask};
use crate::watcher::DomViewportWatcher;

/// Default assumed content size before the first layout pass, in
/// pixels. Keeps the provisional position in a plausible spot for
/// typical popover content.
pub const DEFAULT_ESTIMATED_SIZE: ContentSize = ContentSize::new(200.0, 100.0);

/// The web default configuration: standard bounds policy, next-frame
/// settle, and a plausible estimated content size.
#[must_use]
pub fn dom_config() -> PositionerConfig {
    PositionerConfig {
        estimated_size: DEFAULT_ESTIMATED_SIZE,
        ..PositionerConfig::default()
    }
}

struct Shared {
    positioner: RefCell<Positioner>,
    provider: DomAnchorProvider,
    anchor: web_sys::Element,
    content: RefCell<Option<web_sys::Element>>,
    pending: RefCell<Option<ScheduledTask>>,
    on_update: Box<dyn Fn(&PositioningState)>,
}

impl Shared {
    fn notify(&self) {
        let state = self.positioner.borrow().state();
        (self.on_update)(&state);
    }
}

/// One open-able floating element anchored to a DOM element.
pub struct FloatingElement {
    shared: Rc<Shared>,
    watcher: Option<DomViewportWatcher>,
}

impl FloatingElement {
    /// Create a floating element for the given anchor.
    ///
    /// `on_update` is invoked whenever the externally visible state
    /// changes; the caller applies `position` and gates
    /// opacity/visibility on `is_positioned`.
    ///
    /// # Errors
    ///
    /// Returns [`tether_core::TetherError::PlatformUnavailable`]
    /// outside a browser context.
    pub fn new(
        anchor: web_sys::Element,
        config: PositionerConfig,
        on_update: impl Fn(&PositioningState) + 'static,
    ) -> TetherResult<Self> {
        Ok(Self {
            shared: Rc::new(Shared {
                positioner: RefCell::new(Positioner::with_config(config)),
                provider: DomAnchorProvider::new()?,
                anchor,
                content: RefCell::new(None),
                pending: RefCell::new(None),
                on_update: Box::new(on_update),
            }),
            watcher: None,
        })
    }

    /// Register the floating content element so its rendered size can
    /// be measured during the invisible first pass.
    pub fn set_content_element(&self, content: web_sys::Element) {
        *self.shared.content.borrow_mut() = Some(content);
    }

    /// Open the floating element and start tracking the viewport.
    ///
    /// # Errors
    ///
    /// Returns [`tether_core::TetherError::PlatformUnavailable`] when
    /// viewport listeners cannot be attached.
    pub fn open(&mut self) -> TetherResult<()> {
        let directive = self.shared.positioner.borrow_mut().open();
        self.shared.notify();

        let shared = Rc::clone(&self.shared);
        self.watcher = Some(DomViewportWatcher::new(move || remeasure(&shared))?);

        drive(&self.shared, directive);
        Ok(())
    }

    /// Report the measured content size (layout/resize observation).
    pub fn set_content_size(&self, width: f32, height: f32) {
        let directive = self
            .shared
            .positioner
            .borrow_mut()
            .content_measured(ContentSize::new(width, height));
        self.shared.notify();
        drive(&self.shared, directive);
    }

    /// Close the floating element.
    ///
    /// Detaches viewport listeners and cancels any pending scheduled
    /// work synchronously, then resets the positioner.
    pub fn close(&mut self) {
        self.watcher = None;
        self.shared.pending.borrow_mut().take();
        self.shared.positioner.borrow_mut().reset();
        self.shared.notify();
    }

    /// Current externally visible state.
    #[must_use]
    pub fn state(&self) -> PositioningState {
        self.shared.positioner.borrow().state()
    }

    /// Whether the content may be revealed.
    #[must_use]
    pub fn is_positioned(&self) -> bool {
        self.shared.positioner.borrow().is_positioned()
    }
}

impl Drop for FloatingElement {
    fn drop(&mut self) {
        // Watcher and pending task detach in their own Drops; the
        // positioner needs no teardown beyond that.
        self.shared.pending.borrow_mut().take();
    }
}

/// Re-measure the anchor on a viewport change and reposition in
/// place.
fn remeasure(shared: &Rc<Shared>) {
    let rect = match shared.provider.measure(&shared.anchor) {
        Ok(rect) => rect,
        Err(e) => {
            tracing::warn!(error = %e, "anchor unmeasurable during viewport change");
            return;
        }
    };
    let viewport = match shared.provider.viewport() {
        Ok(viewport) => viewport,
        Err(e) => {
            tracing::warn!(error = %e, "viewport unreadable during viewport change");
            return;
        }
    };
    shared
        .positioner
        .borrow_mut()
        .anchor_moved(rect, viewport, shared.provider.safe_area());
    shared.notify();
}

/// Act on a positioner directive by scheduling the requested work.
fn drive(shared: &Rc<Shared>, directive: Directive) {
    match directive {
        Directive::None => {}
        Directive::ScheduleMeasure(_) => {
            let task = {
                let shared = Rc::clone(shared);
                next_frame(move || measure_pass(&shared))
            };
            store_task(shared, task);
        }
        Directive::ScheduleReveal(token, delay) => {
            let task = {
                let shared = Rc::clone(shared);
                schedule(delay, move || {
                    shared.pending.borrow_mut().take();
                    if shared.positioner.borrow_mut().reveal_due(token) {
                        shared.notify();
                    }
                })
            };
            store_task(shared, task);
        }
    }
}

/// First measurement pass, one frame after the invisible mount.
fn measure_pass(shared: &Rc<Shared>) {
    shared.pending.borrow_mut().take();

    let rect = match shared.provider.measure(&shared.anchor) {
        Ok(rect) => rect,
        Err(e) => {
            // No sensible position without an anchor: log and render
            // nothing; the content stays hidden.
            tracing::warn!(error = %e, "anchor unmeasurable, skipping positioning");
            return;
        }
    };
    let viewport = match shared.provider.viewport() {
        Ok(viewport) => viewport,
        Err(e) => {
            tracing::warn!(error = %e, "viewport unreadable, skipping positioning");
            return;
        }
    };

    let directive = shared.positioner.borrow_mut().anchor_measured(
        rect,
        viewport,
        shared.provider.safe_area(),
    );
    shared.notify();
    drive(shared, directive);

    // The content may already have rendered invisibly; measure it in
    // the same pass so the reveal is not gated on an extra callback.
    let content_size = shared.content.borrow().as_ref().map(content_rect_size);
    if let Some(size) = content_size {
        let directive = shared.positioner.borrow_mut().content_measured(size);
        shared.notify();
        drive(shared, directive);
    }
}

#[allow(clippy::cast_possible_truncation)] // CSS pixels fit f32
fn content_rect_size(element: &web_sys::Element) -> ContentSize {
    let rect = element.get_bounding_client_rect();
    ContentSize::new(rect.width() as f32, rect.height() as f32)
}

fn store_task(shared: &Rc<Shared>, task: TetherResult<ScheduledTask>) {
    match task {
        Ok(task) => {
            *shared.pending.borrow_mut() = Some(task);
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to schedule positioning work");
        }
    }
}
