//! Platform capability for measuring anchors and viewports.
//!
//! Anchor measurement is the only platform-specific input the
//! positioning kernel needs: DOM elements are measured with
//! `getBoundingClientRect`, native views through their layout
//! callbacks. Implementations are selected at composition time — the
//! kernel holds a concrete provider, never a runtime type check.

use crate::error::TetherResult;
use crate::geometry::{AnchorRect, SafeAreaInsets, Viewport};

/// Measures anchors and the viewport in a shared coordinate space.
pub trait AnchorProvider {
    /// The opaque anchor handle this provider knows how to measure
    /// (a DOM element, a native view tag, ...).
    type Anchor;

    /// Measure the anchor's bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TetherError::AnchorUnmeasurable`] when the
    /// handle cannot be measured (detached element, view not laid
    /// out). Callers log the diagnostic and leave the content hidden;
    /// there is no retry — the next open/layout/scroll event measures
    /// again.
    fn measure(&self, anchor: &Self::Anchor) -> TetherResult<AnchorRect>;

    /// Current visible viewport dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TetherError::PlatformUnavailable`] when the
    /// platform surface cannot be reached.
    fn viewport(&self) -> TetherResult<Viewport>;

    /// Safe-area reservations for this surface. Zero by default
    /// (web).
    fn safe_area(&self) -> SafeAreaInsets {
        SafeAreaInsets::ZERO
    }
}
