//! Geometry primitives shared by all positioning code.
//!
//! All values are logical pixels in a single shared coordinate space
//! (the viewport on web, the window on native) with the origin at the
//! top-left corner. Rects and sizes are immutable snapshots: they are
//! only ever replaced wholesale, never partially mutated, so every
//! recomputation is a pure function of its current inputs.

use serde::{Deserialize, Serialize};

/// The anchor's bounding box at measurement time.
///
/// Produced by an [`crate::AnchorProvider`] and re-measured on every
/// open and on every viewport-change event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorRect {
    /// Left edge in the shared coordinate space.
    pub x: f32,
    /// Top edge in the shared coordinate space.
    pub y: f32,
    /// Anchor width in pixels.
    pub width: f32,
    /// Anchor height in pixels.
    pub height: f32,
}

impl AnchorRect {
    /// Create a new anchor rect.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal center.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Measured size of the floating content.
///
/// Starts at [`ContentSize::ZERO`] (unmeasured) and is updated once
/// actual layout completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentSize {
    /// Content width in pixels.
    pub width: f32,
    /// Content height in pixels.
    pub height: f32,
}

impl ContentSize {
    /// The unmeasured size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new content size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether actual layout has produced this size.
    ///
    /// A zero height means the content has not been laid out yet;
    /// positions computed from it are provisional.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.height > 0.0
    }
}

impl Default for ContentSize {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Platform safe-area reservations (notches, home indicator).
///
/// Zero on web.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SafeAreaInsets {
    /// Reserved space at the top of the screen.
    pub top: f32,
    /// Reserved space at the right of the screen.
    pub right: f32,
    /// Reserved space at the bottom of the screen.
    pub bottom: f32,
    /// Reserved space at the left of the screen.
    pub left: f32,
}

impl SafeAreaInsets {
    /// No reserved space on any edge.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Create insets for all four edges.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// The visible viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Create a new viewport.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A computed placement result.
///
/// `width` is set only when the caller requested anchor-width
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Distance from the top of the shared coordinate space.
    pub top: f32,
    /// Distance from the left of the shared coordinate space.
    pub left: f32,
    /// Forced width, present only under anchor-width matching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

impl Position {
    /// Create a position with no forced width.
    #[must_use]
    pub const fn new(top: f32, left: f32) -> Self {
        Self {
            top,
            left,
            width: None,
        }
    }

    /// Attach a forced width (anchor-width matching).
    #[must_use]
    pub const fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_rect_edges() {
        let rect = AnchorRect::new(10.0, 20.0, 100.0, 40.0);
        assert!((rect.right() - 110.0).abs() < f32::EPSILON);
        assert!((rect.bottom() - 60.0).abs() < f32::EPSILON);
        assert!((rect.center_x() - 60.0).abs() < f32::EPSILON);
        assert!((rect.center_y() - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn content_size_zero_is_unmeasured() {
        assert!(!ContentSize::ZERO.is_measured());
        assert!(!ContentSize::new(120.0, 0.0).is_measured());
        assert!(ContentSize::new(120.0, 30.0).is_measured());
    }

    #[test]
    fn position_width_skipped_when_absent() {
        let json = serde_json::to_string(&Position::new(1.0, 2.0)).expect("serialize");
        assert!(!json.contains("width"));

        let json = serde_json::to_string(&Position::new(1.0, 2.0).with_width(200.0))
            .expect("serialize");
        assert!(json.contains("200"));
    }

    #[test]
    fn insets_default_to_zero() {
        assert_eq!(SafeAreaInsets::default(), SafeAreaInsets::ZERO);
    }
}
