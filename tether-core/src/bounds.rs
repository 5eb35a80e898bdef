//! Viewport bounds, the fit predicate, and the clamp fallback.
//!
//! A [`FitPolicy`] decides how `padding` and safe-area insets turn a
//! viewport into usable bounds. Policies differ per platform surface
//! and are selected at composition time; in particular the native
//! header-tolerant asymmetry (lenient top bound, strict bottom bound)
//! is a documented product decision and must not be normalized away.

use serde::{Deserialize, Serialize};

use crate::geometry::{ContentSize, Position, SafeAreaInsets, Viewport};

/// How padding and insets are applied when computing bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitPolicy {
    /// Default behavior: the fit check lets leading edges run up to
    /// the inset line while trailing edges reserve `padding`; the
    /// clamp fallback reserves `padding` on all four edges.
    #[default]
    Standard,
    /// `padding + inset` reserved on all four edges for both the fit
    /// check and the clamp fallback.
    Strict,
    /// Native surface behavior: the top bound is `padding` alone so
    /// content may slide under a header region, while the bottom
    /// bound strictly reserves `padding` plus the bottom safe-area
    /// inset. Horizontal edges reserve `padding + inset`.
    HeaderTolerant,
}

/// Usable bounds for a floating element's top-left corner.
///
/// `max_left`/`max_top` already account for the content size, so a
/// position is in bounds exactly when both coordinates lie inside
/// their `[min, max]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum allowed `left`.
    pub min_left: f32,
    /// Minimum allowed `top`.
    pub min_top: f32,
    /// Maximum allowed `left` (content right edge at the bound).
    pub max_left: f32,
    /// Maximum allowed `top` (content bottom edge at the bound).
    pub max_top: f32,
}

impl Bounds {
    /// Bounds used by the fit predicate.
    #[must_use]
    pub fn fit(
        viewport: Viewport,
        content: ContentSize,
        padding: f32,
        insets: SafeAreaInsets,
        policy: FitPolicy,
    ) -> Self {
        let (min_left, min_top) = match policy {
            FitPolicy::Standard => (insets.left, insets.top),
            FitPolicy::Strict => (padding + insets.left, padding + insets.top),
            FitPolicy::HeaderTolerant => (padding + insets.left, padding),
        };
        Self {
            min_left,
            min_top,
            max_left: viewport.width - padding - insets.right - content.width,
            max_top: viewport.height - padding - insets.bottom - content.height,
        }
    }

    /// Bounds used by the clamp fallback.
    ///
    /// Clamp bounds are never wider than fit bounds, so a clamped
    /// position always passes the fit predicate when the content is
    /// small enough to fit at all.
    #[must_use]
    pub fn clamp(
        viewport: Viewport,
        content: ContentSize,
        padding: f32,
        insets: SafeAreaInsets,
        policy: FitPolicy,
    ) -> Self {
        let (min_left, min_top) = match policy {
            FitPolicy::Standard | FitPolicy::Strict => {
                (padding + insets.left, padding + insets.top)
            }
            // Lenient top: clamped content may overlap the header
            // region but never the bottom safe area.
            FitPolicy::HeaderTolerant => (padding + insets.left, padding),
        };
        Self {
            min_left,
            min_top,
            max_left: viewport.width - padding - insets.right - content.width,
            max_top: viewport.height - padding - insets.bottom - content.height,
        }
    }
}

/// Whether all four edges of the candidate lie within the bounds.
#[must_use]
pub fn fits(position: Position, bounds: &Bounds) -> bool {
    position.left >= bounds.min_left
        && position.top >= bounds.min_top
        && position.left <= bounds.max_left
        && position.top <= bounds.max_top
}

/// Force a position inside the bounds, axis by axis.
///
/// When the content is larger than the available space (`max < min`)
/// the minimum bound wins, keeping the leading edge on-screen. The
/// forced-width field is preserved.
#[must_use]
pub fn clamp(position: Position, bounds: &Bounds) -> Position {
    // Not f32::clamp: it panics when max < min, which is exactly the
    // oversized-content case.
    Position {
        left: position.left.min(bounds.max_left).max(bounds.min_left),
        top: position.top.min(bounds.max_top).max(bounds.min_top),
        width: position.width,
    }
}
