//! Flip resolution: pick the final position for a floating element.
//!
//! [`resolve`] orchestrates the placement calculator and the fit
//! predicate across a fixed fallback sequence. It never fails: when
//! nothing fits the result is clamped fully on-screen, possibly
//! overlapping the anchor.

use serde::{Deserialize, Serialize};

use crate::bounds::{clamp, fits, Bounds, FitPolicy};
use crate::geometry::{AnchorRect, ContentSize, Position, SafeAreaInsets, Viewport};
use crate::placement::{calculate, Placement};

/// Options controlling flip resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Requested placement.
    pub placement: Placement,
    /// Gap between the anchor edge and the content, in pixels.
    pub offset: f32,
    /// Force the content width to the anchor width.
    pub match_width: bool,
    /// Minimum distance kept from the viewport edges.
    pub padding: f32,
    /// How padding and insets are applied on this surface.
    pub policy: FitPolicy,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            placement: Placement::Bottom,
            offset: 8.0,
            match_width: false,
            padding: 12.0,
            policy: FitPolicy::default(),
        }
    }
}

/// Resolve the final position for the given inputs.
///
/// Candidates are tried in a fixed order, stopping at the first that
/// fits:
///
/// 1. the requested placement;
/// 2. the opposite placement (side flipped, alignment preserved) —
///    flipping outranks realignment because it keeps the content
///    pointing at the anchor;
/// 3. the sibling alignments of the requested side, then of the
///    opposite side;
/// 4. the requested placement's position clamped into the viewport,
///    which may overlap the anchor but is guaranteed fully
///    on-screen.
///
/// The result is a pure function of its inputs: identical inputs
/// always yield an identical position.
#[must_use]
pub fn resolve(
    anchor: &AnchorRect,
    content: ContentSize,
    viewport: Viewport,
    insets: SafeAreaInsets,
    options: &ResolveOptions,
) -> Position {
    let fit_bounds = Bounds::fit(viewport, content, options.padding, insets, options.policy);
    let finish = |position: Position| {
        if options.match_width {
            position.with_width(anchor.width)
        } else {
            position
        }
    };

    let requested = calculate(anchor, content, options.placement, options.offset);
    if fits(requested, &fit_bounds) {
        return finish(requested);
    }

    let flipped = options.placement.opposite();
    let candidate = calculate(anchor, content, flipped, options.offset);
    if fits(candidate, &fit_bounds) {
        tracing::debug!(
            from = %options.placement,
            to = %flipped,
            "placement flipped to opposite side"
        );
        return finish(candidate);
    }

    for side in [options.placement, flipped] {
        for alternative in side.sibling_alignments() {
            let candidate = calculate(anchor, content, alternative, options.offset);
            if fits(candidate, &fit_bounds) {
                tracing::debug!(
                    from = %options.placement,
                    to = %alternative,
                    "placement realigned along edge"
                );
                return finish(candidate);
            }
        }
    }

    // Nothing fits: force the requested-placement position on-screen.
    let clamp_bounds = Bounds::clamp(viewport, content, options.padding, insets, options.policy);
    tracing::debug!(placement = %options.placement, "no placement fits, clamping into viewport");
    finish(clamp(requested, &clamp_bounds))
}
