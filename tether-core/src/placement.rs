//! Placement variants and the pure placement calculator.
//!
//! A placement is the cross product of a base side (which edge of the
//! anchor the content attaches to) and an alignment along that edge.
//! [`calculate`] turns a placement into raw coordinates with no
//! boundary awareness; fitting and flipping live in
//! [`crate::bounds`] and [`crate::resolve`].

use serde::{Deserialize, Serialize};

use crate::geometry::{AnchorRect, ContentSize, Position};

/// The edge of the anchor a floating element attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
    /// To the right of the anchor.
    Right,
}

impl Side {
    /// The opposite side (used for flipping).
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// How the content aligns along the anchor edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Centered on the anchor (no placement suffix).
    Center,
    /// Flush with the anchor's leading edge.
    Start,
    /// Flush with the anchor's trailing edge.
    End,
}

/// Requested side + alignment for a floating element.
///
/// Serialized in the conventional kebab-case form
/// (`"bottom-start"`, `"top"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Above, centered.
    Top,
    /// Above, aligned with the anchor's left edge.
    TopStart,
    /// Above, aligned with the anchor's right edge.
    TopEnd,
    /// Below, centered.
    Bottom,
    /// Below, aligned with the anchor's left edge.
    BottomStart,
    /// Below, aligned with the anchor's right edge.
    BottomEnd,
    /// Left, centered.
    Left,
    /// Left, aligned with the anchor's top edge.
    LeftStart,
    /// Left, aligned with the anchor's bottom edge.
    LeftEnd,
    /// Right, centered.
    Right,
    /// Right, aligned with the anchor's top edge.
    RightStart,
    /// Right, aligned with the anchor's bottom edge.
    RightEnd,
}

impl Default for Placement {
    fn default() -> Self {
        Self::Bottom
    }
}

impl Placement {
    /// Build a placement from a side and alignment.
    #[must_use]
    pub const fn from_parts(side: Side, alignment: Alignment) -> Self {
        match (side, alignment) {
            (Side::Top, Alignment::Center) => Self::Top,
            (Side::Top, Alignment::Start) => Self::TopStart,
            (Side::Top, Alignment::End) => Self::TopEnd,
            (Side::Bottom, Alignment::Center) => Self::Bottom,
            (Side::Bottom, Alignment::Start) => Self::BottomStart,
            (Side::Bottom, Alignment::End) => Self::BottomEnd,
            (Side::Left, Alignment::Center) => Self::Left,
            (Side::Left, Alignment::Start) => Self::LeftStart,
            (Side::Left, Alignment::End) => Self::LeftEnd,
            (Side::Right, Alignment::Center) => Self::Right,
            (Side::Right, Alignment::Start) => Self::RightStart,
            (Side::Right, Alignment::End) => Self::RightEnd,
        }
    }

    /// The base side of this placement.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Side::Top,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::Left | Self::LeftStart | Self::LeftEnd => Side::Left,
            Self::Right | Self::RightStart | Self::RightEnd => Side::Right,
        }
    }

    /// The alignment of this placement.
    #[must_use]
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::Top | Self::Bottom | Self::Left | Self::Right => Alignment::Center,
            Self::TopStart | Self::BottomStart | Self::LeftStart | Self::RightStart => {
                Alignment::Start
            }
            Self::TopEnd | Self::BottomEnd | Self::LeftEnd | Self::RightEnd => Alignment::End,
        }
    }

    /// The opposite placement: side flipped, alignment preserved.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_parts(self.side().opposite(), self.alignment())
    }

    /// The other two alignments on the same side, in center, start,
    /// end order with this placement's own alignment skipped.
    #[must_use]
    pub const fn sibling_alignments(self) -> [Self; 2] {
        let side = self.side();
        match self.alignment() {
            Alignment::Center => [
                Self::from_parts(side, Alignment::Start),
                Self::from_parts(side, Alignment::End),
            ],
            Alignment::Start => [
                Self::from_parts(side, Alignment::Center),
                Self::from_parts(side, Alignment::End),
            ],
            Alignment::End => [
                Self::from_parts(side, Alignment::Center),
                Self::from_parts(side, Alignment::Start),
            ],
        }
    }

    /// Kebab-case name of this placement.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the candidate position for a placement.
///
/// Pure geometry: the content's leading edge sits at
/// `anchor edge ± offset` and the cross axis follows the alignment
/// (centered, start-aligned, or end-aligned). No fit check, no width
/// matching; never fails.
#[must_use]
pub fn calculate(
    anchor: &AnchorRect,
    content: ContentSize,
    placement: Placement,
    offset: f32,
) -> Position {
    let main = match placement.side() {
        Side::Top => anchor.y - content.height - offset,
        Side::Bottom => anchor.bottom() + offset,
        Side::Left => anchor.x - content.width - offset,
        Side::Right => anchor.right() + offset,
    };

    match placement.side() {
        Side::Top | Side::Bottom => {
            let left = match placement.alignment() {
                Alignment::Center => anchor.center_x() - content.width / 2.0,
                Alignment::Start => anchor.x,
                Alignment::End => anchor.right() - content.width,
            };
            Position::new(main, left)
        }
        Side::Left | Side::Right => {
            let top = match placement.alignment() {
                Alignment::Center => anchor.center_y() - content.height / 2.0,
                Alignment::Start => anchor.y,
                Alignment::End => anchor.bottom() - content.height,
            };
            Position::new(top, main)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> AnchorRect {
        AnchorRect::new(100.0, 50.0, 200.0, 32.0)
    }

    fn content() -> ContentSize {
        ContentSize::new(120.0, 60.0)
    }

    #[test]
    fn serde_kebab_case_names() {
        let json = serde_json::to_string(&Placement::BottomStart).expect("serialize");
        assert_eq!(json, "\"bottom-start\"");
        let parsed: Placement = serde_json::from_str("\"top-end\"").expect("deserialize");
        assert_eq!(parsed, Placement::TopEnd);
        assert_eq!(Placement::Top.as_str(), "top");
    }

    #[test]
    fn opposite_flips_side_keeps_alignment() {
        assert_eq!(Placement::Top.opposite(), Placement::Bottom);
        assert_eq!(Placement::BottomStart.opposite(), Placement::TopStart);
        assert_eq!(Placement::LeftEnd.opposite(), Placement::RightEnd);
        assert_eq!(Placement::RightEnd.opposite().opposite(), Placement::RightEnd);
    }

    #[test]
    fn sibling_alignments_skip_own() {
        assert_eq!(
            Placement::Bottom.sibling_alignments(),
            [Placement::BottomStart, Placement::BottomEnd]
        );
        assert_eq!(
            Placement::BottomStart.sibling_alignments(),
            [Placement::Bottom, Placement::BottomEnd]
        );
        assert_eq!(
            Placement::TopEnd.sibling_alignments(),
            [Placement::Top, Placement::TopStart]
        );
    }

    #[test]
    fn calculate_top_centered() {
        let pos = calculate(&anchor(), content(), Placement::Top, 8.0);
        // top = 50 - 60 - 8, left = 100 + 100 - 60
        assert_eq!(pos, Position::new(-18.0, 140.0));
    }

    #[test]
    fn calculate_bottom_start() {
        let pos = calculate(&anchor(), content(), Placement::BottomStart, 8.0);
        // top = 50 + 32 + 8, left = anchor.x
        assert_eq!(pos, Position::new(90.0, 100.0));
    }

    #[test]
    fn calculate_bottom_end() {
        let pos = calculate(&anchor(), content(), Placement::BottomEnd, 4.0);
        // left = 100 + 200 - 120
        assert_eq!(pos, Position::new(86.0, 180.0));
    }

    #[test]
    fn calculate_left_right_variants() {
        let left = calculate(&anchor(), content(), Placement::Left, 8.0);
        // left = 100 - 120 - 8, top = 50 + 16 - 30
        assert_eq!(left, Position::new(36.0, -28.0));

        let right_start = calculate(&anchor(), content(), Placement::RightStart, 8.0);
        // left = 100 + 200 + 8, top = anchor.y
        assert_eq!(right_start, Position::new(50.0, 308.0));

        let left_end = calculate(&anchor(), content(), Placement::LeftEnd, 8.0);
        // top = 50 + 32 - 60
        assert_eq!(left_end, Position::new(22.0, -28.0));
    }

    #[test]
    fn calculate_never_sets_width() {
        for placement in [
            Placement::Top,
            Placement::BottomEnd,
            Placement::LeftStart,
            Placement::Right,
        ] {
            let pos = calculate(&anchor(), content(), placement, 8.0);
            assert!(pos.width.is_none());
        }
    }
}
