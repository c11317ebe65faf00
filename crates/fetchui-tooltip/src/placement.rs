#![forbid(unsafe_code)]

//! Tooltip placements and their fallback order.
//!
//! A [`Placement`] names the side of the trigger the tooltip is anchored to
//! and, for the corner variants, the trigger edge it is flush with. When the
//! preferred placement does not fit, candidates are tried in the order given
//! by [`FALLBACK_ORDER`]: the requested side, its mirror, then the
//! perpendicular sides.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a tooltip sits relative to its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Placement {
    /// Above the trigger, horizontally centered.
    #[default]
    Top,
    /// Below the trigger, horizontally centered.
    Bottom,
    /// Left of the trigger, vertically centered.
    Left,
    /// Right of the trigger, vertically centered.
    Right,
    /// Above the trigger, flush with its left edge.
    TopStart,
    /// Above the trigger, flush with its right edge.
    TopEnd,
    /// Below the trigger, flush with its left edge.
    BottomStart,
    /// Below the trigger, flush with its right edge.
    BottomEnd,
}

/// Side of the trigger a placement anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// True for sides stacked above or below the trigger.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// The opposite side.
    #[must_use]
    pub const fn mirror(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The centered placement on this side.
    #[must_use]
    pub const fn placement(self) -> Placement {
        match self {
            Self::Top => Placement::Top,
            Self::Bottom => Placement::Bottom,
            Self::Left => Placement::Left,
            Self::Right => Placement::Right,
        }
    }
}

/// Cross-axis alignment of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Center,
    /// Flush with the trigger's left edge.
    Start,
    /// Flush with the trigger's right edge.
    End,
}

/// Fallback order per side, tried after the preferred placement.
///
/// Corner placements use the row of their parent side.
pub const FALLBACK_ORDER: [(Side, [Placement; 4]); 4] = [
    (
        Side::Top,
        [
            Placement::Top,
            Placement::Bottom,
            Placement::Right,
            Placement::Left,
        ],
    ),
    (
        Side::Bottom,
        [
            Placement::Bottom,
            Placement::Top,
            Placement::Right,
            Placement::Left,
        ],
    ),
    (
        Side::Left,
        [
            Placement::Left,
            Placement::Right,
            Placement::Top,
            Placement::Bottom,
        ],
    ),
    (
        Side::Right,
        [
            Placement::Right,
            Placement::Left,
            Placement::Top,
            Placement::Bottom,
        ],
    ),
];

impl Placement {
    /// Every placement, in declaration order.
    pub const ALL: [Placement; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopStart,
        Self::TopEnd,
        Self::BottomStart,
        Self::BottomEnd,
    ];

    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Side::Top,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::Left => Side::Left,
            Self::Right => Side::Right,
        }
    }

    #[must_use]
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::TopStart | Self::BottomStart => Alignment::Start,
            Self::TopEnd | Self::BottomEnd => Alignment::End,
            Self::Top | Self::Bottom | Self::Left | Self::Right => Alignment::Center,
        }
    }

    /// True for `top*` and `bottom*` placements.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        self.side().is_vertical()
    }

    /// Stable kebab-case name (`"top-start"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
        }
    }

    /// The fallback row for this placement's side.
    #[must_use]
    pub fn fallbacks(self) -> &'static [Placement; 4] {
        let index = match self.side() {
            Side::Top => 0,
            Side::Bottom => 1,
            Side::Left => 2,
            Side::Right => 3,
        };
        &FALLBACK_ORDER[index].1
    }

    /// Candidates in the order they are tried: `self` first, then the
    /// fallback row without repeating `self`.
    ///
    /// The last item is the last-resort placement.
    pub fn candidates(self) -> impl Iterator<Item = Placement> {
        std::iter::once(self).chain(
            self.fallbacks()
                .iter()
                .copied()
                .filter(move |candidate| *candidate != self),
        )
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown placement name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlacementError {
    input: String,
}

impl ParsePlacementError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tooltip placement {:?}", self.input)
    }
}

impl std::error::Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|placement| placement.as_str() == normalized)
            .ok_or_else(|| ParsePlacementError {
                input: s.to_owned(),
            })
    }
}
