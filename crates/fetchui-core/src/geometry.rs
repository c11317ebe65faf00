#![forbid(unsafe_code)]

//! Viewport geometry primitives.
//!
//! All values are CSS pixels relative to the top-left corner of the viewport,
//! as reported by element measurement. Extents are never negative.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size. Negative extents saturate to zero.
    #[inline]
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// A `{top, left}` displacement, used for box origins and arrow anchors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

impl Offset {
    #[inline]
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// An axis-aligned rectangle in viewport coordinates.
///
/// Stores the origin and extent; `right` and `bottom` are derived.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width, never negative.
    pub width: f64,
    /// Height, never negative.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle. Negative extents saturate to zero.
    #[inline]
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a rectangle at the origin covering `size` (e.g. the viewport).
    #[inline]
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Create a rectangle from measured edges.
    ///
    /// Rejects non-finite values and edges where `right < left` or
    /// `bottom < top`.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, GeometryError> {
        for (edge, value) in [
            ("left", left),
            ("top", top),
            ("right", right),
            ("bottom", bottom),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { field: edge, value });
            }
        }
        if right < left {
            return Err(GeometryError::InvertedEdges {
                axis: Axis::Horizontal,
                start: left,
                end: right,
            });
        }
        if bottom < top {
            return Err(GeometryError::InvertedEdges {
                axis: Axis::Vertical,
                start: top,
                end: bottom,
            });
        }
        Ok(Self::new(left, top, right - left, bottom - top))
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal center.
    #[inline]
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical center.
    #[inline]
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Same extent, moved to `origin`.
    #[inline]
    #[must_use]
    pub fn with_origin(&self, origin: Offset) -> Self {
        Self {
            left: origin.left,
            top: origin.top,
            ..*self
        }
    }

    /// Shrink by `amount` on every side. Extents saturate at zero.
    #[must_use]
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }

    /// Check if `other` lies entirely inside this rectangle (edges inclusive).
    #[inline]
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if every coordinate is finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Rejected geometry input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    NonFinite {
        field: &'static str,
        value: f64,
    },
    Negative {
        field: &'static str,
        value: f64,
    },
    InvertedEdges {
        axis: Axis,
        start: f64,
        end: f64,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field, value } => write!(f, "{field} must be finite, got {value}"),
            Self::Negative { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
            Self::InvertedEdges { axis, start, end } => write!(
                f,
                "{} edges are inverted: end {end} < start {start}",
                axis.as_str()
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Check that `value` is finite and non-negative.
pub fn check_extent(field: &'static str, value: f64) -> Result<f64, GeometryError> {
    if !value.is_finite() {
        return Err(GeometryError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(GeometryError::Negative { field, value });
    }
    Ok(value)
}
