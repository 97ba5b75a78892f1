//! Rectangles in CSS pixels, and the root margin applied to the viewport.

use std::fmt;
use std::str::FromStr;

use dpi::{LogicalPosition, LogicalSize};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseRootMarginError;

/// An axis-aligned rectangle in CSS pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub position: LogicalPosition<f64>,
    pub size: LogicalSize<f64>,
}

impl Rect {
    #[inline]
    pub const fn new(position: LogicalPosition<f64>, size: LogicalSize<f64>) -> Self {
        Self { position, size }
    }

    /// Convenience constructor taking `x`, `y`, `width` and `height`.
    #[inline]
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(LogicalPosition::new(x, y), LogicalSize::new(width, height))
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    pub fn top(&self) -> f64 {
        self.position.y
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.height
    }

    pub fn area(&self) -> f64 {
        self.size.width * self.size.height
    }

    /// Move the rectangle by the given offset.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::from_xywh(self.left() + dx, self.top() + dy, self.size.width, self.size.height)
    }

    /// Grow the rectangle by `amount` on all four sides, shrinking it when negative.
    ///
    /// A rectangle never shrinks past its center.
    pub fn inflate(self, amount: f64) -> Self {
        let width = (self.size.width + 2.0 * amount).max(0.0);
        let height = (self.size.height + 2.0 * amount).max(0.0);
        let x = self.left() + (self.size.width - width) / 2.0;
        let y = self.top() + (self.size.height - height) / 2.0;
        Self::from_xywh(x, y, width, height)
    }

    /// The overlap of both rectangles.
    ///
    /// Edges are inclusive: rectangles that merely touch intersect with a zero-area result, the
    /// same way an edge-adjacent target is reported as intersecting by the platform.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left <= right && top <= bottom {
            Some(Self::from_xywh(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }
}

/// A symmetric margin, in pixels, applied to the viewport before testing for intersection.
///
/// Positive values make targets enter earlier and exit later, negative values the opposite.
/// Formats as the CSS length the platform expects, e.g. `100px`, which the platform applies to
/// all four sides.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RootMargin(f64);

impl RootMargin {
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub const fn from_px(px: f64) -> Self {
        Self(px)
    }

    #[inline]
    pub const fn px(self) -> f64 {
        self.0
    }

    /// Apply the margin to the root rectangle.
    pub fn apply(self, root: Rect) -> Rect {
        root.inflate(self.0)
    }
}

impl From<f64> for RootMargin {
    fn from(px: f64) -> Self {
        Self(px)
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

impl FromStr for RootMargin {
    type Err = ParseRootMarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_suffix("px")
            .and_then(|px| px.parse().ok())
            .map(Self)
            .ok_or_else(|| ParseRootMarginError::new(s))
    }
}
