// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized "semantic" coordinates derived from canvas placement.

use kurbo::Rect;

/// A point in the normalized semantic plane, each axis in `[-1, 1]`.
///
/// Positive `y` points up, unlike world space where `y` grows downwards.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SemanticPoint {
    /// Horizontal axis, `-1` (left label) to `1` (right label).
    pub x: f64,
    /// Vertical axis, `-1` (bottom label) to `1` (top label).
    pub y: f64,
}

impl SemanticPoint {
    /// Create a point, clamping both axes into `[-1, 1]`. NaN maps to `0`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}

/// Semantic point for an idea placed at `rect`.
///
/// The rectangle's origin is divided by `scale`, the y axis is inverted and both axes are
/// clamped to `[-1, 1]`.
///
/// ```
/// use ideagraph_geometry::{semantic_point, SemanticPoint};
/// use kurbo::Rect;
///
/// let p = semantic_point(Rect::new(500.0, 250.0, 800.0, 450.0), 1000.0);
/// assert_eq!(p, SemanticPoint { x: 0.5, y: -0.25 });
/// ```
pub fn semantic_point(rect: Rect, scale: f64) -> SemanticPoint {
    SemanticPoint::new(rect.x0 / scale, -rect.y0 / scale)
}
