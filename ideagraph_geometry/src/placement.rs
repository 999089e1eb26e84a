// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gap-padded overlap test and ring-search placement.

use kurbo::{Rect, Vec2};

/// Default margin, in world units, kept between neighboring ideas.
pub const DEFAULT_GAP: f64 = 24.0;

/// Tuning for [`find_valid_spot`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementParams {
    /// Margin that must separate two rectangles on at least one axis.
    pub gap: f64,
    /// Distance, in world units, between neighboring candidate offsets.
    pub step: f64,
    /// Largest ring radius tried before giving up.
    pub max_rings: u32,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            step: 20.0,
            max_rings: 40,
        }
    }
}

/// Result of a placement search.
///
/// Every variant carries a usable rectangle: placement never fails.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Placement {
    /// The desired rectangle already cleared every existing one and is returned untouched.
    Clear(Rect),
    /// The desired rectangle was translated by `(dx * step, dy * step)`.
    Shifted {
        /// The translated rectangle.
        rect: Rect,
        /// Ring offset along x, in steps.
        dx: i32,
        /// Ring offset along y, in steps.
        dy: i32,
    },
    /// No ring up to the radius bound was free; the desired rectangle is returned and may
    /// overlap existing ones.
    Exhausted(Rect),
}

impl Placement {
    /// The rectangle to commit.
    pub fn rect(&self) -> Rect {
        match *self {
            Self::Clear(rect) | Self::Shifted { rect, .. } | Self::Exhausted(rect) => rect,
        }
    }

    /// True if the search ran out of rings.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted(_))
    }
}

/// Whether `a` and `b` overlap once padded by `gap`.
///
/// Two rectangles are separated when, on some axis, one ends at least `gap` before the
/// other begins. Touching at exactly `gap` counts as separated.
///
/// ```
/// use ideagraph_geometry::overlaps;
/// use kurbo::Rect;
///
/// let a = Rect::new(0.0, 0.0, 100.0, 100.0);
/// assert!(!overlaps(a, Rect::new(124.0, 0.0, 200.0, 100.0), 24.0));
/// assert!(overlaps(a, Rect::new(123.0, 0.0, 200.0, 100.0), 24.0));
/// ```
pub fn overlaps(a: Rect, b: Rect, gap: f64) -> bool {
    !((a.x1 + gap <= b.x0) || (a.x0 >= b.x1 + gap) || (a.y1 + gap <= b.y0) || (a.y0 >= b.y1 + gap))
}

fn clears_all(candidate: Rect, existing: &[Rect], gap: f64) -> bool {
    existing.iter().all(|r| !overlaps(candidate, *r, gap))
}

/// Find a spot for `desired` that does not overlap any rectangle in `existing`.
///
/// If `desired` already clears everything it is returned unchanged. Otherwise square rings
/// of increasing radius `1..=max_rings` are scanned; within a ring, `dx` runs from `-r` to
/// `r` in the outer loop and `dy` in the inner loop, and only perimeter offsets
/// (`|dx| == r` or `|dy| == r`) are tested. The first clear candidate wins.
///
/// Exhausting every ring is not an error: the desired rectangle comes back as
/// [`Placement::Exhausted`] and overlap is tolerated.
pub fn find_valid_spot(desired: Rect, existing: &[Rect], params: PlacementParams) -> Placement {
    if clears_all(desired, existing, params.gap) {
        return Placement::Clear(desired);
    }
    #[allow(
        clippy::cast_possible_wrap,
        reason = "Ring radii are tiny compared to i32::MAX."
    )]
    let max = params.max_rings as i32;
    for r in 1..=max {
        for dx in -r..=r {
            for dy in -r..=r {
                if dx.abs() != r && dy.abs() != r {
                    continue;
                }
                let offset = Vec2::new(f64::from(dx) * params.step, f64::from(dy) * params.step);
                let candidate = desired + offset;
                if clears_all(candidate, existing, params.gap) {
                    return Placement::Shifted {
                        rect: candidate,
                        dx,
                        dy,
                    };
                }
            }
        }
    }
    Placement::Exhausted(desired)
}
