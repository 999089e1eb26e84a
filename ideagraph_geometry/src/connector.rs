// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector routing between ideas and from an idea to its suggestions.

use kurbo::{CubicBez, Point, Rect, Vec2};

use crate::abs;

/// Upper bound on the data-dependent part of a connector bend.
const MAX_BEND: f64 = 50.0;
/// Constant part of a connector bend, so even adjacent anchors leave their edge.
const MIN_BEND: f64 = 20.0;

/// Rectangle edge an anchor sits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Top edge, outward normal points towards negative y.
    Top,
    /// Bottom edge, outward normal points towards positive y.
    Bottom,
    /// Left edge, outward normal points towards negative x.
    Left,
    /// Right edge, outward normal points towards positive x.
    Right,
}

impl Side {
    /// All sides, in the order anchors are enumerated.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Unit outward normal of this edge.
    pub fn normal(self) -> Vec2 {
        match self {
            Self::Top => Vec2::new(0.0, -1.0),
            Self::Bottom => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Midpoint of this edge of `rect`.
    pub fn midpoint(self, rect: Rect) -> Point {
        let c = rect.center();
        match self {
            Self::Top => Point::new(c.x, rect.y0),
            Self::Bottom => Point::new(c.x, rect.y1),
            Self::Left => Point::new(rect.x0, c.y),
            Self::Right => Point::new(rect.x1, c.y),
        }
    }
}

/// An edge midpoint on a rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Anchor {
    /// Edge the anchor sits on.
    pub side: Side,
    /// Position in world space.
    pub point: Point,
}

/// Closest pair of anchors between a source and a target rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnchorPair {
    /// Anchor on the source rectangle.
    pub source: Anchor,
    /// Anchor on the target rectangle.
    pub target: Anchor,
}

/// The four edge midpoints of `rect`, in [`Side::ALL`] order.
pub fn edge_anchors(rect: Rect) -> [Anchor; 4] {
    Side::ALL.map(|side| Anchor {
        side,
        point: side.midpoint(rect),
    })
}

/// Pick the anchor pair (one per rectangle) with the smallest squared distance.
///
/// Ties keep the first pair found, scanning source sides then target sides in
/// [`Side::ALL`] order.
pub fn anchor_pair(source: Rect, target: Rect) -> AnchorPair {
    let sources = edge_anchors(source);
    let targets = edge_anchors(target);
    let mut best = AnchorPair {
        source: sources[0],
        target: targets[0],
    };
    let mut best_d = (best.target.point - best.source.point).hypot2();
    for s in sources {
        for t in targets {
            let d = (t.point - s.point).hypot2();
            if d < best_d {
                best = AnchorPair {
                    source: s,
                    target: t,
                };
                best_d = d;
            }
        }
    }
    best
}

/// Distance a connector's control points sit from their anchors.
///
/// `min(|dx|, |dy|, 50) + 20` where `(dx, dy)` is the vector between the anchors.
pub fn connector_bend(from: Point, to: Point) -> f64 {
    let d = to - from;
    abs(d.x).min(abs(d.y)).min(MAX_BEND) + MIN_BEND
}

/// Route a cubic connector between two ideas.
///
/// The curve starts and ends on the closest anchor pair and leaves/enters each rectangle
/// along the anchor edge's outward normal.
pub fn route_connector(source: Rect, target: Rect) -> CubicBez {
    let pair = anchor_pair(source, target);
    let bend = connector_bend(pair.source.point, pair.target.point);
    CubicBez::new(
        pair.source.point,
        pair.source.point + pair.source.side.normal() * bend,
        pair.target.point + pair.target.side.normal() * bend,
        pair.target.point,
    )
}

/// Route the connector from an idea to one of its suggestions.
///
/// Always runs from the source's right-edge midpoint to the suggestion's left-center, with
/// both control points at the horizontal midpoint.
pub fn route_suggestion(source: Rect, suggestion: Rect) -> CubicBez {
    let start = Side::Right.midpoint(source);
    let end = Side::Left.midpoint(suggestion);
    let mid_x = 0.5 * (start.x + end.x);
    CubicBez::new(
        start,
        Point::new(mid_x, start.y),
        Point::new(mid_x, end.y),
        end,
    )
}
