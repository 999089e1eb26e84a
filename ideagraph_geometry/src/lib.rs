// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=ideagraph_geometry --heading-base-level=0

//! Ideagraph Geometry: the spatial kernel behind an infinite idea canvas.
//!
//! Every idea on the canvas is an axis-aligned [`Rect`](kurbo::Rect) in world space.
//! This crate owns the small amount of geometry the rest of the stack relies on:
//!
//! - [`overlaps`]: gap-padded separating-axis test between two rectangles.
//! - [`find_valid_spot`]: ring-search placement that shifts a desired rectangle until it clears
//!   all existing ones, falling back to the desired rectangle when the search is exhausted.
//! - [`ViewTransform`]: the pan/zoom affine shared by pointer handling and rendering.
//! - [`route_connector`] and [`route_suggestion`]: cubic connectors between ideas and from an
//!   idea to one of its branch suggestions.
//! - [`semantic_point`]: normalized 2D point derived from a placement.
//!
//! World space is pan/zoom independent. Pointer input must be converted with
//! [`ViewTransform::to_world`] before any geometric computation, and rendering converts back
//! with [`ViewTransform::to_screen`].
//!
//! ## Placement
//!
//! ```
//! use ideagraph_geometry::{find_valid_spot, overlaps, PlacementParams, DEFAULT_GAP};
//! use kurbo::Rect;
//!
//! let existing = [Rect::new(0.0, 0.0, 300.0, 200.0)];
//! let desired = Rect::new(50.0, 50.0, 350.0, 250.0);
//!
//! let placement = find_valid_spot(desired, &existing, PlacementParams::default());
//! let placed = placement.rect();
//! assert!(!overlaps(placed, existing[0], DEFAULT_GAP));
//! ```
//!
//! ## Connectors
//!
//! ```
//! use ideagraph_geometry::{anchor_pair, route_connector, Side};
//! use kurbo::Rect;
//!
//! let a = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let b = Rect::new(300.0, 0.0, 400.0, 100.0);
//! let pair = anchor_pair(a, b);
//! assert_eq!(pair.source.side, Side::Right);
//! assert_eq!(pair.target.side, Side::Left);
//!
//! let curve = route_connector(a, b);
//! assert_eq!(curve.p0, pair.source.point);
//! assert_eq!(curve.p3, pair.target.point);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod connector;
mod placement;
mod semantic;
mod transform;

pub use connector::{
    Anchor, AnchorPair, Side, anchor_pair, connector_bend, edge_anchors, route_connector,
    route_suggestion,
};
pub use placement::{DEFAULT_GAP, Placement, PlacementParams, find_valid_spot, overlaps};
pub use semantic::{SemanticPoint, semantic_point};
pub use transform::ViewTransform;

/// Absolute value without relying on `std` float intrinsics.
#[inline]
pub(crate) fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}
