// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World ↔ screen transform.

use kurbo::{Affine, Point, Rect, Vec2};

/// Pan/zoom mapping between world space and screen space.
///
/// `screen = world * zoom + pan` and `world = (screen - pan) / zoom`.
/// `zoom` is expected to be strictly positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    /// Screen-space translation.
    pub pan: Vec2,
    /// Uniform scale factor.
    pub zoom: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    /// No pan, unit zoom.
    pub const IDENTITY: Self = Self {
        pan: Vec2::ZERO,
        zoom: 1.0,
    };

    /// Create a transform from a pan offset and a zoom factor.
    pub const fn new(pan: Vec2, zoom: f64) -> Self {
        Self { pan, zoom }
    }

    /// Map a world-space point to screen space.
    pub fn to_screen(&self, world: Point) -> Point {
        (world.to_vec2() * self.zoom + self.pan).to_point()
    }

    /// Map a screen-space point to world space.
    pub fn to_world(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.pan) / self.zoom).to_point()
    }

    /// Map a world-space rectangle to screen space.
    pub fn rect_to_screen(&self, world: Rect) -> Rect {
        Rect::from_points(
            self.to_screen(world.origin()),
            self.to_screen(Point::new(world.x1, world.y1)),
        )
    }

    /// Map a screen-space rectangle to world space.
    pub fn rect_to_world(&self, screen: Rect) -> Rect {
        Rect::from_points(
            self.to_world(screen.origin()),
            self.to_world(Point::new(screen.x1, screen.y1)),
        )
    }

    /// The equivalent world → screen affine, for renderers that take a [`Affine`].
    pub fn affine(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Re-zoom about the screen-space point `center`, keeping the world point under it fixed.
    ///
    /// `pan' = center - (center - pan) * (new_zoom / zoom)`.
    pub fn zoomed_about(&self, center: Point, new_zoom: f64) -> Self {
        let c = center.to_vec2();
        Self {
            pan: c - (c - self.pan) * (new_zoom / self.zoom),
            zoom: new_zoom,
        }
    }
}
