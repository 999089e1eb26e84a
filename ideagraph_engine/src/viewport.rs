// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport controller: pan offset, zoom factor and camera centering.

use std::time::{Duration, Instant};

use ideagraph_geometry::ViewTransform;
use kurbo::{Point, Rect, Size, Vec2};

use crate::config::ViewportConfig;

/// Eased camera motion window opened by [`Viewport::center_on`].
///
/// A presentation hint only: the pan offset is already final when the window opens.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AutoPan {
    /// When centering happened.
    pub started: Instant,
    /// How long the presentation layer should ease.
    pub duration: Duration,
}

impl AutoPan {
    /// True while `now` is inside the window.
    pub fn is_active(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) < self.duration
    }
}

/// Pan/zoom state of the canvas. Pure presentation state, never stored with ideas.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    transform: ViewTransform,
    screen: Size,
    min_zoom: f64,
    max_zoom: f64,
    auto_pan_duration: Duration,
    auto_pan: Option<AutoPan>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&ViewportConfig::default())
    }
}

impl Viewport {
    /// Viewport with no pan and unit zoom (clamped into the configured range).
    ///
    /// A zoom range that is not finite, positive and ordered falls back to the default
    /// range; [`EngineConfig::validate`](crate::EngineConfig::validate) reports it as an error.
    pub fn new(config: &ViewportConfig) -> Self {
        let (min_zoom, max_zoom) = zoom_range(config);
        let mut viewport = Self {
            transform: ViewTransform::IDENTITY,
            screen: config.screen_size(),
            min_zoom,
            max_zoom,
            auto_pan_duration: config.auto_pan(),
            auto_pan: None,
        };
        viewport.transform.zoom = viewport.clamp_zoom(1.0);
        viewport
    }

    /// Current world ↔ screen transform.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Screen-space pan offset.
    pub fn pan(&self) -> Vec2 {
        self.transform.pan
    }

    /// Zoom factor.
    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    /// Screen size in pixels.
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    /// Update the screen size (window resize).
    pub fn set_screen_size(&mut self, size: Size) {
        self.screen = size;
    }

    /// Active or finished auto-pan window from the last centering.
    pub fn auto_pan(&self) -> Option<AutoPan> {
        self.auto_pan
    }

    /// True while an eased centering motion should still be running.
    pub fn is_auto_panning(&self, now: Instant) -> bool {
        self.auto_pan.is_some_and(|a| a.is_active(now))
    }

    /// Screen point to world point.
    pub fn screen_to_world(&self, pt: Point) -> Point {
        self.transform.to_world(pt)
    }

    /// World point to screen point.
    pub fn world_to_screen(&self, pt: Point) -> Point {
        self.transform.to_screen(pt)
    }

    /// World-space rectangle currently visible on screen.
    pub fn visible_world_rect(&self) -> Rect {
        let screen = Rect::from_origin_size(Point::ORIGIN, self.screen);
        self.transform.rect_to_world(screen)
    }

    /// World point currently at the center of the screen.
    pub fn world_center(&self) -> Point {
        self.screen_to_world(self.screen_center())
    }

    /// Translate by a screen-space delta (user drag). Cancels any auto-pan window.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.transform.pan += delta;
        self.auto_pan = None;
    }

    /// Pan so the center of `rect` lands on the screen center at the current zoom, and open
    /// an auto-pan window.
    pub fn center_on(&mut self, rect: Rect) {
        let c = self.screen_center().to_vec2();
        self.transform.pan = c - rect.center().to_vec2() * self.transform.zoom;
        self.auto_pan = Some(AutoPan {
            started: Instant::now(),
            duration: self.auto_pan_duration,
        });
    }

    /// Change zoom by `delta` about the screen point `center`.
    ///
    /// The result is clamped to the configured range; if the clamped zoom equals the current
    /// one nothing changes, pan included. Non-finite input is ignored. Returns true if the
    /// zoom changed.
    pub fn zoom_by(&mut self, delta: f64, center: Point) -> bool {
        if !delta.is_finite() || !center.is_finite() {
            return false;
        }
        let next = self.clamp_zoom(self.transform.zoom + delta);
        if next == self.transform.zoom {
            return false;
        }
        self.transform = self.transform.zoomed_about(center, next);
        true
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    fn screen_center(&self) -> Point {
        Point::new(0.5 * self.screen.width, 0.5 * self.screen.height)
    }
}

fn zoom_range(config: &ViewportConfig) -> (f64, f64) {
    let (min, max) = (config.min_zoom, config.max_zoom);
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if usable(min) && usable(max) && min <= max {
        (min, max)
    } else {
        let fallback = ViewportConfig::default();
        (fallback.min_zoom, fallback.max_zoom)
    }
}
