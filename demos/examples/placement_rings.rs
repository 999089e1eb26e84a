// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring-search placement.
//!
//! Drop the same rectangle onto the canvas repeatedly and print where each one lands,
//! then route connectors between the first idea and the others.
//!
//! Run:
//! - `cargo run -p ideagraph_demos --example placement_rings`

use ideagraph_geometry::{
    DEFAULT_GAP, Placement, PlacementParams, anchor_pair, find_valid_spot, overlaps,
    route_connector,
};
use kurbo::{ParamCurve, Rect};

fn main() {
    let params = PlacementParams::default();
    let desired = Rect::new(0.0, 0.0, 300.0, 200.0);
    let mut placed: Vec<Rect> = Vec::new();

    for i in 0..6 {
        let placement = find_valid_spot(desired, &placed, params);
        match placement {
            Placement::Clear(r) => println!("idea {i}: clear at {:?}", r.origin()),
            Placement::Shifted { rect, dx, dy } => {
                println!("idea {i}: ring offset ({dx}, {dy}) -> {:?}", rect.origin());
            }
            Placement::Exhausted(r) => println!("idea {i}: exhausted, kept {:?}", r.origin()),
        }
        placed.push(placement.rect());
    }

    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            assert!(!overlaps(*a, *b, DEFAULT_GAP), "placements keep the gap");
        }
    }

    let first = placed[0];
    for (i, other) in placed.iter().enumerate().skip(1) {
        let pair = anchor_pair(first, *other);
        let path = route_connector(first, *other);
        println!(
            "connector 0 -> {i}: {:?} to {:?}, midpoint {:?}",
            pair.source.side,
            pair.target.side,
            path.eval(0.5)
        );
    }
}
