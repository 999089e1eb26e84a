// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=ideagraph_store --heading-base-level=0

//! Ideagraph Store: the idea graph behind an infinite exploration canvas.
//!
//! - Ideas are world-space rectangles carrying generated text, branchable terms, an optional
//!   bridge phrase and an optional illustration.
//! - Content is versioned: versions are append-only and one of them is live at a time.
//! - Placement goes through [`ideagraph_geometry::find_valid_spot`], so a new idea never
//!   covers an existing one unless the ring search runs out.
//! - A single active suggestion set holds the branch proposals of exactly one idea.
//!
//! ## Liveness
//!
//! Generation is asynchronous, so updates can arrive for ideas that were removed in the
//! meantime. Every mutating method takes an [`IdeaId`] and re-validates it; updates for stale
//! ids are dropped. Ids from before a session reset never alias new ones (see [`IdeaId`]).
//!
//! ## Derived data
//!
//! Nothing derived is stored. Prompt history comes from [`IdeaStore::history`], and clickable
//! term spans come from [`term_spans`], a pure pass over immutable text.
//!
//! # Example
//!
//! ```rust
//! use ideagraph_store::{IdeaStore, IdeaVersion, Seed};
//! use kurbo::{Point, Rect};
//!
//! let mut store = IdeaStore::new();
//! let a = store.create(Rect::new(0.0, 0.0, 300.0, 200.0), Seed::Placement);
//! let b = store.create(Rect::new(50.0, 50.0, 350.0, 250.0), Seed::Placement);
//! assert_ne!(store.get(b).unwrap().rect.origin(), Point::new(50.0, 50.0));
//!
//! store.append_version(a, IdeaVersion { text: "first".into(), ..Default::default() });
//! assert_eq!(store.history(Some(b)), vec!["first".to_string()]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod session;
mod store;
mod suggestions;
mod terms;
mod types;

pub use session::SessionCounters;
pub use store::{IdeaStore, Removal, StoreParams};
pub use suggestions::SuggestionLayout;
pub use terms::{TermSpan, term_spans};
pub use types::{IdeaFlags, IdeaId, IdeaNode, IdeaVersion, Seed, Suggestion, SuggestionId};
