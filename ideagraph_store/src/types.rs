// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the idea store: identifiers, lifecycle flags, versions and nodes.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

/// Identifier for an idea.
///
/// A small, copyable handle made of a discovery sequence number and a session epoch.
///
/// ## Semantics
///
/// - `seq` starts at `0` and increases by one per created idea. It is never reused while
///   the session epoch stays the same, and it defines the discovery order of ideas.
/// - When the last idea is removed, the session counters reset: `seq` restarts at `0` and
///   the epoch increments, producing ids distinct from every id handed out before.
///
/// ### Liveness
///
/// Use [`IdeaStore::contains`](crate::IdeaStore::contains) to check whether an `IdeaId`
/// still refers to a live idea. Stale ids never alias a live idea because the epoch must
/// match.
///
/// ### Ordering
///
/// Ids order by `(epoch, seq)`. All live ideas share one epoch, so among live ideas the
/// order is the discovery order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct IdeaId {
    epoch: u32,
    seq: u32,
}

impl IdeaId {
    pub(crate) const fn new(epoch: u32, seq: u32) -> Self {
        Self { epoch, seq }
    }

    /// Discovery sequence number within the session epoch.
    pub const fn seq(self) -> u32 {
        self.seq
    }

    /// Session epoch this id was allocated in.
    pub const fn epoch(self) -> u32 {
        self.epoch
    }
}

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.seq)
    }
}

bitflags::bitflags! {
    /// Lifecycle flags of an idea while its content is generated.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct IdeaFlags: u8 {
        /// Main content is being generated.
        const LOADING     = 0b0000_0001;
        /// The illustration is being generated.
        const ART_LOADING = 0b0000_0010;
    }
}

/// How an idea came to exist. Regeneration re-enters with the same seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    /// Drawn directly on the canvas; its position alone steers generation.
    Placement,
    /// Branched from a named concept (a clicked term, a suggestion or a typed concept).
    Concept {
        /// Concept name.
        name: String,
        /// Idea the concept was picked from, if any.
        parent: Option<IdeaId>,
    },
}

impl Seed {
    /// Seed for a concept branched from `parent`.
    pub fn concept(name: impl Into<String>, parent: Option<IdeaId>) -> Self {
        Self::Concept {
            name: name.into(),
            parent,
        }
    }

    /// Concept name, if any.
    pub fn concept_name(&self) -> Option<&str> {
        match self {
            Self::Placement => None,
            Self::Concept { name, .. } => Some(name),
        }
    }

    /// Idea this one branched from, if any.
    pub fn parent(&self) -> Option<IdeaId> {
        match self {
            Self::Placement => None,
            Self::Concept { parent, .. } => *parent,
        }
    }
}

/// Immutable snapshot of generated content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdeaVersion {
    /// Main text.
    pub text: String,
    /// Substrings of `text` that can be clicked to branch.
    pub terms: Vec<String>,
    /// Transition phrase from the idea that led here.
    pub bridge_text: Option<String>,
    /// Auxiliary illustration.
    pub ascii_art: Option<String>,
}

/// An idea on the canvas.
///
/// The `text`, `terms`, `bridge_text` and `ascii_art` fields are the live projection of
/// the selected version; they change when a version is appended or switched to, while
/// `versions` itself only ever grows.
#[derive(Clone, Debug)]
pub struct IdeaNode {
    /// Identifier.
    pub id: IdeaId,
    /// World-space bounds.
    pub rect: Rect,
    /// Creation seed.
    pub seed: Seed,
    /// Live text.
    pub text: String,
    /// Live branchable terms.
    pub terms: Vec<String>,
    /// Live bridge phrase.
    pub bridge_text: Option<String>,
    /// Live illustration.
    pub ascii_art: Option<String>,
    /// Append-only version history.
    pub versions: Vec<IdeaVersion>,
    /// Index of the live version, `None` before the first version exists.
    pub current_version: Option<usize>,
    /// Lifecycle flags.
    pub flags: IdeaFlags,
    /// Failure message of the last generation, if it failed.
    pub error: Option<String>,
    /// Stacking order. Higher is drawn on top.
    pub z_index: i32,
}

impl IdeaNode {
    pub(crate) fn new(id: IdeaId, rect: Rect, seed: Seed, z_index: i32) -> Self {
        Self {
            id,
            rect,
            seed,
            text: String::new(),
            terms: Vec::new(),
            bridge_text: None,
            ascii_art: None,
            versions: Vec::new(),
            current_version: None,
            flags: IdeaFlags::LOADING,
            error: None,
            z_index,
        }
    }

    /// Main content is being generated.
    pub fn is_loading(&self) -> bool {
        self.flags.contains(IdeaFlags::LOADING)
    }

    /// The illustration is being generated.
    pub fn is_art_loading(&self) -> bool {
        self.flags.contains(IdeaFlags::ART_LOADING)
    }

    /// The live version, if any.
    pub fn current(&self) -> Option<&IdeaVersion> {
        self.current_version.and_then(|i| self.versions.get(i))
    }

    pub(crate) fn mirror(&mut self, index: usize) -> bool {
        let Some(v) = self.versions.get(index) else {
            return false;
        };
        self.text = v.text.clone();
        self.terms = v.terms.clone();
        self.bridge_text = v.bridge_text.clone();
        self.ascii_art = v.ascii_art.clone();
        self.current_version = Some(index);
        true
    }
}

/// Identifier for a suggestion. Unique for the lifetime of a store.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SuggestionId(pub(crate) u64);

/// A clickable branch proposal anchored to the right of its source idea.
#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    /// Identifier.
    pub id: SuggestionId,
    /// Idea the suggestion branches from.
    pub source: IdeaId,
    /// Proposed concept.
    pub text: String,
    /// World-space bounds.
    pub rect: Rect,
}
