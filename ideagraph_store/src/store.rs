// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core store implementation: placement, versions, lifecycle, suggestions and queries.

use alloc::string::String;
use alloc::vec::Vec;

use ideagraph_geometry::{Placement, PlacementParams, find_valid_spot, overlaps};
use kurbo::{Point, Rect, Vec2};
use tracing::{debug, info};

use crate::session::SessionCounters;
use crate::suggestions::{SuggestionLayout, SuggestionSet};
use crate::types::{IdeaFlags, IdeaId, IdeaNode, IdeaVersion, Seed, Suggestion, SuggestionId};

/// Tuning for an [`IdeaStore`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StoreParams {
    /// Ring-search placement parameters.
    pub placement: PlacementParams,
    /// Height of the toolbar band drawn above the active idea.
    pub toolbar_height: f64,
    /// Geometry of the suggestion column.
    pub suggestions: SuggestionLayout,
}

impl Default for StoreParams {
    fn default() -> Self {
        Self {
            placement: PlacementParams::default(),
            toolbar_height: 40.0,
            suggestions: SuggestionLayout::default(),
        }
    }
}

/// Result of [`IdeaStore::remove`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Removal {
    /// The removed idea.
    pub id: IdeaId,
    /// Suggestions dropped because they pointed at the removed idea.
    pub pruned_suggestions: usize,
    /// The store is now empty and the session counters were reset.
    pub became_empty: bool,
}

/// The idea graph: live ideas in discovery order plus the active suggestion set.
///
/// Every method taking an [`IdeaId`] re-validates it first; stale or unknown ids turn the
/// call into a no-op. That makes late updates from asynchronous work safe to apply blindly.
pub struct IdeaStore {
    ideas: Vec<IdeaNode>, // ascending id
    suggestions: SuggestionSet,
    counters: SessionCounters,
    active: Option<IdeaId>,
    top_z: i32,
    params: StoreParams,
}

impl core::fmt::Debug for IdeaStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let loading = self.ideas.iter().filter(|n| n.is_loading()).count();
        f.debug_struct("IdeaStore")
            .field("ideas", &self.ideas.len())
            .field("loading", &loading)
            .field("suggestions", &self.suggestions.items().len())
            .field("counters", &self.counters)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Default for IdeaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdeaStore {
    /// Create an empty store with default parameters.
    pub fn new() -> Self {
        Self::with_params(StoreParams::default())
    }

    /// Create an empty store.
    pub fn with_params(params: StoreParams) -> Self {
        Self {
            ideas: Vec::new(),
            suggestions: SuggestionSet::default(),
            counters: SessionCounters::default(),
            active: None,
            top_z: 0,
            params,
        }
    }

    /// Parameters this store was built with.
    pub fn params(&self) -> &StoreParams {
        &self.params
    }

    /// Reserve a non-overlapping rectangle near `desired` and insert a loading idea there.
    ///
    /// The new idea has no versions yet and is stacked above every other idea.
    pub fn create(&mut self, desired: Rect, seed: Seed) -> IdeaId {
        let existing: Vec<Rect> = self.ideas.iter().map(|n| n.rect).collect();
        let placement = find_valid_spot(desired, &existing, self.params.placement);
        match placement {
            Placement::Clear(_) => {}
            Placement::Shifted { dx, dy, .. } => debug!(dx, dy, "placement shifted"),
            Placement::Exhausted(_) => debug!("placement exhausted, overlap tolerated"),
        }
        let id = self.counters.allocate();
        self.top_z = self.top_z.saturating_add(1);
        self.ideas.push(IdeaNode::new(id, placement.rect(), seed, self.top_z));
        info!(%id, rect = ?placement.rect(), "idea created");
        id
    }

    /// Returns true if `id` refers to a live idea.
    pub fn contains(&self, id: IdeaId) -> bool {
        self.position(id).is_some()
    }

    /// Live idea by id.
    pub fn get(&self, id: IdeaId) -> Option<&IdeaNode> {
        self.position(id).map(|i| &self.ideas[i])
    }

    /// All live ideas in ascending id order.
    pub fn ideas(&self) -> &[IdeaNode] {
        &self.ideas
    }

    /// Number of live ideas.
    pub fn len(&self) -> usize {
        self.ideas.len()
    }

    /// True if there are no live ideas.
    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    /// Session counters.
    pub fn counters(&self) -> &SessionCounters {
        &self.counters
    }

    /// The idea last brought to front, if it is still live.
    pub fn active(&self) -> Option<IdeaId> {
        self.active.filter(|id| self.contains(*id))
    }

    /// Append a version and make it live. Returns its index.
    pub fn append_version(&mut self, id: IdeaId, version: IdeaVersion) -> Option<usize> {
        let node = self.node_mut(id)?;
        node.versions.push(version);
        let index = node.versions.len() - 1;
        node.mirror(index);
        Some(index)
    }

    /// Make version `index` live. Out-of-range indices leave the idea untouched.
    ///
    /// Returns true if the switch happened.
    pub fn switch_version(&mut self, id: IdeaId, index: usize) -> bool {
        self.node_mut(id).is_some_and(|node| node.mirror(index))
    }

    /// Attach an illustration to version `index`, and to the live projection if that version
    /// is the live one.
    pub fn attach_art(&mut self, id: IdeaId, index: usize, art: String) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let Some(version) = node.versions.get_mut(index) else {
            return false;
        };
        version.ascii_art = Some(art.clone());
        if node.current_version == Some(index) {
            node.ascii_art = Some(art);
        }
        true
    }

    /// Enter main loading: both loading flags set, error cleared, suggestion set cleared.
    pub fn begin_generation(&mut self, id: IdeaId) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.flags = IdeaFlags::LOADING | IdeaFlags::ART_LOADING;
        node.error = None;
        self.counters.record_generation();
        self.clear_suggestions();
        true
    }

    /// Main content arrived: append it as a version and leave main loading.
    pub fn finish_main(&mut self, id: IdeaId, version: IdeaVersion) -> Option<usize> {
        let index = self.append_version(id, version)?;
        if let Some(node) = self.node_mut(id) {
            node.flags.remove(IdeaFlags::LOADING);
        }
        Some(index)
    }

    /// Illustration arrived for version `index`: attach it and leave art loading.
    pub fn finish_art(&mut self, id: IdeaId, index: usize, art: String) -> bool {
        if !self.attach_art(id, index, art) {
            return false;
        }
        if let Some(node) = self.node_mut(id) {
            node.flags.remove(IdeaFlags::ART_LOADING);
        }
        true
    }

    /// Record a generation failure and clear both loading flags.
    pub fn fail(&mut self, id: IdeaId, message: impl Into<String>) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.error = Some(message.into());
        node.flags = IdeaFlags::empty();
        true
    }

    /// Remove an idea, pruning suggestions that point at it.
    ///
    /// Removing the last idea resets the session counters. Unknown ids are a no-op.
    pub fn remove(&mut self, id: IdeaId) -> Option<Removal> {
        let pos = self.position(id)?;
        self.ideas.remove(pos);
        let pruned_suggestions = self.suggestions.prune_source(id);
        if self.active == Some(id) {
            self.active = None;
        }
        let became_empty = self.ideas.is_empty();
        if became_empty {
            self.counters.reset();
            self.top_z = 0;
        }
        info!(%id, pruned_suggestions, became_empty, "idea removed");
        Some(Removal {
            id,
            pruned_suggestions,
            became_empty,
        })
    }

    /// Mark `id` as the active, topmost idea and nudge neighbors off its toolbar band.
    ///
    /// Any other idea overlapping the band above `id` is pushed clear of the idea and its
    /// band, along the axis with the larger center-to-center offset, in the direction of that
    /// offset's sign. Returns the ids of nudged ideas.
    pub fn bring_to_front(&mut self, id: IdeaId) -> Vec<IdeaId> {
        let Some(pos) = self.position(id) else {
            return Vec::new();
        };
        self.top_z = self.top_z.saturating_add(1);
        self.ideas[pos].z_index = self.top_z;
        self.active = Some(id);

        let rect = self.ideas[pos].rect;
        let band = Rect::new(rect.x0, rect.y0 - self.params.toolbar_height, rect.x1, rect.y0);
        let footprint = band.union(rect);
        let gap = self.params.placement.gap;

        let mut nudged = Vec::new();
        for other in self.ideas.iter_mut().filter(|n| n.id != id) {
            if !overlaps(other.rect, band, 0.0) {
                continue;
            }
            let r = other.rect;
            let d = r.center() - footprint.center();
            let shift = if d.x * d.x > d.y * d.y {
                if d.x >= 0.0 {
                    Vec2::new(footprint.x1 + gap - r.x0, 0.0)
                } else {
                    Vec2::new(footprint.x0 - gap - r.x1, 0.0)
                }
            } else if d.y >= 0.0 {
                Vec2::new(0.0, footprint.y1 + gap - r.y0)
            } else {
                Vec2::new(0.0, footprint.y0 - gap - r.y1)
            };
            other.rect = r + shift;
            debug!(id = %other.id, ?shift, "nudged off toolbar band");
            nudged.push(other.id);
        }
        nudged
    }

    /// Prompt history: live text of every idea with non-empty text, ascending id.
    ///
    /// `excluding` is left out, so the idea being generated never sees itself.
    pub fn history(&self, excluding: Option<IdeaId>) -> Vec<String> {
        self.ideas
            .iter()
            .filter(|n| Some(n.id) != excluding && !n.text.is_empty())
            .map(|n| n.text.clone())
            .collect()
    }

    /// Topmost idea containing the world-space point.
    ///
    /// Higher `z_index` wins; on equal z the newer id wins.
    pub fn idea_at(&self, pt: Point) -> Option<IdeaId> {
        self.ideas
            .iter()
            .filter(|n| n.rect.contains(pt))
            .max_by(|a, b| a.z_index.cmp(&b.z_index).then(a.id.cmp(&b.id)))
            .map(|n| n.id)
    }

    // --- suggestions ---

    /// The active suggestion set.
    pub fn suggestions(&self) -> &[Suggestion] {
        self.suggestions.items()
    }

    /// Idea owning the active suggestion set.
    pub fn suggestion_source(&self) -> Option<IdeaId> {
        self.suggestions.source()
    }

    /// Suggestion by id, if it is still in the active set.
    pub fn suggestion(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.suggestions.get(id)
    }

    /// Replace the whole active set with suggestions stacked next to `source`.
    ///
    /// An empty `texts` or a stale `source` leaves the current set untouched. Returns the
    /// number of suggestions published.
    pub fn replace_suggestions(&mut self, source: IdeaId, texts: Vec<String>) -> usize {
        if texts.is_empty() {
            return 0;
        }
        let Some(rect) = self.get(source).map(|n| n.rect) else {
            return 0;
        };
        let rects = self.params.suggestions.stack(rect, texts.len());
        let count = texts.len();
        self.suggestions.replace(source, texts, rects);
        debug!(%source, count, "suggestion set replaced");
        count
    }

    /// Drop the active set. Returns how many suggestions were dropped.
    pub fn clear_suggestions(&mut self) -> usize {
        self.suggestions.clear()
    }

    /// Consume a suggestion: return it and clear the whole active set.
    pub fn take_suggestion(&mut self, id: SuggestionId) -> Option<Suggestion> {
        let taken = self.suggestions.get(id).cloned()?;
        self.suggestions.clear();
        Some(taken)
    }

    // --- internals ---

    fn position(&self, id: IdeaId) -> Option<usize> {
        self.ideas.binary_search_by(|n| n.id.cmp(&id)).ok()
    }

    fn node_mut(&mut self, id: IdeaId) -> Option<&mut IdeaNode> {
        let pos = self.position(id)?;
        Some(&mut self.ideas[pos])
    }
}
