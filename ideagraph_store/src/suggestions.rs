// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single active suggestion set.
//!
//! Only one idea's suggestions are interactive at a time. Publishing a new set replaces the
//! previous one wholesale, even if it belonged to a different idea.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::types::{IdeaId, Suggestion, SuggestionId};

/// Geometry of a stacked suggestion column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SuggestionLayout {
    /// Width of each suggestion.
    pub width: f64,
    /// Height of each suggestion.
    pub height: f64,
    /// Vertical space between two suggestions.
    pub spacing: f64,
    /// Horizontal space between the source's right edge and the column.
    pub gap: f64,
}

impl Default for SuggestionLayout {
    fn default() -> Self {
        Self {
            width: 220.0,
            height: 44.0,
            spacing: 12.0,
            gap: 60.0,
        }
    }
}

impl SuggestionLayout {
    /// Rectangles for `count` suggestions next to `source`, top to bottom.
    ///
    /// The column is vertically centered on `source`.
    pub fn stack(&self, source: Rect, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "Suggestion counts are single digits."
        )]
        let n = count as f64;
        let total = n * self.height + (n - 1.0) * self.spacing;
        let x = source.x1 + self.gap;
        let top = source.center().y - 0.5 * total;
        (0..count)
            .map(|i| {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Suggestion counts are single digits."
                )]
                let y = top + i as f64 * (self.height + self.spacing);
                Rect::from_origin_size((x, y), (self.width, self.height))
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct SuggestionSet {
    items: Vec<Suggestion>,
    next_id: u64,
}

impl SuggestionSet {
    pub(crate) fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub(crate) fn source(&self) -> Option<IdeaId> {
        self.items.first().map(|s| s.source)
    }

    pub(crate) fn replace(&mut self, source: IdeaId, texts: Vec<String>, rects: Vec<Rect>) {
        let mut items = Vec::with_capacity(texts.len());
        for (text, rect) in texts.into_iter().zip(rects) {
            let id = SuggestionId(self.next_id);
            self.next_id += 1;
            items.push(Suggestion {
                id,
                source,
                text,
                rect,
            });
        }
        self.items = items;
    }

    pub(crate) fn clear(&mut self) -> usize {
        let n = self.items.len();
        self.items = Vec::new();
        n
    }

    pub(crate) fn prune_source(&mut self, source: IdeaId) -> usize {
        let before = self.items.len();
        self.items.retain(|s| s.source != source);
        before - self.items.len()
    }

    pub(crate) fn get(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.items.iter().find(|s| s.id == id)
    }
}
