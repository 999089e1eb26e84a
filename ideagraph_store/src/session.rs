// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-session counters owned by the store.

use crate::types::IdeaId;

/// Counters for one exploration session.
///
/// Reset when the store becomes empty. The epoch survives resets and increments on each,
/// so ids from before a reset stay stale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionCounters {
    epoch: u32,
    next_seq: u32,
    ideas_created: u64,
    generations_started: u64,
}

impl SessionCounters {
    /// Sequence number the next idea will receive.
    pub fn next_seq(&self) -> u32 {
        self.next_seq
    }

    /// Current session epoch.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Ideas created since the last reset.
    pub fn ideas_created(&self) -> u64 {
        self.ideas_created
    }

    /// Generations (first fills and regenerations) started since the last reset.
    pub fn generations_started(&self) -> u64 {
        self.generations_started
    }

    pub(crate) fn allocate(&mut self) -> IdeaId {
        let id = IdeaId::new(self.epoch, self.next_seq);
        self.next_seq = self.next_seq.saturating_add(1);
        self.ideas_created += 1;
        id
    }

    pub(crate) fn record_generation(&mut self) {
        self.generations_started += 1;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self {
            epoch: self.epoch.wrapping_add(1),
            ..Self::default()
        };
    }
}
