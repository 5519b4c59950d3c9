//! Bounded rolling history of turn summaries.
//!
//! The game loop pushes one `TurnSummary` per turn; strategies read it through
//! `DecisionContext`. Old entries are evicted once the configured capacity is
//! reached, so memory stays constant over arbitrarily long games.

use std::collections::VecDeque;

use crate::world::{Owner, PlayerId, WorldGraph, WorldState, MAP_PLAYER};

/// Compact per-turn figures derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummary {
    pub turn: u32,
    pub platinum: u32,
    /// Per-turn income of each player slot.
    pub income: [u32; MAP_PLAYER],
    /// Zones owned by each player slot.
    pub zones_owned: [u32; MAP_PLAYER],
}

impl TurnSummary {
    /// Summarizes a snapshot for the given turn number.
    pub fn capture(turn: u32, graph: &WorldGraph, state: &WorldState) -> Self {
        let mut income = [0u32; MAP_PLAYER];
        let mut zones_owned = [0u32; MAP_PLAYER];
        for zone in graph.zones() {
            if let Owner::Player(p) = state.owner(zone) {
                income[p.index()] = income[p.index()].saturating_add(graph.resource_yield(zone));
                zones_owned[p.index()] += 1;
            }
        }
        TurnSummary {
            turn,
            platinum: state.platinum(),
            income,
            zones_owned,
        }
    }
}

/// Fixed-capacity ring of the most recent turn summaries.
#[derive(Debug, Clone)]
pub struct TurnHistory {
    capacity: usize,
    entries: VecDeque<TurnSummary>,
}

impl TurnHistory {
    pub fn new(capacity: usize) -> Self {
        TurnHistory {
            capacity,
            entries: VecDeque::new(),
        }
    }

    /// Appends a summary, evicting the oldest when full.
    pub fn push(&mut self, summary: TurnSummary) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(summary);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&TurnSummary> {
        self.entries.back()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TurnSummary> {
        self.entries.iter()
    }

    /// Income change for `player` across the retained window.
    ///
    /// Returns `None` until at least two turns are recorded.
    pub fn income_trend(&self, player: PlayerId) -> Option<i64> {
        if self.entries.len() < 2 {
            return None;
        }
        let oldest = self.entries.front()?.income[player.index()] as i64;
        let latest = self.entries.back()?.income[player.index()] as i64;
        Some(latest - oldest)
    }
}
