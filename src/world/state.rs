//! Per-turn world snapshot.
//!
//! Holds zone ownership, per-player pod counts, and the local player's
//! platinum for a single turn. Snapshots are assembled through
//! `SnapshotBuilder`, which rejects duplicate and missing zones so a finished
//! `WorldState` always covers every zone of the graph.

use thiserror::Error;

use super::graph::WorldGraph;
use super::zone::{Owner, PlayerId, ZoneId, MAP_PLAYER};

/// Errors raised while assembling a snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("zone {zone} out of range 0..{zone_count}")]
    ZoneOutOfRange { zone: ZoneId, zone_count: usize },

    #[error("zone {0} reported twice in one turn")]
    DuplicateZone(ZoneId),

    #[error("zone {0} missing from turn snapshot")]
    MissingZone(ZoneId),
}

/// Ownership and occupancy of one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneState {
    pub owner: Owner,
    pub pods: [u32; MAP_PLAYER],
}

/// One turn's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldState {
    platinum: u32,
    zones: Vec<ZoneState>,
}

impl WorldState {
    /// Starts a snapshot for a map of `zone_count` zones.
    pub fn builder(zone_count: usize, platinum: u32) -> SnapshotBuilder {
        SnapshotBuilder {
            platinum,
            zones: vec![None; zone_count],
        }
    }

    /// Platinum available to the local player this turn.
    #[inline]
    pub fn platinum(&self) -> u32 {
        self.platinum
    }

    #[inline]
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn zone(&self, zone: ZoneId) -> &ZoneState {
        &self.zones[zone]
    }

    pub fn owner(&self, zone: ZoneId) -> Owner {
        self.zones[zone].owner
    }

    pub fn pods(&self, zone: ZoneId) -> &[u32; MAP_PLAYER] {
        &self.zones[zone].pods
    }

    pub fn pods_of(&self, zone: ZoneId, player: PlayerId) -> u32 {
        self.zones[zone].pods[player.index()]
    }

    /// Zones owned by `player`, in increasing order.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = ZoneId> + '_ {
        self.zones
            .iter()
            .enumerate()
            .filter(move |(_, z)| z.owner.is(player))
            .map(|(i, _)| i)
    }

    /// Platinum `player` earns per turn from the zones it currently owns.
    pub fn income_of(&self, graph: &WorldGraph, player: PlayerId) -> u32 {
        self.owned_by(player)
            .fold(0u32, |acc, z| acc.saturating_add(graph.resource_yield(z)))
    }

    /// Total pods `player` has on the map.
    pub fn total_pods_of(&self, player: PlayerId) -> u32 {
        self.zones
            .iter()
            .fold(0u32, |acc, z| acc.saturating_add(z.pods[player.index()]))
    }
}

/// Collects zone rows for a `WorldState`.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    platinum: u32,
    zones: Vec<Option<ZoneState>>,
}

impl SnapshotBuilder {
    /// Records a zone. Each zone must be set exactly once.
    pub fn set_zone(
        &mut self,
        zone: ZoneId,
        owner: Owner,
        pods: [u32; MAP_PLAYER],
    ) -> Result<&mut Self, SnapshotError> {
        let zone_count = self.zones.len();
        let slot = self
            .zones
            .get_mut(zone)
            .ok_or(SnapshotError::ZoneOutOfRange { zone, zone_count })?;
        if slot.is_some() {
            return Err(SnapshotError::DuplicateZone(zone));
        }
        *slot = Some(ZoneState { owner, pods });
        Ok(self)
    }

    /// Completes the snapshot, failing on the first zone never set.
    pub fn finish(self) -> Result<WorldState, SnapshotError> {
        let zones = self
            .zones
            .into_iter()
            .enumerate()
            .map(|(i, z)| z.ok_or(SnapshotError::MissingZone(i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(WorldState {
            platinum: self.platinum,
            zones,
        })
    }
}
