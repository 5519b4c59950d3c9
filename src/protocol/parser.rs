//! Initialization and turn message parsers.
//!
//! The referee is trusted to be well-formed; any deviation (bad integer,
//! out-of-range id, incomplete snapshot) is reported as a `ProtocolError` and
//! treated as fatal by the game loop.

use std::io::{self, BufRead};

use thiserror::Error;

use super::reader::TokenReader;
use crate::world::{
    Owner, PlayerId, SnapshotError, WorldGraph, WorldState, ZoneId, MAP_PLAYER, MAP_SIZE,
    MAX_ZONE_YIELD,
};

/// Errors that can occur while reading referee messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unexpected end of input")]
    EndOfInput,

    #[error("invalid integer token: '{0}'")]
    InvalidInteger(String),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("link from zone {0} to itself")]
    SelfLoop(ZoneId),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// Result of the initialization message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub graph: WorldGraph,
    pub player_count: usize,
    pub my_id: PlayerId,
}

/// Reads an integer and checks it lies in `lo..=hi`.
fn read_bounded<R: BufRead>(
    reader: &mut TokenReader<R>,
    field: &'static str,
    lo: i64,
    hi: i64,
) -> Result<i64, ProtocolError> {
    let value = reader.next_i64()?;
    if value < lo || value > hi {
        return Err(ProtocolError::OutOfRange { field, value });
    }
    Ok(value)
}

fn read_zone<R: BufRead>(
    reader: &mut TokenReader<R>,
    field: &'static str,
    zone_count: usize,
) -> Result<ZoneId, ProtocolError> {
    read_bounded(reader, field, 0, zone_count as i64 - 1).map(|v| v as ZoneId)
}

fn read_count<R: BufRead>(
    reader: &mut TokenReader<R>,
    field: &'static str,
) -> Result<u32, ProtocolError> {
    read_bounded(reader, field, 0, u32::MAX as i64).map(|v| v as u32)
}

/// Reads the initialization message and builds the static graph.
///
/// Format: `playerCount myId zoneCount linkCount`, then `zoneCount` rows of
/// `zoneId platinumSource`, then `linkCount` rows of `zoneA zoneB`.
pub fn read_setup<R: BufRead>(reader: &mut TokenReader<R>) -> Result<Setup, ProtocolError> {
    let player_count = read_bounded(reader, "player count", 1, MAP_PLAYER as i64)? as usize;
    let my_index = read_bounded(reader, "my id", 0, player_count as i64 - 1)? as usize;
    let zone_count = read_bounded(reader, "zone count", 0, MAP_SIZE as i64)? as usize;
    let link_count = read_count(reader, "link count")?;

    let my_id = PlayerId::new(my_index).ok_or(ProtocolError::OutOfRange {
        field: "my id",
        value: my_index as i64,
    })?;

    let mut graph = WorldGraph::new(zone_count);
    for _ in 0..zone_count {
        let zone = read_zone(reader, "zone id", zone_count)?;
        let platinum = read_bounded(reader, "platinum source", 0, MAX_ZONE_YIELD as i64)?;
        graph.set_resource_yield(zone, platinum as u32);
    }

    for _ in 0..link_count {
        let a = read_zone(reader, "link zone", zone_count)?;
        let b = read_zone(reader, "link zone", zone_count)?;
        if a == b {
            return Err(ProtocolError::SelfLoop(a));
        }
        graph.add_link(a, b);
    }

    Ok(Setup {
        graph,
        player_count,
        my_id,
    })
}

/// Reads one turn message into a complete snapshot.
///
/// Format: `platinum`, then one row per zone of
/// `zoneId ownerId podsP0 podsP1 podsP2 podsP3`. Owner ids must be `-1` or a
/// player index below `player_count`.
pub fn read_turn<R: BufRead>(
    reader: &mut TokenReader<R>,
    graph: &WorldGraph,
    player_count: usize,
) -> Result<WorldState, ProtocolError> {
    let zone_count = graph.zone_count();
    let platinum = read_count(reader, "platinum")?;
    let mut builder = WorldState::builder(zone_count, platinum);

    for _ in 0..zone_count {
        let zone = read_zone(reader, "zone id", zone_count)?;
        let owner_id = read_bounded(reader, "owner id", -1, player_count as i64 - 1)?;
        let owner = Owner::from_wire(owner_id).ok_or(ProtocolError::OutOfRange {
            field: "owner id",
            value: owner_id,
        })?;
        let mut pods = [0u32; MAP_PLAYER];
        for slot in pods.iter_mut() {
            *slot = read_count(reader, "pod count")?;
        }
        builder.set_zone(zone, owner, pods)?;
    }

    Ok(builder.finish()?)
}
