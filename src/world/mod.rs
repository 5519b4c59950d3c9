//! World model: static zone graph and per-turn snapshots.
//!
//! The graph is built once from the initialization message and never changes.
//! A fresh `WorldState` is built from every turn message and dropped once the
//! turn's commands have been written.

pub mod graph;
pub mod state;
pub mod zone;

pub use graph::WorldGraph;
pub use state::{SnapshotBuilder, SnapshotError, WorldState, ZoneState};
pub use zone::{
    Owner, PlayerId, ZoneId, MAP_PLAYER, MAP_SIZE, MAX_ZONE_YIELD, POD_COST, TURN_BUDGET_MS,
};
