//! Static zone topology.
//!
//! Adjacency lists and per-zone platinum yield, indexed by `ZoneId`. The graph
//! is filled in a single setup pass and read-only afterwards; out-of-range zone
//! ids are programming errors and panic.

use super::zone::{ZoneId, MAP_SIZE};

/// Zone graph with symmetric adjacency and static platinum yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGraph {
    neighbors: Vec<Vec<ZoneId>>,
    resource_yield: Vec<u32>,
}

impl WorldGraph {
    /// Creates a graph with `zone_count` isolated, zero-yield zones.
    pub fn new(zone_count: usize) -> Self {
        assert!(
            zone_count <= MAP_SIZE,
            "zone count {} exceeds map capacity {}",
            zone_count,
            MAP_SIZE
        );
        WorldGraph {
            neighbors: vec![Vec::new(); zone_count],
            resource_yield: vec![0; zone_count],
        }
    }

    #[inline]
    pub fn zone_count(&self) -> usize {
        self.resource_yield.len()
    }

    /// Iterates over all zone ids in increasing order.
    pub fn zones(&self) -> impl Iterator<Item = ZoneId> {
        0..self.zone_count()
    }

    #[inline]
    fn check(&self, zone: ZoneId) {
        assert!(
            zone < self.zone_count(),
            "zone {} out of range 0..{}",
            zone,
            self.zone_count()
        );
    }

    /// Returns the neighbors of a zone in link insertion order.
    pub fn neighbors(&self, zone: ZoneId) -> &[ZoneId] {
        self.check(zone);
        &self.neighbors[zone]
    }

    /// Returns the platinum a zone yields per turn to its owner.
    pub fn resource_yield(&self, zone: ZoneId) -> u32 {
        self.check(zone);
        self.resource_yield[zone]
    }

    /// Links two zones in both directions. Repeated links are not deduplicated.
    pub fn add_link(&mut self, a: ZoneId, b: ZoneId) {
        self.check(a);
        self.check(b);
        debug_assert_ne!(a, b, "self-loop on zone {}", a);
        self.neighbors[a].push(b);
        self.neighbors[b].push(a);
    }

    /// Sets a zone's yield; the last write wins.
    pub fn set_resource_yield(&mut self, zone: ZoneId, value: u32) {
        self.check(zone);
        self.resource_yield[zone] = value;
    }

    pub fn is_adjacent(&self, a: ZoneId, b: ZoneId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Sum of all zone yields.
    pub fn total_yield(&self) -> u32 {
        self.resource_yield
            .iter()
            .fold(0u32, |acc, &y| acc.saturating_add(y))
    }

    /// Number of undirected links.
    pub fn link_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }
}
