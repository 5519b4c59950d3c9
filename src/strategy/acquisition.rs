//! Greedy pod purchasing.
//!
//! While platinum covers a pod, buy one on the neutral zone with the highest
//! yield (lowest index on ties). When no neutral zone yields anything, fall
//! back to a uniformly random zone from the configured pool. Zones bought this
//! turn are tracked in a pending set rather than written back into the
//! snapshot, so a zone is never bought twice in one pass.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::protocol::Purchase;
use crate::world::{WorldGraph, WorldState, ZoneId, POD_COST};

/// Zones eligible for the random fallback pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPool {
    /// Only neutral zones not yet bought this turn.
    #[default]
    NeutralOnly,
    /// Any zone not yet bought this turn, whoever owns it.
    AnyZone,
}

impl FallbackPool {
    pub fn from_name(s: &str) -> Option<FallbackPool> {
        match s.to_ascii_lowercase().as_str() {
            "neutral_only" | "neutral" => Some(FallbackPool::NeutralOnly),
            "any_zone" | "any" => Some(FallbackPool::AnyZone),
            _ => None,
        }
    }
}

/// Outcome of the acquisition phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionPlan {
    pub purchases: Vec<Purchase>,
    pub platinum_left: u32,
}

/// Returns the neutral, non-pending zone with the strictly greatest positive
/// yield, keeping the first one found in index order.
fn best_neutral(graph: &WorldGraph, state: &WorldState, pending: &[bool]) -> Option<ZoneId> {
    let mut best = None;
    let mut best_value = 0;
    for zone in graph.zones() {
        if pending[zone] || !state.owner(zone).is_neutral() {
            continue;
        }
        let value = graph.resource_yield(zone);
        if value > best_value {
            best = Some(zone);
            best_value = value;
        }
    }
    best
}

/// Picks a uniformly random zone from the fallback pool.
fn random_fallback(
    graph: &WorldGraph,
    state: &WorldState,
    pending: &[bool],
    pool: FallbackPool,
    rng: &mut impl Rng,
) -> Option<ZoneId> {
    let candidates: Vec<ZoneId> = graph
        .zones()
        .filter(|&z| !pending[z])
        .filter(|&z| match pool {
            FallbackPool::NeutralOnly => state.owner(z).is_neutral(),
            FallbackPool::AnyZone => true,
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Spends platinum on pods, one per zone, until it no longer covers `POD_COST`
/// or no eligible zone remains.
pub fn plan_purchases(
    graph: &WorldGraph,
    state: &WorldState,
    pool: FallbackPool,
    rng: &mut impl Rng,
) -> AcquisitionPlan {
    let mut platinum = state.platinum();
    let mut pending = vec![false; graph.zone_count()];
    let mut purchases = Vec::new();

    while platinum >= POD_COST {
        let zone = match best_neutral(graph, state, &pending) {
            Some(z) => z,
            None => match random_fallback(graph, state, &pending, pool, rng) {
                Some(z) => z,
                None => break,
            },
        };

        pending[zone] = true;
        platinum -= POD_COST;
        purchases.push(Purchase { count: 1, zone });
    }

    AcquisitionPlan {
        purchases,
        platinum_left: platinum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Owner, PlayerId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn graph_with_yields(yields: &[u32]) -> WorldGraph {
        let mut graph = WorldGraph::new(yields.len());
        for (z, &y) in yields.iter().enumerate() {
            graph.set_resource_yield(z, y);
        }
        graph
    }

    fn neutral_state(zone_count: usize, platinum: u32) -> WorldState {
        let mut b = WorldState::builder(zone_count, platinum);
        for z in 0..zone_count {
            b.set_zone(z, Owner::Neutral, [0; 4]).unwrap();
        }
        b.finish().unwrap()
    }

    fn zones(plan: &AcquisitionPlan) -> Vec<ZoneId> {
        plan.purchases.iter().map(|p| p.zone).collect()
    }

    #[test]
    fn buys_richest_zones_until_broke() {
        let graph = graph_with_yields(&[10, 5, 0]);
        let state = neutral_state(3, 45);
        let plan = plan_purchases(&graph, &state, FallbackPool::NeutralOnly, &mut seeded_rng());
        assert_eq!(zones(&plan), vec![0, 1]);
        assert_eq!(plan.platinum_left, 5);
    }

    #[test]
    fn zero_yield_fallback_still_buys() {
        let graph = graph_with_yields(&[3, 0]);
        let p1 = PlayerId::new(1).unwrap();
        let mut b = WorldState::builder(2, 20);
        b.set_zone(0, Owner::Player(p1), [0, 2, 0, 0]).unwrap();
        b.set_zone(1, Owner::Neutral, [0; 4]).unwrap();
        let state = b.finish().unwrap();

        for pool in [FallbackPool::NeutralOnly, FallbackPool::AnyZone] {
            let plan = plan_purchases(&graph, &state, pool, &mut seeded_rng());
            assert_eq!(plan.purchases.len(), 1);
            assert_eq!(plan.platinum_left, 0);
        }
        let plan = plan_purchases(&graph, &state, FallbackPool::NeutralOnly, &mut seeded_rng());
        assert_eq!(zones(&plan), vec![1]);
    }

    #[test]
    fn below_pod_cost_buys_nothing() {
        let graph = graph_with_yields(&[10, 5, 0]);
        let state = neutral_state(3, POD_COST - 1);
        let plan = plan_purchases(&graph, &state, FallbackPool::AnyZone, &mut seeded_rng());
        assert!(plan.purchases.is_empty());
        assert_eq!(plan.platinum_left, POD_COST - 1);
    }

    #[test]
    fn ties_go_to_lower_index() {
        let mut yields = [1u32; 12];
        yields[3] = 7;
        yields[9] = 7;
        let graph = graph_with_yields(&yields);
        let state = neutral_state(12, 25);
        let plan = plan_purchases(&graph, &state, FallbackPool::NeutralOnly, &mut seeded_rng());
        assert_eq!(zones(&plan), vec![3]);
    }

    #[test]
    fn owned_zones_are_skipped_by_greedy_scan() {
        let graph = graph_with_yields(&[9, 4, 6]);
        let p0 = PlayerId::new(0).unwrap();
        let mut b = WorldState::builder(3, 100);
        b.set_zone(0, Owner::Player(p0), [1, 0, 0, 0]).unwrap();
        b.set_zone(1, Owner::Neutral, [0; 4]).unwrap();
        b.set_zone(2, Owner::Neutral, [0; 4]).unwrap();
        let state = b.finish().unwrap();

        let plan = plan_purchases(&graph, &state, FallbackPool::NeutralOnly, &mut seeded_rng());
        assert_eq!(zones(&plan), vec![2, 1]);
        assert_eq!(plan.platinum_left, 60);
    }

    #[test]
    fn neutral_only_stops_when_pool_is_exhausted() {
        let graph = graph_with_yields(&[0, 0]);
        let p0 = PlayerId::new(0).unwrap();
        let mut b = WorldState::builder(2, 200);
        b.set_zone(0, Owner::Player(p0), [0; 4]).unwrap();
        b.set_zone(1, Owner::Player(p0), [0; 4]).unwrap();
        let state = b.finish().unwrap();

        let plan = plan_purchases(&graph, &state, FallbackPool::NeutralOnly, &mut seeded_rng());
        assert!(plan.purchases.is_empty());
        assert_eq!(plan.platinum_left, 200);
    }

    #[test]
    fn any_zone_never_repeats_within_a_turn() {
        let graph = graph_with_yields(&[0, 0, 0, 0]);
        let state = neutral_state(4, 1000);
        let plan = plan_purchases(&graph, &state, FallbackPool::AnyZone, &mut seeded_rng());
        assert_eq!(plan.purchases.len(), 4);
        let unique: HashSet<ZoneId> = zones(&plan).into_iter().collect();
        assert_eq!(unique.len(), 4);
        assert_eq!(plan.platinum_left, 1000 - 4 * POD_COST);
    }

    #[test]
    fn spending_never_exceeds_platinum() {
        let graph = graph_with_yields(&[5, 4, 3, 2, 1, 0, 0, 0]);
        for platinum in [0, 19, 20, 39, 40, 99, 500] {
            let state = neutral_state(8, platinum);
            let plan = plan_purchases(&graph, &state, FallbackPool::AnyZone, &mut seeded_rng());
            let spent = plan.purchases.len() as u32 * POD_COST;
            assert!(spent <= platinum);
            assert_eq!(plan.platinum_left, platinum - spent);
        }
    }

    #[test]
    fn fallback_is_reproducible_with_same_seed() {
        let graph = graph_with_yields(&[0; 20]);
        let state = neutral_state(20, 60);
        let a = plan_purchases(&graph, &state, FallbackPool::NeutralOnly, &mut seeded_rng());
        let b = plan_purchases(&graph, &state, FallbackPool::NeutralOnly, &mut seeded_rng());
        assert_eq!(a, b);
    }

    #[test]
    fn pool_names() {
        assert_eq!(FallbackPool::from_name("Neutral_Only"), Some(FallbackPool::NeutralOnly));
        assert_eq!(FallbackPool::from_name("any"), Some(FallbackPool::AnyZone));
        assert_eq!(FallbackPool::from_name("owned"), None);
    }
}
