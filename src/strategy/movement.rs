//! Movement policies.
//!
//! A `MovementPolicy` proposes pod moves for the local player. The decision
//! engine validates every proposal against the snapshot before it is emitted,
//! so policies may be optimistic.

use rand::RngCore;
use tracing::warn;

use super::DecisionContext;
use crate::protocol::Move;
use crate::world::ZoneId;

/// A pluggable source of movement commands.
pub trait MovementPolicy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Proposes this turn's moves.
    ///
    /// The generator is a `dyn RngCore` so policies stay object-safe behind
    /// `Box<dyn MovementPolicy>`; `rand::Rng` methods still apply to it.
    fn plan_moves(&self, ctx: &DecisionContext<'_>, rng: &mut dyn RngCore) -> Vec<Move>;
}

/// Keeps every pod where it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldPolicy;

impl MovementPolicy for HoldPolicy {
    fn name(&self) -> &'static str {
        "hold"
    }

    fn plan_moves(&self, _ctx: &DecisionContext<'_>, _rng: &mut dyn RngCore) -> Vec<Move> {
        Vec::new()
    }
}

/// Sends one pod from each occupied zone to the richest adjacent zone the
/// local player does not own yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandPolicy;

impl ExpandPolicy {
    fn target(ctx: &DecisionContext<'_>, from: ZoneId) -> Option<ZoneId> {
        let mut best: Option<(ZoneId, u32)> = None;
        for &n in ctx.graph.neighbors(from) {
            if ctx.state.owner(n).is(ctx.me) {
                continue;
            }
            let value = ctx.graph.resource_yield(n);
            match best {
                Some((_, v)) if v >= value => {}
                _ => best = Some((n, value)),
            }
        }
        best.map(|(n, _)| n)
    }
}

impl MovementPolicy for ExpandPolicy {
    fn name(&self) -> &'static str {
        "expand"
    }

    fn plan_moves(&self, ctx: &DecisionContext<'_>, _rng: &mut dyn RngCore) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in ctx.graph.zones() {
            if ctx.state.pods_of(from, ctx.me) == 0 {
                continue;
            }
            if let Some(to) = Self::target(ctx, from) {
                moves.push(Move { count: 1, from, to });
            }
        }
        moves
    }
}

/// Drops moves that are not along a link or that move more pods out of a zone
/// than the local player has there.
pub(crate) fn validate_moves(ctx: &DecisionContext<'_>, proposed: Vec<Move>) -> Vec<Move> {
    let zone_count = ctx.graph.zone_count();
    let mut moved_out = vec![0u32; zone_count];
    let mut accepted = Vec::with_capacity(proposed.len());

    for m in proposed {
        if m.count == 0 || m.from >= zone_count || m.to >= zone_count {
            warn!(count = m.count, from = m.from, to = m.to, "dropping malformed move");
            continue;
        }
        if !ctx.graph.is_adjacent(m.from, m.to) {
            warn!(from = m.from, to = m.to, "dropping move between unlinked zones");
            continue;
        }
        let remaining = ctx.state.pods_of(m.from, ctx.me) - moved_out[m.from];
        if m.count > remaining {
            warn!(
                from = m.from,
                requested = m.count,
                available = remaining,
                "dropping move exceeding pods"
            );
            continue;
        }
        moved_out[m.from] += m.count;
        accepted.push(m);
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::TurnHistory;
    use crate::world::{Owner, PlayerId, WorldGraph, WorldState};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Line 0 - 1 - 2 - 3 with yields 1, 0, 5, 2; player 0 holds zone 1 with
    /// three pods and zone 3 with one.
    fn line_map() -> (WorldGraph, WorldState) {
        let mut graph = WorldGraph::new(4);
        for (z, y) in [1, 0, 5, 2].into_iter().enumerate() {
            graph.set_resource_yield(z, y);
        }
        graph.add_link(0, 1);
        graph.add_link(1, 2);
        graph.add_link(2, 3);

        let me = Owner::Player(PlayerId::new(0).unwrap());
        let mut b = WorldState::builder(4, 0);
        b.set_zone(0, Owner::Neutral, [0; 4]).unwrap();
        b.set_zone(1, me, [3, 0, 0, 0]).unwrap();
        b.set_zone(2, Owner::Neutral, [0, 1, 0, 0]).unwrap();
        b.set_zone(3, me, [1, 0, 0, 0]).unwrap();
        (graph, b.finish().unwrap())
    }

    fn ctx<'a>(
        graph: &'a WorldGraph,
        state: &'a WorldState,
        history: &'a TurnHistory,
    ) -> DecisionContext<'a> {
        DecisionContext {
            graph,
            state,
            me: PlayerId::new(0).unwrap(),
            history,
        }
    }

    #[test]
    fn hold_never_moves() {
        let (graph, state) = line_map();
        let history = TurnHistory::new(1);
        let mut rng = StdRng::seed_from_u64(42);
        assert!(HoldPolicy.plan_moves(&ctx(&graph, &state, &history), &mut rng).is_empty());
    }

    #[test]
    fn expand_targets_richest_unowned_neighbor() {
        let (graph, state) = line_map();
        let history = TurnHistory::new(1);
        let mut rng = StdRng::seed_from_u64(42);
        let moves = ExpandPolicy.plan_moves(&ctx(&graph, &state, &history), &mut rng);
        assert_eq!(
            moves,
            vec![
                Move { count: 1, from: 1, to: 2 },
                Move { count: 1, from: 3, to: 2 },
            ]
        );
    }

    #[test]
    fn expand_ties_keep_first_neighbor() {
        let mut graph = WorldGraph::new(3);
        graph.add_link(0, 2);
        graph.add_link(0, 1);
        let me = PlayerId::new(0).unwrap();
        let mut b = WorldState::builder(3, 0);
        b.set_zone(0, Owner::Player(me), [2, 0, 0, 0]).unwrap();
        b.set_zone(1, Owner::Neutral, [0; 4]).unwrap();
        b.set_zone(2, Owner::Neutral, [0; 4]).unwrap();
        let state = b.finish().unwrap();
        let history = TurnHistory::new(1);
        let mut rng = StdRng::seed_from_u64(42);

        let moves = ExpandPolicy.plan_moves(&ctx(&graph, &state, &history), &mut rng);
        assert_eq!(moves, vec![Move { count: 1, from: 0, to: 2 }]);
    }

    #[test]
    fn expand_holds_when_surrounded_by_own_zones() {
        let mut graph = WorldGraph::new(2);
        graph.add_link(0, 1);
        let me = PlayerId::new(0).unwrap();
        let mut b = WorldState::builder(2, 0);
        b.set_zone(0, Owner::Player(me), [4, 0, 0, 0]).unwrap();
        b.set_zone(1, Owner::Player(me), [0; 4]).unwrap();
        let state = b.finish().unwrap();
        let history = TurnHistory::new(1);
        let mut rng = StdRng::seed_from_u64(42);

        assert!(ExpandPolicy.plan_moves(&ctx(&graph, &state, &history), &mut rng).is_empty());
    }

    #[test]
    fn validate_drops_illegal_moves() {
        let (graph, state) = line_map();
        let history = TurnHistory::new(1);
        let proposed = vec![
            Move { count: 2, from: 1, to: 2 },
            Move { count: 2, from: 1, to: 0 },
            Move { count: 1, from: 1, to: 0 },
            Move { count: 1, from: 0, to: 3 },
            Move { count: 1, from: 2, to: 1 },
            Move { count: 0, from: 3, to: 2 },
            Move { count: 1, from: 3, to: 9 },
            Move { count: u32::MAX, from: 3, to: 2 },
            Move { count: 1, from: 3, to: 2 },
            Move { count: u32::MAX, from: 3, to: 2 },
        ];
        let accepted = validate_moves(&ctx(&graph, &state, &history), proposed);
        assert_eq!(
            accepted,
            vec![
                Move { count: 2, from: 1, to: 2 },
                Move { count: 1, from: 1, to: 0 },
                Move { count: 1, from: 3, to: 2 },
            ]
        );
    }
}
