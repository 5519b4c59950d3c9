//! Per-turn decision procedure.
//!
//! `DecisionEngine::decide` turns one snapshot into a `CommandSet`: a movement
//! phase delegated to a pluggable `MovementPolicy`, then a greedy acquisition
//! phase. The snapshot is only read; nothing a decision pass does is visible
//! to later turns except through the `TurnHistory` the game loop maintains.

pub mod acquisition;
pub mod history;
pub mod movement;

pub use acquisition::{plan_purchases, AcquisitionPlan, FallbackPool};
pub use history::{TurnHistory, TurnSummary};
pub use movement::{ExpandPolicy, HoldPolicy, MovementPolicy};

use rand::Rng;

use crate::config::{EngineConfig, MovementKind};
use crate::protocol::CommandSet;
use crate::world::{PlayerId, WorldGraph, WorldState};

/// Everything a strategy may read during one decision pass.
#[derive(Clone, Copy)]
pub struct DecisionContext<'a> {
    pub graph: &'a WorldGraph,
    pub state: &'a WorldState,
    pub me: PlayerId,
    pub history: &'a TurnHistory,
}

/// Commands for one turn plus the platinum the engine expects to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub commands: CommandSet,
    pub platinum_left: u32,
}

/// Combines a movement policy with the greedy acquisition phase.
pub struct DecisionEngine {
    movement: Box<dyn MovementPolicy>,
    fallback: FallbackPool,
}

impl DecisionEngine {
    pub fn new(movement: Box<dyn MovementPolicy>, fallback: FallbackPool) -> Self {
        DecisionEngine { movement, fallback }
    }

    /// Builds the engine described by a config.
    pub fn from_config(config: &EngineConfig) -> Self {
        let movement: Box<dyn MovementPolicy> = match config.movement {
            MovementKind::Hold => Box::new(HoldPolicy),
            MovementKind::Expand => Box::new(ExpandPolicy),
        };
        DecisionEngine::new(movement, config.fallback)
    }

    pub fn movement_name(&self) -> &'static str {
        self.movement.name()
    }

    /// Runs one decision pass.
    pub fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut impl Rng) -> Decision {
        let proposed = self.movement.plan_moves(ctx, rng);
        let moves = movement::validate_moves(ctx, proposed);

        let plan = plan_purchases(ctx.graph, ctx.state, self.fallback, &mut *rng);

        Decision {
            commands: CommandSet {
                moves,
                purchases: plan.purchases,
            },
            platinum_left: plan.platinum_left,
        }
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        DecisionEngine::new(Box::new(HoldPolicy), FallbackPool::default())
    }
}
