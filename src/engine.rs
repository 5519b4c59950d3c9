//! Game loop and engine state.
//!
//! Holds the static graph, the player identity, the decision engine, the
//! rolling turn history, and the random generator. `run` drives the whole
//! referee session: one setup message, then one decision per turn message
//! until the input ends.

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::protocol::{read_setup, read_turn, write_commands, ProtocolError, Setup, TokenReader};
use crate::strategy::{Decision, DecisionContext, DecisionEngine, TurnHistory, TurnSummary};
use crate::world::{PlayerId, WorldGraph, WorldState};

/// Fatal errors that end a session.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-session engine state.
pub struct Engine {
    setup: Setup,
    decision: DecisionEngine,
    history: TurnHistory,
    rng: SmallRng,
    turn_budget: Duration,
    turn: u32,
}

impl Engine {
    /// Creates an engine for a parsed setup.
    pub fn new(setup: Setup, config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Engine {
            setup,
            decision: DecisionEngine::from_config(config),
            history: TurnHistory::new(config.history_len),
            rng,
            turn_budget: Duration::from_millis(config.turn_budget_ms),
            turn: 0,
        }
    }

    pub fn graph(&self) -> &WorldGraph {
        &self.setup.graph
    }

    pub fn player_count(&self) -> usize {
        self.setup.player_count
    }

    pub fn my_id(&self) -> PlayerId {
        self.setup.my_id
    }

    pub fn history(&self) -> &TurnHistory {
        &self.history
    }

    /// Number of turns decided so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Records the snapshot in the history and decides this turn's commands.
    pub fn play_turn(&mut self, state: &WorldState) -> Decision {
        let started = Instant::now();
        self.turn += 1;
        self.history
            .push(TurnSummary::capture(self.turn, &self.setup.graph, state));

        let ctx = DecisionContext {
            graph: &self.setup.graph,
            state,
            me: self.setup.my_id,
            history: &self.history,
        };
        let decision = self.decision.decide(&ctx, &mut self.rng);

        let elapsed = started.elapsed();
        debug!(
            turn = self.turn,
            platinum = state.platinum(),
            platinum_left = decision.platinum_left,
            moves = decision.commands.moves.len(),
            purchases = decision.commands.purchases.len(),
            income_trend = ?self.history.income_trend(self.setup.my_id),
            elapsed_us = elapsed.as_micros() as u64,
            "turn decided"
        );
        if elapsed > self.turn_budget {
            warn!(
                turn = self.turn,
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = self.turn_budget.as_millis() as u64,
                "decision exceeded turn budget"
            );
        }

        decision
    }
}

/// Runs a full session: reads the setup, then answers every turn until the
/// input ends cleanly between turns. Returns the number of turns played.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    config: &EngineConfig,
) -> Result<u32, EngineError> {
    let mut reader = TokenReader::new(input);
    let setup = read_setup(&mut reader)?;
    info!(
        player_count = setup.player_count,
        my_id = setup.my_id.index(),
        zones = setup.graph.zone_count(),
        links = setup.graph.link_count(),
        "game started"
    );

    let mut engine = Engine::new(setup, config);
    info!(
        movement = engine.decision.movement_name(),
        fallback = ?config.fallback,
        seed = ?config.seed,
        "engine configured"
    );

    while !reader.at_end()? {
        let state = read_turn(&mut reader, engine.graph(), engine.player_count())?;
        let decision = engine.play_turn(&state);
        write_commands(out, &decision.commands)?;
    }

    info!(turns = engine.turn(), "input closed");
    Ok(engine.turn())
}
