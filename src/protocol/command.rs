//! Command output.
//!
//! Each turn produces exactly two lines: movement groups
//! (`<count> <from> <to>`, or `WAIT` when there are none) followed by
//! purchase groups (`<count> <zone>`, empty when nothing is bought).

use std::fmt;
use std::io::{self, Write};

use crate::world::ZoneId;

/// Moves `count` of the local player's pods along one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub count: u32,
    pub from: ZoneId,
    pub to: ZoneId,
}

/// Buys `count` pods on `zone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Purchase {
    pub count: u32,
    pub zone: ZoneId,
}

/// All commands issued in one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSet {
    pub moves: Vec<Move>,
    pub purchases: Vec<Purchase>,
}

impl CommandSet {
    pub fn new() -> Self {
        CommandSet::default()
    }

    /// Total pods bought across all purchase groups.
    pub fn pods_bought(&self) -> u32 {
        self.purchases.iter().map(|p| p.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.purchases.is_empty()
    }
}

impl fmt::Display for CommandSet {
    /// Formats both output lines, each terminated by a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.moves.is_empty() {
            writeln!(f, "WAIT")?;
        } else {
            let line: Vec<String> = self
                .moves
                .iter()
                .map(|m| format!("{} {} {}", m.count, m.from, m.to))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }

        let line: Vec<String> = self
            .purchases
            .iter()
            .map(|p| format!("{} {}", p.count, p.zone))
            .collect();
        writeln!(f, "{}", line.join(" "))
    }
}

/// Writes a turn's commands and flushes so the referee sees them immediately.
pub fn write_commands<W: Write>(out: &mut W, commands: &CommandSet) -> io::Result<()> {
    write!(out, "{}", commands)?;
    out.flush()
}
