//! Zone identifiers, ownership, and game constants.

use std::fmt;

/// Maximum number of zones on a map.
pub const MAP_SIZE: usize = 154;

/// Number of player slots carried on every zone, regardless of player count.
pub const MAP_PLAYER: usize = 4;

/// Platinum price of a single pod.
pub const POD_COST: u32 = 20;

/// Largest per-zone platinum yield accepted from the referee.
pub const MAX_ZONE_YIELD: u32 = 1_000_000;

/// Per-turn response budget imposed by the referee, in milliseconds.
pub const TURN_BUDGET_MS: u64 = 95;

/// Index of a zone in `0..zone_count`.
pub type ZoneId = usize;

/// A player slot in `0..MAP_PLAYER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Creates a player id. Returns `None` outside `0..MAP_PLAYER`.
    pub const fn new(index: usize) -> Option<PlayerId> {
        if index < MAP_PLAYER {
            Some(PlayerId(index as u8))
        } else {
            None
        }
    }

    /// Returns the slot index, usable for indexing pod arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ownership of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Owner {
    #[default]
    Neutral,
    Player(PlayerId),
}

impl Owner {
    /// Decodes the wire owner id: `-1` is neutral, anything else a player slot.
    pub fn from_wire(id: i64) -> Option<Owner> {
        match id {
            -1 => Some(Owner::Neutral),
            n if n >= 0 => PlayerId::new(n as usize).map(Owner::Player),
            _ => None,
        }
    }

    /// Encodes the owner as its wire id.
    pub fn to_wire(self) -> i64 {
        match self {
            Owner::Neutral => -1,
            Owner::Player(p) => p.index() as i64,
        }
    }

    #[inline]
    pub fn is_neutral(self) -> bool {
        self == Owner::Neutral
    }

    #[inline]
    pub fn is(self, player: PlayerId) -> bool {
        self == Owner::Player(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_bounds() {
        assert_eq!(PlayerId::new(0).map(PlayerId::index), Some(0));
        assert_eq!(PlayerId::new(3).map(PlayerId::index), Some(3));
        assert_eq!(PlayerId::new(MAP_PLAYER), None);
    }

    #[test]
    fn owner_wire_ids() {
        assert_eq!(Owner::from_wire(-1), Some(Owner::Neutral));
        assert_eq!(Owner::from_wire(2), Some(Owner::Player(PlayerId(2))));
        assert_eq!(Owner::from_wire(4), None);
        assert_eq!(Owner::from_wire(-2), None);
        assert_eq!(Owner::Neutral.to_wire(), -1);
        assert_eq!(Owner::Player(PlayerId(1)).to_wire(), 1);
    }

    #[test]
    fn owner_predicates() {
        let p1 = PlayerId(1);
        assert!(Owner::Neutral.is_neutral());
        assert!(Owner::Player(p1).is(p1));
        assert!(!Owner::Player(p1).is(PlayerId(0)));
        assert!(!Owner::Neutral.is(p1));
    }
}
