//! Referee protocol handling.
//!
//! Reads the whitespace-separated integer stream sent by the referee (one
//! initialization message, then one message per turn) and writes the
//! two-line command response.

pub mod command;
pub mod parser;
pub mod reader;

pub use command::{write_commands, CommandSet, Move, Purchase};
pub use parser::{read_setup, read_turn, ProtocolError, Setup};
pub use reader::TokenReader;
