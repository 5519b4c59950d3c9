//! Riftbot engine library.
//!
//! Exposes the world model, decision strategies, referee protocol, and game
//! loop for use by integration tests, benches, and the binary entry point.

pub mod config;
pub mod engine;
pub mod protocol;
pub mod strategy;
pub mod world;
