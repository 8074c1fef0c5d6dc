//! CHAINKV developer host
//!
//! Plays the ledger host's part for one invocation at a time against a
//! local sled directory.

pub mod commands;

pub use commands::*;
