//! CHAINKV State Management
//! 
//! Reference state stores standing in for the ledger host, and the
//! per-transaction stub through which the handler reaches them.
//! Uses a key-value model where state = { key → value }

pub mod store;
pub mod memory;
pub mod persistent;
pub mod stub;

pub use store::*;
pub use memory::*;
pub use persistent::*;
pub use stub::*;
