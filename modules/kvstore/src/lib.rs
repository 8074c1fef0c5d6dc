//! CHAINKV Key-Value Handler
//! 
//! The state-transition handler invoked by the ledger host:
//! - Invocation routing by configured function name
//! - Single-key read with an explicit missing-key policy
//! - Single-key write (last write wins)
//! - Response encoding; no failure ever escapes as a host fault

pub mod context;
pub mod response;
pub mod operations;
pub mod router;
pub mod chaincode;

pub use context::InvocationContext;
pub use router::{Operation, Router};
pub use chaincode::KvChaincode;
