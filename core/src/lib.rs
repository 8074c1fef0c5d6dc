//! CHAINKV Core Library
//! 
//! Core types, traits, and abstractions shared by the CHAINKV handler,
//! its reference state stores and the developer CLI.

pub mod types;
pub mod traits;
pub mod error;
pub mod config;

pub use types::*;
pub use traits::*;
pub use error::*;
pub use config::*;
