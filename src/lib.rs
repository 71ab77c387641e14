//! Ledger Network Bootstrap
//!
//! Provisions, brings up and load-tests a permissioned ledger network
//! following Clean/Hexagonal Architecture principles: use cases sequence
//! external tools behind gateway traits.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
