//! Command-Line Interface
//!
//! Contains the command tree, the application context and the handlers that
//! drive use cases from parsed commands.

pub mod commands;
pub mod context;
pub mod handlers;

pub use commands::{Cli, Commands};
pub use context::{AppContext, Gateways};
