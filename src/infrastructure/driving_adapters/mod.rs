//! Driving Adapters
//!
//! Entry points that drive the application:
//! - Command-line interface (clap command tree and handlers)
//! - Application context wiring use cases to gateways

pub mod cli;
