//! Infrastructure Layer
//!
//! Contains all external concerns: driving adapters (command line) and
//! driven adapters (container runtime, generator tools, peer CLI, prompts).

pub mod driven_adapters;
pub mod driving_adapters;
