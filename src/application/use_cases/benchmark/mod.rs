//! Benchmark Use Cases

mod run_load;

pub use run_load::RunLoadUseCase;
