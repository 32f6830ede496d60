//! Benchmark crate for the Parley messaging engine.
//!
//! The benchmarks live in `benches/`; run them with `cargo bench`.
