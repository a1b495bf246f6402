//! Benchmark crate for gm-rs.
//!
//! All benchmarks live in `benches/gm_bench.rs`; run with `cargo bench`.
