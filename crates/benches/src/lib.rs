//! Placeholder library target; the benchmarks live under `benches/`.
