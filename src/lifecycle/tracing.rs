//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber for the whole
//! process. Log levels come from `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run
//!
//! # Full payloads (bill lines, store documents)
//! RUST_LOG=debug cargo run
//!
//! # Only the store layer
//! RUST_LOG=farm_market::store=debug cargo run
//! ```
//!
//! Entry points log their payload once at `debug` with the `?` field syntax
//! and stay terse at `info`:
//!
//! ```text
//! INFO Created bill_id="bill_1" size=1
//! DEBUG Action bill_id="bill_1" action=CommitSelection
//! INFO Bill submitted bill_id="bill_1" path=accounts/farmer123/bills/1700000000000
//! WARN Product not found transcript="onion"
//! ```
//!
//! Spans created by `#[instrument]` on the clients show inline, e.g.
//! `checkout{id=bill_2}: Sending request`.

/// Installs the global subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
