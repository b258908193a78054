//! # Snapshot Testing Support
//!
//! Utilities for checking segmenter output via snapshot assertions and
//! invariant checks.
//!
//! ## Modules
//!
//! - **`listing`**: renders segments as one stable line each, for `insta`
//!   inline snapshots and the CLI's `--segments` output
//! - **`invariants`**: runtime checks for segmenter correctness (spans in
//!   bounds and disjoint, every non-whitespace byte covered once, math never
//!   empty, inline math never spanning a line break)

pub mod invariants;
pub mod listing;

pub use invariants::check as invariants;
pub use listing::{listing, preview};
