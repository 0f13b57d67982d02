//! Diff engine for Verso.
//!
//! Computes structural before/after comparisons of [`Value`] trees,
//! producing per-key verdicts for containers and records and leaf-level
//! comparisons for scalars and numbers. Diffs are independent of any
//! third "latest" value and double as the definition of "touched by the
//! edit" that the merge engine relies on.
//!
//! # Key Types
//!
//! - [`Diff`] — result of comparing two values
//! - [`KeyDiff`] — verdict for a single key (added/removed/unchanged/changed)
//!
//! [`Value`]: verso_value::Value

pub mod structural;

pub use structural::{diff, Diff, KeyDiff};
