//! Merge engine for Verso.
//!
//! Implements the three-way structural merge at the heart of the versioned
//! object store: reconciling a `before → after` edit with an independently
//! evolved `latest` value, per kind, recursively, without locks.
//!
//! - Numbers merge by additive delta: `latest + (after − before)`.
//! - Keyed containers merge key-by-key; keys the edit never touched carry
//!   latest's value forward.
//! - Records merge over the field maps their registered [`RecordAccessor`]
//!   exposes, then rebuild a fresh record seeded from `latest`.
//! - Scalars follow override-if-changed, with concurrent edits surfaced
//!   through [`MergeReport`].
//!
//! # Key Types
//!
//! - [`MergeEngine`] -- the entry point: `merge` / `merge_with_report`
//! - [`RecordAccessor`] / [`AccessorRegistry`] -- injected record field access
//! - [`MergeReport`] / [`ScalarConflict`] -- concurrent-edit reporting
//! - [`MergeError`] -- record configuration failures, the only error source

pub mod accessor;
pub mod engine;
pub mod error;
pub mod report;

pub use accessor::{AccessError, AccessorRegistry, MapAccessor, RecordAccessor};
pub use engine::MergeEngine;
pub use error::{MergeError, MergeResult};
pub use report::{MergeReport, ScalarConflict};
