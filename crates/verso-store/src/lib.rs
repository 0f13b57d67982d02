//! In-memory versioned value store for Verso.
//!
//! The store keeps one revision chain per key. Writers commit optimistically:
//! they name the revision they based their edit on, and when the head has
//! moved since, the store reconciles the write through the merge engine
//! instead of rejecting it.
//!
//! # Key Types
//!
//! - [`RevisionId`] — content-addressed revision identifier (BLAKE3)
//! - [`VersionedStore`] — the store: `get` / `insert` / `commit`
//! - [`Snapshot`] / [`CommitOutcome`] — what reads and commits return

pub mod error;
pub mod revision;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use revision::RevisionId;
pub use store::{CommitOutcome, Snapshot, VersionedStore};
