//! Conflict reporting.
//!
//! The merge itself never fails on concurrent edits — it silently prefers
//! the author's value — but hosts that want to surface real conflicts can
//! read them from the [`MergeReport`] that
//! [`MergeEngine::merge_with_report`](crate::MergeEngine::merge_with_report)
//! returns alongside the merged value.

use serde::{Deserialize, Serialize};
use verso_value::Value;

/// A position where the author and an independent writer both changed the
/// same scalar to different values.
///
/// The merged output adopted `after`; `latest` is the value that lost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalarConflict {
    /// Dot-joined key path from the merge root; `(root)` for the top level.
    pub path: String,
    /// The value the author started from, if present.
    pub before: Option<Value>,
    /// The author's value, which won.
    pub after: Option<Value>,
    /// The independently written value, which lost.
    pub latest: Option<Value>,
}

/// Everything a merge observed that a host might want to surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Concurrent scalar edits, in key-path order of discovery.
    pub conflicts: Vec<ScalarConflict>,
}

impl MergeReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the merge saw no concurrent scalar edits.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of conflicts observed.
    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    /// Returns `true` if the report holds no conflicts.
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub(crate) fn record(
        &mut self,
        path: &[String],
        before: Option<&Value>,
        after: Option<&Value>,
        latest: Option<&Value>,
    ) {
        let conflict = ScalarConflict {
            path: render_path(path),
            before: before.cloned(),
            after: after.cloned(),
            latest: latest.cloned(),
        };
        tracing::debug!(path = %conflict.path, "concurrent scalar edit, adopting author value");
        self.conflicts.push(conflict);
    }
}

pub(crate) fn render_path(path: &[String]) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_clean() {
        let report = MergeReport::new();
        assert!(report.is_clean());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn recorded_conflict_renders_path() {
        let mut report = MergeReport::new();
        report.record(
            &["kid".to_string(), "title".to_string()],
            Some(&Value::from("a")),
            Some(&Value::from("b")),
            Some(&Value::from("c")),
        );
        assert_eq!(report.conflicts[0].path, "kid.title");
        assert!(!report.is_clean());
    }

    #[test]
    fn root_conflict_path() {
        let mut report = MergeReport::new();
        report.record(&[], Some(&Value::from("a")), Some(&Value::from("b")), None);
        assert_eq!(report.conflicts[0].path, "(root)");
    }
}
