//! Mapping from GitHub labels to Todoist priority and label names.

use crate::domain::models::Priority;

/// Derive a task priority from issue labels.
///
/// The first label (in the given order) that names a priority wins:
/// `urgent` → 4, `high` → 3, `medium` → 2, `low` → 1. Matching is
/// case-insensitive and exact; labels are never combined. Defaults to
/// [`Priority::Low`].
pub fn priority_from_labels<S: AsRef<str>>(labels: &[S]) -> Priority {
    labels
        .iter()
        .find_map(|label| Priority::from_str(label.as_ref()))
        .unwrap_or_default()
}

/// Convert one GitHub label into a Todoist label name.
///
/// Lower-cases and replaces spaces and hyphens with underscores.
pub fn normalize_label(label: &str) -> String {
    label.to_lowercase().replace([' ', '-'], "_")
}

/// Convert GitHub labels into Todoist label names, dropping empty results.
pub fn normalize_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .map(|label| normalize_label(label.as_ref()))
        .filter(|label| !label.is_empty())
        .collect()
}
