//! Merge conditions and candidate-range detection.
//!
//! The detection here is axis-agnostic: it walks a sequence of comparable cell
//! texts (down a column or across a row) and returns the runs that should be
//! collapsed into one merged cell.

use serde::Deserialize;

/// A rule deciding whether two adjacent cells merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeCondition {
    /// Merge when both values are equal and non-empty.
    Identical,
    /// Merge when both values are empty or absent.
    Empty,
}

impl MergeCondition {
    /// Evaluates this condition on two trimmed cell texts.
    pub fn is_satisfied(self, previous: &str, current: &str) -> bool {
        match self {
            MergeCondition::Identical => !previous.is_empty() && previous == current,
            MergeCondition::Empty => previous.is_empty() && current.is_empty(),
        }
    }
}

/// Independent merge condition lists for the two axes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct MergeRules {
    pub vertical: Vec<MergeCondition>,
    pub horizontal: Vec<MergeCondition>,
}

impl MergeRules {
    pub fn vertical(conditions: &[MergeCondition]) -> Self {
        MergeRules {
            vertical: conditions.to_vec(),
            horizontal: Vec::new(),
        }
    }

    pub fn horizontal(conditions: &[MergeCondition]) -> Self {
        MergeRules {
            vertical: Vec::new(),
            horizontal: conditions.to_vec(),
        }
    }
}

/// Returns the conditions as a sorted, de-duplicated set, so that two lists
/// declaring the same conditions in a different order compare equal.
pub fn condition_set(conditions: &[MergeCondition]) -> Vec<MergeCondition> {
    let mut set = conditions.to_vec();
    set.sort();
    set.dedup();
    set
}

/// Returns `true` if any condition is satisfied. An empty list never merges.
pub fn should_merge(conditions: &[MergeCondition], previous: &str, current: &str) -> bool {
    conditions
        .iter()
        .any(|c| c.is_satisfied(previous.trim(), current.trim()))
}

/// An inclusive run of indices that collapse into one merged cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSpan {
    pub first: usize,
    pub last: usize,
}

impl MergeSpan {
    pub fn new(first: usize, last: usize) -> Self {
        MergeSpan { first, last }
    }

    /// Number of cells covered by the span.
    pub fn count(&self) -> usize {
        self.last - self.first + 1
    }
}

/// Finds the runs of adjacent cells that satisfy `conditions`.
///
/// Each element of `cells` is the formatted text of one cell, or `None` when the
/// cell is a forced boundary (vetoed, missing, or already merged). A boundary
/// closes the open run and never joins a run itself. Runs shorter than two cells
/// are discarded.
pub fn detect_spans(cells: &[Option<String>], conditions: &[MergeCondition]) -> Vec<MergeSpan> {
    let mut spans = Vec::new();
    if conditions.is_empty() {
        return spans;
    }

    let mut open: Option<MergeSpan> = None;
    let mut last_value: Option<&str> = None;

    for (index, cell) in cells.iter().enumerate() {
        let Some(text) = cell.as_deref().map(str::trim) else {
            close_span(&mut spans, open.take());
            last_value = None;
            continue;
        };

        let extends = match (open, last_value) {
            (Some(_), Some(previous)) => should_merge(conditions, previous, text),
            _ => false,
        };
        if extends {
            if let Some(span) = open.as_mut() {
                span.last = index;
            }
        } else {
            close_span(&mut spans, open.take());
            open = Some(MergeSpan::new(index, index));
        }
        last_value = Some(text);
    }
    close_span(&mut spans, open);

    spans
}

fn close_span(spans: &mut Vec<MergeSpan>, span: Option<MergeSpan>) {
    if let Some(span) = span {
        if span.count() >= 2 {
            spans.push(span);
        }
    }
}
