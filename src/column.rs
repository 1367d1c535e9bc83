use serde::Deserialize;

use crate::border::Borders;
use crate::merge::MergeRules;
use crate::style::Style;

/// Represents a single column definition within a (possibly nested) column tree.
///
/// A column with no children is a *leaf*: it maps to exactly one physical output
/// column and is the only kind of column that is written with row values. A column
/// with children is a pure group header spanning the leaves below it.
#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Column {
    /// The data-source key. Empty for pure group headers.
    pub name: String,
    /// Optional nested lookup path. When non-empty the value is read through
    /// `Data::lookup` instead of the top-level `name` key.
    pub path: Vec<String>,
    /// The display text written into the header.
    pub label: String,
    /// The value-formatting spec handed to the backend, e.g. `date:%Y-%m-%d`.
    pub format: String,
    /// Merge conditions for body cells of this column.
    pub merge: Option<MergeRules>,
    /// Borders applied to the body range of this column.
    pub borders: Option<Borders>,
    /// Style applied to body cells of this column.
    pub style: Option<Style>,
    /// Ordered child columns. Empty for a leaf.
    pub children: Vec<Column>,
}

impl Column {
    /// Creates a new leaf `Column`.
    ///
    /// # Arguments
    ///
    /// * `name` - The data-source key.
    /// * `label` - The header text.
    pub fn new(name: &str, label: &str) -> Self {
        Column {
            name: name.to_string(),
            label: label.to_string(),
            ..Default::default()
        }
    }

    /// Creates a new group `Column` with the given children.
    ///
    /// # Arguments
    ///
    /// * `label` - The header text of the group.
    /// * `children` - The child columns, left to right.
    pub fn group(label: &str, children: Vec<Column>) -> Self {
        Column {
            label: label.to_string(),
            children,
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    pub fn with_path(mut self, path: &[&str]) -> Self {
        self.path = path.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_merge(mut self, merge: MergeRules) -> Self {
        self.merge = Some(merge);
        self
    }

    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = Some(borders);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Checks if this column is a group header (i.e., has children).
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the number of physical leaf columns this column spans.
    ///
    /// A leaf spans exactly one column; a group spans the sum of its children.
    pub fn leaf_count(&self) -> usize {
        if self.has_children() {
            self.children.iter().map(Column::leaf_count).sum()
        } else {
            1
        }
    }

    /// Returns the number of header rows needed to display this column and its descendants.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Column::depth)
            .max()
            .unwrap_or(0)
    }

    /// Returns the key path used to read this column's value from a row.
    pub fn field_path(&self) -> Vec<&str> {
        if self.path.is_empty() {
            vec![self.name.as_str()]
        } else {
            self.path.iter().map(String::as_str).collect()
        }
    }

    /// Returns the horizontal merge conditions declared on this column, if any.
    pub fn horizontal_conditions(&self) -> &[crate::merge::MergeCondition] {
        self.merge
            .as_ref()
            .map(|m| m.horizontal.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the vertical merge conditions declared on this column, if any.
    pub fn vertical_conditions(&self) -> &[crate::merge::MergeCondition] {
        self.merge
            .as_ref()
            .map(|m| m.vertical.as_slice())
            .unwrap_or(&[])
    }
}

/// Calculates the number of header rows a column list needs.
///
/// A flat list (or an empty one) needs a single row; every level of nesting adds one.
pub fn max_depth(columns: &[Column]) -> usize {
    columns.iter().map(Column::depth).max().unwrap_or(1)
}

/// Flattens a column tree into its leaves in left-to-right, pre-order sequence.
pub fn flatten(columns: &[Column]) -> Vec<&Column> {
    let mut leaves = Vec::new();
    let mut stack: Vec<&Column> = columns.iter().rev().collect();

    while let Some(column) = stack.pop() {
        if column.has_children() {
            // Push children in reverse order to process left-to-right
            stack.extend(column.children.iter().rev());
        } else {
            leaves.push(column);
        }
    }
    leaves
}

/// Calculates the total number of physical columns occupied by a column list.
pub fn total_leaf_count(columns: &[Column]) -> usize {
    columns.iter().map(Column::leaf_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Vec<Column> {
        vec![
            Column::group(
                "Group",
                vec![
                    Column::new("a", "A"),
                    Column::group("Inner", vec![Column::new("b", "B"), Column::new("c", "C")]),
                ],
            ),
            Column::new("d", "D"),
        ]
    }

    #[test]
    fn test_column_new() {
        let column = Column::new("key", "Label");
        assert_eq!(column.name, "key");
        assert_eq!(column.label, "Label");
        assert!(!column.has_children());
        assert_eq!(column.leaf_count(), 1);
        assert_eq!(column.field_path(), vec!["key"]);
    }

    #[test]
    fn test_column_leaf_count() {
        let columns = nested();
        assert_eq!(columns[0].leaf_count(), 3);
        assert_eq!(columns[0].children[1].leaf_count(), 2);
        assert_eq!(columns[1].leaf_count(), 1);
        assert_eq!(total_leaf_count(&columns), 4);
    }

    #[test]
    fn test_max_depth_flat() {
        let columns = vec![Column::new("a", "A"), Column::new("b", "B")];
        assert_eq!(max_depth(&columns), 1);
    }

    #[test]
    fn test_max_depth_grows_by_one_per_level() {
        let one = vec![Column::new("a", "A")];
        let two = vec![Column::group("G", one.clone())];
        let three = vec![Column::group("H", two.clone()), Column::new("x", "X")];
        assert_eq!(max_depth(&one), 1);
        assert_eq!(max_depth(&two), 2);
        assert_eq!(max_depth(&three), 3);
        assert_eq!(max_depth(&nested()), 3);
    }

    #[test]
    fn test_empty_column_list() {
        assert_eq!(max_depth(&[]), 1);
        assert_eq!(total_leaf_count(&[]), 0);
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_flatten_preserves_leaf_order() {
        let columns = nested();
        let names: Vec<_> = flatten(&columns).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let columns = nested();
        let flat: Vec<Column> = flatten(&columns).into_iter().cloned().collect();
        let again: Vec<_> = flatten(&flat).iter().map(|c| c.name.clone()).collect();
        let original: Vec<_> = flatten(&columns).iter().map(|c| c.name.clone()).collect();
        assert_eq!(again, original);
        assert_eq!(max_depth(&flat), 1);
    }

    #[test]
    fn test_field_path_prefers_nested_path() {
        let column = Column::new("city", "City").with_path(&["address", "city"]);
        assert_eq!(column.field_path(), vec!["address", "city"]);
    }
}
