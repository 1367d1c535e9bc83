//! Border types.

use serde::Deserialize;

/// Border line styles, ordered from lightest to heaviest declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    None,
    Thin,
    Medium,
    Dashed,
    Dotted,
    Thick,
    Double,
}

/// One edge of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl BorderSide {
    pub const ALL: [BorderSide; 4] = [
        BorderSide::Left,
        BorderSide::Right,
        BorderSide::Top,
        BorderSide::Bottom,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(default)]
pub struct Border {
    pub style: BorderStyle,
}

impl Border {
    pub fn new(style: BorderStyle) -> Self {
        Border { style }
    }

    pub fn thin() -> Self {
        Self::new(BorderStyle::Thin)
    }

    /// `true` when the border draws a line.
    pub fn is_visible(&self) -> bool {
        self.style != BorderStyle::None
    }
}

/// Per-side border configuration.
///
/// `inner` is applied to the boundaries between cells inside the scope the
/// borders are declared on, as opposed to the four outer sides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Borders {
    pub left: Option<Border>,
    pub right: Option<Border>,
    pub top: Option<Border>,
    pub bottom: Option<Border>,
    pub inner: Option<Box<Borders>>,
}

impl Borders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same border on all four outer sides.
    pub fn all(border: Border) -> Self {
        Borders {
            left: Some(border),
            right: Some(border),
            top: Some(border),
            bottom: Some(border),
            inner: None,
        }
    }

    pub fn with_left(mut self, border: Border) -> Self {
        self.left = Some(border);
        self
    }

    pub fn with_right(mut self, border: Border) -> Self {
        self.right = Some(border);
        self
    }

    pub fn with_top(mut self, border: Border) -> Self {
        self.top = Some(border);
        self
    }

    pub fn with_bottom(mut self, border: Border) -> Self {
        self.bottom = Some(border);
        self
    }

    pub fn with_inner(mut self, inner: Borders) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    pub fn side(&self, side: BorderSide) -> Option<Border> {
        match side {
            BorderSide::Left => self.left,
            BorderSide::Right => self.right,
            BorderSide::Top => self.top,
            BorderSide::Bottom => self.bottom,
        }
    }

    /// Border for an edge between two cells inside the scope.
    ///
    /// Falls back to the outer side when `inner` is set but leaves that side
    /// undeclared. Without `inner`, interior edges get no border.
    pub fn interior_side(&self, side: BorderSide) -> Option<Border> {
        self.inner
            .as_ref()
            .and_then(|inner| inner.side(side).or_else(|| self.side(side)))
    }

    /// Check if no side is declared
    pub fn is_empty(&self) -> bool {
        BorderSide::ALL.iter().all(|s| self.side(*s).is_none()) && self.inner.is_none()
    }
}
