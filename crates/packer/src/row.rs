use formbar_core::{Bounds, LayoutError, Result, Size};
use serde::{Deserialize, Serialize};

/// Whether a slot stretches to fill the space its column reserves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resizability {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Resizability {
    /// Keeps its natural size in both directions.
    pub const FIXED: Self = Self { horizontal: false, vertical: false };
    /// Takes the column width, keeps its natural height.
    pub const HORIZONTAL: Self = Self { horizontal: true, vertical: false };
    /// Takes the column width and the full row height.
    pub const BOTH: Self = Self { horizontal: true, vertical: true };
}

/// How many value columns the first slot of a row occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSpan {
    #[default]
    Single,
    /// Spans value column 1, the gap, and value column 2.
    Double,
}

/// One value position in a row.
///
/// Every row carries two of these; rows built with one widget get an
/// `Absent` second slot so row iteration never has to special-case arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<W> {
    Absent,
    Widget {
        widget: W,
        natural: Size,
        resize: Resizability,
    },
}

impl<W> Slot<W> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }

    pub fn widget(&self) -> Option<&W> {
        match self {
            Slot::Absent => None,
            Slot::Widget { widget, .. } => Some(widget),
        }
    }

    /// Natural size, zero when absent.
    pub fn natural(&self) -> Size {
        match self {
            Slot::Absent => Size::ZERO,
            Slot::Widget { natural, .. } => *natural,
        }
    }

    /// Place this slot inside a cell `column_width` wide at `x`, within a row
    /// starting at `row_y` that is `row_height` tall.
    pub(crate) fn place(&self, x: u32, column_width: u32, row_y: u32, row_height: u32) -> Option<Bounds> {
        let Slot::Widget { natural, resize, .. } = self else {
            return None;
        };
        let width = if resize.horizontal { column_width } else { natural.width };
        let (y, height) = if resize.vertical {
            (row_y, row_height)
        } else {
            (row_y.saturating_add(centre_offset(row_height, natural.height)), natural.height)
        };
        Some(Bounds::new(x, y, width, height))
    }
}

/// Offset that centres `inner` within `outer`.
pub(crate) fn centre_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}

/// Declaration of a row before it is measured and added to a packer.
///
/// ```ignore
/// let spec = RowSpec::new("Date of birth")
///     .with(day_field, Resizability::HORIZONTAL)
///     .with_second(age_label, Resizability::FIXED);
/// ```
#[derive(Debug, Clone)]
pub struct RowSpec<W> {
    label: String,
    first: Option<(W, Resizability)>,
    second: Option<(W, Resizability)>,
    span: ColumnSpan,
}

impl<W> RowSpec<W> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            first: None,
            second: None,
            span: ColumnSpan::Single,
        }
    }

    /// Set the widget for value column 1.
    #[must_use]
    pub fn with(mut self, widget: W, resize: Resizability) -> Self {
        self.first = Some((widget, resize));
        self
    }

    /// Set the widget for value column 2.
    #[must_use]
    pub fn with_second(mut self, widget: W, resize: Resizability) -> Self {
        self.second = Some((widget, resize));
        self
    }

    /// Let the first widget span both value columns.
    #[must_use]
    pub fn spanning(mut self) -> Self {
        self.span = ColumnSpan::Double;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn span(&self) -> ColumnSpan {
        self.span
    }

    /// Reject combinations that cannot be laid out.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.first.is_none() && self.second.is_some() {
            return Err(LayoutError::InvalidArgument(format!(
                "row '{}' has a second value without a first",
                self.label
            )));
        }
        if self.span == ColumnSpan::Double && self.second.is_some() {
            return Err(LayoutError::InvalidArgument(format!(
                "row '{}' spans both value columns but declares two values",
                self.label
            )));
        }
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (String, Option<(W, Resizability)>, Option<(W, Resizability)>, ColumnSpan) {
        (self.label, self.first, self.second, self.span)
    }
}

/// A measured row owned by a [`RowPacker`](crate::RowPacker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<W> {
    /// Display text, suffix already applied. Empty for blank labels.
    pub(crate) label: String,
    pub(crate) label_size: Size,
    pub(crate) slots: [Slot<W>; 2],
    pub(crate) span: ColumnSpan,
    pub(crate) height: u32,
    /// Vertical offset from the top of the panel.
    pub(crate) offset: u32,
}

impl<W> Row<W> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn label_size(&self) -> Size {
        self.label_size
    }

    pub fn slots(&self) -> &[Slot<W>; 2] {
        &self.slots
    }

    pub fn span(&self) -> ColumnSpan {
        self.span
    }

    /// `max(label height, slot heights)`, fixed when the row is added.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}
