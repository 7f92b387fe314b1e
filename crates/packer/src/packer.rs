use crate::equaliser::PackerWidths;
use crate::row::{centre_offset, ColumnSpan, Resizability, Row, RowSpec, Slot};
use formbar_config::PackerConfig;
use formbar_core::{Bounds, LayoutError, Measure, Result, Size};
use serde::Serialize;
use tracing::trace;

/// A panel has one label column and at most two value columns.
pub const MAX_VALUE_COLUMNS: usize = 2;

/// Fixed spacing applied by a [`RowPacker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackerMetrics {
    pub left_inset: u32,
    pub column_gap: u32,
    pub vertical_spacing: u32,
    pub label_suffix: String,
}

impl PackerMetrics {
    /// Build metrics from the config file's `[packer]` section.
    pub fn from_config(cfg: &PackerConfig) -> Self {
        Self {
            left_inset:       cfg.left_inset,
            column_gap:       cfg.column_gap,
            vertical_spacing: cfg.vertical_spacing,
            label_suffix:     cfg.label_suffix.clone(),
        }
    }
}

impl Default for PackerMetrics {
    fn default() -> Self {
        Self::from_config(&PackerConfig::default())
    }
}

/// Final position of one row's label and value slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowPlacement {
    pub label: Bounds,
    pub slots: [Option<Bounds>; 2],
}

/// Result of [`RowPacker::pack`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackedLayout {
    /// Panel extent: `inset + label + gap + total value width` by
    /// `last offset + last row height`. Zero for an empty panel.
    pub size: Size,
    pub label_width: u32,
    pub column_widths: Vec<u32>,
    pub total_value_width: u32,
    /// One entry per row, in insertion order.
    pub rows: Vec<RowPlacement>,
}

/// Lays out one panel's label/value rows in aligned columns.
///
/// Column widths are running maxima updated as rows are added. External
/// overrides (see [`set_labels_width`](Self::set_labels_width)) are kept
/// apart from those maxima, so the effective width of a column is never
/// narrower than what its own rows need.
#[derive(Debug, Clone)]
pub struct RowPacker<W> {
    metrics: PackerMetrics,
    rows: Vec<Row<W>>,
    label_natural: u32,
    label_override: u32,
    column_natural: Vec<u32>,
    column_override: Vec<u32>,
    /// Widest slot that spans both value columns.
    spanning_natural: u32,
    max_row_height: u32,
    next_offset: u32,
}

impl<W> RowPacker<W> {
    pub fn new(metrics: PackerMetrics) -> Self {
        Self {
            metrics,
            rows: Vec::new(),
            label_natural: 0,
            label_override: 0,
            column_natural: Vec::new(),
            column_override: Vec::new(),
            spanning_natural: 0,
            max_row_height: 0,
            next_offset: 0,
        }
    }

    pub fn metrics(&self) -> &PackerMetrics {
        &self.metrics
    }

    // ── Building ─────────────────────────────────────────────────────────────

    /// Measure and append a row. Returns the row's index.
    ///
    /// The declaration is validated before anything is measured or stored.
    pub fn add<M: Measure<W>>(&mut self, measure: &M, spec: RowSpec<W>) -> Result<usize> {
        spec.validate()?;
        let (label, first, second, span) = spec.into_parts();

        let label = self.display_label(&label);
        let label_size = if label.is_empty() {
            Size::ZERO
        } else {
            measure.label_size(&label)
        };

        let slot = |entry: Option<(W, Resizability)>| match entry {
            None => Slot::Absent,
            Some((widget, resize)) => {
                let natural = measure.natural_size(&widget);
                Slot::Widget { widget, natural, resize }
            }
        };
        let slots = [slot(first), slot(second)];

        let height = slots
            .iter()
            .map(|s| s.natural().height)
            .fold(label_size.height, u32::max);

        self.admit(Row {
            label,
            label_size,
            slots,
            span,
            height,
            offset: 0,
        });
        Ok(self.rows.len() - 1)
    }

    /// Label plus one widget in value column 1.
    pub fn add_row<M: Measure<W>>(
        &mut self,
        measure: &M,
        label: &str,
        widget: W,
        resize: Resizability,
    ) -> Result<usize> {
        self.add(measure, RowSpec::new(label).with(widget, resize))
    }

    /// Label plus one widget in each value column.
    pub fn add_row_pair<M: Measure<W>>(
        &mut self,
        measure: &M,
        label: &str,
        first: (W, Resizability),
        second: (W, Resizability),
    ) -> Result<usize> {
        self.add(
            measure,
            RowSpec::new(label)
                .with(first.0, first.1)
                .with_second(second.0, second.1),
        )
    }

    /// Label plus one widget spanning both value columns.
    pub fn add_spanning_row<M: Measure<W>>(
        &mut self,
        measure: &M,
        label: &str,
        widget: W,
        resize: Resizability,
    ) -> Result<usize> {
        self.add(measure, RowSpec::new(label).with(widget, resize).spanning())
    }

    /// Remove a row and recompute every running width and offset.
    pub fn remove_row(&mut self, index: usize) -> Option<Row<W>> {
        if index >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(index);
        self.rebuild();
        Some(removed)
    }

    /// Drop every row and every width override.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.label_override = 0;
        self.column_override.clear();
        self.rebuild();
    }

    fn display_label(&self, label: &str) -> String {
        if label.is_empty() {
            String::new()
        } else {
            format!("{label}{}", self.metrics.label_suffix)
        }
    }

    /// Fold a measured row into the running maxima and place it below the
    /// previous row.
    fn admit(&mut self, mut row: Row<W>) {
        row.offset = self.next_offset;
        self.label_natural = self.label_natural.max(row.label_size.width);

        match row.span {
            ColumnSpan::Double => {
                self.spanning_natural = self.spanning_natural.max(row.slots[0].natural().width);
            }
            ColumnSpan::Single => {
                for (index, slot) in row.slots.iter().enumerate() {
                    if slot.is_absent() {
                        continue;
                    }
                    if self.column_natural.len() <= index {
                        self.column_natural.resize(index + 1, 0);
                    }
                    self.column_natural[index] = self.column_natural[index].max(slot.natural().width);
                }
            }
        }

        self.max_row_height = self.max_row_height.max(row.height);
        self.next_offset = row
            .offset
            .saturating_add(row.height)
            .saturating_add(self.metrics.vertical_spacing);
        self.rows.push(row);
    }

    fn rebuild(&mut self) {
        let rows = std::mem::take(&mut self.rows);
        self.label_natural = 0;
        self.column_natural.clear();
        self.spanning_natural = 0;
        self.max_row_height = 0;
        self.next_offset = 0;
        for row in rows {
            self.admit(row);
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn rows(&self) -> &[Row<W>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_row_height(&self) -> u32 {
        self.max_row_height
    }

    /// Effective label column width.
    pub fn label_width(&self) -> u32 {
        self.label_natural.max(self.label_override)
    }

    /// Number of value columns in use, counting columns reserved by overrides.
    pub fn column_count(&self) -> usize {
        self.column_natural.len().max(self.column_override.len())
    }

    /// Effective width of value column `index`; zero for unused columns.
    pub fn component_width(&self, index: usize) -> u32 {
        let natural = self.column_natural.get(index).copied().unwrap_or(0);
        let forced = self.column_override.get(index).copied().unwrap_or(0);
        natural.max(forced)
    }

    /// Width available to the value area: the wider of the widest spanning
    /// slot and all value columns plus the gaps between them.
    pub fn total_component_width(&self) -> u32 {
        let count = self.column_count();
        let columns = (0..count).fold(0u32, |sum, i| sum.saturating_add(self.component_width(i)));
        let gaps = self
            .metrics
            .column_gap
            .saturating_mul(count.saturating_sub(1) as u32);
        self.spanning_natural.max(columns.saturating_add(gaps))
    }

    /// Snapshot of the effective label and per-column widths.
    pub fn widths(&self) -> PackerWidths {
        PackerWidths {
            label:   self.label_width(),
            columns: (0..self.column_count()).map(|i| self.component_width(i)).collect(),
        }
    }

    /// Widths the rows themselves need, ignoring overrides. Reserved columns
    /// are still listed, with the width of their rows (zero if none).
    ///
    /// This is what alignment starts from, so re-aligning after rows were
    /// removed lets every panel narrow again.
    pub fn natural_widths(&self) -> PackerWidths {
        PackerWidths {
            label:   self.label_natural,
            columns: (0..self.column_count())
                .map(|i| self.column_natural.get(i).copied().unwrap_or(0))
                .collect(),
        }
    }

    // ── External overrides ───────────────────────────────────────────────────

    /// Force the label column to at least `width`.
    pub fn set_labels_width(&mut self, width: u32) {
        self.label_override = width;
    }

    /// Force value column `index` to at least `width`, reserving the column if
    /// no row uses it yet.
    pub fn set_component_width(&mut self, index: usize, width: u32) -> Result<()> {
        if index >= MAX_VALUE_COLUMNS {
            return Err(LayoutError::ColumnOutOfRange {
                index,
                max: MAX_VALUE_COLUMNS,
            });
        }
        if self.column_override.len() <= index {
            self.column_override.resize(index + 1, 0);
        }
        self.column_override[index] = width;
        Ok(())
    }

    /// Apply a width table, e.g. one produced by the equaliser.
    pub fn apply_widths(&mut self, widths: &PackerWidths) -> Result<()> {
        if widths.columns.len() > MAX_VALUE_COLUMNS {
            return Err(LayoutError::ColumnOutOfRange {
                index: widths.columns.len() - 1,
                max: MAX_VALUE_COLUMNS,
            });
        }
        self.set_labels_width(widths.label);
        for (index, &width) in widths.columns.iter().enumerate().rev() {
            self.set_component_width(index, width)?;
        }
        Ok(())
    }

    // ── Packing ──────────────────────────────────────────────────────────────

    /// Compute final bounds for every label and slot.
    ///
    /// Pure with respect to the packer: calling it again without adding rows
    /// or changing widths yields an identical layout.
    pub fn pack(&self) -> PackedLayout {
        let Some(last) = self.rows.last() else {
            return PackedLayout::default();
        };

        let m = &self.metrics;
        let label_width = self.label_width();
        let column_widths: Vec<u32> = (0..self.column_count()).map(|i| self.component_width(i)).collect();
        let total_value_width = self.total_component_width();
        let column = |i: usize| column_widths.get(i).copied().unwrap_or(0);

        let first_x = m
            .left_inset
            .saturating_add(label_width)
            .saturating_add(m.column_gap);
        let second_x = first_x.saturating_add(column(0)).saturating_add(m.column_gap);

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let label = Bounds::new(
                    m.left_inset,
                    row.offset.saturating_add(centre_offset(row.height, row.label_size.height)),
                    row.label_size.width,
                    row.label_size.height,
                );
                let slots = match row.span {
                    ColumnSpan::Double => [
                        row.slots[0].place(first_x, total_value_width, row.offset, row.height),
                        None,
                    ],
                    ColumnSpan::Single => [
                        row.slots[0].place(first_x, column(0), row.offset, row.height),
                        row.slots[1].place(second_x, column(1), row.offset, row.height),
                    ],
                };
                RowPlacement { label, slots }
            })
            .collect();

        let size = Size::new(
            first_x.saturating_add(total_value_width),
            last.offset.saturating_add(last.height),
        );
        trace!(rows = self.rows.len(), width = size.width, height = size.height, "packed panel");

        PackedLayout {
            size,
            label_width,
            column_widths,
            total_value_width,
            rows,
        }
    }
}

impl<W> Default for RowPacker<W> {
    fn default() -> Self {
        Self::new(PackerMetrics::default())
    }
}
