//! Cross-panel column alignment.
//!
//! Panels are packed independently, so their label and value columns only
//! line up if they agree on widths. The equaliser collects each panel's width
//! table, takes the per-column maximum, and hands back new tables that every
//! panel then applies before packing.
//!
//! Tables are plain values: nothing here holds on to a packer.

use crate::packer::RowPacker;
use formbar_core::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Label and value-column widths of one panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackerWidths {
    pub label: u32,
    /// Indexed by value column; may be shorter than another panel's.
    pub columns: Vec<u32>,
}

/// Accumulates running maxima over a set of panels.
#[derive(Debug, Clone, Default)]
pub struct PackerEqualiser {
    registered: Vec<PackerWidths>,
    max_label: u32,
    max_columns: Vec<u32>,
}

impl PackerEqualiser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one panel's widths.
    pub fn add(&mut self, widths: &PackerWidths) {
        self.max_label = self.max_label.max(widths.label);
        if self.max_columns.len() < widths.columns.len() {
            self.max_columns.resize(widths.columns.len(), 0);
        }
        for (max, &width) in self.max_columns.iter_mut().zip(&widths.columns) {
            *max = (*max).max(width);
        }
        self.registered.push(widths.clone());
    }

    /// Register the widths a packer's rows need, ignoring earlier overrides.
    pub fn add_packer<W>(&mut self, packer: &RowPacker<W>) {
        self.add(&packer.natural_widths());
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    pub fn max_label(&self) -> u32 {
        self.max_label
    }

    pub fn max_columns(&self) -> &[u32] {
        &self.max_columns
    }

    /// One width table per registered panel, in registration order.
    ///
    /// With fewer than two panels there is nothing to align against and the
    /// registered tables come back unchanged.
    pub fn equalise(&self) -> Vec<PackerWidths> {
        if self.registered.len() < 2 {
            return self.registered.clone();
        }

        let shared = PackerWidths {
            label:   self.max_label,
            columns: self.max_columns.clone(),
        };
        debug!(
            panels = self.registered.len(),
            label = shared.label,
            columns = ?shared.columns,
            "equalised panel widths"
        );
        vec![shared; self.registered.len()]
    }
}

/// Equalise a list of width tables without touching any packer.
///
/// The result does not depend on input order, and every output column is at
/// least as wide as the corresponding input column.
pub fn compute_equalised_widths(packers: &[PackerWidths]) -> Vec<PackerWidths> {
    let mut equaliser = PackerEqualiser::new();
    for widths in packers {
        equaliser.add(widths);
    }
    equaliser.equalise()
}

/// Align a set of packers in place. Call after rows are added or removed and
/// before packing.
///
/// Alignment starts from each packer's natural widths, so running it again
/// replaces the previous overrides instead of building on them. A single
/// packer is left untouched.
pub fn equalise_packers<W>(packers: &mut [&mut RowPacker<W>]) -> Result<()> {
    if packers.len() < 2 {
        return Ok(());
    }
    let tables: Vec<PackerWidths> = packers.iter().map(|p| p.natural_widths()).collect();
    let equalised = compute_equalised_widths(&tables);
    for (packer, widths) in packers.iter_mut().zip(&equalised) {
        packer.apply_widths(widths)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::PackerMetrics;
    use crate::row::Resizability;
    use formbar_core::{CellMeasure, Size};

    fn widths(label: u32, columns: &[u32]) -> PackerWidths {
        PackerWidths {
            label,
            columns: columns.to_vec(),
        }
    }

    fn packer_with_labels(labels: &[&str]) -> RowPacker<Size> {
        let metrics = PackerMetrics {
            label_suffix: String::new(),
            ..PackerMetrics::default()
        };
        let measure = CellMeasure::new(10, 20);
        let mut packer = RowPacker::new(metrics);
        for label in labels {
            packer
                .add_row(&measure, label, Size::new(40, 20), Resizability::FIXED)
                .unwrap();
        }
        packer
    }

    #[test]
    fn labels_align_to_the_widest_panel() {
        // natural label widths [50, 80] and [60]
        let mut p1 = packer_with_labels(&["aaaaa", "aaaaaaaa"]);
        let mut p2 = packer_with_labels(&["aaaaaa"]);

        let mut equaliser = PackerEqualiser::new();
        equaliser.add_packer(&p1);
        equaliser.add_packer(&p2);
        let tables = equaliser.equalise();
        p1.apply_widths(&tables[0]).unwrap();
        p2.apply_widths(&tables[1]).unwrap();

        assert_eq!(p1.label_width(), 80);
        assert_eq!(p2.label_width(), 80);
    }

    #[test]
    fn single_panel_is_left_alone() {
        let only = widths(30, &[10, 20]);
        assert_eq!(compute_equalised_widths(&[only.clone()]), vec![only]);
        assert!(compute_equalised_widths(&[]).is_empty());
    }

    #[test]
    fn shorter_tables_are_extended() {
        let out = compute_equalised_widths(&[widths(10, &[100]), widths(20, &[50, 70])]);
        assert_eq!(out, vec![widths(20, &[100, 70]), widths(20, &[100, 70])]);
    }

    #[test]
    fn running_maxima_follow_each_add() {
        let mut equaliser = PackerEqualiser::new();
        equaliser.add(&widths(10, &[5]));
        assert_eq!(equaliser.max_label(), 10);
        equaliser.add(&widths(3, &[1, 9]));
        assert_eq!(equaliser.max_label(), 10);
        assert_eq!(equaliser.max_columns(), &[5, 9]);
        assert_eq!(equaliser.len(), 2);
    }

    #[test]
    fn equalise_packers_widens_in_place() {
        let mut p1 = packer_with_labels(&["ab"]);
        let mut p2 = packer_with_labels(&["abcdefg"]);
        p2.set_component_width(1, 33).unwrap();

        equalise_packers(&mut [&mut p1, &mut p2]).unwrap();

        assert_eq!(p1.label_width(), 70);
        assert_eq!(p1.column_count(), 2);
        assert_eq!(p1.component_width(1), 33);
        assert_eq!(p1.widths(), p2.widths());
    }

    #[test]
    fn realigning_after_row_removal_narrows_every_panel() {
        let measure = CellMeasure::new(10, 20);
        let metrics = PackerMetrics {
            label_suffix: String::new(),
            ..PackerMetrics::default()
        };
        let mut a = RowPacker::new(metrics.clone());
        a.add_row(&measure, "aaaaaaaaaa", Size::new(300, 20), Resizability::FIXED).unwrap();
        a.add_row(&measure, "aa", Size::new(40, 20), Resizability::FIXED).unwrap();
        let mut b = RowPacker::new(metrics);
        b.add_row(&measure, "aaa", Size::new(50, 20), Resizability::FIXED).unwrap();

        equalise_packers(&mut [&mut a, &mut b]).unwrap();
        assert_eq!((b.label_width(), b.component_width(0)), (100, 300));

        a.remove_row(0);
        equalise_packers(&mut [&mut a, &mut b]).unwrap();

        assert_eq!((a.label_width(), a.component_width(0)), (30, 50));
        assert_eq!((b.label_width(), b.component_width(0)), (30, 50));
    }

    #[test]
    fn add_packer_ignores_previous_overrides() {
        let mut packer = packer_with_labels(&["ab"]);
        packer.set_labels_width(500);
        let mut equaliser = PackerEqualiser::new();
        equaliser.add_packer(&packer);
        assert_eq!(equaliser.max_label(), 20);
    }

    #[test]
    fn equalised_panels_share_value_column_x() {
        let mut p1 = packer_with_labels(&["a"]);
        let mut p2 = packer_with_labels(&["abcdefghijkl"]);
        equalise_packers(&mut [&mut p1, &mut p2]).unwrap();

        let x1 = p1.pack().rows[0].slots[0].map(|b| b.x);
        let x2 = p2.pack().rows[0].slots[0].map(|b| b.x);
        assert_eq!(x1, x2);
    }
}
