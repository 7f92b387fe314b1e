//! Layout engine for `formbar`.
//!
//! Wires the layout crates together behind one value a host widget can own:
//! - packer metrics and row packers for label/value panels
//! - cross-panel equalisation followed by packing
//! - adaptive bars with eviction tuning from the config file
//! - a monospace measure for hosts without their own text metrics
//!
//! The host keeps rendering, event dispatch and re-entrancy guards; the
//! engine only answers geometry and membership questions.

pub mod scene;

pub use scene::{load_scene, parse_scene, run_scene, BarFrame, PanelReport, Scene, SceneReport};

use formbar_bar::{AdaptiveBar, BarMetrics};
use formbar_config::LayoutConfig;
use formbar_core::{CellMeasure, Result};
use formbar_packer::{equalise_packers, PackedLayout, PackerMetrics, RowPacker};
use std::fmt;
use std::path::Path;
use tracing::debug;

// ── Engine ────────────────────────────────────────────────────────────────────

/// Geometry service configured once from [`LayoutConfig`].
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config:         LayoutConfig,
    packer_metrics: PackerMetrics,
    bar_metrics:    BarMetrics,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        let packer_metrics = PackerMetrics::from_config(&config.packer);
        let bar_metrics = BarMetrics::from_config(&config.bar);
        Self {
            config,
            packer_metrics,
            bar_metrics,
        }
    }

    /// Build an engine from a config file (defaults when it does not exist).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        formbar_config::load(path).map(Self::new)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn packer_metrics(&self) -> &PackerMetrics {
        &self.packer_metrics
    }

    pub fn bar_metrics(&self) -> BarMetrics {
        self.bar_metrics
    }

    /// Monospace measure sized from the `[measure]` section.
    pub fn measure(&self) -> CellMeasure {
        CellMeasure::new(self.config.measure.cell_width, self.config.measure.line_height)
    }

    /// Empty packer using the configured spacing.
    pub fn row_packer<W>(&self) -> RowPacker<W> {
        RowPacker::new(self.packer_metrics.clone())
    }

    /// Empty bar using the configured eviction tuning.
    pub fn adaptive_bar<K>(&self) -> AdaptiveBar<K>
    where
        K: Clone + PartialEq + fmt::Debug,
    {
        AdaptiveBar::new(self.bar_metrics)
    }

    /// Align all panels to shared column widths, then pack each one.
    ///
    /// Layouts come back in the order the panels were given.
    pub fn layout_panels<W>(&self, panels: &mut [&mut RowPacker<W>]) -> Result<Vec<PackedLayout>> {
        equalise_packers(panels)?;
        let layouts: Vec<PackedLayout> = panels.iter().map(|p| p.pack()).collect();
        debug!(panels = layouts.len(), "laid out panels");
        Ok(layouts)
    }
}
