use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `formbar.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Row/column packing metrics shared by every form panel.
    pub packer: PackerConfig,
    /// Adaptive tool/status bar behaviour.
    pub bar: AdaptiveBarConfig,
    /// Cell size used by the built-in monospace text measure.
    pub measure: MeasureConfig,
}

/// Spacing used when packing label/value rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackerConfig {
    /// Gap between the panel's left edge and the label column.
    pub left_inset: u32,
    /// Gap between the label column and value column 1, and between value columns.
    pub column_gap: u32,
    /// Gap between consecutive rows.
    pub vertical_spacing: u32,
    /// Appended to every non-empty row label, e.g. `"Surname"` → `"Surname:"`.
    pub label_suffix: String,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            left_inset:       5,
            column_gap:       5,
            vertical_spacing: 5,
            label_suffix:     ":".to_string(),
        }
    }
}

/// Eviction/restoration tuning for the adaptive bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveBarConfig {
    /// Hysteresis threshold: eviction needs less than this much free space,
    /// restoration needs strictly more.
    pub min_remaining_space: u32,
    /// Padding reserved around every active component.
    pub unit_padding: u32,
}

impl Default for AdaptiveBarConfig {
    fn default() -> Self {
        Self {
            min_remaining_space: 150,
            unit_padding:        2,
        }
    }
}

/// Monospace cell size for the text measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    pub cell_width: u32,
    pub line_height: u32,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            cell_width:  7,
            line_height: 16,
        }
    }
}
