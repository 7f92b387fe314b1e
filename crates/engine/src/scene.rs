//! Declarative scenes: a TOML description of form panels and a bar plus the
//! widths the bar should be resized through.
//!
//! Scenes stand in for a real host toolkit. Widgets carry their natural size
//! directly, or a piece of text that is measured with the engine's
//! [`CellMeasure`].
//!
//! ```toml
//! [[panels]]
//! name = "personal"
//! rows = [
//!     { label = "Surname", widgets = [{ width = 160, height = 22, resize = "horizontal" }] },
//!     { label = "Notes", span = 2, widgets = [{ width = 240, height = 60, resize = "both" }] },
//! ]
//!
//! [bar]
//! widths = [900, 500, 800]
//! components = [
//!     { name = "save", width = 60, priority = "high" },
//!     { name = "status" },
//! ]
//! ```

use crate::LayoutEngine;
use formbar_bar::{AdaptiveBar, BarComponent, Placement, Priority};
use formbar_core::{CellMeasure, LayoutError, Measure, Result, Size};
use formbar_packer::{PackedLayout, Resizability, RowPacker, RowSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

// ── Scene schema ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub panels: Vec<PanelScene>,
    pub bar: BarScene,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelScene {
    pub name: String,
    pub rows: Vec<RowScene>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowScene {
    #[serde(default)]
    pub label: String,
    /// Zero, one or two widgets.
    #[serde(default)]
    pub widgets: Vec<WidgetScene>,
    /// 1 = normal, 2 = the single widget spans both value columns.
    #[serde(default = "default_span")]
    pub span: u8,
}

fn default_span() -> u8 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetScene {
    pub width: u32,
    pub height: u32,
    /// When set, the natural size is measured from this text instead.
    pub text: Option<String>,
    pub resize: ResizeScene,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeScene {
    #[default]
    Fixed,
    Horizontal,
    Vertical,
    Both,
}

impl From<ResizeScene> for Resizability {
    fn from(r: ResizeScene) -> Self {
        match r {
            ResizeScene::Fixed => Resizability::FIXED,
            ResizeScene::Horizontal => Resizability::HORIZONTAL,
            ResizeScene::Vertical => Resizability { horizontal: false, vertical: true },
            ResizeScene::Both => Resizability::BOTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarScene {
    pub components: Vec<ComponentScene>,
    /// Bar widths to replay, in order.
    pub widths: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScene {
    pub name: String,
    /// Fixed width; omitted means flexible.
    #[serde(default)]
    pub width: Option<u32>,
    /// Overrides the width-based default priority.
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl ComponentScene {
    fn to_component(&self) -> BarComponent<String> {
        let component = match self.width {
            Some(width) => BarComponent::fixed(self.name.clone(), width),
            None => BarComponent::flexible(self.name.clone()),
        };
        match self.priority {
            Some(priority) => component.with_priority(priority),
            None => component,
        }
    }
}

impl RowScene {
    fn to_spec(&self) -> Result<RowSpec<WidgetScene>> {
        let spanning = match self.span {
            1 => false,
            2 => true,
            other => {
                return Err(LayoutError::InvalidArgument(format!(
                    "row '{}': column span must be 1 or 2, got {other}",
                    self.label
                )))
            }
        };

        let mut spec = RowSpec::new(self.label.clone());
        match self.widgets.as_slice() {
            [] => {}
            [first] => spec = spec.with(first.clone(), first.resize.into()),
            [first, second] => {
                spec = spec
                    .with(first.clone(), first.resize.into())
                    .with_second(second.clone(), second.resize.into());
            }
            more => {
                return Err(LayoutError::InvalidArgument(format!(
                    "row '{}': at most two widgets per row, got {}",
                    self.label,
                    more.len()
                )))
            }
        }
        Ok(if spanning { spec.spanning() } else { spec })
    }
}

/// Scene widgets measure themselves: explicit size, or measured text.
struct SceneMeasure(CellMeasure);

impl Measure<WidgetScene> for SceneMeasure {
    fn label_size(&self, text: &str) -> Size {
        self.0.text_size(text)
    }

    fn natural_size(&self, widget: &WidgetScene) -> Size {
        match &widget.text {
            Some(text) => self.0.text_size(text),
            None => Size::new(widget.width, widget.height),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Read and parse a scene file.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| LayoutError::Config(format!("cannot read scene '{}': {e}", path.display())))?;
    parse_scene(&raw)
}

pub fn parse_scene(raw: &str) -> Result<Scene> {
    toml::from_str(raw).map_err(|e| LayoutError::Config(format!("scene parse error: {e}")))
}

// ── Running ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelReport {
    pub name: String,
    pub layout: PackedLayout,
}

/// Bar state after one replayed width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarFrame {
    pub width: u32,
    pub active: Vec<String>,
    pub evicted: Vec<String>,
    pub placements: Vec<Placement<String>>,
}

impl BarFrame {
    fn capture(bar: &AdaptiveBar<String>) -> Self {
        Self {
            width:      bar.last_width(),
            active:     bar.active().iter().map(|c| c.key().clone()).collect(),
            evicted:    bar.evicted().iter().map(|c| c.key().clone()).collect(),
            placements: bar.placements().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneReport {
    pub panels: Vec<PanelReport>,
    pub bar: Vec<BarFrame>,
}

/// Build every panel and the bar from `scene`, lay the panels out together
/// and replay the bar widths.
///
/// All rows and components are validated before any layout is computed.
pub fn run_scene(engine: &LayoutEngine, scene: &Scene) -> Result<SceneReport> {
    let measure = SceneMeasure(engine.measure());

    let mut packers: Vec<RowPacker<WidgetScene>> = Vec::with_capacity(scene.panels.len());
    for panel in &scene.panels {
        let mut packer = engine.row_packer();
        for row in &panel.rows {
            packer.add(&measure, row.to_spec()?)?;
        }
        packers.push(packer);
    }

    let mut bar = engine.adaptive_bar::<String>();
    for component in &scene.bar.components {
        bar.add_component(component.to_component())?;
    }

    let mut panel_refs: Vec<&mut RowPacker<WidgetScene>> = packers.iter_mut().collect();
    let layouts = engine.layout_panels(&mut panel_refs)?;
    let panels = scene
        .panels
        .iter()
        .zip(layouts)
        .map(|(panel, layout)| PanelReport {
            name: panel.name.clone(),
            layout,
        })
        .collect();

    bar.arrange();
    let frames = scene
        .bar
        .widths
        .iter()
        .map(|&width| {
            bar.on_resize(width);
            BarFrame::capture(&bar)
        })
        .collect();

    info!(
        panels = scene.panels.len(),
        frames = scene.bar.widths.len(),
        "scene complete"
    );

    Ok(SceneReport { panels, bar: frames })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
[[panels]]
name = "personal"
rows = [
    { label = "Name", widgets = [{ width = 120, height = 20, resize = "horizontal" }] },
    { label = "Born", widgets = [
        { width = 60, height = 20 },
        { text = "(age 42)" },
    ] },
]

[[panels]]
name = "address"
rows = [
    { label = "Street and number", widgets = [{ width = 80, height = 20 }] },
    { label = "Notes", span = 2, widgets = [{ width = 300, height = 48, resize = "both" }] },
    { label = "" },
]

[bar]
widths = [1000, 440, 350, 700]
components = [
    { name = "new", width = 100 },
    { name = "status" },
    { name = "find", width = 100, priority = "high" },
    { name = "print", width = 100 },
    { name = "export", width = 100 },
]
"#;

    fn engine() -> LayoutEngine {
        LayoutEngine::default()
    }

    #[test]
    fn panels_share_label_and_column_widths() {
        let scene = parse_scene(SCENE).unwrap();
        let report = run_scene(&engine(), &scene).unwrap();

        let [personal, address] = report.panels.as_slice() else {
            panic!("expected two panels");
        };
        assert_eq!(personal.name, "personal");
        // "Street and number:" is 18 cells of 7 units
        assert_eq!(personal.layout.label_width, 126);
        assert_eq!(address.layout.label_width, 126);
        // column 2 comes from the personal panel's "(age 42)" text
        assert_eq!(personal.layout.column_widths, vec![120, 56]);
        assert_eq!(address.layout.column_widths, vec![120, 56]);
    }

    #[test]
    fn spanning_row_fills_value_area() {
        let report = run_scene(&engine(), &parse_scene(SCENE).unwrap()).unwrap();
        let address = &report.panels[1].layout;
        let notes = address.rows[1].slots[0].unwrap();
        assert_eq!(notes.width, address.total_value_width);
        assert_eq!(notes.height, 48);
        // blank trailing row has a zero-sized label
        assert_eq!(address.rows[2].label.width, 0);
    }

    #[test]
    fn bar_frames_follow_replayed_widths() {
        let report = run_scene(&engine(), &parse_scene(SCENE).unwrap()).unwrap();
        let widths: Vec<u32> = report.bar.iter().map(|f| f.width).collect();
        assert_eq!(widths, vec![1000, 440, 350, 700]);

        // 440 - 400 = 40, then 440 - 300 = 140: export goes, then print
        assert_eq!(report.bar[1].evicted, vec!["export", "print"]);
        // 350 - 200 = 150: nothing more to shed
        assert_eq!(report.bar[2].active, vec!["new", "status", "find"]);
        // 700 restores both, most recent first
        assert!(report.bar[3].evicted.is_empty());
        assert_eq!(report.bar[3].active.len(), 5);
    }

    #[test]
    fn report_serialises_to_json() {
        let report = run_scene(&engine(), &parse_scene(SCENE).unwrap()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["panels"][0]["name"], "personal");
        assert_eq!(json["bar"][0]["placements"][0]["key"], "new");
    }

    #[test]
    fn illegal_span_is_rejected() {
        let scene = parse_scene(
            r#"
[[panels]]
rows = [{ label = "x", span = 3, widgets = [{ width = 1, height = 1 }] }]
"#,
        )
        .unwrap();
        let err = run_scene(&engine(), &scene).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidArgument(_)));
    }

    #[test]
    fn three_widgets_are_rejected() {
        let scene = parse_scene(
            r#"
[[panels]]
rows = [{ label = "x", widgets = [{}, {}, {}] }]
"#,
        )
        .unwrap();
        assert!(run_scene(&engine(), &scene).is_err());
    }

    #[test]
    fn duplicate_component_names_are_rejected() {
        let scene = parse_scene(
            r#"
[bar]
components = [{ name = "a", width = 5 }, { name = "a" }]
"#,
        )
        .unwrap();
        assert!(matches!(
            run_scene(&engine(), &scene),
            Err(LayoutError::InvalidArgument(_))
        ));
    }

    #[test]
    fn malformed_scene_is_a_config_error() {
        assert!(matches!(parse_scene("[[panels]"), Err(LayoutError::Config(_))));
        assert!(matches!(
            load_scene("/nonexistent/scene.toml"),
            Err(LayoutError::Config(_))
        ));
    }
}
