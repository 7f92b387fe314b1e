//! formbar: aligned form panels and an adaptive tool bar, replayed from a
//! scene file.
//!
//! Run with:  `RUST_LOG=debug formbar demos/scene.toml [--json]`

use anyhow::{Context, Result};
use formbar_engine::{load_scene, run_scene, LayoutEngine, SceneReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENE: &str = "demos/scene.toml";

fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("formbar v{} starting", env!("CARGO_PKG_VERSION"));

    let mut json = false;
    let mut scene_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => scene_path = Some(PathBuf::from(arg)),
        }
    }
    let scene_path = scene_path.unwrap_or_else(|| PathBuf::from(DEFAULT_SCENE));

    let engine = LayoutEngine::load(formbar_config::default_path())?;
    let scene = load_scene(&scene_path)
        .with_context(|| format!("loading scene {}", scene_path.display()))?;
    let report = run_scene(&engine, &scene)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &SceneReport) {
    for panel in &report.panels {
        let layout = &panel.layout;
        println!(
            "panel {:<12} {}x{}  label={} columns={:?} value={}",
            panel.name,
            layout.size.width,
            layout.size.height,
            layout.label_width,
            layout.column_widths,
            layout.total_value_width,
        );
        for (index, row) in layout.rows.iter().enumerate() {
            let slots: Vec<String> = row
                .slots
                .iter()
                .flatten()
                .map(|b| format!("{},{} {}x{}", b.x, b.y, b.width, b.height))
                .collect();
            println!("  row {index:>2} y={:<4} {}", row.label.y, slots.join("  "));
        }
    }

    for frame in &report.bar {
        let cells: Vec<String> = frame
            .placements
            .iter()
            .map(|p| format!("{}@{}+{}", p.key, p.x, p.width))
            .collect();
        println!(
            "bar {:>5}: {}  evicted={:?}",
            frame.width,
            cells.join(" "),
            frame.evicted
        );
    }
}
