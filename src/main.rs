mod app;
mod error;
mod layout;
mod pathway;
mod scene;
mod util;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::PathwayList;
use crate::layout::LayoutConfig;
use crate::pathway::{PathwayGraph, VertexId, load_pathway};
use crate::scene::PathwayScene;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Pathway JSON file used as the focus pathway.
    #[arg(long)]
    focus: PathBuf,

    /// Context pathway JSON files, merged in the given order.
    #[arg(long = "context")]
    contexts: Vec<PathBuf>,

    /// Vertex every context pathway is merged around (headless mode).
    #[arg(long)]
    anchor: Option<String>,

    /// Layout iteration budget; scales with the node count when omitted.
    #[arg(long)]
    iterations: Option<usize>,

    #[arg(long, default_value_t = LayoutConfig::default().seed)]
    seed: u64,

    #[arg(long, default_value_t = 100.0)]
    width: f32,

    #[arg(long, default_value_t = 100.0)]
    height: f32,

    /// Merge, lay out and print the scene as JSON instead of opening a window.
    #[arg(long)]
    headless: bool,
}

impl Args {
    fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            width: self.width,
            height: self.height,
            iterations: self.iterations,
            seed: self.seed,
            ..LayoutConfig::default()
        }
    }

    fn load_library(&self) -> Result<Vec<PathwayGraph>> {
        std::iter::once(&self.focus)
            .chain(&self.contexts)
            .map(|path| load_pathway(path))
            .collect()
    }
}

fn run_headless(library: &[PathwayGraph], anchor: Option<&str>, layout: LayoutConfig) -> Result<()> {
    if library.len() > 1 && anchor.is_none() {
        bail!("merging context pathways needs an --anchor vertex");
    }

    let mut scene = PathwayScene::new(PathwayList::new(library), layout, None);

    for (index, pathway) in library.iter().enumerate() {
        if index > 0
            && let Some(anchor) = anchor
        {
            scene
                .select(&VertexId::new(anchor))
                .with_context(|| format!("cannot anchor {} at {anchor}", pathway.id()))?;
        }

        scene
            .add_pathway(pathway)
            .with_context(|| format!("failed to add pathway {}", pathway.id()))?;
    }

    let outcome = scene.run_layout();
    info!(
        nodes = scene.nodes().len(),
        edges = scene.edges().len(),
        converged = outcome.converged,
        "layout finished"
    );

    let snapshot = serde_json::to_string_pretty(&scene.snapshot())
        .context("failed to serialize the laid out scene")?;
    println!("{snapshot}");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let layout = args.layout_config();
    let library = args.load_library()?;

    if args.headless {
        return run_headless(&library, args.anchor.as_deref(), layout);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "dynamic pathway",
        options,
        Box::new(move |cc| Ok(Box::new(app::PathwayViewerApp::new(cc, library, layout)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
