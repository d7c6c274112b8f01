//! kd-tree SVG visualizer
//! Reads `x,y` points (one per line) from a file or stdin, inserts them one at
//! a time and writes an SVG of the tree: edges, node circles and labels.
//!
//! Usage:
//! ```text
//! cargo run --example kdtree_visualizer -- [--balance] [points.txt]
//! cargo run --example kdtree_visualizer --features serde -- --config layout.json [points.txt]
//! ```
//!
//! `--config` is parsed in every build but can only be loaded with the
//! `serde` feature; without it the demo exits with an error naming the
//! feature. Set `RUST_LOG=kdtree2d=trace` to see every insertion.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use kdtree2d::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HEIGHT: f64 = 800.0;
const NODE_RADIUS: f64 = 15.0;
const LABEL_DX: f64 = 20.0;
const LABEL_DY: f64 = 5.0;
const OUTPUT: &str = "kdtree.svg";

#[derive(Parser, Debug)]
#[command(name = "kdtree_visualizer")]
#[command(about = "Draw a kd-tree built from x,y points as SVG")]
struct Cli {
    /// Rebuild the tree with median splits before drawing
    #[arg(long)]
    balance: bool,

    /// JSON layout config (needs the `serde` feature)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Points file, one `x,y` per line; stdin when omitted
    input: Option<PathBuf>,
}

#[cfg(feature = "serde")]
fn load_config(path: &Path) -> Result<LayoutConfig, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(not(feature = "serde"))]
fn load_config(path: &Path) -> Result<LayoutConfig, Box<dyn std::error::Error>> {
    Err(format!(
        "cannot read {}: --config needs the demo built with `--features serde`",
        path.display()
    )
    .into())
}

/// Generate the SVG document for a laid out tree
fn render_svg(layout: &Layout, config: &LayoutConfig) -> String {
    let width = config.width;
    let height = layout
        .bounds()
        .map(|(_, _, _, max_y)| (max_y + config.level_spacing).max(HEIGHT))
        .unwrap_or(HEIGHT);

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg width=\"{:.0}\" height=\"{:.0}\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {:.0} {:.0}\">\n",
        width, height, width, height
    ));

    svg.push_str("  <defs>\n");
    svg.push_str("    <style>\n");
    svg.push_str("      .edge { stroke: #333333; stroke-width: 2; }\n");
    svg.push_str("      .node { fill: #FF6B35; stroke: #333333; stroke-width: 1.5; }\n");
    svg.push_str("      .label { font-family: sans-serif; font-size: 14px; }\n");
    svg.push_str("    </style>\n");
    svg.push_str("  </defs>\n\n");

    // Edges first so circles cover their ends
    svg.push_str("  <g id=\"edges\">\n");
    for edge in layout.edges() {
        svg.push_str(&format!(
            "    <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" class=\"edge\"/>\n",
            edge.from.0, edge.from.1, edge.to.0, edge.to.1
        ));
    }
    svg.push_str("  </g>\n\n");

    svg.push_str("  <g id=\"nodes\">\n");
    for node in layout.nodes() {
        svg.push_str(&format!(
            "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" class=\"node\"/>\n",
            node.x, node.y, NODE_RADIUS
        ));
        svg.push_str(&format!(
            "    <text x=\"{:.2}\" y=\"{:.2}\" class=\"label\">{}</text>\n",
            node.x + LABEL_DX,
            node.y + LABEL_DY,
            node.visit.point
        ));
    }
    svg.push_str("  </g>\n");

    svg.push_str("</svg>\n");
    svg
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LayoutConfig::default(),
    };

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut tree = KdTree::new();
    tree.on_change(|event| match event {
        TreeEvent::PointAdded(point) => info!(%point, "redraw after insert"),
        TreeEvent::Balanced => info!("redraw after balance"),
        TreeEvent::Rebuilt => info!("redraw after rebuild"),
        _ => info!(?event, "redraw"),
    });

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Point>() {
            Ok(point) => tree.add_point(point),
            Err(err) => warn!(line = number + 1, %err, "skipping point"),
        }
    }

    if cli.balance {
        tree.balance();
    }

    let layout = Layout::compute(&tree, &config);
    let svg = render_svg(&layout, &config);

    let mut file = File::create(OUTPUT)?;
    file.write_all(svg.as_bytes())?;

    println!("✓ Generated: {}", OUTPUT);
    println!("  - Points: {}", tree.len());
    println!("  - Height: {}", tree.height());
    Ok(())
}
