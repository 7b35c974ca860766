//! evis - Event propagation visualizer

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use evis_engine::{BuildOptions, Config, PRESETS, Visualizer};
use tracing_subscriber::EnvFilter;

use crate::report::Report;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Format {
    #[default]
    Text,
    Json,
}

/// Show how an event travels through a tree with shadow roots
#[derive(Debug, Parser)]
#[command(name = "evis", version)]
struct Args {
    /// Built-in tree to load
    #[arg(long, conflicts_with_all = ["file", "markup", "query"])]
    preset: Option<String>,

    /// Read tree markup from a file
    #[arg(long, short, conflicts_with_all = ["markup", "query"])]
    file: Option<PathBuf>,

    /// Tree markup given inline
    #[arg(long, short, conflicts_with = "query")]
    markup: Option<String>,

    /// Persisted state query string (`raw-tree=...&target-id=...`)
    #[arg(long, short)]
    query: Option<String>,

    /// `id` of the dispatch target; defaults to the element with a `target` attribute.
    /// Presets and queries carry their own target.
    #[arg(long, short, conflicts_with_all = ["preset", "query"])]
    target: Option<String>,

    #[arg(long)]
    bubbles: Option<bool>,

    #[arg(long)]
    composed: Option<bool>,

    /// JSON config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Step to highlight in the rendered output
    #[arg(long, short, default_value_t = 0)]
    step: usize,

    #[arg(long, value_enum, default_value_t)]
    format: Format,

    /// Write the visualization as SVG
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write the visualization as PNG
    #[arg(long)]
    png: Option<PathBuf>,

    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Print the state as a query string
    #[arg(long)]
    share: bool,

    /// List the built-in trees and exit
    #[arg(long)]
    list_presets: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.list_presets {
        for preset in PRESETS {
            println!("{:<20} {}", preset.id, preset.label);
        }
        return Ok(());
    }

    let visualizer = run(&args)?;
    print!("{}", output(&visualizer, args.format)?);
    if args.share
        && let Some(state) = visualizer.persisted_state()
    {
        println!("?{}", state.to_query());
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let Some(path) = &args.config else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    Config::from_json(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn run(args: &Args) -> Result<Visualizer> {
    let mut config = load_config(args)?;
    if let Some(bubbles) = args.bubbles {
        config.event.bubbles = bubbles;
    }
    if let Some(composed) = args.composed {
        config.event.composed = composed;
    }

    let mut visualizer = Visualizer::new(config);
    let options = match &args.target {
        Some(label) => BuildOptions::with_target_label(label.as_str()),
        None => BuildOptions::default(),
    };

    if let Some(query) = &args.query {
        visualizer.load_query(query).context("Failed to load state")?;
    } else if let Some(markup) = &args.markup {
        visualizer.load_markup(markup, &options).context("Failed to load markup")?;
    } else if let Some(path) = &args.file {
        let markup = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        visualizer
            .load_markup(&markup, &options)
            .with_context(|| format!("Failed to load {}", path.display()))?;
    } else {
        let id = args.preset.as_deref().unwrap_or(PRESETS[0].id);
        visualizer.load_preset(id)?;
    }

    // Flags given on the command line win over the ones in a query
    if args.query.is_some() && (args.bubbles.is_some() || args.composed.is_some()) {
        let mut event = visualizer.event_config();
        event.bubbles = args.bubbles.unwrap_or(event.bubbles);
        event.composed = args.composed.unwrap_or(event.composed);
        visualizer.set_event_config(event)?;
    }

    visualizer.set_active_step(args.step)?;
    write_images(&visualizer, args)?;
    Ok(visualizer)
}

fn write_images(visualizer: &Visualizer, args: &Args) -> Result<()> {
    if let Some(path) = &args.svg {
        std::fs::write(path, visualizer.to_svg())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }
    if let Some(path) = &args.png {
        if !(args.scale.is_finite() && args.scale > 0.0) {
            bail!("Scale must be a positive number, got {}", args.scale);
        }
        let png = visualizer.to_png(args.scale)?;
        std::fs::write(path, png).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}

fn output(visualizer: &Visualizer, format: Format) -> Result<String> {
    match format {
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&Report::new(visualizer))?;
            json.push('\n');
            Ok(json)
        }
        Format::Text => {
            let mut text = format!("{}\n", visualizer.event_config());
            for narration in visualizer.narration() {
                let marker = if narration.step == visualizer.active_step() { '>' } else { ' ' };
                text.push_str(&format!("{marker} {}. {narration}\n", narration.step + 1));
            }
            Ok(text)
        }
    }
}
