use crate::config::load_config;
use crate::layout_dump::write_layout_dump;
use crate::parser::load_catalog;
use crate::render::write_output_svg;
use crate::session::DiagramSession;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hubflow", version, about = "Hub-and-satellite flow diagram renderer")]
pub struct Args {
    /// Diagram catalog (JSON5): a list of diagrams or `{ diagrams: [...] }`
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Identifier of the diagram to render. Defaults to the first one.
    #[arg(short = 'd', long = "diagram")]
    pub diagram: Option<String>,

    /// Print identifier and display name of every diagram, then exit
    #[arg(long = "list")]
    pub list: bool,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Zoom steps applied before rendering: positive zooms in, negative out
    #[arg(short = 'z', long = "zoom", default_value_t = 0, allow_hyphen_values = true)]
    pub zoom: i32,

    /// Write the computed layout as JSON to this path
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,

    /// Use per-character width estimates instead of system fonts
    #[arg(long = "fast-text")]
    pub fast_text: bool,

    /// Width
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// Height
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f32,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;
    if args.fast_text {
        config.render.fast_text_metrics = true;
    }

    let catalog = load_catalog(&args.input)?;
    if args.list {
        for (identifier, display_name) in catalog.entries() {
            println!("{identifier}\t{display_name}");
        }
        return Ok(());
    }

    let identifier = match args.diagram.clone() {
        Some(identifier) => identifier,
        None => catalog
            .first()
            .map(|diagram| diagram.identifier.clone())
            .ok_or_else(|| anyhow::anyhow!("No diagrams found in catalog"))?,
    };

    let render_config = config.render.clone();
    let layout_config = config.layout.clone();
    let mut session = DiagramSession::new(catalog, config);
    session.select(&identifier)?;
    apply_zoom(&mut session, args.zoom);

    if let (Some(path), Some(layout)) = (args.dump_layout.as_deref(), session.layout()) {
        write_layout_dump(path, layout, &layout_config)?;
    }

    let svg = session
        .render_svg()
        .ok_or_else(|| anyhow::anyhow!("Nothing selected"))?;
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref())?,
        OutputFormat::Png => {
            let output = args
                .output
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_png(&svg, output, &render_config)?;
        }
    }
    Ok(())
}

fn apply_zoom(session: &mut DiagramSession, steps: i32) {
    let viewport = session.viewport_mut();
    for _ in 0..steps.unsigned_abs() {
        if steps > 0 {
            viewport.zoom_in();
        } else {
            viewport.zoom_out();
        }
    }
    tracing::debug!(scale_percent = viewport.scale_percent(), "viewport");
}

#[cfg(feature = "png")]
fn write_png(
    svg: &str,
    output: &std::path::Path,
    render_config: &crate::config::RenderConfig,
) -> Result<()> {
    crate::render::write_output_png(svg, output, render_config)
}

#[cfg(not(feature = "png"))]
fn write_png(
    _svg: &str,
    _output: &std::path::Path,
    _render_config: &crate::config::RenderConfig,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}
