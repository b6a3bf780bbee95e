mod logger;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use logger::StderrLogger;

#[derive(Parser)]
#[command(
    name = "dxf-tile",
    about = "Tile a DXF drawing into true-size printable PDF pages",
    version
)]
struct Cli {
    /// Input DXF file
    input: PathBuf,

    /// Output PDF file
    output: PathBuf,

    /// Load tiling options from a JSON file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Paper size [default: letter]
    #[arg(long, value_enum)]
    page: Option<PaperArg>,

    /// Paper orientation [default: portrait]
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Margin on every side, in mm on paper [default: 10]
    #[arg(long)]
    margin_mm: Option<f64>,

    /// Overlap between neighbouring tiles, in mm on paper [default: 10]
    #[arg(long)]
    overlap_mm: Option<f64>,

    /// What one drawing unit is [default: mm]
    #[arg(long, value_enum)]
    dxf_units: Option<UnitsArg>,

    /// Only include these layers (comma separated, exact names)
    #[arg(long, value_delimiter = ',')]
    layers: Option<Vec<String>>,

    /// Skip entities whose linetype is not continuous
    #[arg(long)]
    continuous_only: bool,

    /// Assembly aids printed on each tile [default: seams]
    #[arg(long, value_enum)]
    marks: Option<MarksArg>,

    /// Clip geometry to the printable rectangle
    #[arg(long)]
    clip: bool,

    /// Longest chord when flattening curves, in mm on paper [default: 0.5]
    #[arg(long)]
    flatten_mm: Option<f64>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    Letter,
    A4,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitsArg {
    Mm,
    Inch,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarksArg {
    Seams,
    Crop,
}

impl From<PaperArg> for dxf_tile::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::A4 => Self::A4,
        }
    }
}

impl From<OrientationArg> for dxf_tile::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<UnitsArg> for dxf_tile::DrawingUnits {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Mm => Self::Millimeters,
            UnitsArg::Inch => Self::Inches,
        }
    }
}

impl From<MarksArg> for dxf_tile::AssemblyMarks {
    fn from(arg: MarksArg) -> Self {
        match arg {
            MarksArg::Seams => Self::SeamLines,
            MarksArg::Crop => Self::CropMarks,
        }
    }
}

impl Cli {
    /// Apply command line flags on top of options loaded from a config file
    fn apply_to(&self, mut options: dxf_tile::TileOptions) -> dxf_tile::TileOptions {
        if let Some(page) = self.page {
            options.paper_size = page.into();
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        if let Some(margin) = self.margin_mm {
            options.margin_mm = margin;
        }
        if let Some(overlap) = self.overlap_mm {
            options.overlap_mm = overlap;
        }
        if let Some(units) = self.dxf_units {
            options.units = units.into();
        }
        if let Some(layers) = &self.layers {
            let layers: Vec<String> = layers
                .iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();
            options.layers = (!layers.is_empty()).then_some(layers);
        }
        if self.continuous_only {
            options.continuous_only = true;
        }
        if let Some(marks) = self.marks {
            options.marks = marks.into();
        }
        if self.clip {
            options.clip_to_printable = true;
        }
        if let Some(tolerance) = self.flatten_mm {
            options.flatten_tolerance_mm = tolerance;
        }
        options
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    StderrLogger::new(cli.verbose)
        .init()
        .context("Failed to install logger")?;

    let base = match &cli.config {
        Some(path) => dxf_tile::TileOptions::load(path)
            .await
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => dxf_tile::TileOptions::default(),
    };
    let options = cli.apply_to(base);
    options.validate()?;

    if let Some(path) = &cli.save_config {
        options.save(path).await?;
        println!("Options saved → {}", path.display());
    }

    let drawing = dxf_tile::load_drawing(&cli.input)
        .await
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    // Plan once; the same plan feeds the statistics and the pages
    let plan = dxf_tile::plan_tiles(&drawing, &options).await?;
    let stats = plan.statistics();
    let unit = options.units.label();
    println!("Tiling Statistics:");
    println!("  Primitives: {}", stats.primitives);
    println!(
        "  Skipped entities: {} by layer, {} by linetype, {} unsupported",
        stats.skipped_by_layer, stats.skipped_by_linetype, stats.skipped_unsupported
    );
    println!(
        "  Drawing extent: {:.2} x {:.2} {}",
        stats.bounds.width(),
        stats.bounds.height(),
        unit
    );
    println!("  Step: {:.2} x {:.2} {}", stats.step_w, stats.step_h, unit);
    println!("  Tiles: {} x {} ({} pages)", stats.cols, stats.rows, stats.pages);
    if stats.blank_tiles > 0 {
        println!("  Blank tiles: {}", stats.blank_tiles);
    }

    if cli.stats_only {
        return Ok(());
    }

    let document = dxf_tile::render_plan(plan).await?;
    dxf_tile::save_pdf(document, &cli.output).await?;
    println!("Tiled → {}", cli.output.display());

    Ok(())
}
