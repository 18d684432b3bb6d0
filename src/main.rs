// src/main.rs
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use segy_section::{AmplitudeScale, AxisField, PlotSize, SectionViewer, ViewerConfig};
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Axis {
    X,
    Y,
    Cdp,
    Shot,
}
impl From<Axis> for AxisField {
    fn from(value: Axis) -> Self {
        match value {
            Axis::X => AxisField::X,
            Axis::Y => AxisField::Y,
            Axis::Cdp => AxisField::Cdp,
            Axis::Shot => AxisField::Shot,
        }
    }
}
/// Render a 2D seismic line and its average amplitude spectrum.
#[derive(Parser, Debug)]
#[command(name = "segy-section", version)]
struct Cli {
    /// SEG-Y file to display
    input: PathBuf,
    /// JSON configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where the PNGs are written
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Header word labelling the horizontal axis
    #[arg(long, value_enum)]
    axis: Option<Axis>,
    #[arg(long)]
    x_byte: Option<usize>,
    #[arg(long)]
    y_byte: Option<usize>,
    #[arg(long)]
    cdp_byte: Option<usize>,
    #[arg(long)]
    shot_byte: Option<usize>,
    /// Manual amplitude bounds; both must be given to leave auto scaling
    #[arg(long, allow_negative_numbers = true, requires = "max")]
    min: Option<f32>,
    #[arg(long, allow_negative_numbers = true, requires = "min")]
    max: Option<f32>,
    /// Plot width in inches (8-30)
    #[arg(long)]
    width: Option<f32>,
    /// Plot height in inches (4-20)
    #[arg(long)]
    height: Option<f32>,
    /// Print the textual header
    #[arg(long)]
    show_header: bool,
}
impl Cli {
    fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(axis) = self.axis {
            config.axis = axis.into();
        }
        let bytes = &mut config.header_bytes;
        bytes.x = self.x_byte.unwrap_or(bytes.x);
        bytes.y = self.y_byte.unwrap_or(bytes.y);
        bytes.cdp = self.cdp_byte.unwrap_or(bytes.cdp);
        bytes.shot = self.shot_byte.unwrap_or(bytes.shot);
        if let (Some(min), Some(max)) = (self.min, self.max) {
            config.amplitude = AmplitudeScale::manual(min, max);
        }
        if self.width.is_some() || self.height.is_some() {
            let dpi = config.plot.dpi;
            config.plot = PlotSize {
                dpi,
                ..PlotSize::new(
                    self.width.unwrap_or(config.plot.width_in),
                    self.height.unwrap_or(config.plot.height_in),
                )
            };
        }
        Ok(config)
    }
}
// 入口函数
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let viewer = SectionViewer::new(cli.viewer_config()?)?;
    let report = viewer
        .run_path(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    println!(
        "Traces: {}, Samples per trace: {}",
        report.trace_count, report.sample_count
    );
    if cli.show_header {
        println!("{}", report.textual_header);
    }
    let stem = cli
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "section".into());
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;
    let section_path = cli.out_dir.join(format!("{stem}_section.png"));
    fs::write(&section_path, &report.section_png)
        .with_context(|| format!("writing {}", section_path.display()))?;
    info!("wrote {}", section_path.display());
    match report.spectrum {
        Ok(artifact) => {
            let spectrum_path = cli.out_dir.join(format!("{stem}_spectrum.png"));
            fs::write(&spectrum_path, &artifact.png)
                .with_context(|| format!("writing {}", spectrum_path.display()))?;
            info!("wrote {}", spectrum_path.display());
        }
        Err(err) => eprintln!("spectrum skipped: {err}"),
    }
    Ok(())
}
