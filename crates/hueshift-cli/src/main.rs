//! hueshift - hue remap CLI
//!
//! Shifts every pixel whose hue falls inside a selected arc of the color wheel
//! to a single target hue, keeping saturation and lightness.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use hueshift_compute::Backend;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "hueshift")]
#[command(author, version, about = "Remap a range of hues to a single hue")]
#[command(long_about = "
Remap every pixel whose hue lies inside an arc of the color wheel to one
output hue. Saturation and lightness are kept, so shading survives.

Angles are degrees clockwise from red (0). An arc runs clockwise from
--start to --end and may wrap through 0, e.g. --start 330 --end 30.

Examples:
  hueshift remap photo.png -o out.png                   # blue/cyan -> yellow
  hueshift remap photo.jpg -o out.png --start 330 --end 30 --to 240
  hueshift remap big.png -o out.png --backend wgpu
  hueshift hsl 0,0,255                                  # hsl(240, 100%, 50%)
  hueshift hsl --from-hsl 60,100,50                     # rgb(255,255,0) #ffff00
  hueshift palette photo.png --limit 10
  hueshift backends
  hueshift view photo.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Remap a hue arc of an image to one output hue
    #[command(visible_alias = "r")]
    Remap(RemapArgs),

    /// Convert a color between RGB and HSL
    Hsl(HslArgs),

    /// List dominant saturated colors of an image
    #[command(visible_alias = "p")]
    Palette(PaletteArgs),

    /// Show available compute backends
    Backends,

    /// Open the interactive viewer
    #[cfg(feature = "viewer")]
    #[command(visible_alias = "v")]
    View(ViewArgs),
}

/// Backend selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    /// Best available backend
    Auto,
    /// CPU (rayon)
    Cpu,
    /// GPU via wgpu
    Wgpu,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => Backend::Auto,
            BackendArg::Cpu => Backend::Cpu,
            BackendArg::Wgpu => Backend::Wgpu,
        }
    }
}

#[derive(Args)]
struct RemapArgs {
    /// Input image
    input: PathBuf,

    /// Output image (format from extension)
    #[arg(short, long)]
    output: PathBuf,

    /// Arc start hue in degrees
    #[arg(long, default_value_t = 150.0, allow_negative_numbers = true, value_parser = parse_degrees)]
    start: f64,

    /// Arc end hue in degrees
    #[arg(long, default_value_t = 270.0, allow_negative_numbers = true, value_parser = parse_degrees)]
    end: f64,

    /// Output hue in degrees
    #[arg(long = "to", default_value_t = 60.0, allow_negative_numbers = true, value_parser = parse_degrees)]
    to: f64,

    /// Compute backend
    #[arg(short, long, value_enum, default_value_t = BackendArg::Auto)]
    backend: BackendArg,
}

/// Angle argument: any finite number of degrees.
fn parse_degrees(s: &str) -> Result<f64, String> {
    let deg: f64 = s.trim().parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !deg.is_finite() {
        return Err(format!("'{s}' is not a finite angle"));
    }
    Ok(deg)
}

#[derive(Args)]
struct HslArgs {
    /// Color as "r,g,b" (0-255), or "h,s,l" with --from-hsl
    #[arg(allow_hyphen_values = true)]
    color: String,

    /// Treat the input as HSL and print RGB
    #[arg(long)]
    from_hsl: bool,
}

#[derive(Args)]
struct PaletteArgs {
    /// Input image
    input: PathBuf,

    /// Keep colors seen more than this many times
    #[arg(long, default_value_t = 500)]
    min_count: usize,

    /// Keep colors with saturation above this percentage
    #[arg(long, default_value_t = 10.0)]
    min_saturation: f64,

    /// Keep colors with lightness below this percentage
    #[arg(long, default_value_t = 90.0)]
    max_lightness: f64,

    /// Print at most N entries
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

#[cfg(feature = "viewer")]
#[derive(Args)]
struct ViewArgs {
    /// Image to open (default: last opened file)
    input: Option<PathBuf>,

    /// Start on the CPU backend instead of the GPU
    #[arg(long)]
    cpu: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Remap(args) => commands::remap::run(args, cli.verbose),
        Commands::Hsl(args) => commands::hsl::run(args, cli.verbose),
        Commands::Palette(args) => commands::palette::run(args, cli.verbose),
        Commands::Backends => commands::backends::run(cli.verbose),
        #[cfg(feature = "viewer")]
        Commands::View(args) => commands::view::run(args, cli.verbose),
    }
}
