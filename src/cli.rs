use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use singleline::{
    DashOptions, DotOptions, PixelTransform, Point, RasterSettings, SinglelineResult,
    TraceSettings,
};

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the thinned skeleton as a PNG
    Skeleton(SkeletonCommand),
    /// Export the traced paths drawn over the glyph as a PNG
    Trace(TraceCommand),
    /// Place evenly spaced dots along the strokes and export an SVG
    Dots(DotsCommand),
    /// Place oriented dashes along the strokes and export an SVG
    Dashes(DashesCommand),
}

#[derive(Args, Debug)]
pub struct SkeletonCommand {
    /// Input glyph images
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Directory for outputs (defaults to each input's directory)
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
    #[command(flatten)]
    pub raster: RasterArgs,
}

#[derive(Args, Debug)]
pub struct TraceCommand {
    /// Input glyph images
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Directory for outputs (defaults to each input's directory)
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
    #[command(flatten)]
    pub raster: RasterArgs,
}

#[derive(Args, Debug)]
pub struct DotsCommand {
    /// Input glyph images
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Directory for outputs (defaults to each input's directory)
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
    #[command(flatten)]
    pub raster: RasterArgs,
    #[command(flatten)]
    pub transform: TransformArgs,
    /// Arc length between dots, in output units
    #[arg(long, default_value_t = 50.0)]
    pub spacing: f64,
    /// Minimum distance between any two dots, as a fraction of the spacing
    #[arg(long = "min-separation", default_value_t = 0.6)]
    pub min_separation: f64,
    /// Dot radius in the SVG, in output units
    #[arg(long, default_value_t = 20.0)]
    pub radius: f64,
    /// Also write `<name>-dots.png` with the dots drawn over the trace
    #[arg(long)]
    pub preview: bool,
}

#[derive(Args, Debug)]
pub struct DashesCommand {
    /// Input glyph images
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Directory for outputs (defaults to each input's directory)
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
    #[command(flatten)]
    pub raster: RasterArgs,
    #[command(flatten)]
    pub transform: TransformArgs,
    /// Dash length along the stroke, in output units
    #[arg(long = "dash-length", default_value_t = 40.0)]
    pub dash_length: f64,
    /// Gap between dashes, in output units
    #[arg(long, default_value_t = 20.0)]
    pub gap: f64,
    /// Dash thickness in the SVG, in output units
    #[arg(long, default_value_t = 20.0)]
    pub thickness: f64,
    /// Also write `<name>-dashes.png` with the dashes drawn over the trace
    #[arg(long)]
    pub preview: bool,
}

#[derive(Args, Debug)]
pub struct RasterArgs {
    /// Luma values above this are stroke pixels
    #[arg(long, default_value_t = 128)]
    pub threshold: u8,
    /// Treat dark pixels as the stroke (dark glyph on a light background)
    #[arg(long)]
    pub invert: bool,
    /// Keep the full canvas instead of cropping to the glyph
    #[arg(long = "no-crop")]
    pub no_crop: bool,
    /// Smoothing rounds applied to every traced path
    #[arg(long, default_value_t = singleline::smooth::DEFAULT_SMOOTHING_ITERATIONS)]
    pub smooth: usize,
}

impl From<&RasterArgs> for RasterSettings {
    fn from(args: &RasterArgs) -> Self {
        RasterSettings::default()
            .with_threshold(args.threshold)
            .with_invert(args.invert)
            .with_crop(!args.no_crop)
    }
}

impl From<&RasterArgs> for TraceSettings {
    fn from(args: &RasterArgs) -> Self {
        TraceSettings::default().with_smoothing_iterations(args.smooth)
    }
}

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Output units per image pixel
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,
    /// Units per em; with --render-size, overrides --scale and flips y up
    #[arg(long = "units-per-em", requires = "render_size")]
    pub units_per_em: Option<f64>,
    /// Pixels per em the glyph image was rendered at
    #[arg(long = "render-size", requires = "units_per_em")]
    pub render_size: Option<f64>,
    /// Baseline row of the glyph image, in pixels
    #[arg(long, default_value_t = 0.0)]
    pub baseline: f64,
}

impl TransformArgs {
    pub fn to_transform(&self) -> SinglelineResult<PixelTransform> {
        let origin = Point::new(0.0, self.baseline);
        match (self.units_per_em, self.render_size) {
            (Some(upm), Some(size)) => PixelTransform::for_em(upm, size, origin),
            _ => PixelTransform::new(self.scale, origin),
        }
    }
}

impl From<&DotsCommand> for DotOptions {
    fn from(cmd: &DotsCommand) -> Self {
        DotOptions::new(cmd.spacing).with_min_separation_ratio(cmd.min_separation)
    }
}

impl From<&DashesCommand> for DashOptions {
    fn from(cmd: &DashesCommand) -> Self {
        DashOptions::new(cmd.dash_length, cmd.gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn raster_args_map_to_settings() {
        let cli = Cli::parse_from(["singleline", "-vv", "trace", "a.png", "--invert", "--no-crop"]);
        assert_eq!(cli.global.verbose, 2);
        let Commands::Trace(cmd) = cli.command else {
            panic!("expected trace");
        };
        let raster = RasterSettings::from(&cmd.raster);
        assert!(raster.invert);
        assert!(!raster.crop);
        assert_eq!(raster.threshold, 128);
    }

    #[test]
    fn em_transform_flips_y() {
        let cli = Cli::parse_from([
            "singleline",
            "dashes",
            "a.png",
            "--units-per-em",
            "1000",
            "--render-size",
            "100",
        ]);
        let Commands::Dashes(cmd) = cli.command else {
            panic!("expected dashes");
        };
        let t = cmd.transform.to_transform().unwrap();
        assert!(t.flips_y());
        assert_eq!(t.scale(), 10.0);
    }
}
