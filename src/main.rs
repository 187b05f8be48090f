//! # badgecut CLI
//!
//! Usage:
//!   badgecut base.svg overlay.svg ic_badged
//!   badgecut base.svg overlay.svg out/ic_badged.xml --scale 0.4 --gap 1.5
//!   badgecut base.svg overlay.svg ic_badged --config options.json --smooth

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use log::{info, Level, Log, Metadata, Record};

use badgecut::error::ComposeError;
use badgecut::number::fmt_number;
use badgecut::ComposeOptions;

const HELP: &str = "\
badgecut: compose two SVG icons into one Android vector drawable, with a
smaller overlay in the top-right corner and a gap cut out of the base.

USAGE:
  badgecut BASE.svg OVERLAY.svg OUTPUT [OPTIONS]

OUTPUT is a file path, or a bare name that gets '.xml' appended and is
placed under --output-dir.

OPTIONS:
  --scale F            Overlay scale (default: 0.5)
  --gap F              Gap between base and overlay, in dp (default: 2)
  --trim-distance F    Deprecated alias for --gap
  --smooth             Rounded cut-out (needs the 'clipper' feature)
  --sample-points N    Samples per segment for --smooth (default: 30)
  --smooth-simplify F  Simplify tolerance for --smooth, in dp (default: 0.25)
  --fill-color S       android:fillColor value (default: @android:color/white)
  --config FILE        Read options from a JSON file; flags override it
  --output-dir DIR     Directory for a bare OUTPUT name
  --verbose            Debug logging
  -h, --help           Print this help
";

struct Args {
    base: PathBuf,
    overlay: PathBuf,
    output: String,
    output_dir: Option<PathBuf>,
    options: ComposeOptions,
    verbose: bool,
}

/// Writes `[LEVEL] message` lines to stderr.
struct StderrLogger {
    level: Level,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logger(verbose: bool) {
    let level = if verbose { Level::Debug } else { Level::Info };
    if log::set_boxed_logger(Box::new(StderrLogger { level })).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
}

fn cli_error(e: pico_args::Error) -> ComposeError {
    ComposeError::InvalidParameter(e.to_string())
}

fn parse_args() -> Result<Option<Args>, ComposeError> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let verbose = args.contains("--verbose");
    let smooth = args.contains("--smooth");
    let config: Option<PathBuf> = args.opt_value_from_str("--config").map_err(cli_error)?;
    let scale: Option<f64> = args.opt_value_from_str("--scale").map_err(cli_error)?;
    let gap: Option<f64> = args.opt_value_from_str("--gap").map_err(cli_error)?;
    let trim_distance: Option<f64> = args.opt_value_from_str("--trim-distance").map_err(cli_error)?;
    let sample_points: Option<usize> = args.opt_value_from_str("--sample-points").map_err(cli_error)?;
    let smooth_simplify: Option<f64> = args.opt_value_from_str("--smooth-simplify").map_err(cli_error)?;
    let fill_color: Option<String> = args.opt_value_from_str("--fill-color").map_err(cli_error)?;
    let output_dir: Option<PathBuf> = args.opt_value_from_str("--output-dir").map_err(cli_error)?;

    let base: PathBuf = args.free_from_str().map_err(cli_error)?;
    let overlay: PathBuf = args.free_from_str().map_err(cli_error)?;
    let output: String = args.free_from_str().map_err(cli_error)?;

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(ComposeError::InvalidParameter(format!(
            "unexpected arguments: {:?}",
            rest
        )));
    }

    let mut options = match config {
        Some(path) => ComposeOptions::from_json(&fs::read_to_string(path)?)?,
        None => ComposeOptions::default(),
    };
    if let Some(scale) = scale {
        options.scale = scale;
    }
    if let Some(gap) = trim_distance.or(gap) {
        options.gap = gap;
    }
    if smooth {
        options.smooth = true;
    }
    if let Some(n) = sample_points {
        options.sample_points = n;
    }
    if let Some(tolerance) = smooth_simplify {
        options.smooth_simplify = tolerance;
    }
    if let Some(color) = fill_color {
        options.fill_color = color;
    }

    Ok(Some(Args {
        base,
        overlay,
        output,
        output_dir,
        options,
        verbose,
    }))
}

/// A bare name gets `.xml` and goes under `output_dir`; anything that looks
/// like a path is used as given.
fn resolve_output(output: &str, output_dir: Option<&Path>) -> PathBuf {
    let is_bare = !Path::new(output).is_absolute() && !output.contains(std::path::MAIN_SEPARATOR) && !output.contains('/');
    if !is_bare {
        return PathBuf::from(output);
    }
    let name = if output.ends_with(".xml") {
        output.to_string()
    } else {
        format!("{}.xml", output)
    };
    match output_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn run(args: Args) -> Result<(), ComposeError> {
    // Fail on bad options before touching the filesystem.
    args.options.validate()?;

    let output = resolve_output(&args.output, args.output_dir.as_deref());
    info!("Base SVG: {}", args.base.display());
    info!("Overlay SVG: {}", args.overlay.display());
    info!("Output XML: {}", output.display());
    info!("Scale: {}", fmt_number(args.options.scale));
    info!("Gap: {}", fmt_number(args.options.gap));
    info!("Smooth: {}", if args.options.smooth { "on" } else { "off" });
    info!("Smooth simplify: {}", fmt_number(args.options.smooth_simplify));

    let base = fs::read_to_string(&args.base)?;
    let overlay = fs::read_to_string(&args.overlay)?;
    let xml = badgecut::compose(&base, &overlay, &args.options)?.to_xml();

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&output, &xml)?;
    eprintln!("✓ Written {} bytes to {}", xml.len(), output.display());
    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{}", HELP);
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'badgecut --help' for usage.");
            process::exit(1);
        }
    };

    init_logger(args.verbose);
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
