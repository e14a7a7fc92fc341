#![deny(missing_docs)]
#![warn(clippy::unwrap_used)]
//! `mandelbrot` renders an image of the Mandelbrot set into an image file.
//!
//! Use `mandelbrot --help` to see the command line options. Options given on the command line
//! override those read from a configuration file with `--config`.

use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Arg, ArgMatches, Command};
use env_logger::Builder;
use log::{info, LevelFilter};

use mandelbrot::config::RenderConfig;
use mandelbrot::errors::*;
use mandelbrot::palette::PALETTE_NAMES;
use mandelbrot::parse_pair::{parse_complex, parse_size};
use mandelbrot::renderer::render;

/// Main for mandelbrot binary - call `run()` and print any error that results or exit silently if OK
fn main() {
    match run() {
        Err(ref e) => {
            eprintln!("{}", e);
            for e in e.iter().skip(1) {
                eprintln!("caused by: {}", e);
            }
            exit(1);
        }
        Ok(_) => exit(0),
    }
}

fn run() -> Result<()> {
    let matches = get_matches();

    let level = matches.get_one::<String>("verbosity")
        .map(|s| s.as_str())
        .unwrap_or("error")
        .parse::<LevelFilter>()
        .map_err(|_| "Verbosity should be one of: trace, debug, info, warn, error")?;
    let mut builder = Builder::from_default_env();
    builder.filter_level(level).init();

    info!("'{}' version {}", env!("CARGO_PKG_NAME"), mandelbrot::version());

    let config = config(&matches)?;

    let filename = matches.get_one::<String>("output")
        .map(PathBuf::from)
        .ok_or("No output file specified")?;

    let image = render(&config)?;
    write_image(&filename, &image)?;

    info!("Image written to '{}'", filename.display());

    Ok(())
}

// Start from the defaults, or the config file if one was given, and apply any overrides
// from the command line
fn config(matches: &ArgMatches) -> Result<RenderConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => RenderConfig::from_file(Path::new(path))?,
        None => RenderConfig::default(),
    };

    if let Some(size) = matches.get_one::<String>("size") {
        let (width, height) = parse_size(size)?;
        config.image_width = width;
        config.image_height = height;
    }

    if let Some(center) = matches.get_one::<String>("center") {
        let center = parse_complex(center)?;
        config.center_re = center.re;
        config.center_im = center.im;
    }

    if let Some(width) = matches.get_one::<f64>("width") {
        config.width = *width;
    }

    if let Some(iterations) = matches.get_one::<u64>("iterations") {
        config.max_iterations = *iterations;
    }

    if let Some(radius) = matches.get_one::<f64>("radius") {
        config.escape_radius = *radius;
    }

    if matches.get_flag("no-smooth") {
        config.smooth = false;
    }

    if let Some(palette) = matches.get_one::<String>("palette") {
        config.palette = palette.clone();
    }

    if matches.get_flag("sequential") {
        config.parallel = false;
    }

    if let Some(threads) = matches.get_one::<usize>("threads") {
        config.threads = Some(*threads);
    }

    config.validate()?;

    Ok(config)
}

// Write the image to `filename`, the format is chosen from the file extension
fn write_image(filename: &Path, image: &image::RgbImage) -> Result<()> {
    image.save(filename)
        .chain_err(|| format!("Could not write image to '{}'", filename.display()))
}

// Parse the command line arguments using clap
fn get_matches() -> ArgMatches {
    let app = Command::new(env!("CARGO_PKG_NAME"))
        .version(mandelbrot::version())
        .about("Render an image of the Mandelbrot set");

    let app = app
        .arg(Arg::new("config")
            .short('c')
            .long("config")
            .number_of_values(1)
            .value_name("CONFIG_FILE")
            .help("Read the render configuration from a TOML file"))
        .arg(Arg::new("size")
            .short('s')
            .long("size")
            .number_of_values(1)
            .value_name("WIDTHxHEIGHT")
            .help("Set the image size in pixels (default: 1024x1024)"))
        .arg(Arg::new("center")
            .long("center")
            .number_of_values(1)
            .allow_hyphen_values(true)
            .value_name("RE,IM")
            .help("Set the point on the complex plane at the center of the image"))
        .arg(Arg::new("width")
            .short('w')
            .long("width")
            .number_of_values(1)
            .value_parser(clap::value_parser!(f64))
            .value_name("WIDTH")
            .help("Set the span of the real axis covered by the image width"))
        .arg(Arg::new("iterations")
            .short('i')
            .long("iterations")
            .number_of_values(1)
            .value_parser(clap::value_parser!(u64))
            .value_name("MAX_ITERATIONS")
            .help("Set the iteration budget per point (default: 5000)"))
        .arg(Arg::new("radius")
            .short('r')
            .long("radius")
            .number_of_values(1)
            .value_parser(clap::value_parser!(f64))
            .value_name("ESCAPE_RADIUS")
            .help("Set the escape radius, must be > 1 for smooth coloring (default: 1000)"))
        .arg(Arg::new("no-smooth")
            .long("no-smooth")
            .action(clap::ArgAction::SetTrue)
            .help("Color by integer escape counts instead of smoothed ones"))
        .arg(Arg::new("palette")
            .short('p')
            .long("palette")
            .number_of_values(1)
            .value_parser(PALETTE_NAMES)
            .value_name("PALETTE")
            .help("Set the palette to color with (default: magma)"))
        .arg(Arg::new("sequential")
            .long("sequential")
            .action(clap::ArgAction::SetTrue)
            .help("Render pixels one at a time in row order instead of rows in parallel"))
        .arg(Arg::new("threads")
            .short('t')
            .long("threads")
            .number_of_values(1)
            .value_parser(clap::value_parser!(usize))
            .value_name("THREADS")
            .help("Set number of threads to render with (min: 1, default: cores available)"))
        .arg(Arg::new("verbosity")
            .short('v')
            .long("verbosity")
            .number_of_values(1)
            .value_name("VERBOSITY_LEVEL")
            .help("Set verbosity level for output (trace, debug, info, warn, error (default))"))
        .arg(Arg::new("output")
            .num_args(1)
            .required(true)
            .value_name("FILE")
            .help("The image file to write, e.g. mandelbrot.png"));

    app.get_matches()
}
