#![deny(missing_docs)]
#![warn(clippy::unwrap_used)]

//! `mandelbrot` renders images of the Mandelbrot set using the escape-time algorithm.
//!
//! Each pixel of an image is mapped by a [Viewport][viewport::Viewport] to a point `c` on the
//! complex plane, the [MandelbrotSet][escape_time::MandelbrotSet] engine counts how many
//! iterations of `z -> z^2 + c` the point survives before escaping, and the
//! [renderer] maps that count through a cyclic [Palette][palette::Palette] into a color.
//!
//! ```
//! use image::RgbImage;
//! use num::Complex;
//! use mandelbrot::escape_time::MandelbrotSet;
//! use mandelbrot::palette::Palette;
//! use mandelbrot::renderer::paint;
//! use mandelbrot::viewport::Viewport;
//!
//! let set = MandelbrotSet::new(256, 1000.0).unwrap();
//! let palette = Palette::named("magma").unwrap();
//! let mut image = RgbImage::new(64, 48);
//! let mut viewport = Viewport::new(&mut image, Complex { re: -0.75, im: 0.0 }, 3.5).unwrap();
//! paint(&set, &mut viewport, &palette, true).unwrap();
//! ```

/// We'll put our errors in an `errors` module, and other modules in this crate will
/// `use crate::errors::*;` to get access to everything `error_chain` creates.
pub mod errors;

/// The escape-time engine that measures how quickly points diverge
pub mod escape_time;

/// The trait for image surfaces that can be rendered into
pub mod surface;

/// Mapping between pixels of an image and points of the complex plane
pub mod viewport;

/// Cyclic color palettes, including some built-in colormaps
pub mod palette;

/// Sequential and parallel rendering of a viewport
pub mod renderer;

/// Render configuration, with defaults and loading from TOML
pub mod config;

/// Parsing of pairs of values such as image sizes and complex numbers
pub mod parse_pair;

/// Return the version number of the `mandelbrot` crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
