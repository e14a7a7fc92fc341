use std::time::Instant;

use image::{ImageBuffer, Pixel, RgbImage};
use log::{debug, info, trace};
use rayon::prelude::*;

use crate::config::RenderConfig;
use crate::errors::*;
use crate::escape_time::MandelbrotSet;
use crate::palette::Palette;
use crate::surface::ImageSurface;
use crate::viewport::Viewport;

/// Paint every pixel of `viewport`'s image, one at a time in row-major order, with the palette
/// color for the escape count of the pixel's point.
///
/// The first error (a `NumericDomain` error when `smooth` is used with an escape radius <= 1)
/// aborts the render and is returned, leaving the image partially painted.
pub fn paint<S: ImageSurface>(set: &MandelbrotSet, viewport: &mut Viewport<S>,
                              palette: &Palette<S::Color>, smooth: bool) -> Result<()> {
    let geometry = viewport.geometry();
    debug!("Painting sequentially with scale {} from offset {}", geometry.scale, geometry.offset);

    for (x, y) in viewport.pixels() {
        let count = set.escape_count(geometry.pixel_to_point(x, y), smooth)?;
        viewport.image_mut().set_pixel(x, y, palette.band(count));
    }

    Ok(())
}

/// Same result as `paint()` but the image buffer is split into rows that are rendered in
/// parallel on the current rayon thread pool. Each row is a disjoint slice of the buffer so
/// no locking is needed. If any pixel fails, one of the errors is returned.
pub fn paint_parallel<P>(set: &MandelbrotSet, viewport: &mut Viewport<ImageBuffer<P, Vec<P::Subpixel>>>,
                         palette: &Palette<P>, smooth: bool) -> Result<()>
    where P: Pixel + Send + Sync,
          P::Subpixel: Send + Sync {
    let geometry = viewport.geometry();
    debug!("Painting in parallel with scale {} from offset {}", geometry.scale, geometry.offset);

    let channels = P::CHANNEL_COUNT as usize;
    let row_length = ImageSurface::width(viewport.image()) as usize * channels;
    let buffer: &mut [P::Subpixel] = viewport.image_mut();

    buffer.par_chunks_mut(row_length)
        .enumerate()
        .try_for_each(|(y, row)| -> Result<()> {
            for (x, pixel) in row.chunks_exact_mut(channels).enumerate() {
                let count = set.escape_count(geometry.pixel_to_point(x as u32, y as u32), smooth)?;
                pixel.copy_from_slice(palette.band(count).channels());
            }
            trace!("Row {} rendered", y);
            Ok(())
        })
}

/// Validate `config` and render the image it describes
pub fn render(config: &RenderConfig) -> Result<RgbImage> {
    config.validate()?;

    let set = config.mandelbrot_set()?;
    let palette = config.palette()?;
    let mut image = RgbImage::new(config.image_width, config.image_height);
    let mut viewport = Viewport::new(&mut image, config.center(), config.width)?;

    info!("Rendering {}x{} image centered on {} with width {}", config.image_width,
        config.image_height, config.center(), config.width);
    let start = Instant::now();

    if config.parallel {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads.unwrap_or(0))
            .build()
            .chain_err(|| "Could not create thread pool for rendering")?;
        debug!("Using {} threads", pool.current_num_threads());
        pool.install(|| paint_parallel(&set, &mut viewport, &palette, config.smooth))?;
    } else {
        paint(&set, &mut viewport, &palette, config.smooth)?;
    }

    info!("Rendered in {:.3}s", start.elapsed().as_secs_f64());

    Ok(image)
}
