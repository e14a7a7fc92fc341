use num::Complex;

use crate::errors::*;
use crate::surface::ImageSurface;

/// The affine mapping between pixel coordinates and points on the complex plane for one
/// viewport, captured at a moment in time so it can be shared by rendering workers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Distance on the complex plane between two horizontally (or vertically) adjacent pixels
    pub scale: f64,
    /// The point on the complex plane at the top-left pixel
    pub offset: Complex<f64>,
}

impl Geometry {
    /// Given the column and row of a pixel, return the corresponding point on the complex plane.
    ///
    /// The imaginary part is negated as the row index increases going down the image,
    /// but the imaginary axis increases going up.
    pub fn pixel_to_point(&self, x: u32, y: u32) -> Complex<f64> {
        Complex { re: x as f64, im: -(y as f64) } * self.scale + self.offset
    }

    /// The inverse of `pixel_to_point()`. Returns fractional pixel coordinates, that may lie
    /// outside the image when `point` is not covered by it.
    pub fn point_to_pixel(&self, point: Complex<f64>) -> (f64, f64) {
        let relative = (point - self.offset) / self.scale;
        (relative.re, -relative.im)
    }
}

/// A rectangular region of the complex plane, centered on `center` and `width` wide,
/// rendered into a borrowed image surface.
///
/// The height of the region is derived from the aspect ratio of the image.
pub struct Viewport<'a, S: ImageSurface> {
    image: &'a mut S,
    center: Complex<f64>,
    width: f64,
}

impl<'a, S: ImageSurface> Viewport<'a, S> {
    /// Create a new viewport onto `image`
    pub fn new(image: &'a mut S, center: Complex<f64>, width: f64) -> Result<Self> {
        if image.width() < 1 || image.height() < 1 {
            invalid_config!("image dimensions must be at least 1x1, got {}x{}",
                image.width(), image.height());
        }
        check_width(width)?;
        check_center(center)?;

        Ok(Viewport { image, center, width })
    }

    /// The point on the complex plane at the center of the image
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// Move the viewport so that `center` is at the center of the image
    pub fn set_center(&mut self, center: Complex<f64>) -> Result<()> {
        check_center(center)?;
        self.center = center;
        Ok(())
    }

    /// The span of the real axis covered by the width of the image
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Change the span of the real axis covered by the width of the image
    pub fn set_width(&mut self, width: f64) -> Result<()> {
        check_width(width)?;
        self.width = width;
        Ok(())
    }

    /// Complex plane distance per pixel
    pub fn scale(&self) -> f64 {
        self.width / self.image.width() as f64
    }

    /// The span of the imaginary axis covered by the height of the image
    pub fn height(&self) -> f64 {
        self.scale() * self.image.height() as f64
    }

    /// The point on the complex plane at the top-left corner of the image
    pub fn offset(&self) -> Complex<f64> {
        self.center + Complex { re: -self.width, im: self.height() } / 2.0
    }

    /// The current pixel to point mapping
    pub fn geometry(&self) -> Geometry {
        Geometry {
            scale: self.scale(),
            offset: self.offset(),
        }
    }

    /// Return the point on the complex plane for the pixel at column `x` and row `y`
    pub fn pixel_to_point(&self, x: u32, y: u32) -> Complex<f64> {
        self.geometry().pixel_to_point(x, y)
    }

    /// Return the (fractional) pixel coordinates of `point`
    pub fn point_to_pixel(&self, point: Complex<f64>) -> (f64, f64) {
        self.geometry().point_to_pixel(point)
    }

    /// Iterate over all the pixel coordinates of the image in row-major order
    pub fn pixels(&self) -> Pixels {
        Pixels::new(self.image.width(), self.image.height())
    }

    /// The image this viewport renders into
    pub fn image(&self) -> &S {
        &*self.image
    }

    /// Mutable access to the image this viewport renders into
    pub fn image_mut(&mut self) -> &mut S {
        &mut *self.image
    }
}

fn check_width(width: f64) -> Result<()> {
    if !(width > 0.0) || !width.is_finite() {
        invalid_config!("viewport width must be a finite number > 0, got '{}'", width);
    }
    Ok(())
}

fn check_center(center: Complex<f64>) -> Result<()> {
    if !center.is_finite() {
        invalid_config!("viewport center must be finite, got '{}'", center);
    }
    Ok(())
}

/// Row-major iterator over the `(x, y)` coordinates of an image, `x` varying fastest
#[derive(Debug, Clone)]
pub struct Pixels {
    width: u32,
    height: u32,
    next: u64,
}

impl Pixels {
    /// Iterate over all the pixels of an image of `width` by `height` pixels
    pub fn new(width: u32, height: u32) -> Self {
        Pixels { width, height, next: 0 }
    }

    fn total(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Iterator for Pixels {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        if self.next >= self.total() {
            return None;
        }

        let width = self.width as u64;
        let pixel = ((self.next % width) as u32, (self.next / width) as u32);
        self.next += 1;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total() - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Pixels {}
