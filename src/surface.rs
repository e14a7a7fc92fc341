use image::{ImageBuffer, Pixel};

/// A two dimensional grid of pixels that can be rendered into.
///
/// Coordinates are `(x, y)` with `0 <= x < width()` and `0 <= y < height()`, `y` increasing
/// downwards.
pub trait ImageSurface {
    /// The color type stored at each pixel
    type Color: Copy;

    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Read the color of the pixel at (x, y)
    fn get_pixel(&self, x: u32, y: u32) -> Self::Color;

    /// Write the color of the pixel at (x, y)
    fn set_pixel(&mut self, x: u32, y: u32, color: Self::Color);
}

impl<P: Pixel> ImageSurface for ImageBuffer<P, Vec<P::Subpixel>> {
    type Color = P;

    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get_pixel(&self, x: u32, y: u32) -> P {
        *ImageBuffer::get_pixel(self, x, y)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: P) {
        self.put_pixel(x, y, color);
    }
}
