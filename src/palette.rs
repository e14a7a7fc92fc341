use image::Rgb;

use crate::errors::*;

/// Escape counts are grouped into bands of this many iterations, each band getting one color
pub const ITERATIONS_PER_BAND: i64 = 8;

/// The names of the built-in palettes accepted by `Palette::named()`
pub const PALETTE_NAMES: [&str; 4] = ["magma", "grayscale", "fire", "ocean"];

/// Number of colors generated for each of the built-in palettes
pub const NAMED_PALETTE_SIZE: usize = 256;

// Samples of the matplotlib "magma" colormap at 0, 1/8, 2/8 ... 1
const MAGMA_STOPS: [[u8; 3]; 9] = [
    [0, 0, 4],
    [28, 16, 68],
    [79, 18, 123],
    [129, 37, 129],
    [181, 54, 122],
    [229, 80, 100],
    [251, 135, 97],
    [254, 194, 135],
    [252, 253, 191],
];

const GRAYSCALE_STOPS: [[u8; 3]; 2] = [[0, 0, 0], [255, 255, 255]];

const FIRE_STOPS: [[u8; 3]; 4] = [[0, 0, 0], [255, 0, 0], [255, 255, 0], [255, 255, 255]];

const OCEAN_STOPS: [[u8; 3]; 4] = [[0, 0, 0], [0, 0, 255], [0, 255, 255], [255, 255, 255]];

/// An ordered, non-empty list of colors that is indexed cyclically
#[derive(Debug, Clone, PartialEq)]
pub struct Palette<P> {
    colors: Vec<P>,
}

impl<P: Copy> Palette<P> {
    /// Create a new palette, rejecting an empty list of colors
    pub fn new(colors: Vec<P>) -> Result<Self> {
        if colors.is_empty() {
            invalid_config!("a palette must contain at least one color");
        }

        Ok(Palette { colors })
    }

    /// The number of colors in the palette, always at least one
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false, a `Palette` can't be created empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colors of the palette
    pub fn colors(&self) -> &[P] {
        &self.colors
    }

    /// Get the color at `index`, wrapping around the end of the palette
    pub fn get(&self, index: usize) -> P {
        self.colors[index % self.colors.len()]
    }

    /// The palette index for an escape count. The count is truncated toward zero to an integer,
    /// then `div 8 mod len` using floor division and a non-negative modulus, so negative smooth
    /// counts also land inside the palette
    pub fn band_index(&self, count: f64) -> usize {
        let band = (count.trunc() as i64).div_euclid(ITERATIONS_PER_BAND);
        band.rem_euclid(self.colors.len() as i64) as usize
    }

    /// The color for an escape count
    pub fn band(&self, count: f64) -> P {
        self.colors[self.band_index(count)]
    }
}

impl Palette<Rgb<u8>> {
    /// Convert colors with channels in the range [0.0, 1.0] into 8 bit RGB colors, truncating
    pub fn denormalize(colors: &[[f64; 3]]) -> Result<Self> {
        Palette::new(colors.iter()
            .map(|color| Rgb(color.map(|channel| (channel * 255.0) as u8)))
            .collect())
    }

    /// Create a palette of `size` colors by linear interpolation between evenly spaced `stops`
    pub fn gradient(stops: &[[u8; 3]], size: usize) -> Result<Self> {
        if stops.is_empty() {
            invalid_config!("a gradient needs at least one color stop");
        }
        if size == 0 {
            invalid_config!("a gradient palette must have at least one color");
        }

        let segments = (stops.len() - 1) as f64;
        let last = (size - 1).max(1) as f64;
        let colors = (0..size).map(|i| {
            let position = i as f64 / last * segments;
            let lower = (position.floor() as usize).min(stops.len() - 1);
            let upper = (lower + 1).min(stops.len() - 1);
            let fraction = position - lower as f64;

            let mut channels = [0u8; 3];
            for (channel, value) in channels.iter_mut().enumerate() {
                let from = stops[lower][channel] as f64;
                let to = stops[upper][channel] as f64;
                *value = (from + (to - from) * fraction).round() as u8;
            }
            Rgb(channels)
        }).collect();

        Palette::new(colors)
    }

    /// One of the built-in palettes listed in `PALETTE_NAMES`
    pub fn named(name: &str) -> Result<Self> {
        let stops: &[[u8; 3]] = match name {
            "magma" => &MAGMA_STOPS,
            "grayscale" => &GRAYSCALE_STOPS,
            "fire" => &FIRE_STOPS,
            "ocean" => &OCEAN_STOPS,
            _ => invalid_config!("unknown palette '{}', expected one of: {}", name,
                PALETTE_NAMES.join(", ")),
        };

        Palette::gradient(stops, NAMED_PALETTE_SIZE)
    }
}

#[cfg(test)]
mod test {
    use image::Rgb;
    use num::Complex;

    use crate::escape_time::MandelbrotSet;

    use super::{Palette, NAMED_PALETTE_SIZE, PALETTE_NAMES};

    fn sixteen() -> Palette<u8> {
        Palette::new((0..16).collect()).expect("Could not create palette")
    }

    #[test]
    fn empty_palette_rejected() {
        assert!(Palette::<u8>::new(vec![]).is_err());
    }

    #[test]
    fn count_130_wraps_to_start() {
        assert_eq!(sixteen().band_index(130.0), 0);
    }

    #[test]
    fn bands_of_eight() {
        let palette = sixteen();
        assert_eq!(palette.band_index(0.0), 0);
        assert_eq!(palette.band_index(7.9), 0);
        assert_eq!(palette.band_index(8.0), 1);
        assert_eq!(palette.band_index(127.0), 15);
        assert_eq!(palette.band(50.0), 6);
    }

    #[test]
    fn negative_counts_stay_in_palette() {
        let palette = sixteen();
        assert_eq!(palette.band_index(-0.5), 0);
        assert_eq!(palette.band_index(-7.9), 15);
        assert_eq!(palette.band_index(-8.0), 15);
        assert_eq!(palette.band_index(-8.5), 15);
        assert_eq!(palette.band_index(-16.5), 14);
    }

    #[test]
    fn counts_just_below_zero_use_first_color() {
        // 40+0i escapes at n = 1 with |z| = 1640, giving a smooth count of about -0.888
        let set = MandelbrotSet::new(5000, 1000.0).expect("Could not create engine");
        let count = set.escape_count(Complex { re: 40.0, im: 0.0 }, true)
            .expect("escape_count() failed");
        assert!(count > -1.0 && count < 0.0, "count = {}", count);

        let palette = Palette::<u8>::new((0..=255).collect()).expect("Could not create palette");
        assert_eq!(palette.band_index(count), 0);
    }

    #[test]
    fn get_is_cyclic() {
        let palette = sixteen();
        assert_eq!(palette.get(3), 3);
        assert_eq!(palette.get(19), 3);
    }

    #[test]
    fn denormalize_truncates() {
        let palette = Palette::denormalize(&[[0.0, 0.5, 1.0], [0.001462, 0.000466, 0.013866]])
            .expect("Could not denormalize");
        assert_eq!(palette.colors(), &[Rgb([0, 127, 255]), Rgb([0, 0, 3])]);
    }

    #[test]
    fn gradient_hits_stops() {
        let palette = Palette::gradient(&[[0, 0, 0], [100, 200, 250]], 11)
            .expect("Could not create gradient");
        assert_eq!(palette.len(), 11);
        assert_eq!(palette.get(0), Rgb([0, 0, 0]));
        assert_eq!(palette.get(5), Rgb([50, 100, 125]));
        assert_eq!(palette.get(10), Rgb([100, 200, 250]));
    }

    #[test]
    fn single_color_gradient() {
        let palette = Palette::gradient(&[[9, 8, 7]], 3).expect("Could not create gradient");
        assert!(palette.colors().iter().all(|color| *color == Rgb([9, 8, 7])));
    }

    #[test]
    fn named_palettes() {
        for name in PALETTE_NAMES {
            let palette = Palette::named(name).expect("Could not get named palette");
            assert_eq!(palette.len(), NAMED_PALETTE_SIZE);
        }

        let magma = Palette::named("magma").expect("Could not get magma");
        assert_eq!(magma.get(0), Rgb([0, 0, 4]));
        assert_eq!(magma.get(255), Rgb([252, 253, 191]));
    }

    #[test]
    fn unknown_palette() {
        assert!(Palette::named("viridian").is_err());
    }
}
