use std::fs;
use std::path::Path;

use image::Rgb;
use log::debug;
use num::Complex;
use serde_derive::Deserialize;

use crate::errors::*;
use crate::escape_time::MandelbrotSet;
use crate::palette::{Palette, PALETTE_NAMES};

/// Everything needed to render an image, with defaults for a deep zoom into the
/// "seahorse valley" of the set.
///
/// It can be read from a TOML file, where any field that is missing takes its default value:
/// ```toml
/// image_width = 800
/// image_height = 600
/// center_re = -0.75
/// center_im = 0.0
/// width = 3.5
/// max_iterations = 256
/// escape_radius = 2.0
/// smooth = true
/// palette = "fire"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Image width in pixels
    pub image_width: u32,
    /// Image height in pixels
    pub image_height: u32,
    /// Real part of the point at the center of the image
    pub center_re: f64,
    /// Imaginary part of the point at the center of the image
    pub center_im: f64,
    /// The span of the real axis covered by the width of the image
    pub width: f64,
    /// Iteration budget per point
    pub max_iterations: u64,
    /// Divergence threshold, must be > 1 when `smooth` is set
    pub escape_radius: f64,
    /// Use the continuous (smooth) escape count to avoid banding
    pub smooth: bool,
    /// Name of one of the built-in palettes
    pub palette: String,
    /// Render rows in parallel (true) or pixels sequentially in row-major order (false)
    pub parallel: bool,
    /// Number of threads to render with when `parallel`, default: cores available
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            image_width: 1024,
            image_height: 1024,
            center_re: -1.6241199193406024,
            center_im: -0.00013088927739332137,
            width: 1.17658771614515e-10 / 2.0,
            max_iterations: 5000,
            escape_radius: 1000.0,
            smooth: true,
            palette: "magma".into(),
            parallel: true,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: RenderConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Read a configuration from the TOML file at `path`
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading render configuration from '{}'", path.display());
        let contents = fs::read_to_string(path)
            .chain_err(|| format!("Could not read configuration file '{}'", path.display()))?;
        RenderConfig::from_toml(&contents)
            .chain_err(|| format!("Could not parse configuration file '{}'", path.display()))
    }

    /// Check the configuration is consistent, so a render won't fail part way through
    pub fn validate(&self) -> Result<()> {
        if self.image_width < 1 || self.image_height < 1 {
            invalid_config!("image size must be at least 1x1, got {}x{}",
                self.image_width, self.image_height);
        }
        if self.max_iterations < 1 {
            invalid_config!("max_iterations must be at least 1");
        }
        if !(self.escape_radius > 0.0) {
            invalid_config!("escape_radius must be > 0, got '{}'", self.escape_radius);
        }
        if self.smooth && self.escape_radius <= 1.0 {
            invalid_config!("smooth coloring needs an escape_radius > 1, got '{}'",
                self.escape_radius);
        }
        if !(self.width > 0.0) || !self.width.is_finite() {
            invalid_config!("width must be a finite number > 0, got '{}'", self.width);
        }
        if !self.center().is_finite() {
            invalid_config!("center must be finite, got '{}'", self.center());
        }
        if !PALETTE_NAMES.contains(&self.palette.as_str()) {
            invalid_config!("unknown palette '{}', expected one of: {}", self.palette,
                PALETTE_NAMES.join(", "));
        }
        if self.threads == Some(0) {
            invalid_config!("threads must be at least 1");
        }

        Ok(())
    }

    /// The point at the center of the image
    pub fn center(&self) -> Complex<f64> {
        Complex { re: self.center_re, im: self.center_im }
    }

    /// An engine with the configured iteration budget and escape radius
    pub fn mandelbrot_set(&self) -> Result<MandelbrotSet> {
        MandelbrotSet::new(self.max_iterations, self.escape_radius)
    }

    /// The configured palette
    pub fn palette(&self) -> Result<Palette<Rgb<u8>>> {
        Palette::named(&self.palette)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use num::Complex;

    use crate::errors::ErrorKind;

    use super::RenderConfig;

    #[test]
    fn default_is_valid() {
        let config = RenderConfig::default();
        config.validate().expect("Default configuration is invalid");
        assert_eq!(config.image_width, 1024);
        assert_eq!(config.max_iterations, 5000);
        assert_eq!(config.center(), Complex { re: -1.6241199193406024, im: -0.00013088927739332137 });
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config = RenderConfig::from_toml("image_width = 64\nimage_height = 48\nsmooth = false\n")
            .expect("Could not parse config");
        assert_eq!(config.image_width, 64);
        assert_eq!(config.image_height, 48);
        assert!(!config.smooth);
        assert_eq!(config.palette, "magma");
        assert_eq!(config.escape_radius, 1000.0);
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(RenderConfig::from_toml("zoom = 2.0").is_err());
    }

    #[test]
    fn from_file() {
        let dir = tempfile::tempdir().expect("Could not create temp dir");
        let path = dir.path().join("render.toml");
        let mut file = std::fs::File::create(&path).expect("Could not create file");
        writeln!(file, "center_re = -0.75\ncenter_im = 0.1\nwidth = 3.0\npalette = \"ocean\"\nthreads = 2")
            .expect("Could not write file");

        let config = RenderConfig::from_file(&path).expect("Could not read config");
        assert_eq!(config.center(), Complex { re: -0.75, im: 0.1 });
        assert_eq!(config.width, 3.0);
        assert_eq!(config.palette, "ocean");
        assert_eq!(config.threads, Some(2));
    }

    #[test]
    fn missing_file() {
        assert!(RenderConfig::from_file(std::path::Path::new("/no/such/render.toml")).is_err());
    }

    #[test]
    fn smooth_needs_radius_above_one() {
        let config = RenderConfig {
            escape_radius: 1.0,
            ..Default::default()
        };
        let error = config.validate().expect_err("Expected validation to fail");
        assert!(matches!(error.kind(), ErrorKind::InvalidConfig(_)));

        let config = RenderConfig {
            escape_radius: 1.0,
            smooth: false,
            ..Default::default()
        };
        config.validate().expect("Unsmoothed radius of 1 should be valid");
    }

    #[test]
    fn invalid_values_rejected() {
        let invalid = [
            RenderConfig { image_width: 0, ..Default::default() },
            RenderConfig { image_height: 0, ..Default::default() },
            RenderConfig { max_iterations: 0, ..Default::default() },
            RenderConfig { escape_radius: 0.0, smooth: false, ..Default::default() },
            RenderConfig { width: -1.0, ..Default::default() },
            RenderConfig { width: f64::INFINITY, ..Default::default() },
            RenderConfig { center_re: f64::NAN, ..Default::default() },
            RenderConfig { palette: "viridian".into(), ..Default::default() },
            RenderConfig { threads: Some(0), ..Default::default() },
        ];

        for config in invalid {
            assert!(config.validate().is_err(), "{:?} should be invalid", config);
        }
    }
}
