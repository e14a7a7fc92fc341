#![allow(missing_docs)]

pub use error_chain::bail;
use error_chain::error_chain;

error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }

    foreign_links {
        Io(std::io::Error);
        Image(image::ImageError);
        Toml(toml::de::Error);
    }

    errors {
        InvalidConfig(reason: String) {
            description("invalid configuration")
            display("Invalid configuration: {}", reason)
        }
        NumericDomain(magnitude: f64) {
            description("smooth escape count is undefined")
            display("Smooth escape count is undefined for |z| = {} (must be > 1), use an escape radius > 1",
                    magnitude)
        }
    }
}

/// Shorthand to return an `InvalidConfig` error from a validation check
macro_rules! invalid_config {
    ($($arg:tt)*) => {
        return Err($crate::errors::ErrorKind::InvalidConfig(format!($($arg)*)).into())
    };
}

pub(crate) use invalid_config;
