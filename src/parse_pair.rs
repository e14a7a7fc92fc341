use std::str::FromStr;

use num::Complex;

use crate::errors::*;

/// Parse the string `s` as a pair of values separated by `separator`, like "400x600" or
/// "1.0,0.5", where both sides can be parsed by `T::from_str`.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Result<(T, T)> {
    let (left, right) = s.split_once(separator)
        .ok_or_else(|| format!("'{}' is not of the form <value>{}<value>", s, separator))?;

    match (T::from_str(left.trim()), T::from_str(right.trim())) {
        (Ok(l), Ok(r)) => Ok((l, r)),
        _ => bail!("Could not parse both values of '{}'", s),
    }
}

/// Parse image dimensions of the form "<width>x<height>"
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    parse_pair(s, 'x').chain_err(|| "Image size should be of the form WIDTHxHEIGHT e.g. 800x600")
}

/// Parse a complex number of the form "<re>,<im>"
pub fn parse_complex(s: &str) -> Result<Complex<f64>> {
    let (re, im) = parse_pair(s, ',')
        .chain_err(|| "Complex number should be of the form RE,IM e.g. -0.75,0.1")?;
    Ok(Complex { re, im })
}
