//! Standard preferred-value resistor series.
//!
//! A [`Series`] names one of the EIA decade tables and a [`DecadeRange`]
//! selects which powers of ten to cover. Together they produce the candidate
//! pool every search draws from:
//!
//! ```text
//! E24, decades 6..=7  ->  1.0M 1.1M ... 9.1M 10M 11M ... 91M
//! ```

mod tables;

use std::fmt;
use std::str::FromStr;

use crate::error::{DivcalcError, Result};

/// Lowest decade accepted by [`DecadeRange::new`] (1 mΩ).
pub const MIN_DECADE: i32 = -3;

/// Highest decade accepted by [`DecadeRange::new`] (1 TΩ).
pub const MAX_DECADE: i32 = 12;

/// A standard preferred-value series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    /// 24 values per decade (5 % parts)
    E24,
    /// 96 values per decade (1 % parts)
    E96,
}

impl Series {
    /// Integer mantissas of one decade, ascending.
    pub fn mantissas(&self) -> &'static [u16] {
        match self {
            Series::E24 => &tables::E24,
            Series::E96 => &tables::E96,
        }
    }

    /// Number of significant digits the mantissas are stored with.
    fn digits(&self) -> i32 {
        match self {
            Series::E24 => 2,
            Series::E96 => 3,
        }
    }

    /// Number of values per decade.
    pub fn per_decade(&self) -> usize {
        self.mantissas().len()
    }

    /// Generate the sorted value pool (in ohms) covering every decade in `range`.
    ///
    /// Decade `d` contributes the values in `[10^d, 10^(d+1))`.
    pub fn values(&self, range: DecadeRange) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.per_decade() * range.len());
        for decade in range.min..=range.max {
            let exponent = decade - (self.digits() - 1);
            values.extend(self.mantissas().iter().map(|&m| scale(m, exponent)));
        }
        values
    }
}

/// `mantissa * 10^exponent`, dividing for negative exponents so that e.g.
/// 47 * 10^-1 comes out as the nearest double to 4.7.
fn scale(mantissa: u16, exponent: i32) -> f64 {
    let m = f64::from(mantissa);
    if exponent >= 0 {
        m * 10f64.powi(exponent)
    } else {
        m / 10f64.powi(-exponent)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Series::E24 => write!(f, "E24"),
            Series::E96 => write!(f, "E96"),
        }
    }
}

impl FromStr for Series {
    type Err = DivcalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "E24" => Ok(Series::E24),
            "E96" => Ok(Series::E96),
            _ => Err(DivcalcError::UnknownSeries {
                name: s.to_string(),
            }),
        }
    }
}

/// An inclusive range of decades, e.g. `6..=7` for 1 MΩ up to 91 MΩ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecadeRange {
    min: i32,
    max: i32,
}

impl DecadeRange {
    /// Create a decade range. Fails if `min > max` or either end lies outside
    /// [`MIN_DECADE`]..=[`MAX_DECADE`].
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(DivcalcError::decade_range(
                min,
                max,
                "minimum decade is greater than maximum",
            ));
        }
        if min < MIN_DECADE || max > MAX_DECADE {
            return Err(DivcalcError::decade_range(
                min,
                max,
                format!("decades must lie within {MIN_DECADE}..{MAX_DECADE}"),
            ));
        }
        Ok(Self { min, max })
    }

    /// Lowest decade.
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Highest decade.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Number of decades covered.
    pub fn len(&self) -> usize {
        (self.max - self.min + 1) as usize
    }

    /// Always false: a valid range covers at least one decade.
    pub fn is_empty(&self) -> bool {
        false
    }
}
