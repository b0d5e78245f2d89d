// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion parameters.

use crate::error::{Error, Result};

/// Default chordal deflection, in model units.
pub const DEFAULT_DEFLECTION: f64 = 0.14;

/// Default angular increment: 30 degrees, 12 facets per full circle.
pub const DEFAULT_ANGLE_INCREMENT: f64 = 0.52359878;

/// Accepted deflection range, in model units.
pub const DEFLECTION_RANGE: std::ops::RangeInclusive<f64> = 0.0001..=0.8;

/// Accepted angular increment range: 5 to 45 degrees, in radians.
pub const ANGLE_INCREMENT_RANGE: std::ops::RangeInclusive<f64> = 0.087266462..=0.785398164;

/// Parameters of one conversion run.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Maximum chordal distance between a mesh and the true surface.
    pub deflection: f64,
    /// Maximum angular step when sampling curved regions, radians.
    pub angle_increment: f64,
    /// Render every face from both sides, regardless of solid ancestry.
    /// Set for import formats with no reliable outward-normal convention.
    pub force_two_sided: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deflection: DEFAULT_DEFLECTION,
            angle_increment: DEFAULT_ANGLE_INCREMENT,
            force_two_sided: false,
        }
    }
}

impl Config {
    /// Create a configuration, validating parameter ranges.
    pub fn new(deflection: f64, angle_increment: f64, force_two_sided: bool) -> Result<Self> {
        if !DEFLECTION_RANGE.contains(&deflection) {
            return Err(Error::InvalidDeflection(deflection));
        }
        if !ANGLE_INCREMENT_RANGE.contains(&angle_increment) {
            return Err(Error::InvalidAngleIncrement(angle_increment));
        }
        Ok(Self {
            deflection,
            angle_increment,
            force_two_sided,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = Config::default();
        assert!(Config::new(c.deflection, c.angle_increment, false).is_ok());
    }

    #[test]
    fn rejects_out_of_range_deflection() {
        assert!(matches!(
            Config::new(0.0, DEFAULT_ANGLE_INCREMENT, false),
            Err(Error::InvalidDeflection(_))
        ));
        assert!(matches!(
            Config::new(1.5, DEFAULT_ANGLE_INCREMENT, false),
            Err(Error::InvalidDeflection(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_angle() {
        assert!(matches!(
            Config::new(DEFAULT_DEFLECTION, 0.01, false),
            Err(Error::InvalidAngleIncrement(_))
        ));
        assert!(matches!(
            Config::new(DEFAULT_DEFLECTION, 1.0, false),
            Err(Error::InvalidAngleIncrement(_))
        ));
    }
}
