// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type for light control.
//!
//! Lights expose brightness on a 0-255 scale while the GifKid API stores it
//! as a fraction between 0.0 and 1.0. This type owns the conversion in both
//! directions.

use std::fmt;

/// Brightness level on the 0-255 scale.
///
/// # Examples
///
/// ```
/// use gifkid::types::Brightness;
///
/// let level = Brightness::new(153);
/// assert_eq!(level.value(), 153);
///
/// // Fractions from the API are rounded to the nearest step
/// assert_eq!(Brightness::from_fraction(0.6).value(), 153);
///
/// // Out-of-range fractions are clamped
/// assert_eq!(Brightness::from_fraction(1.2), Brightness::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u8);

impl Brightness {
    /// Minimum brightness.
    pub const MIN: Self = Self(0);

    /// Maximum brightness.
    pub const MAX: Self = Self(255);

    /// Creates a brightness value. Every `u8` is valid.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the 0-255 value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction between 0.0 and 1.0.
    #[must_use]
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 255.0
    }

    /// Creates a brightness from an API fraction, rounding to the nearest
    /// step.
    ///
    /// Fractions outside [0.0, 1.0] are clamped; NaN maps to
    /// [`Brightness::MIN`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::MIN;
        }
        // Clamped to [0, 1], so the product is within [0, 255]
        Self((fraction.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/255", self.0)
    }
}

impl From<u8> for Brightness {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}
