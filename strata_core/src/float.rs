// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers for `no_std` builds.
//!
//! `f64::round`, `f64::sin` and friends live in `std`. Downstream crates import
//! [`FloatExt`] when their `std` feature is off; with `std` the inherent methods win.

/// Float math helpers for `f64` in `no_std` mode.
pub trait FloatExt {
    /// Largest integer less than or equal to `self`.
    fn floor(self) -> Self;
    /// Smallest integer greater than or equal to `self`.
    fn ceil(self) -> Self;
    /// Nearest integer, rounding half away from zero.
    fn round(self) -> Self;
    /// Sine (radians).
    fn sin(self) -> Self;
    /// Cosine (radians).
    fn cos(self) -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Non-negative remainder of `self / rhs`.
    fn rem_euclid(self, rhs: Self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn floor(self) -> Self {
        libm::floor(self)
    }

    fn ceil(self) -> Self {
        libm::ceil(self)
    }

    fn round(self) -> Self {
        libm::round(self)
    }

    fn sin(self) -> Self {
        libm::sin(self)
    }

    fn cos(self) -> Self {
        libm::cos(self)
    }

    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }

    fn rem_euclid(self, rhs: Self) -> Self {
        let r = libm::fmod(self, rhs);
        if r < 0.0 { r + rhs.abs() } else { r }
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("strata_core requires either the `std` or `libm` feature");

/// Normalizes an angle in degrees into `[0, 360)`.
pub fn standard_angle(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    // `rem_euclid` can return `360.0` for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_angle_wraps_into_one_turn() {
        assert_eq!(standard_angle(-90.0), 270.0);
        assert_eq!(standard_angle(360.0), 0.0);
        assert_eq!(standard_angle(725.0), 5.0);
        assert_eq!(standard_angle(0.0), 0.0);
    }
}
