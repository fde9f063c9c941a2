//! Advisory consistency check on polarization-summed squared amplitudes.

use num_complex::Complex64;

use crate::tensor::Amplitudes;

/// Default relative tolerance on the imaginary part.
pub const DEFAULT_REALITY_TOLERANCE: f64 = 1e-8;

/// Whether `sum` is real and non-negative within `tolerance`.
pub fn is_physical(sum: Complex64, tolerance: f64) -> bool {
    sum.re >= 0.0 && sum.im.abs() <= tolerance * sum.norm()
}

/// Returns the real part of the squared amplitude.
///
/// A negative real part or a non-negligible imaginary residue points to an
/// inconsistent calculation or non-Hermitian spin-density input; it is logged
/// as a warning together with the open-leg densities, and the value is
/// returned unchanged.
pub fn squared_amplitude(process: &str, amplitudes: &Amplitudes, tolerance: f64) -> f64 {
    let sum = amplitudes.polarized_sum();
    if !is_physical(sum, tolerance) {
        log::warn!(
            "bad {process} amplitude: squared sum should be real and non-negative, got {sum}"
        );
        if log::log_enabled!(log::Level::Debug) {
            for leg in 0..amplitudes.tensor.rank() {
                let density = amplitudes.leg_density(leg);
                log::debug!(
                    "{process} leg {leg}: diagonal ({}, {}) off-diagonal ({}, {})",
                    density[0][0],
                    density[1][1],
                    density[0][1],
                    density[1][0]
                );
            }
        }
    }
    sum.re
}
