//! Tree-level amplitudes, one module per process.
//!
//! Every module exposes `amplitudes` (the helicity tensor with its leg
//! weights), `squared_amplitude` (the polarization-weighted sum, a Lorentz
//! invariant) and a crate-private `kinematic_factor` turning it into a
//! differential cross section.

pub mod bethe_heitler;
pub mod bremsstrahlung;
pub mod compton;
pub mod e_pair;
pub mod e_triplet;
pub mod ee_bremsstrahlung;
pub mod pair;
pub mod triplet;

use std::f64::consts::PI;

use qedxs_core::dirac::{DiracMatrix, DiracSpinor};
use qedxs_core::particle::{Lepton, Particle};
use qedxs_core::vector::PolarizationVector;

/// `gamma^0 .. gamma^3`.
pub(crate) fn gammas() -> [DiracMatrix; 4] {
    std::array::from_fn(DiracMatrix::gamma)
}

/// Slashed polarization vectors in tensor-index order.
pub(crate) fn slashed(polarizations: [PolarizationVector; 2]) -> [DiracMatrix; 2] {
    polarizations.map(|eps| DiracMatrix::slash_complex(&eps))
}

/// Both `u` spinors of a lepton.
pub(crate) fn u_pair(lepton: &Lepton) -> [DiracSpinor; 2] {
    DiracSpinor::u_pair(&lepton.momentum())
}

/// Both `v` spinors of an antilepton.
pub(crate) fn v_pair(lepton: &Lepton) -> [DiracSpinor; 2] {
    DiracSpinor::v_pair(&lepton.momentum())
}

/// Whether two legs are the same species, judged by declared rest mass.
///
/// Exchange diagrams are only added between identical fermions.
pub(crate) fn identical(a: &Lepton, b: &Lepton) -> bool {
    let (ma, mb) = (a.mass(), b.mass());
    (ma - mb).abs() <= f64::EPSILON * ma.abs().max(mb.abs())
}

/// `(2 pi)^n`.
pub(crate) fn two_pi_pow(n: i32) -> f64 {
    (2.0 * PI).powi(n)
}
