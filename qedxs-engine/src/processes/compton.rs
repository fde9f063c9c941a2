//! Compton scattering `gamma + l -> gamma + l`.
//!
//! Two diagrams on one fermion line (s- and u-channel). Tensor legs:
//! `[l_in, l_out, gamma_in, gamma_out]`. The cross section is `d(sigma)/d(Omega)`
//! of the outgoing photon in ub/sr.

use num_complex::Complex64;
use qedxs_core::config::PhysicsConstants;
use qedxs_core::particle::{Lepton, Particle, Photon};

use super::{slashed, u_pair};
use crate::propagator::{fermion_propagator, TwoVertexLine};
use crate::tensor::{AmplitudeTensor, Amplitudes, LegWeight};

/// Helicity amplitudes and leg weights.
pub fn amplitudes(g_in: &Photon, e_in: &Lepton, g_out: &Photon, e_out: &Lepton) -> Amplitudes {
    let (p_in, k_in, k_out) = (e_in.momentum(), g_in.momentum(), g_out.momentum());
    let mass = e_in.mass();
    let u_in = u_pair(e_in);
    let u_out = u_pair(e_out);

    let line = TwoVertexLine::new(
        fermion_propagator(&(p_in + k_in), &p_in, mass),
        fermion_propagator(&(p_in - k_out), &p_in, mass),
    );
    let eps_in = slashed(g_in.polarizations());
    let eps_out = slashed(g_out.conj_polarizations());
    let currents: [[_; 2]; 2] = std::array::from_fn(|gi| {
        std::array::from_fn(|gf| line.current(&eps_in[gi], &eps_out[gf]))
    });

    let tensor = AmplitudeTensor::from_fn(4, |h| {
        u_out[h[1]].sandwich_with(&currents[h[2]][h[3]], &u_in[h[0]])
    });
    Amplitudes {
        tensor,
        weights: vec![
            LegWeight::prepared(e_in),
            LegWeight::detected(e_out),
            LegWeight::prepared(g_in),
            LegWeight::detected(g_out),
        ],
    }
}

/// Polarization-weighted `|M|^2`, with the couplings stripped.
pub fn squared_amplitude(
    g_in: &Photon,
    e_in: &Lepton,
    g_out: &Photon,
    e_out: &Lepton,
) -> Complex64 {
    amplitudes(g_in, e_in, g_out, e_out).polarized_sum()
}

/// Flux, final-state density, coupling and unit conversion.
pub(crate) fn kinematic_factor(
    constants: &PhysicsConstants,
    g_in: &Photon,
    e_in: &Lepton,
    g_out: &Photon,
    e_out: &Lepton,
) -> f64 {
    let (p_in, k_in) = (e_in.momentum(), g_in.momentum());
    let (p_out, k_out) = (e_out.momentum(), g_out.momentum());
    let flux = 4.0 * k_in[0] * (p_in.length() + p_in[0]);
    let rho = k_out[0].powi(2) / p_out.scalar_prod(&k_out) / 4.0;
    constants.hbarc_sqr * constants.alpha.powi(2) * 4.0 * rho / flux
}

/// Unpolarized Klein-Nishina cross section for a lepton at rest, in ub/sr.
///
/// The scattering angle is taken from the outgoing photon direction relative
/// to the z axis, which must be the incident photon direction.
pub fn klein_nishina(
    constants: &PhysicsConstants,
    g_in: &Photon,
    g_out: &Photon,
    mass: f64,
) -> f64 {
    let (k_in, k_out) = (g_in.momentum(), g_out.momentum());
    let ratio = k_out[0] / k_in[0];
    let sin_sqr_theta = 1.0 - (k_out[3] / k_out[0]).powi(2);
    constants.hbarc_sqr * (constants.alpha / mass).powi(2) / 2.0
        * ratio.powi(2)
        * (ratio + 1.0 / ratio - sin_sqr_theta)
}
