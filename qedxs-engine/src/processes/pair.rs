//! Pair production in a static Coulomb field, `gamma + A -> l- l+ + A`.
//!
//! Tensor legs: `[l+_out, l-_out, gamma_in]`. The antilepton's `v` spinor
//! enters as the ket of the chain, so its weight uses the preparation order.
//!
//! The result is `d(sigma)/(dE dphi d^3q)` in ub/GeV^4/r for the recoil
//! `q = gamma - l- - l+`, without the target form factor.

use num_complex::Complex64;
use qedxs_core::config::PhysicsConstants;
use qedxs_core::dirac::DiracMatrix;
use qedxs_core::particle::{Lepton, Particle, Photon};
use qedxs_core::vector::FourMomentum;

use super::{slashed, two_pi_pow, u_pair, v_pair};
use crate::propagator::{fermion_propagator, TwoVertexLine};
use crate::tensor::{AmplitudeTensor, Amplitudes, LegWeight};

/// Pair line between the Coulomb vertex and the photon vertex passed to the
/// returned closure, for an absorbed photon of momentum `k_in`.
pub(crate) fn current(
    k_in: &FourMomentum,
    e_out: &Lepton,
    p_out: &Lepton,
) -> impl Fn(&DiracMatrix) -> DiracMatrix {
    let (k, pe, pp) = (*k_in, e_out.momentum(), p_out.momentum());
    let line = TwoVertexLine::new(
        fermion_propagator(&(pe - k), &pe, e_out.mass()),
        fermion_propagator(&(k - pp), &pp, p_out.mass()),
    );
    let coulomb = DiracMatrix::gamma(0);
    move |photon| line.current(&coulomb, photon)
}

/// Helicity amplitudes and leg weights.
pub fn amplitudes(g_in: &Photon, e_out: &Lepton, p_out: &Lepton) -> Amplitudes {
    let u_e = u_pair(e_out);
    let v_p = v_pair(p_out);
    let current = current(&g_in.momentum(), e_out, p_out);
    let currents = slashed(g_in.polarizations()).map(|eps| current(&eps));

    let tensor = AmplitudeTensor::from_fn(3, |h| {
        u_e[h[1]].sandwich_with(&currents[h[2]], &v_p[h[0]])
    });
    Amplitudes {
        tensor,
        weights: vec![
            LegWeight::prepared(p_out),
            LegWeight::detected(e_out),
            LegWeight::prepared(g_in),
        ],
    }
}

/// Polarization-weighted `|M|^2`, with the couplings stripped.
pub fn squared_amplitude(g_in: &Photon, e_out: &Lepton, p_out: &Lepton) -> Complex64 {
    amplitudes(g_in, e_out, p_out).polarized_sum()
}

/// The lepton solid angle is measured about the pair momentum axis.
pub(crate) fn kinematic_factor(
    constants: &PhysicsConstants,
    g_in: &Photon,
    e_out: &Lepton,
    p_out: &Lepton,
) -> f64 {
    let k = g_in.momentum();
    let recoil = k - e_out.momentum() - p_out.momentum();
    let kin = 1.0 / (two_pi_pow(1) * k[0]).powi(2);
    constants.hbarc_sqr * constants.alpha.powi(3) * kin / recoil.invariant_sqr().powi(2)
}
