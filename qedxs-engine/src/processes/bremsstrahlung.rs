//! Bremsstrahlung off a static Coulomb field, `l + A -> l + gamma + A`.
//!
//! The recoil `q = l_in - l_out - gamma` couples to the target through
//! `gamma^0` only. Tensor legs: `[l_in, l_out, gamma_out]`.
//!
//! The result is `d(sigma)/(dk dphi d^3q)` in ub/GeV^4/r, without the
//! target form factor, which belongs to the caller's integral over `q`.

use num_complex::Complex64;
use qedxs_core::config::PhysicsConstants;
use qedxs_core::dirac::DiracMatrix;
use qedxs_core::particle::{Lepton, Particle, Photon};
use qedxs_core::vector::FourMomentum;

use super::{slashed, two_pi_pow, u_pair};
use crate::propagator::{fermion_propagator, TwoVertexLine};
use crate::tensor::{AmplitudeTensor, Amplitudes, LegWeight};

/// Lepton line between the Coulomb vertex and the photon vertex passed to the
/// returned closure, for an emitted photon of momentum `k_out`.
pub(crate) fn current(
    e_in: &Lepton,
    e_out: &Lepton,
    k_out: &FourMomentum,
) -> impl Fn(&DiracMatrix) -> DiracMatrix {
    let (p_in, p_out) = (e_in.momentum(), e_out.momentum());
    let recoil = p_in - p_out - *k_out;
    let line = TwoVertexLine::new(
        fermion_propagator(&(p_in - recoil), &p_in, e_in.mass()),
        fermion_propagator(&(p_out + recoil), &p_out, e_out.mass()),
    );
    let coulomb = DiracMatrix::gamma(0);
    move |photon| line.current(&coulomb, photon)
}

/// Helicity amplitudes and leg weights.
pub fn amplitudes(e_in: &Lepton, e_out: &Lepton, g_out: &Photon) -> Amplitudes {
    let u_in = u_pair(e_in);
    let u_out = u_pair(e_out);
    let current = current(e_in, e_out, &g_out.momentum());
    let currents = slashed(g_out.conj_polarizations()).map(|eps| current(&eps));

    let tensor = AmplitudeTensor::from_fn(3, |h| {
        u_out[h[1]].sandwich_with(&currents[h[2]], &u_in[h[0]])
    });
    Amplitudes {
        tensor,
        weights: vec![
            LegWeight::prepared(e_in),
            LegWeight::detected(e_out),
            LegWeight::detected(g_out),
        ],
    }
}

/// Polarization-weighted `|M|^2`, with the couplings stripped.
pub fn squared_amplitude(e_in: &Lepton, e_out: &Lepton, g_out: &Photon) -> Complex64 {
    amplitudes(e_in, e_out, g_out).polarized_sum()
}

/// The photon solid angle is measured about the final lepton plus photon
/// direction, and `|q| << E` is assumed for the flux.
pub(crate) fn kinematic_factor(
    constants: &PhysicsConstants,
    e_in: &Lepton,
    e_out: &Lepton,
    g_out: &Photon,
) -> f64 {
    let p_in = e_in.momentum();
    let recoil = p_in - e_out.momentum() - g_out.momentum();
    let kin = 1.0 / (two_pi_pow(1) * p_in[0]).powi(2);
    constants.hbarc_sqr * constants.alpha.powi(3) * kin / recoil.invariant_sqr().powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qedxs_core::vector::ThreeVector;

    const MASS: f64 = 0.000_511;

    fn lepton(p: f64, theta: f64, phi: f64) -> Lepton {
        Lepton::on_shell(MASS, ThreeVector::from_polar(p, theta, phi))
    }

    fn largest_entry(m: &DiracMatrix) -> f64 {
        (0..4)
            .flat_map(|i| (0..4).map(move |j| (i, j)))
            .map(|ij| m[ij].norm())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_photon_vertex_is_gauge_invariant() {
        // slash(k) in place of the polarization cancels between the two orderings
        let e_in = lepton(1.2, 0.0, 0.0);
        let e_out = lepton(0.7, 0.15, 0.4);
        let k = FourMomentum::from_mass_and_momentum(0.0, ThreeVector::from_polar(0.45, 0.1, -1.1));
        let current = current(&e_in, &e_out, &k);
        let gauge = current(&DiracMatrix::slash(&k));
        let transverse = current(&DiracMatrix::gamma(2));
        let limit = 1e-10 * largest_entry(&gauge);

        let mut physical = 0.0;
        for a in &u_pair(&e_in) {
            for b in &u_pair(&e_out) {
                let ward = b.sandwich_with(&gauge, a);
                assert!(ward.norm() < limit, "{ward}");
                physical += b.sandwich_with(&transverse, a).norm();
            }
        }
        assert!(physical > 1e3 * limit);
    }
}
