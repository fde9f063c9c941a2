//! Bethe-Heitler pair production on a free nucleon, `gamma + N -> e+ e- N`.
//!
//! Same topologies as triplet production, with the electron target replaced
//! by a nucleon carrying Dirac and Pauli form factors. There are no identical
//! particles, so no exchange diagrams.
//!
//! Tensor legs: `[N_in, e+_out, e-_out, N_out, gamma_in]`. The result is
//! `d(sigma)/(dE+ dphi+ d^3q)` in ub/GeV^4/r.

use std::f64::consts::PI;

use num_complex::Complex64;
use qedxs_core::config::PhysicsConstants;
use qedxs_core::dirac::DiracMatrix;
use qedxs_core::particle::{Lepton, Particle, Photon};
use qedxs_core::vector::FourMomentum;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{gammas, slashed, two_pi_pow, u_pair, v_pair};
use crate::propagator::{
    fermion_propagator, metric, photon_propagator, NucleonVertex, TwoVertexLine,
};
use crate::tensor::{AmplitudeTensor, Amplitudes, LegWeight};

/// Elastic nucleon form factors, evaluated by the caller at the momentum
/// transfers of the supplied kinematics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormFactors {
    /// Dirac form factor at the spacelike transfer `N_out - N_in`.
    pub f1_spacelike: f64,
    /// Pauli form factor at the spacelike transfer.
    pub f2_spacelike: f64,
    /// Dirac form factor at the timelike transfer `e+ + e-`.
    pub f1_timelike: f64,
    /// Pauli form factor at the timelike transfer.
    pub f2_timelike: f64,
}

impl Default for FormFactors {
    fn default() -> Self {
        Self::pointlike()
    }
}

impl FormFactors {
    /// Point-like Dirac particle: `F1 = 1`, `F2 = 0`.
    pub fn pointlike() -> Self {
        Self {
            f1_spacelike: 1.0,
            f2_spacelike: 0.0,
            f1_timelike: 1.0,
            f2_timelike: 0.0,
        }
    }

    /// Static values, the same in both regions (real photon limit).
    pub fn fixed(f1: f64, f2: f64) -> Self {
        Self {
            f1_spacelike: f1,
            f2_spacelike: f2,
            f1_timelike: f1,
            f2_timelike: f2,
        }
    }
}

/// Helicity amplitudes and leg weights.
pub fn amplitudes(
    g_in: &Photon,
    n_in: &Lepton,
    p_out: &Lepton,
    e_out: &Lepton,
    n_out: &Lepton,
    form_factors: &FormFactors,
) -> Amplitudes {
    let photon = slashed(g_in.polarizations());
    let legs = [n_in, p_out, e_out, n_out];
    Amplitudes {
        tensor: tensor(&g_in.momentum(), legs, form_factors, &photon),
        weights: vec![
            LegWeight::prepared(n_in),
            LegWeight::prepared(p_out),
            LegWeight::detected(e_out),
            LegWeight::detected(n_out),
            LegWeight::prepared(g_in),
        ],
    }
}

/// Tensor for a photon of momentum `k` whose vertex is `photon[i]` for index
/// `i`. Legs: `[N_in, e+_out, e-_out, N_out]`.
fn tensor(
    k: &FourMomentum,
    legs: [&Lepton; 4],
    form_factors: &FormFactors,
    photon: &[DiracMatrix; 2],
) -> AmplitudeTensor {
    let [n_in, p_out, e_out, n_out] = legs;
    let k = *k;
    let (n0, n3) = (n_in.momentum(), n_out.momentum());
    let (e1, e2) = (p_out.momentum(), e_out.momentum());
    let nucleon_mass = n_in.mass();

    let u0 = u_pair(n_in);
    let v1 = v_pair(p_out);
    let u2 = u_pair(e_out);
    let u3 = u_pair(n_out);

    let gamma = gammas();
    let eps = photon;

    // Compton-like: photon absorbed on the nucleon, pair from the virtual photon.
    let nucleon_line = TwoVertexLine::new(
        fermion_propagator(&(k + n0), &n0, nucleon_mass),
        fermion_propagator(&(n3 - k), &n3, nucleon_mass),
    );
    let timelike = NucleonVertex::new(
        form_factors.f1_timelike,
        form_factors.f2_timelike,
        nucleon_mass,
        &(e1 + e2),
    );
    let gprop_cd = photon_propagator(&(e1 + e2));

    // Gamma decay: photon splits into the pair, which scatters off the nucleon.
    let lepton_line = TwoVertexLine::new(
        fermion_propagator(&(k - e1), &e1, p_out.mass()),
        fermion_propagator(&(e2 - k), &e2, e_out.mass()),
    );
    let spacelike = NucleonVertex::new(
        form_factors.f1_spacelike,
        form_factors.f2_spacelike,
        nucleon_mass,
        &(n3 - n0),
    );
    let gprop_gd = photon_propagator(&(n0 - n3));

    let currents: [[(DiracMatrix, DiracMatrix); 2]; 4] = std::array::from_fn(|mu| {
        std::array::from_fn(|gi| {
            (
                nucleon_line.current(&eps[gi], timelike.current(mu)) * gprop_cd,
                lepton_line.current(&eps[gi], &gamma[mu]) * gprop_gd,
            )
        })
    });

    AmplitudeTensor::from_fn(5, |h| {
        let (nucleon, anti, electron, recoil) = (&u0[h[0]], &v1[h[1]], &u2[h[2]], &u3[h[3]]);
        (0..4)
            .map(|mu| {
                let (cd, gd) = &currents[mu][h[4]];
                let compton = electron.sandwich_with(&gamma[mu], anti)
                    * recoil.sandwich_with(cd, nucleon);
                let decay = recoil.sandwich_with(spacelike.current(mu), nucleon)
                    * electron.sandwich_with(gd, anti);
                (compton + decay) * metric(mu)
            })
            .sum::<Complex64>()
    })
}

/// Polarization-weighted `|M|^2`, with the couplings stripped.
pub fn squared_amplitude(
    g_in: &Photon,
    n_in: &Lepton,
    p_out: &Lepton,
    e_out: &Lepton,
    n_out: &Lepton,
    form_factors: &FormFactors,
) -> Complex64 {
    amplitudes(g_in, n_in, p_out, e_out, n_out, form_factors).polarized_sum()
}

pub(crate) fn kinematic_factor(
    constants: &PhysicsConstants,
    g_in: &Photon,
    n_in: &Lepton,
    p_out: &Lepton,
    e_out: &Lepton,
    n_out: &Lepton,
) -> f64 {
    let k = g_in.momentum();
    let n0 = n_in.momentum();
    let flux = 4.0 * k[0] * (n0.length() + n0[0]);
    let pair = p_out.momentum() + e_out.momentum();
    let rho = 1.0 / (8.0 * n_out.momentum()[0] * pair.length());
    let pi_factor = two_pi_pow(4 - 9) * (4.0 * PI).powi(3);
    constants.hbarc_sqr * constants.alpha.powi(3) / flux * rho * pi_factor
}
