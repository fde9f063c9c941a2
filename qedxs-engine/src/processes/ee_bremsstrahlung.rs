//! Electron-electron bremsstrahlung, `e + e -> e + e + gamma`.
//!
//! Eight diagrams in four pairs: the photon is radiated (before or after the
//! exchange) from the line of either incoming electron, and each of those
//! appears again with the two outgoing electrons swapped. Swapped pairs carry
//! a minus sign and need identical outgoing species.
//!
//! Tensor legs: `[e_in0, e_in1, e_out2, e_out3, gamma_out]`. The result is
//! `d(sigma)/(dk dphi d^3q)` in ub/GeV^4/r.

use num_complex::Complex64;
use qedxs_core::config::PhysicsConstants;
use qedxs_core::dirac::DiracMatrix;
use qedxs_core::particle::{Lepton, Particle, Photon};

use super::{gammas, identical, slashed, two_pi_pow, u_pair};
use crate::propagator::{fermion_propagator, metric, photon_propagator, TwoVertexLine};
use crate::tensor::{AmplitudeTensor, Amplitudes, LegWeight};

/// Which incoming/outgoing legs form the radiating line and the spectator line.
#[derive(Debug, Clone, Copy)]
struct Diagram {
    radiator: (usize, usize),
    spectator: (usize, usize),
    sign: f64,
}

const DIAGRAMS: [Diagram; 4] = [
    Diagram {
        radiator: (0, 2),
        spectator: (1, 3),
        sign: 1.0,
    },
    Diagram {
        radiator: (1, 3),
        spectator: (0, 2),
        sign: 1.0,
    },
    Diagram {
        radiator: (0, 3),
        spectator: (1, 2),
        sign: -1.0,
    },
    Diagram {
        radiator: (1, 2),
        spectator: (0, 3),
        sign: -1.0,
    },
];

/// Helicity amplitudes and leg weights.
pub fn amplitudes(
    e_in0: &Lepton,
    e_in1: &Lepton,
    e_out2: &Lepton,
    e_out3: &Lepton,
    g_out: &Photon,
) -> Amplitudes {
    let legs = [e_in0, e_in1, e_out2, e_out3];
    let spinors = legs.map(u_pair);
    let k = g_out.momentum();
    let gamma = gammas();
    let eps = slashed(g_out.conj_polarizations());
    let diagrams = if identical(e_out2, e_out3) {
        &DIAGRAMS[..]
    } else {
        &DIAGRAMS[..2]
    };

    let active: Vec<(Diagram, [[DiracMatrix; 2]; 4])> = diagrams
        .iter()
        .map(|diagram| {
            let (incoming, outgoing) = (legs[diagram.radiator.0], legs[diagram.radiator.1]);
            let (p_in, p_out) = (incoming.momentum(), outgoing.momentum());
            let line = TwoVertexLine::new(
                fermion_propagator(&(p_in - k), &p_in, incoming.mass()),
                fermion_propagator(&(p_out + k), &p_out, outgoing.mass()),
            );
            let exchanged =
                legs[diagram.spectator.0].momentum() - legs[diagram.spectator.1].momentum();
            let gprop = photon_propagator(&exchanged);
            let currents = std::array::from_fn(|mu| {
                std::array::from_fn(|gf| line.current(&eps[gf], &gamma[mu]) * gprop)
            });
            (*diagram, currents)
        })
        .collect();

    let tensor = AmplitudeTensor::from_fn(5, |h| {
        let spinor = |leg: usize| &spinors[leg][h[leg]];
        let mut total = Complex64::new(0.0, 0.0);
        for (diagram, currents) in &active {
            let (r_in, r_out) = diagram.radiator;
            let (s_in, s_out) = diagram.spectator;
            for mu in 0..4 {
                let spectator = spinor(s_out).sandwich_with(&gamma[mu], spinor(s_in));
                let radiator = spinor(r_out).sandwich_with(&currents[mu][h[4]], spinor(r_in));
                total += spectator * radiator * (diagram.sign * metric(mu));
            }
        }
        total
    });
    Amplitudes {
        tensor,
        weights: vec![
            LegWeight::prepared(e_in0),
            LegWeight::prepared(e_in1),
            LegWeight::detected(e_out2),
            LegWeight::detected(e_out3),
            LegWeight::detected(g_out),
        ],
    }
}

/// Polarization-weighted `|M|^2`, with the couplings stripped.
pub fn squared_amplitude(
    e_in0: &Lepton,
    e_in1: &Lepton,
    e_out2: &Lepton,
    e_out3: &Lepton,
    g_out: &Photon,
) -> Complex64 {
    amplitudes(e_in0, e_in1, e_out2, e_out3, g_out).polarized_sum()
}

/// Flux `4 E0 E1` and final-state density with the photon solid angle measured
/// about `e_out2 + gamma`.
///
/// The squared amplitude is symmetric under `e_out2 <-> e_out3`, this factor
/// is not: swapping the electrons moves the solid-angle axis.
pub(crate) fn kinematic_factor(
    constants: &PhysicsConstants,
    e_in0: &Lepton,
    e_in1: &Lepton,
    e_out3: &Lepton,
) -> f64 {
    let kin = 1.0
        / (two_pi_pow(1) * e_in0.momentum()[0]).powi(2)
        / (4.0 * e_in1.momentum()[0] * e_out3.momentum()[0]);
    constants.hbarc_sqr * constants.alpha.powi(3) * kin
}
