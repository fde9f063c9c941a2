//! Triplet production on a free electron, `gamma + e -> l+ l- e`.
//!
//! Eight diagrams in four pairs. In the Compton-Dalitz (CD) pairs the photon
//! is absorbed on the line of the target electron, which then radiates the
//! virtual photon that splits into the pair. In the gamma-decay (GD) pairs the
//! photon splits into the pair directly and one pair member scatters off the
//! target. Each kind appears once more with the two outgoing electrons
//! exchanged; those copies carry a minus sign and are only present when both
//! outgoing negative leptons are the same species.
//!
//! Tensor legs: `[e_in, l+_out, e_out2, e_out3, gamma_in]`. The result is
//! `d(sigma)/(dE+ dphi+ d^3q)` in ub/GeV^4/r.

use std::f64::consts::PI;

use num_complex::Complex64;
use qedxs_core::config::PhysicsConstants;
use qedxs_core::dirac::{DiracMatrix, DiracSpinor};
use qedxs_core::particle::{Lepton, Particle, Photon};

use super::{gammas, identical, slashed, two_pi_pow, u_pair, v_pair};
use crate::propagator::{fermion_propagator, metric, photon_propagator, TwoVertexLine};
use crate::tensor::{AmplitudeTensor, Amplitudes, LegWeight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topology {
    ComptonDalitz,
    GammaDecay,
}

/// One diagram pair: which outgoing electron sits on the line carrying the
/// real photon (`radiating`), which one sits on the other line, and the sign.
#[derive(Debug, Clone, Copy)]
struct Diagram {
    topology: Topology,
    radiating: usize,
    other: usize,
    sign: f64,
    exchange: bool,
}

const DIAGRAMS: [Diagram; 4] = [
    Diagram {
        topology: Topology::ComptonDalitz,
        radiating: 2,
        other: 3,
        sign: 1.0,
        exchange: false,
    },
    Diagram {
        topology: Topology::ComptonDalitz,
        radiating: 3,
        other: 2,
        sign: -1.0,
        exchange: true,
    },
    Diagram {
        topology: Topology::GammaDecay,
        radiating: 3,
        other: 2,
        sign: 1.0,
        exchange: false,
    },
    Diagram {
        topology: Topology::GammaDecay,
        radiating: 2,
        other: 3,
        sign: -1.0,
        exchange: true,
    },
];

/// Helicity amplitudes and leg weights.
pub fn amplitudes(
    g_in: &Photon,
    e_in: &Lepton,
    p_out: &Lepton,
    e_out2: &Lepton,
    e_out3: &Lepton,
) -> Amplitudes {
    let k = g_in.momentum();
    let e0 = e_in.momentum();
    let e1 = p_out.momentum();
    let outgoing = [e_out2, e_out3];

    let u0 = u_pair(e_in);
    let v1 = v_pair(p_out);
    let u_out: [[DiracSpinor; 2]; 2] = outgoing.map(u_pair);

    let gamma = gammas();
    let eps = slashed(g_in.polarizations());
    let with_exchange = identical(e_out2, e_out3);

    // currents[d][mu][gi], already divided by the virtual photon's q^2
    let mut active = Vec::with_capacity(DIAGRAMS.len());
    for diagram in DIAGRAMS.iter().filter(|d| with_exchange || !d.exchange) {
        let radiating = outgoing[diagram.radiating - 2];
        let other = outgoing[diagram.other - 2].momentum();
        let pj = radiating.momentum();
        let (direct, virtual_q) = match diagram.topology {
            Topology::ComptonDalitz => (
                fermion_propagator(&(k + e0), &e0, e_in.mass()),
                e1 + other,
            ),
            Topology::GammaDecay => (
                fermion_propagator(&(k - e1), &e1, p_out.mass()),
                e0 - other,
            ),
        };
        let crossed = fermion_propagator(&(pj - k), &pj, radiating.mass());
        let line = TwoVertexLine::new(direct, crossed);
        let gprop = photon_propagator(&virtual_q);
        let currents: [[DiracMatrix; 2]; 4] = std::array::from_fn(|mu| {
            std::array::from_fn(|gi| line.current(&eps[gi], &gamma[mu]) * gprop)
        });
        active.push((*diagram, currents));
    }

    let tensor = AmplitudeTensor::from_fn(5, |h| {
        let (in_spinor, anti) = (&u0[h[0]], &v1[h[1]]);
        let mut total = Complex64::new(0.0, 0.0);
        for (diagram, currents) in &active {
            let uj = &u_out[diagram.radiating - 2][h[diagram.radiating]];
            let uk = &u_out[diagram.other - 2][h[diagram.other]];
            for mu in 0..4 {
                let current = &currents[mu][h[4]];
                let term = match diagram.topology {
                    Topology::ComptonDalitz => {
                        uk.sandwich_with(&gamma[mu], anti) * uj.sandwich_with(current, in_spinor)
                    }
                    Topology::GammaDecay => {
                        uk.sandwich_with(&gamma[mu], in_spinor) * uj.sandwich_with(current, anti)
                    }
                };
                total += term * (diagram.sign * metric(mu));
            }
        }
        total
    });
    Amplitudes {
        tensor,
        weights: vec![
            LegWeight::prepared(e_in),
            LegWeight::prepared(p_out),
            LegWeight::detected(e_out2),
            LegWeight::detected(e_out3),
            LegWeight::prepared(g_in),
        ],
    }
}

/// Polarization-weighted `|M|^2`, with the couplings stripped.
pub fn squared_amplitude(
    g_in: &Photon,
    e_in: &Lepton,
    p_out: &Lepton,
    e_out2: &Lepton,
    e_out3: &Lepton,
) -> Complex64 {
    amplitudes(g_in, e_in, p_out, e_out2, e_out3).polarized_sum()
}

/// Flux `4 k (|p0| + E0)`, final-state density with the `l+` solid angle
/// measured about `l+ + e_out2`, and three powers of `4 pi` absorbed into
/// `alpha^3`.
///
/// The squared amplitude is symmetric under `e_out2 <-> e_out3`, this factor
/// is not: swapping the electrons moves the solid-angle axis.
pub(crate) fn kinematic_factor(
    constants: &PhysicsConstants,
    g_in: &Photon,
    e_in: &Lepton,
    p_out: &Lepton,
    e_out2: &Lepton,
    e_out3: &Lepton,
) -> f64 {
    let k = g_in.momentum();
    let p0 = e_in.momentum();
    let flux = 4.0 * k[0] * (p0.length() + p0[0]);
    let pair = p_out.momentum() + e_out2.momentum();
    let rho = 1.0 / (8.0 * e_out3.momentum()[0] * pair.length());
    let pi_factor = two_pi_pow(4 - 9) * (4.0 * PI).powi(3);
    constants.hbarc_sqr * constants.alpha.powi(3) / flux * rho * pi_factor
}
