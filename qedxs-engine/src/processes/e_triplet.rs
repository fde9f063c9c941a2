//! Electro-production of a lepton pair on a free electron,
//! `e + e -> e + l+ l- + e`.
//!
//! Three fermion lines joined by two virtual photons, with the pair-producing
//! vertex pair placed on each of the three lines in turn. With three outgoing
//! negative leptons there are up to six assignments of particles to the roles
//! (scattered beam, recoil target, pair member); odd permutations carry a minus
//! sign and an assignment is only kept when every role is filled by a particle
//! of the right species.
//!
//! Tensor legs: `[e_in, e_out, l+_out, l-_out, t_in, t_out]`. Helicities stay
//! attached to particles under the permutations. The result is differential in
//! the scattered electron, the `l+` and the recoil, in ub/GeV^7/r.

use num_complex::Complex64;
use qedxs_core::config::PhysicsConstants;
use qedxs_core::dirac::{DiracMatrix, DiracSpinor};
use qedxs_core::particle::{Lepton, Particle};

use super::{gammas, identical, two_pi_pow, u_pair, v_pair};
use crate::propagator::{fermion_propagator, metric, photon_propagator, TwoVertexLine};
use crate::tensor::{AmplitudeTensor, Amplitudes, LegWeight};

/// Legs of the outgoing negative leptons filling the scattered, target and
/// pair roles.
#[derive(Debug, Clone, Copy)]
struct Permutation {
    scattered: usize,
    target: usize,
    pair: usize,
    sign: f64,
}

const PERMUTATIONS: [Permutation; 6] = [
    Permutation {
        scattered: 1,
        target: 5,
        pair: 3,
        sign: 1.0,
    },
    Permutation {
        scattered: 5,
        target: 1,
        pair: 3,
        sign: -1.0,
    },
    Permutation {
        scattered: 3,
        target: 1,
        pair: 5,
        sign: 1.0,
    },
    Permutation {
        scattered: 3,
        target: 5,
        pair: 1,
        sign: -1.0,
    },
    Permutation {
        scattered: 5,
        target: 3,
        pair: 1,
        sign: 1.0,
    },
    Permutation {
        scattered: 1,
        target: 3,
        pair: 5,
        sign: -1.0,
    },
];

type Currents = [[DiracMatrix; 4]; 4];

/// Vertex pairs for one permutation, indexed `[mu][nu]` and already divided by
/// both photon propagators.
struct Diagrams {
    permutation: Permutation,
    /// Both photons attach to the pair line.
    pair_line: Currents,
    /// Pair from a timelike photon, beam line carries the target exchange.
    beam_line: Currents,
    /// Pair from a timelike photon, target line carries the beam exchange.
    target_line: Currents,
}

fn currents(line: &TwoVertexLine, gamma: &[DiracMatrix; 4], swap: bool, scale: f64) -> Currents {
    std::array::from_fn(|mu| {
        std::array::from_fn(|nu| {
            let current = if swap {
                line.current(&gamma[nu], &gamma[mu])
            } else {
                line.current(&gamma[mu], &gamma[nu])
            };
            current * scale
        })
    })
}

impl Diagrams {
    /// Legs in tensor order: `[e_in, e_out, l+_out, l-_out, t_in, t_out]`.
    fn new(legs: [&Lepton; 6], permutation: Permutation) -> Self {
        let [e_in, _, lp_out, _, te_in, _] = legs;
        let gamma = gammas();
        let (p_in, p_lp, p_tin) = (e_in.momentum(), lp_out.momentum(), te_in.momentum());
        let scattered = legs[permutation.scattered];
        let (target, pair) = (legs[permutation.target], legs[permutation.pair]);
        let (p_s, p_t, p_l) = (scattered.momentum(), target.momentum(), pair.momentum());
        let q_e = p_in - p_s;
        let q_t = p_t - p_tin;
        let q_p = p_l + p_lp;

        let pair_line = TwoVertexLine::new(
            fermion_propagator(&(q_e - p_lp), &p_lp, lp_out.mass()),
            fermion_propagator(&(p_l - q_e), &p_l, pair.mass()),
        );
        let beam_line = TwoVertexLine::new(
            fermion_propagator(&(p_s + q_p), &p_s, scattered.mass()),
            fermion_propagator(&(p_in - q_p), &p_in, e_in.mass()),
        );
        let target_line = TwoVertexLine::new(
            fermion_propagator(&(p_tin + q_e), &p_tin, te_in.mass()),
            fermion_propagator(&(p_t - q_e), &p_t, target.mass()),
        );
        let (g_e, g_t, g_p) = (
            photon_propagator(&q_e),
            photon_propagator(&q_t),
            photon_propagator(&q_p),
        );
        Self {
            permutation,
            pair_line: currents(&pair_line, &gamma, false, g_e * g_t),
            beam_line: currents(&beam_line, &gamma, true, g_t * g_p),
            target_line: currents(&target_line, &gamma, false, g_e * g_p),
        }
    }
}

/// Helicity amplitudes and leg weights.
pub fn amplitudes(
    e_in: &Lepton,
    e_out: &Lepton,
    lp_out: &Lepton,
    ln_out: &Lepton,
    te_in: &Lepton,
    te_out: &Lepton,
) -> Amplitudes {
    let legs = [e_in, e_out, lp_out, ln_out, te_in, te_out];
    let spinors: [[DiracSpinor; 2]; 6] = legs.map(u_pair);
    let v_lp = v_pair(lp_out);
    let gamma = gammas();

    let active: Vec<Diagrams> = PERMUTATIONS
        .iter()
        .filter(|perm| {
            identical(legs[perm.scattered], e_out)
                && identical(legs[perm.target], te_out)
                && identical(legs[perm.pair], ln_out)
        })
        .map(|perm| Diagrams::new(legs, *perm))
        .collect();

    let tensor = AmplitudeTensor::from_fn(6, |h| {
        let (beam, anti, target_in) = (&spinors[0][h[0]], &v_lp[h[2]], &spinors[4][h[4]]);
        let mut total = Complex64::new(0.0, 0.0);
        for diagrams in &active {
            let Permutation {
                scattered,
                target,
                pair,
                sign,
            } = diagrams.permutation;
            let (u_s, u_t, u_l) = (
                &spinors[scattered][h[scattered]],
                &spinors[target][h[target]],
                &spinors[pair][h[pair]],
            );
            let j_beam: [Complex64; 4] =
                std::array::from_fn(|mu| u_s.sandwich_with(&gamma[mu], beam));
            let j_target: [Complex64; 4] =
                std::array::from_fn(|mu| u_t.sandwich_with(&gamma[mu], target_in));
            let j_pair: [Complex64; 4] =
                std::array::from_fn(|mu| u_l.sandwich_with(&gamma[mu], anti));
            for mu in 0..4 {
                for nu in 0..4 {
                    let on_pair = j_beam[mu]
                        * j_target[nu]
                        * u_l.sandwich_with(&diagrams.pair_line[mu][nu], anti);
                    let on_beam = j_pair[mu]
                        * j_target[nu]
                        * u_s.sandwich_with(&diagrams.beam_line[mu][nu], beam);
                    let on_target = j_beam[mu]
                        * j_pair[nu]
                        * u_t.sandwich_with(&diagrams.target_line[mu][nu], target_in);
                    total += (on_pair + on_beam + on_target) * (sign * metric(mu) * metric(nu));
                }
            }
        }
        total
    });
    Amplitudes {
        tensor,
        weights: vec![
            LegWeight::prepared(e_in),
            LegWeight::detected(e_out),
            LegWeight::prepared(lp_out),
            LegWeight::detected(ln_out),
            LegWeight::prepared(te_in),
            LegWeight::detected(te_out),
        ],
    }
}

/// Polarization-weighted `|M|^2`, with the couplings stripped.
pub fn squared_amplitude(
    e_in: &Lepton,
    e_out: &Lepton,
    lp_out: &Lepton,
    ln_out: &Lepton,
    te_in: &Lepton,
    te_out: &Lepton,
) -> Complex64 {
    amplitudes(e_in, e_out, lp_out, ln_out, te_in, te_out).polarized_sum()
}

/// The target is normalised to its rest mass, so the flux assumes it starts
/// at rest.
pub(crate) fn kinematic_factor(
    constants: &PhysicsConstants,
    e_in: &Lepton,
    e_out: &Lepton,
    lp_out: &Lepton,
    ln_out: &Lepton,
    te_in: &Lepton,
    te_out: &Lepton,
) -> f64 {
    let pair = ln_out.momentum() + lp_out.momentum();
    let kin = two_pi_pow(-4)
        / (4.0 * te_in.mass() * te_out.momentum()[0])
        / (e_in.momentum()[0] * e_out.momentum()[0] * pair.length());
    constants.hbarc_sqr * constants.alpha.powi(4) * kin
}

#[cfg(test)]
mod tests {
    use super::*;
    use qedxs_core::vector::{FourMomentum, ThreeVector};

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

    /// `q_mu` times the first index of `currents[mu][nu]`.
    fn contract(currents: &Currents, q: &FourMomentum, nu: usize) -> DiracMatrix {
        (0..4).fold(DiracMatrix::zero(), |acc, mu| {
            acc + currents[mu][nu] * (metric(mu) * q[mu])
        })
    }

    fn assert_conserved(
        currents: &Currents,
        q: &FourMomentum,
        bra: &Lepton,
        kets: &[DiracSpinor; 2],
    ) {
        for nu in 0..4 {
            let contracted = contract(currents, q, nu);
            let limit = 1e-9 * largest_entry(&contracted);
            for ket in kets {
                for u in &u_pair(bra) {
                    let ward = u.sandwich_with(&contracted, ket);
                    assert!(ward.norm() < limit, "nu={nu}: {ward}");
                }
            }
        }
    }

    #[test]
    fn test_photon_vertices_are_conserved() {
        let legs = [
            lepton(0.5, 0.0, 0.0),
            lepton(0.2, 0.4, 0.3),
            lepton(0.1, 0.9, -1.2),
            lepton(0.08, 1.3, 2.0),
            Lepton::on_shell(MASS, ThreeVector::default()),
            lepton(0.1, 1.7, -0.4),
        ];
        let refs = [&legs[0], &legs[1], &legs[2], &legs[3], &legs[4], &legs[5]];
        let [e_in, _, lp_out, _, te_in, _] = refs;
        for permutation in PERMUTATIONS {
            let diagrams = Diagrams::new(refs, permutation);
            let scattered = refs[permutation.scattered];
            let (target, pair) = (refs[permutation.target], refs[permutation.pair]);
            let q_e = e_in.momentum() - scattered.momentum();
            let q_p = pair.momentum() + lp_out.momentum();

            assert_conserved(&diagrams.pair_line, &q_e, pair, &v_pair(lp_out));
            assert_conserved(&diagrams.beam_line, &q_p, scattered, &u_pair(e_in));
            assert_conserved(&diagrams.target_line, &q_e, target, &u_pair(te_in));
        }
    }
}
