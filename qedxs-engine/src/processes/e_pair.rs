//! Electro-production of a lepton pair in a static Coulomb field,
//! `e + A -> e + l+ l- + A`.
//!
//! The nucleus couples through `gamma^0` only. Two topologies: the pair comes
//! from the virtual photon radiated by the electron (with the Coulomb vertex on
//! the pair line), or the electron absorbs the Coulomb photon and the pair
//! comes from a timelike photon. When `l-` is the same species as the
//! scattered electron, both topologies appear again with the two swapped.
//!
//! Tensor legs: `[e_in, e_out, l+_out, l-_out]`. The result is differential
//! in the scattered electron, the `l+` and the recoil, in ub/GeV^7/r, without
//! the target form factor.

use num_complex::Complex64;
use qedxs_core::config::PhysicsConstants;
use qedxs_core::dirac::{DiracMatrix, DiracSpinor};
use qedxs_core::particle::{Lepton, Particle};

use super::{gammas, identical, two_pi_pow, u_pair, v_pair};
use crate::propagator::{fermion_propagator, metric, photon_propagator, TwoVertexLine};
use crate::tensor::{AmplitudeTensor, Amplitudes, LegWeight};

/// One assignment of the outgoing negative leptons: `scattered` stays on the
/// beam line, `pair` closes the line with `l+`.
#[derive(Debug, Clone, Copy)]
struct Assignment {
    scattered: usize,
    pair: usize,
    sign: f64,
}

const ASSIGNMENTS: [Assignment; 2] = [
    Assignment {
        scattered: 1,
        pair: 3,
        sign: 1.0,
    },
    Assignment {
        scattered: 3,
        pair: 1,
        sign: -1.0,
    },
];

/// Per-assignment vertex matrices: `[mu]` for the emission topology (on the
/// pair line) and for the timelike topology (on the beam line).
struct Currents {
    assignment: Assignment,
    emission: [DiracMatrix; 4],
    timelike: [DiracMatrix; 4],
}

impl Currents {
    /// Legs in tensor order: `[e_in, e_out, l+_out, l-_out]`.
    fn new(legs: [&Lepton; 4], assignment: Assignment) -> Self {
        let [e_in, _, lp_out, _] = legs;
        let scattered = legs[assignment.scattered];
        let pair = legs[assignment.pair];
        let gamma = gammas();
        let coulomb = DiracMatrix::gamma(0);
        let (p_in, p_lp) = (e_in.momentum(), lp_out.momentum());
        let (p_s, p_pair) = (scattered.momentum(), pair.momentum());

        let q_e = p_in - p_s;
        let emission_line = TwoVertexLine::new(
            fermion_propagator(&(q_e - p_lp), &p_lp, lp_out.mass()),
            fermion_propagator(&(p_pair - q_e), &p_pair, pair.mass()),
        );
        let gprop_e = photon_propagator(&q_e);

        let q_p = p_pair + p_lp;
        let timelike_line = TwoVertexLine::new(
            fermion_propagator(&(p_s + q_p), &p_s, scattered.mass()),
            fermion_propagator(&(p_in - q_p), &p_in, e_in.mass()),
        );
        let gprop_p = photon_propagator(&q_p);

        Self {
            assignment,
            emission: std::array::from_fn(|mu| {
                emission_line.current(&gamma[mu], &coulomb) * gprop_e
            }),
            timelike: std::array::from_fn(|mu| {
                timelike_line.current(&coulomb, &gamma[mu]) * gprop_p
            }),
        }
    }
}

/// Helicity amplitudes and leg weights.
pub fn amplitudes(e_in: &Lepton, e_out: &Lepton, lp_out: &Lepton, ln_out: &Lepton) -> Amplitudes {
    let legs = [e_in, e_out, lp_out, ln_out];
    let u_in = u_pair(e_in);
    let v_lp = v_pair(lp_out);
    let u_out: [[DiracSpinor; 2]; 4] = legs.map(u_pair);
    let gamma = gammas();

    let assignments = if identical(e_out, ln_out) {
        &ASSIGNMENTS[..]
    } else {
        &ASSIGNMENTS[..1]
    };
    let active: Vec<Currents> = assignments
        .iter()
        .map(|assignment| Currents::new(legs, *assignment))
        .collect();

    let tensor = AmplitudeTensor::from_fn(4, |h| {
        let (beam, anti) = (&u_in[h[0]], &v_lp[h[2]]);
        let mut total = Complex64::new(0.0, 0.0);
        for currents in &active {
            let Assignment {
                scattered,
                pair,
                sign,
            } = currents.assignment;
            let u_s = &u_out[scattered][h[scattered]];
            let u_l = &u_out[pair][h[pair]];
            for mu in 0..4 {
                let emission = u_s.sandwich_with(&gamma[mu], beam)
                    * u_l.sandwich_with(&currents.emission[mu], anti);
                let timelike = u_l.sandwich_with(&gamma[mu], anti)
                    * u_s.sandwich_with(&currents.timelike[mu], beam);
                total += (emission + timelike) * (sign * metric(mu));
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
        ],
    }
}

/// Polarization-weighted `|M|^2`, with the couplings stripped.
pub fn squared_amplitude(
    e_in: &Lepton,
    e_out: &Lepton,
    lp_out: &Lepton,
    ln_out: &Lepton,
) -> Complex64 {
    amplitudes(e_in, e_out, lp_out, ln_out).polarized_sum()
}

/// Includes the Coulomb propagator of the target, `1 / (q^2)^2` for the
/// recoil `q = e_in - e_out - l+ - l-`.
pub(crate) fn kinematic_factor(
    constants: &PhysicsConstants,
    e_in: &Lepton,
    e_out: &Lepton,
    lp_out: &Lepton,
    ln_out: &Lepton,
) -> f64 {
    let pair = ln_out.momentum() + lp_out.momentum();
    let recoil = (e_in.momentum() - e_out.momentum()) - pair;
    let kin = two_pi_pow(-4) / (e_in.momentum()[0] * e_out.momentum()[0] * pair.length());
    constants.hbarc_sqr * constants.alpha.powi(4) * kin / recoil.invariant_sqr().powi(2)
}
