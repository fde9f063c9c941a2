//! Spin-density matrices enter the squared amplitude linearly: summing over
//! pure final states reproduces the unit-matrix sum, and opposite beam
//! polarizations average to the unpolarized result.
#![allow(clippy::uninlined_format_args)]
mod common;

use approx::assert_relative_eq;
use common::{incoming, incoming_photon, outgoing, outgoing_photon, ME};
use num_complex::Complex64;
use qedxs_core::particle::SpinDensity;
use qedxs_core::vector::{FourMomentum, ThreeVector};
use qedxs_engine::processes::{bethe_heitler, bremsstrahlung, e_pair, e_triplet, pair};
use qedxs_engine::{FormFactors, Lepton, Photon};

fn on_shell(mass: f64, p: f64, theta: f64, phi: f64) -> FourMomentum {
    FourMomentum::from_mass_and_momentum(mass, ThreeVector::from_polar(p, theta, phi))
}

/// Sums `f` over every assignment of pure helicity states to `legs` final
/// legs. Each term is a detection probability and must be non-negative.
fn sum_over_pure_states(legs: usize, f: impl Fn(&[SpinDensity]) -> Complex64) -> f64 {
    (0..1usize << legs)
        .map(|bits| {
            let sdms: Vec<SpinDensity> = (0..legs)
                .map(|leg| SpinDensity::pure((bits >> leg) & 1).unwrap())
                .collect();
            let value = f(&sdms);
            assert!(value.re >= 0.0, "{:?}: {}", sdms, value);
            assert!(value.im.abs() <= 1e-12 * value.re, "{:?}: {}", sdms, value);
            value.re
        })
        .sum()
}

fn lepton(lepton: &Lepton, sdm: SpinDensity) -> Lepton {
    lepton.with_sdm(sdm)
}

fn photon(photon: &Photon, sdm: SpinDensity) -> Photon {
    photon.with_sdm(sdm)
}

fn brems_event() -> (Lepton, Lepton, Photon) {
    (
        incoming(on_shell(ME, 1.0, 0.0, 0.0), ME),
        outgoing(on_shell(ME, 0.6, 0.02, 0.5), ME),
        outgoing_photon(on_shell(0.0, 0.38, 0.01, -2.0)),
    )
}

#[test]
fn test_bremsstrahlung_final_state_sum() {
    let (e_in, e_out, g_out) = brems_event();
    let unit = bremsstrahlung::squared_amplitude(&e_in, &e_out, &g_out);
    let total = sum_over_pure_states(2, |s| {
        bremsstrahlung::squared_amplitude(&e_in, &lepton(&e_out, s[0]), &photon(&g_out, s[1]))
    });
    assert!(unit.re > 0.0);
    assert_relative_eq!(total, unit.re, max_relative = 1e-10);
}

#[test]
fn test_bremsstrahlung_beam_polarization_averages() {
    let (e_in, e_out, g_out) = brems_event();
    // Circular photon detection makes the result depend on the beam helicity
    let g_out = photon(&g_out, SpinDensity::pure(0).unwrap());
    let p = ThreeVector::new(0.3, -0.5, 0.6);
    let at = |sdm| bremsstrahlung::squared_amplitude(&lepton(&e_in, sdm), &e_out, &g_out).re;
    let plus = at(SpinDensity::from_polarization(p));
    let minus = at(SpinDensity::from_polarization(-p));
    let unpolarized = at(SpinDensity::unpolarized());
    assert!(plus >= 0.0 && minus >= 0.0);
    assert!((plus - minus).abs() > 1e-6 * unpolarized, "{} {}", plus, minus);
    assert_relative_eq!(plus + minus, 2.0 * unpolarized, max_relative = 1e-10);
}

#[test]
fn test_pair_final_state_sum() {
    let g_in = incoming_photon(on_shell(0.0, 2.0, 0.0, 0.0));
    let e_out = outgoing(on_shell(ME, 1.1, 0.01, 0.3), ME);
    let p_out = outgoing(on_shell(ME, 0.85, 0.015, 2.9), ME);
    let unit = pair::squared_amplitude(&g_in, &e_out, &p_out);
    let total = sum_over_pure_states(2, |s| {
        pair::squared_amplitude(&g_in, &lepton(&e_out, s[0]), &lepton(&p_out, s[1]))
    });
    assert!(unit.re > 0.0);
    assert_relative_eq!(total, unit.re, max_relative = 1e-10);

    // Opposite linear polarizations of the beam photon
    let p = ThreeVector::new(0.8, 0.2, 0.0);
    let at = |sdm| pair::squared_amplitude(&photon(&g_in, sdm), &e_out, &p_out).re;
    let plus = at(SpinDensity::from_polarization(p));
    let minus = at(SpinDensity::from_polarization(-p));
    assert_relative_eq!(plus + minus, 2.0 * unit.re, max_relative = 1e-10);
}

#[test]
fn test_bethe_heitler_final_state_sum_with_pauli_terms() {
    let (g_in, n_in, p_out, e_out, n_out) = common::bethe_heitler_event(1.5);
    let ff = FormFactors::fixed(0.9, 1.79);
    let unit = bethe_heitler::squared_amplitude(&g_in, &n_in, &p_out, &e_out, &n_out, &ff);
    let total = sum_over_pure_states(3, |s| {
        bethe_heitler::squared_amplitude(
            &g_in,
            &n_in,
            &lepton(&p_out, s[0]),
            &lepton(&e_out, s[1]),
            &lepton(&n_out, s[2]),
            &ff,
        )
    });
    assert!(unit.re > 0.0);
    assert_relative_eq!(total, unit.re, max_relative = 1e-10);
}

#[test]
fn test_e_pair_final_state_sum() {
    let e_in = incoming(on_shell(ME, 3.0, 0.0, 0.0), ME);
    let e_out = outgoing(on_shell(ME, 1.2, 0.03, 0.4), ME);
    let lp = outgoing(on_shell(ME, 0.9, 0.02, -1.0), ME);
    let ln = outgoing(on_shell(ME, 0.85, 0.025, 2.2), ME);
    let unit = e_pair::squared_amplitude(&e_in, &e_out, &lp, &ln);
    let total = sum_over_pure_states(3, |s| {
        e_pair::squared_amplitude(
            &e_in,
            &lepton(&e_out, s[0]),
            &lepton(&lp, s[1]),
            &lepton(&ln, s[2]),
        )
    });
    assert!(unit.re > 0.0);
    assert_relative_eq!(total, unit.re, max_relative = 1e-10);
}

#[test]
fn test_e_triplet_final_state_sum() {
    let (e_in, e_out, lp, ln, te_in, te_out) = common::e_triplet_event(0.5);
    let unit = e_triplet::squared_amplitude(&e_in, &e_out, &lp, &ln, &te_in, &te_out);
    let total = sum_over_pure_states(4, |s| {
        e_triplet::squared_amplitude(
            &e_in,
            &lepton(&e_out, s[0]),
            &lepton(&lp, s[1]),
            &lepton(&ln, s[2]),
            &te_in,
            &lepton(&te_out, s[3]),
        )
    });
    assert!(unit.re > 0.0);
    assert_relative_eq!(total, unit.re, max_relative = 1e-10);
}
