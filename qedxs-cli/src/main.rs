//! qedxs CLI - Command-line interface for tree-level QED cross sections.
//!
//! This binary scans the Compton cross section against Klein-Nishina,
//! evaluates single bremsstrahlung points and prints the active constants.
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    clippy::too_many_lines
)]

use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use qedxs_core::particle::{Lepton, Particle, Photon, SpinDensity};
use qedxs_core::vector::{FourMomentum, ThreeVector};
use qedxs_core::PhysicsConstants;
use qedxs_engine::{klein_nishina, CrossSection, EngineConfig};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] qedxs_core::Error),

    #[error("Kinematics error: {0}")]
    Kinematics(String),
}

/// Tree-level QED differential cross sections.
#[derive(Parser)]
#[command(name = "qedxs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan unpolarized Compton scattering off an electron at rest
    Compton {
        /// Incident photon energy (GeV)
        #[arg(short, long, default_value = "1.0")]
        energy: f64,

        /// Number of scattering angles between 0 and pi
        #[arg(short, long, default_value = "18")]
        steps: usize,

        /// Print the scan as JSON
        #[arg(long)]
        json: bool,

        /// JSON file overriding the physical constants
        #[arg(long)]
        constants: Option<PathBuf>,
    },

    /// Print the effective physical constants as JSON
    Constants {
        /// JSON file overriding the physical constants
        #[arg(long)]
        constants: Option<PathBuf>,
    },

    /// Evaluate bremsstrahlung in a Coulomb field at one recoil momentum
    Brems {
        /// Total energy of the incident electron, moving along +z (GeV)
        #[arg(short, long)]
        energy: f64,

        /// Energy of the emitted photon (GeV)
        #[arg(short, long)]
        photon: f64,

        /// Recoil momentum taken by the field, as qx,qy,qz (GeV)
        #[arg(short, long, value_parser = parse_vector, allow_hyphen_values = true)]
        recoil: ThreeVector,

        /// Azimuth of the photon about the recoil-corrected beam axis (rad)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        phi: f64,

        /// JSON file overriding the physical constants
        #[arg(long)]
        constants: Option<PathBuf>,
    },
}

/// One point of a Compton scan.
#[derive(Debug, Serialize)]
struct ComptonPoint {
    theta: f64,
    photon_energy: f64,
    cross_section: f64,
    klein_nishina: f64,
}

fn parse_vector(value: &str) -> std::result::Result<ThreeVector, String> {
    let components = value
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|e| format!("'{part}': {e}")))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    match components.as_slice() {
        [x, y, z] => Ok(ThreeVector::new(*x, *y, *z)),
        _ => Err(format!("expected three comma-separated values, got '{value}'")),
    }
}

fn load_constants(path: Option<&Path>) -> Result<PhysicsConstants> {
    let constants = match path {
        Some(path) => {
            log::info!("loading constants from {}", path.display());
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<PhysicsConstants>(&text)?
        }
        None => PhysicsConstants::default(),
    };
    constants.validate()?;
    Ok(constants)
}

fn compton_scan(engine: &CrossSection, energy: f64, steps: usize) -> Vec<ComptonPoint> {
    let mass = engine.constants().electron_mass;
    let g_in = Photon::along(ThreeVector::new(0.0, 0.0, energy))
        .with_sdm(SpinDensity::unpolarized());
    let e_in = Lepton::on_shell(mass, ThreeVector::default()).with_sdm(SpinDensity::unpolarized());

    (0..steps)
        .into_par_iter()
        .map(|step| {
            let theta = PI * (step as f64 + 0.5) / steps as f64;
            let k_out = energy / (1.0 + (energy / mass) * (1.0 - theta.cos()));
            let g_out = Photon::along(ThreeVector::from_polar(k_out, theta, 0.0))
                .with_sdm(SpinDensity::unit());
            let e_out = Lepton::new(g_in.momentum() + e_in.momentum() - g_out.momentum(), mass)
                .with_sdm(SpinDensity::unit());
            ComptonPoint {
                theta,
                photon_energy: k_out,
                cross_section: engine.compton(&g_in, &e_in, &g_out, &e_out),
                klein_nishina: klein_nishina(engine.constants(), &g_in, &g_out, mass),
            }
        })
        .collect()
}

/// Builds `e(E) -> e' + gamma(k)` with recoil `q` absorbed by the field.
///
/// The photon direction follows from energy conservation; `phi` is its
/// azimuth about `p - q`.
fn brems_kinematics(
    mass: f64,
    energy: f64,
    photon: f64,
    recoil: ThreeVector,
    phi: f64,
) -> Result<(Lepton, Lepton, Photon)> {
    if energy <= mass || photon <= 0.0 || photon >= energy - mass {
        return Err(CliError::Kinematics(format!(
            "need m < E and 0 < k < E - m, got E = {energy}, k = {photon}"
        )));
    }
    let p_in = ThreeVector::new(0.0, 0.0, (energy * energy - mass * mass).sqrt());
    let e_out_energy = energy - photon;
    let p_out_sqr = e_out_energy * e_out_energy - mass * mass;

    let axis_vector = p_in - recoil;
    let axis_length = axis_vector.length();
    let cos_angle =
        (axis_vector.length_sqr() + photon * photon - p_out_sqr) / (2.0 * photon * axis_length);
    if !(-1.0..=1.0).contains(&cos_angle) {
        return Err(CliError::Kinematics(format!(
            "recoil ({}, {}, {}) is not reachable at these energies",
            recoil.x, recoil.y, recoil.z
        )));
    }
    let sin_angle = (1.0 - cos_angle * cos_angle).sqrt();

    let axis = axis_vector.normalized();
    let helper = if axis.x.abs() < 0.9 {
        ThreeVector::X
    } else {
        ThreeVector::Y
    };
    let u = axis.cross(&helper).normalized();
    let v = axis.cross(&u);
    let direction = axis * cos_angle + (u * phi.cos() + v * phi.sin()) * sin_angle;

    let k = direction * photon;
    let e_in = Lepton::new(FourMomentum::from_mass_and_momentum(mass, p_in), mass)
        .with_sdm(SpinDensity::unpolarized());
    let e_out = Lepton::on_shell(mass, axis_vector - k).with_sdm(SpinDensity::unit());
    let g_out = Photon::along(k).with_sdm(SpinDensity::unit());
    Ok((e_in, e_out, g_out))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compton {
            energy,
            steps,
            json,
            constants,
        } => {
            let constants = load_constants(constants.as_deref())?;
            let engine = CrossSection::new(EngineConfig::default().with_constants(constants));

            let start = Instant::now();
            let points = compton_scan(&engine, energy, steps.max(1));
            log::info!(
                "evaluated {} Compton points in {:.2?}",
                points.len(),
                start.elapsed()
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                println!(
                    "{:<10} | {:<14} | {:<14} | {:<14} | {:<10}",
                    "theta", "k' (GeV)", "dsigma (ub/sr)", "KN (ub/sr)", "ratio"
                );
                println!("{:-<74}", "");
                for point in &points {
                    println!(
                        "{:<10.4} | {:<14.6e} | {:<14.6e} | {:<14.6e} | {:<10.8}",
                        point.theta,
                        point.photon_energy,
                        point.cross_section,
                        point.klein_nishina,
                        point.cross_section / point.klein_nishina
                    );
                }
            }
        }

        Commands::Constants { constants } => {
            let constants = load_constants(constants.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&constants)?);
        }

        Commands::Brems {
            energy,
            photon,
            recoil,
            phi,
            constants,
        } => {
            let constants = load_constants(constants.as_deref())?;
            let engine = CrossSection::new(EngineConfig::default().with_constants(constants));
            let (e_in, e_out, g_out) =
                brems_kinematics(constants.electron_mass, energy, photon, recoil, phi)?;

            let xs = engine.bremsstrahlung(&e_in, &e_out, &g_out);
            let p = e_out.momentum();
            let k = g_out.momentum();
            println!("Electron out: ({:.6}, {:.6}, {:.6}, {:.6}) GeV", p[0], p[1], p[2], p[3]);
            println!("Photon out:   ({:.6}, {:.6}, {:.6}, {:.6}) GeV", k[0], k[1], k[2], k[3]);
            println!("Cross section: {:.6e} ub/GeV^4/r", xs);
        }
    }

    Ok(())
}
