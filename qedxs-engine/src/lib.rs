//! qedxs-engine: Tree-level QED differential cross sections.
//!
//! This crate provides the amplitude machinery and eight processes:
//! - **Compton** scattering off a lepton
//! - **Bremsstrahlung** and **pair production** in a static Coulomb field
//! - **Triplet** and **Bethe-Heitler** pair production on electrons and nucleons
//! - **ee bremsstrahlung**, **e-pair** and **e-triplet** electro-production
//!
//! Amplitudes are summed over helicities with the spin-density matrices of the
//! external particles, so any mix of polarized and unpolarized legs is allowed.
//!
#![warn(missing_docs)]

mod check;
mod engine;
pub mod processes;
pub mod propagator;
pub mod tensor;

pub use check::{is_physical, DEFAULT_REALITY_TOLERANCE};
pub use engine::{CrossSection, EngineConfig};
pub use processes::bethe_heitler::FormFactors;
pub use processes::compton::klein_nishina;
pub use tensor::{AmplitudeTensor, Amplitudes, LegWeight};

// Re-export the particle and constant types every caller needs
pub use qedxs_core::config::PhysicsConstants;
pub use qedxs_core::particle::{Lepton, Particle, Photon, SpinDensity};
