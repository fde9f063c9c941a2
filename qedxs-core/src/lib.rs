//! qedxs-core: Kinematics and spin algebra for tree-level QED calculations.
//!
//! This crate provides four-vectors and rotations, the Dirac algebra
//! (gamma matrices and helicity spinors), external particle states with
//! spin-density matrices, and an SU(2) Pauli algebra.
//!

pub mod config;
pub mod dirac;
pub mod error;
pub mod particle;
pub mod pauli;
pub mod vector;

pub use config::{PhysicsConstants, Resolution};
pub use dirac::{DiracMatrix, DiracSpinor, Helicity};
pub use error::{Error, Result};
pub use particle::{Lepton, Particle, Photon, SdmRole, SpinDensity};
pub use pauli::{PauliIndex, PauliMatrix, PauliSpinor};
pub use vector::{FourMomentum, PolarizationVector, ThreeRotation, ThreeVector};
