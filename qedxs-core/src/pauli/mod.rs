//! SU(2) algebra: complex 2x2 matrices and two-component spinors.

mod matrix;
mod spinor;

pub use matrix::{PauliIndex, PauliMatrix};
pub use spinor::PauliSpinor;
