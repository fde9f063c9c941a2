//! Changes the process-wide resolution, so it lives in its own test binary
//! and keeps every check in a single test.

use num_complex::Complex64;
use qedxs_core::pauli::{PauliIndex, PauliMatrix};
use qedxs_core::vector::ThreeVector;
use qedxs_core::{Error, Resolution};

#[test]
fn test_set_default_drives_pauli_checks() {
    let a = PauliMatrix::compose(1.0, ThreeVector::new(0.2, -0.1, 0.0));
    let nudged = a + PauliMatrix::identity() * 1e-4;
    // det = 1 - (1 - 2e-4)^2, about 4e-4
    let nearly_singular = PauliMatrix::compose(1.0, ThreeVector::new(0.0, 0.0, 1.0 - 2e-4));
    // anti-Hermitian part of size 1e-4
    let skewed = a + PauliMatrix::basis(PauliIndex::Sigma1) * Complex64::new(0.0, 1e-4);

    assert!(!a.approx_eq(&nudged));
    assert!(nearly_singular.try_inverse().is_ok());
    assert!(!skewed.is_hermitian());
    assert_eq!(skewed.decompose(), Err(Error::NonHermitian));

    Resolution::set_default(1e-3).unwrap();
    assert!((Resolution::current().value() - 1e-3).abs() < f64::EPSILON);

    assert!(a.approx_eq(&nudged));
    assert!(matches!(
        nearly_singular.try_inverse(),
        Err(Error::SingularMatrix { determinant }) if determinant < 1e-3
    ));
    let mut untouched = nearly_singular;
    assert!(untouched.invert().is_err());
    assert_eq!(untouched, nearly_singular);
    assert!(skewed.is_hermitian());
    let (scalar, vector) = skewed.decompose().unwrap();
    assert!((scalar - 1.0).abs() < 1e-12);
    assert!((vector.x - 0.2).abs() < 1e-12);

    // Explicit resolutions ignore the default
    let tight = Resolution::new(1e-12).unwrap();
    assert!(!a.approx_eq_within(&nudged, tight));
    assert!(!skewed.is_hermitian_within(tight));

    // Rejected values leave the default in place
    assert!(Resolution::set_default(-1.0).is_err());
    assert!((Resolution::current().value() - 1e-3).abs() < f64::EPSILON);
}
