//! Shared numerical primitives anchored on `num_complex`.

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Complex scalar stored by complex-mode matrices.
pub type CScalar = num_complex::Complex<Scalar>;

/// Magnitude below which a real-mode entry is pruned from the store.
pub const REAL_TOLERANCE: Scalar = 1.0e-14;
/// Magnitude below which a complex component is pruned from the store.
pub const COMPLEX_TOLERANCE: Scalar = 1.0e-12;

/// Sentinel returned by real accessors after a reported violation.
pub const SPARSE_MATRIX_ERROR: Scalar = Scalar::MAX;

/// Returns the sentinel returned by complex accessors after a reported violation.
#[must_use]
pub fn complex_nan() -> CScalar {
    CScalar::new(Scalar::NAN, Scalar::NAN)
}

/// True if either component of `z` is NaN.
#[must_use]
pub fn is_complex_nan(z: CScalar) -> bool {
    z.re.is_nan() || z.im.is_nan()
}

/// One-sided near-zero test used for pruning: `|value| < tolerance`.
#[must_use]
pub fn is_near_zero(value: Scalar, tolerance: Scalar) -> bool {
    value.abs() < tolerance
}
