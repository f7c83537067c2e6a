//! Integrality tests and rounding for relaxation points.

/// Default integer feasibility tolerance.
pub const DEFAULT_INT_TOL: f64 = 1e-7;

/// Distance of `val` to its nearest integer.
pub fn fractionality(val: f64) -> f64 {
    (val - val.round()).abs()
}

/// Check if a single value is integral within `tol`.
pub fn is_integral(val: f64, tol: f64) -> bool {
    fractionality(val) <= tol
}

/// Check if every coordinate of `x` is integral within `tol`.
///
/// An empty point is trivially integral.
pub fn is_integer_solution(x: &[f64], tol: f64) -> bool {
    x.iter().all(|&v| is_integral(v, tol))
}

/// Round a relaxation point to a binary assignment.
///
/// Values are rounded to the nearest integer and clamped into {0, 1}.
pub fn round_binary(x: &[f64]) -> Vec<u8> {
    x.iter()
        .map(|&v| if v.round() >= 1.0 { 1 } else { 0 })
        .collect()
}

/// Lift a binary assignment back into relaxation space.
pub fn to_f64(assignment: &[u8]) -> Vec<f64> {
    assignment.iter().map(|&b| f64::from(b)).collect()
}
