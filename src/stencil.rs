/// Five-point explicit Euler update for one interior cell.
///
/// Every execution strategy funnels through this one expression, with the
/// operand order fixed, so their results match bitwise.
#[inline]
pub fn five_point(
    up: f64,
    left: f64,
    middle: f64,
    right: f64,
    down: f64,
    source: f64,
    dt: f64,
    nu: f64,
) -> f64 {
    middle + dt * (nu * (up + left - 4.0 * middle + right + down) + source)
}
