/// Signed percentage change from `previous` to `current`, rounded once to
/// the nearest integer (halves away from zero).
///
/// A zero `previous` always yields 0. An increase from nothing is reported
/// as no change rather than as an unbounded one.
pub fn percent_delta(current: u64, previous: u64) -> i64 {
    if previous == 0 {
        return 0;
    }
    let previous = previous as f64;
    (((current as f64 - previous) / previous) * 100.0).round() as i64
}
