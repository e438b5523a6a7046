pub(crate) fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Rounds to the nearest whole pixel, saturating at the `i64` range.
pub(crate) fn round_px(v: f64) -> i64 {
    if !v.is_finite() {
        return 0;
    }
    v.round() as i64
}

/// Middle element index of a non-empty list, biased to the upper half for even lengths.
pub(crate) fn middle_index(len: usize) -> Option<usize> {
    (len > 0).then_some(len / 2)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
