//! Integer range mapping

/// Linearly map `x` from `[in_min, in_max]` onto `[out_min, out_max]`
///
/// Integer arithmetic truncating toward zero. The input is not clamped,
/// so values outside the input range extrapolate. Either output bound may
/// be the larger one, which gives an inverted mapping. A zero-width input
/// range maps everything to `out_min`.
pub fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    let in_span = in_max as i64 - in_min as i64;
    if in_span == 0 {
        return out_min;
    }
    let scaled = (x as i64 - in_min as i64) * (out_max as i64 - out_min as i64) / in_span;
    (scaled + out_min as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Limit `x` to `[low, high]`
///
/// Unlike `Ord::clamp` this never panics: with `low > high` the lower
/// bound is checked first.
pub fn constrain(x: i32, low: i32, high: i32) -> i32 {
    if x < low {
        low
    } else if x > high {
        high
    } else {
        x
    }
}
