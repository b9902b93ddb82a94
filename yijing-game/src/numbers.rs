//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Widen a counter to f64 for ratio math.
#[must_use]
pub fn u32_to_f64(value: u32) -> f64 {
    f64::from(value)
}

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Clamp an i64 into `[0, cap]` and narrow it to u32.
#[must_use]
pub fn clamp_i64_to_u32(value: i64, cap: u32) -> u32 {
    let clamped = value.clamp(0, i64::from(cap));
    cast::<i64, u32>(clamped).unwrap_or(0)
}

/// Narrow a u32 magnitude into an i32 delta, saturating at `i32::MAX`.
#[must_use]
pub fn u32_to_delta(value: u32) -> i32 {
    cast::<u32, i32>(value).unwrap_or(i32::MAX)
}
