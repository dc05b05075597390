//! Scalar coercions between Rust values and the toolkit's C conventions.

use std::f64::consts::PI;

/// Converts a boolean to the toolkit's `int` boolean (`1`/`0`).
///
/// `None` stays `None` when `allow_nil`, otherwise it becomes `0`.
pub fn boolean_to_integer(value: Option<bool>, allow_nil: bool) -> Option<i64> {
    match value {
        None if allow_nil => None,
        None => Some(0),
        Some(true) => Some(1),
        Some(false) => Some(0),
    }
}

/// Inverse of [`boolean_to_integer`]; only `1` is true.
pub fn integer_to_boolean(value: Option<i64>, allow_nil: bool) -> Option<bool> {
    match value {
        None if allow_nil => None,
        None => Some(false),
        Some(v) => Some(v == 1),
    }
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    ((PI * 2.0) / 360.0) * degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_map_to_c_ints() {
        assert_eq!(boolean_to_integer(Some(true), true), Some(1));
        assert_eq!(boolean_to_integer(Some(false), true), Some(0));
        assert_eq!(boolean_to_integer(None, true), None);
        assert_eq!(boolean_to_integer(None, false), Some(0));
    }

    #[test]
    fn only_one_is_true() {
        assert_eq!(integer_to_boolean(Some(1), true), Some(true));
        assert_eq!(integer_to_boolean(Some(2), true), Some(false));
        assert_eq!(integer_to_boolean(None, false), Some(false));
        assert_eq!(integer_to_boolean(None, true), None);
    }

    #[test]
    fn half_turn_is_pi() {
        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-12);
    }
}
