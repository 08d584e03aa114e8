use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Sample type the engines run on. Implemented for `f32` and `f64`.
pub trait Scalar: Float + FromPrimitive + Debug + Send + Sync + 'static {
    /// Converts a coefficient-table literal.
    fn lit(x: f64) -> Self;
}

impl<T> Scalar for T
where
    T: Float + FromPrimitive + Debug + Send + Sync + 'static,
{
    fn lit(x: f64) -> Self {
        // float targets never fail this conversion; f32 rounds
        T::from_f64(x).unwrap_or_else(T::nan)
    }
}

/// Wraps a virtual sample index onto a periodic segment of length `len`.
/// Valid for `idx < 2 * len`, which covers every index the filter loop produces
/// as long as the filter is no longer than the segment.
#[inline]
pub fn periodic_index(idx: usize, len: usize) -> usize {
    if idx >= len {
        idx - len
    } else {
        idx
    }
}

/// Returns true for 1, 2, 4, 8, ...
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// Splits `n` into the powers of two of its set bits, largest first.
/// `binary_expansion(7) == [4, 2, 1]`.
pub fn binary_expansion(n: usize) -> Vec<usize> {
    (0..usize::BITS)
        .rev()
        .map(|bit| 1usize << bit)
        .filter(|&p| n & p != 0)
        .collect()
}

/// Number of halvings the pyramid can perform on a signal of `sig_len` samples
/// with a filter of `filt_len` taps: sizes `sig_len, sig_len/2, ...` are visited
/// while they are even and at least `filt_len`.
pub fn w_max_level(sig_len: usize, filt_len: usize) -> usize {
    if filt_len == 0 {
        return 0;
    }
    let mut h = sig_len;
    let mut levels = 0;
    while h >= filt_len && h % 2 == 0 {
        levels += 1;
        h /= 2;
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_expansion() {
        assert_eq!(binary_expansion(7), vec![4, 2, 1]);
        assert_eq!(binary_expansion(8), vec![8]);
        assert_eq!(binary_expansion(13), vec![8, 4, 1]);
        assert_eq!(binary_expansion(1), vec![1]);
        assert!(binary_expansion(0).is_empty());
        for n in 1..200 {
            assert_eq!(binary_expansion(n).iter().sum::<usize>(), n);
        }
    }

    #[test]
    fn test_power_of_two() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(64));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(12));
    }

    #[test]
    fn test_max_level() {
        assert_eq!(w_max_level(8, 2), 3);
        assert_eq!(w_max_level(8, 4), 2);
        assert_eq!(w_max_level(8, 6), 1);
        assert_eq!(w_max_level(16, 8), 2);
        assert_eq!(w_max_level(4, 8), 0);
        // 12 -> 6 -> 3 stops on the odd size
        assert_eq!(w_max_level(12, 2), 2);
        assert_eq!(w_max_level(12, 6), 2);
    }

    #[test]
    fn test_periodic_index() {
        assert_eq!(periodic_index(3, 4), 3);
        assert_eq!(periodic_index(4, 4), 0);
        assert_eq!(periodic_index(7, 4), 3);
    }
}
