//! Ancient Egyptian decomposition: runs a power-of-two engine on input of
//! any length by cutting it into the powers of two of the length's binary
//! expansion (7 = 4 + 2 + 1) and transforming every piece on its own.

use crate::{
    error::TransformError,
    transform::{LeveledTransform, Transform1D},
    utils::binary_expansion,
};
use tracing::{debug, trace};

/// Contiguous power-of-two segments covering `0..len`, largest first.
///
/// Depends on the length alone, so forward and reverse always cut the
/// array at the same places.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentPlan {
    segments: Vec<(usize, usize)>,
}

impl SegmentPlan {
    pub fn new(len: usize) -> Self {
        let mut offset = 0;
        let segments = binary_expansion(len)
            .into_iter()
            .map(|size| {
                let seg = (offset, size);
                offset += size;
                seg
            })
            .collect();
        Self { segments }
    }

    /// `(offset, size)` pairs in array order.
    pub fn segments(&self) -> &[(usize, usize)] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.segments.iter().copied()
    }

    /// Number of segments, one per set bit of the length.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Length-agnostic adapter around any leveled engine.
#[derive(Clone, Debug)]
pub struct AncientEgyptian<E> {
    inner: E,
}

impl<E> AncientEgyptian<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }

    /// Runs `op` on every segment at least `min_len` long; shorter segments
    /// are copied through untouched.
    fn per_segment<T, F>(
        &self,
        input: &[T],
        min_len: usize,
        op: F,
    ) -> Result<Vec<T>, TransformError>
    where
        T: Copy,
        F: Fn(&[T]) -> Result<Vec<T>, TransformError>,
    {
        if input.is_empty() {
            return Err(TransformError::EmptyInput);
        }
        let plan = SegmentPlan::new(input.len());
        debug!(len = input.len(), segments = plan.len(), "ancient egyptian decomposition");
        let mut out = input.to_vec();
        for (offset, size) in plan.iter() {
            if size < min_len {
                trace!(offset, size, "segment below filter length, passing through");
                continue;
            }
            trace!(offset, size, "segment");
            let piece = op(&input[offset..offset + size])?;
            out[offset..offset + size].copy_from_slice(&piece);
        }
        Ok(out)
    }
}

impl<T, E> Transform1D<T> for AncientEgyptian<E>
where
    T: Copy,
    E: LeveledTransform<T>,
{
    fn forward(&self, signal: &[T]) -> Result<Vec<T>, TransformError> {
        self.per_segment(signal, self.inner.min_len(), |seg| self.inner.forward(seg))
    }

    fn reverse(&self, coeffs: &[T]) -> Result<Vec<T>, TransformError> {
        self.per_segment(coeffs, self.inner.min_len(), |seg| self.inner.reverse(seg))
    }
}

impl<T, E> LeveledTransform<T> for AncientEgyptian<E>
where
    T: Copy,
    E: LeveledTransform<T>,
{
    fn forward_to_level(
        &self,
        signal: &[T],
        to_level: Option<usize>,
    ) -> Result<Vec<T>, TransformError> {
        self.per_segment(signal, self.inner.min_len(), |seg| {
            self.inner.forward_to_level(seg, to_level)
        })
    }

    fn reverse_from_level(
        &self,
        coeffs: &[T],
        from_level: Option<usize>,
    ) -> Result<Vec<T>, TransformError> {
        self.per_segment(coeffs, self.inner.min_len(), |seg| {
            self.inner.reverse_from_level(seg, from_level)
        })
    }

    fn min_len(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dwt::{Precondition, WaveletTransform},
        wavelet::{Wavelet, WaveletType},
    };

    fn any_fwt(w: WaveletType) -> AncientEgyptian<WaveletTransform<f64>> {
        AncientEgyptian::new(WaveletTransform::fast(Wavelet::new(w)))
    }

    fn any_wpt(w: WaveletType) -> AncientEgyptian<WaveletTransform<f64>> {
        AncientEgyptian::new(WaveletTransform::packet(Wavelet::new(w)))
    }

    fn assert_close(expected: &[f64], actual: &[f64], delta: f64) {
        assert_eq!(expected.len(), actual.len());
        for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
            assert!((e - a).abs() <= delta, "index {i}: expected {e}, got {a}");
        }
    }

    #[test]
    fn plan_for_seven() {
        let plan = SegmentPlan::new(7);
        assert_eq!(plan.segments(), &[(0, 4), (4, 2), (6, 1)]);
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn plan_covers_length() {
        for n in 1..300 {
            let plan = SegmentPlan::new(n);
            let mut next = 0;
            let mut last_size = usize::MAX;
            for (offset, size) in plan.iter() {
                assert_eq!(offset, next);
                assert!(size.is_power_of_two());
                assert!(size < last_size);
                next += size;
                last_size = size;
            }
            assert_eq!(next, n);
            assert_eq!(plan.len(), n.count_ones() as usize);
        }
        assert!(SegmentPlan::new(0).is_empty());
    }

    #[test]
    fn fwt_haar_ones_seven() {
        let t = any_fwt(WaveletType::Haar02);
        let x = [1.; 7];
        let hilb = t.forward(&x).unwrap();
        let expected = [2., 0., 0., 0., 2f64.sqrt(), 0., 1.];
        assert_close(&expected, &hilb, 1e-12);
        // the single-sample tail passes through in both directions
        assert_eq!(hilb[6], 1.);
        assert_close(&x, &t.reverse(&expected).unwrap(), 1e-12);
    }

    #[test]
    fn wpt_haar_seven() {
        let t = any_wpt(WaveletType::Haar02);
        let x = [1., 2., 3., 4., 2., 0., 1.];
        let s = 2f64.sqrt();
        let expected = [5., -2., -1., 0., s, s, 1.];
        assert_close(&expected, &t.forward(&x).unwrap(), 1e-12);
        assert_close(&x, &t.reverse(&expected).unwrap(), 1e-12);
    }

    #[test]
    fn segments_are_independent() {
        let t = any_fwt(WaveletType::Haar02);
        let mut a: Vec<f64> = (0..11).map(|i| i as f64).collect();
        let before = t.forward(&a).unwrap();
        // changing the 2-sample segment leaves the 8-sample segment untouched
        a[8] = 100.;
        let after = t.forward(&a).unwrap();
        assert_close(&before[..8], &after[..8], 0.);
        assert!((before[8] - after[8]).abs() > 1.);
    }

    #[test]
    fn strict_engine_and_short_segments() {
        // 13 = 8 + 4 + 1: the Daub04 engine rejects nothing it is handed
        let inner = WaveletTransform::fast(Wavelet::<f64>::new(WaveletType::Daub04))
            .with_precondition(Precondition::Reject);
        let t = AncientEgyptian::new(inner);
        let x: Vec<f64> = (0..13).map(|i| (i as f64).sin()).collect();
        let hilb = t.forward(&x).unwrap();
        assert_eq!(hilb[12], x[12]);
        assert_close(&x, &t.reverse(&hilb).unwrap(), 1e-12);
    }

    #[test]
    fn leveled_round_trip() {
        let t = any_wpt(WaveletType::Coif06);
        let x: Vec<f64> = (0..45).map(|i| ((i * 13) % 7) as f64).collect();
        for level in [Some(1), Some(2), None] {
            let hilb = t.forward_to_level(&x, level).unwrap();
            assert_close(&x, &t.reverse_from_level(&hilb, level).unwrap(), 1e-10);
        }
    }

    #[test]
    fn empty_input() {
        let t = any_fwt(WaveletType::Haar02);
        assert_eq!(t.forward(&[]), Err(TransformError::EmptyInput));
    }
}
