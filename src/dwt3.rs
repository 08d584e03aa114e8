//! Three-dimensional extension: every slab `space[i, .., ..]` gets the full
//! 2-D transform, then every lane along axis 0 gets the 1-D transform.
//! Reverse runs the axis-0 pass first, then the slabs.

use crate::{
    dwt2::{forward_plane, reverse_plane, transform_axis},
    error::TransformError,
    transform::{LeveledTransform, Transform1D},
};
use ndarray::{Array3, Axis};
use tracing::debug;

fn admit_space<T>(space: &Array3<T>) -> Result<(), TransformError> {
    if space.is_empty() {
        return Err(TransformError::EmptyInput);
    }
    Ok(())
}

fn forward_space<T, F>(space: &Array3<T>, f: F) -> Result<Array3<T>, TransformError>
where
    T: Copy,
    F: Fn(&[T]) -> Result<Vec<T>, TransformError>,
{
    admit_space(space)?;
    debug!(dim = ?space.dim(), "3-D forward");
    let mut space_hilb = space.to_owned();
    for mut slab in space_hilb.axis_iter_mut(Axis(0)) {
        forward_plane(&mut slab, &f)?;
    }
    transform_axis(&mut space_hilb, Axis(0), &f)?;
    Ok(space_hilb)
}

fn reverse_space<T, F>(space: &Array3<T>, f: F) -> Result<Array3<T>, TransformError>
where
    T: Copy,
    F: Fn(&[T]) -> Result<Vec<T>, TransformError>,
{
    admit_space(space)?;
    debug!(dim = ?space.dim(), "3-D reverse");
    let mut space_time = space.to_owned();
    transform_axis(&mut space_time, Axis(0), &f)?;
    for mut slab in space_time.axis_iter_mut(Axis(0)) {
        reverse_plane(&mut slab, &f)?;
    }
    Ok(space_time)
}

/// Separable 3-D forward using the engine's configured depth.
pub fn forward_3d<T, E>(engine: &E, space: &Array3<T>) -> Result<Array3<T>, TransformError>
where
    T: Copy,
    E: Transform1D<T> + ?Sized,
{
    forward_space(space, |lane: &[T]| engine.forward(lane))
}

/// Inverse of [`forward_3d`] for the same engine.
pub fn reverse_3d<T, E>(engine: &E, space: &Array3<T>) -> Result<Array3<T>, TransformError>
where
    T: Copy,
    E: Transform1D<T> + ?Sized,
{
    reverse_space(space, |lane: &[T]| engine.reverse(lane))
}

/// Separable 3-D forward limited to `to_level` levels along every axis.
pub fn forward_3d_to_level<T, E>(
    engine: &E,
    space: &Array3<T>,
    to_level: Option<usize>,
) -> Result<Array3<T>, TransformError>
where
    T: Copy,
    E: LeveledTransform<T> + ?Sized,
{
    forward_space(space, |lane: &[T]| engine.forward_to_level(lane, to_level))
}

/// Inverse of [`forward_3d_to_level`] for the same `from_level`.
pub fn reverse_3d_from_level<T, E>(
    engine: &E,
    space: &Array3<T>,
    from_level: Option<usize>,
) -> Result<Array3<T>, TransformError>
where
    T: Copy,
    E: LeveledTransform<T> + ?Sized,
{
    reverse_space(space, |lane: &[T]| engine.reverse_from_level(lane, from_level))
}

/// Builds a space from `nested[i][j][k]`, rejecting ragged slabs or rows.
/// `RaggedInput::row` is the flattened `i * rows + j` index of the offender.
pub fn space_from_nested<T: Copy>(nested: &[Vec<Vec<T>>]) -> Result<Array3<T>, TransformError> {
    let n0 = nested.len();
    let n1 = nested.first().map_or(0, Vec::len);
    let n2 = nested.first().and_then(|s| s.first()).map_or(0, Vec::len);
    if n0 == 0 || n1 == 0 || n2 == 0 {
        return Err(TransformError::EmptyInput);
    }
    let mut flat = Vec::with_capacity(n0 * n1 * n2);
    for (i, slab) in nested.iter().enumerate() {
        if slab.len() != n1 {
            return Err(TransformError::RaggedInput {
                row: i * n1,
                expected: n1,
                got: slab.len(),
            });
        }
        for (j, row) in slab.iter().enumerate() {
            if row.len() != n2 {
                return Err(TransformError::RaggedInput {
                    row: i * n1 + j,
                    expected: n2,
                    got: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
    }
    Array3::from_shape_vec((n0, n1, n2), flat).map_err(|_| TransformError::RaggedInput {
        row: 0,
        expected: n1,
        got: n1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dwt::WaveletTransform,
        dwt2::forward_2d,
        egyptian::AncientEgyptian,
        wavelet::{Wavelet, WaveletType},
    };
    use ndarray::s;
    use std::time::Instant;

    fn assert_space(expected: &Array3<f64>, actual: &Array3<f64>, delta: f64) {
        assert_eq!(expected.dim(), actual.dim());
        for ((idx, e), a) in expected.indexed_iter().zip(actual.iter()) {
            assert!((e - a).abs() <= delta, "{idx:?}: expected {e}, got {a}");
        }
    }

    fn bumpy(dim: (usize, usize, usize)) -> Array3<f64> {
        Array3::from_shape_fn(dim, |(i, j, k)| {
            ((i + 2 * j + 3 * k) % 5) as f64 + 0.1 * (i * j) as f64
        })
    }

    #[test]
    fn fwt_haar_ones() {
        let t = WaveletTransform::fast(Wavelet::<f64>::new(WaveletType::Haar02));
        let ones = Array3::<f64>::ones((4, 4, 4));
        let hilb = forward_3d(&t, &ones).unwrap();
        let mut expected = Array3::<f64>::zeros((4, 4, 4));
        expected[[0, 0, 0]] = 8.;
        assert_space(&expected, &hilb, 1e-12);
        assert_space(&ones, &reverse_3d(&t, &expected).unwrap(), 1e-12);
    }

    #[test]
    fn orthogonal_haar_sums_to_n_cubed() {
        let t = WaveletTransform::packet(Wavelet::<f64>::new(WaveletType::Haar02Orthogonal));
        let ones = Array3::<f64>::ones((4, 4, 4));
        let hilb = forward_3d(&t, &ones).unwrap();
        assert!((hilb[[0, 0, 0]] - 64.).abs() < 1e-12);
        assert!(hilb.iter().skip(1).all(|x| x.abs() < 1e-12));
        assert_space(&ones, &reverse_3d(&t, &hilb).unwrap(), 1e-12);
    }

    #[test]
    fn slabs_see_the_2d_transform() {
        // with the axis-0 pass limited away (2 samples, Daub04), only slabs change
        let t = WaveletTransform::fast(Wavelet::<f64>::new(WaveletType::Daub04));
        let space = bumpy((2, 8, 8));
        let hilb = forward_3d(&t, &space).unwrap();
        for i in 0..2 {
            let slab = space.slice(s![i, .., ..]).to_owned();
            let expected = forward_2d(&t, &slab).unwrap();
            for (e, a) in expected.iter().zip(hilb.slice(s![i, .., ..]).iter()) {
                assert!((e - a).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn round_trip_shapes() {
        let dims = [(4, 8, 16), (16, 4, 8), (8, 8, 8)];
        for w in [WaveletType::Haar02, WaveletType::Daub04, WaveletType::Coif06] {
            for dim in dims {
                let t = WaveletTransform::packet(Wavelet::<f64>::new(w));
                let space = bumpy(dim);
                let hilb = forward_3d(&t, &space).unwrap();
                assert_space(&space, &reverse_3d(&t, &hilb).unwrap(), 1e-10);
            }
        }
    }

    #[test]
    fn leveled_round_trip() {
        let t = WaveletTransform::fast(Wavelet::<f64>::new(WaveletType::Haar02));
        let space = bumpy((8, 8, 8));
        for level in [Some(1), Some(2), None] {
            let hilb = forward_3d_to_level(&t, &space, level).unwrap();
            assert_space(&space, &reverse_3d_from_level(&t, &hilb, level).unwrap(), 1e-12);
        }
    }

    #[test]
    fn any_length_space() {
        let fwt = WaveletTransform::fast(Wavelet::<f64>::new(WaveletType::Daub04));
        let t = AncientEgyptian::new(fwt);
        let space = bumpy((3, 12, 7));
        let hilb = forward_3d(&t, &space).unwrap();
        assert_space(&space, &reverse_3d(&t, &hilb).unwrap(), 1e-10);
    }

    #[test]
    fn nested_input() {
        let nested = vec![vec![vec![1., 2.], vec![3., 4.]], vec![vec![5., 6.], vec![7., 8.]]];
        let space = space_from_nested(&nested).unwrap();
        assert_eq!(space.dim(), (2, 2, 2));
        assert_eq!(space[[1, 0, 1]], 6.);

        let ragged = vec![vec![vec![1., 2.], vec![3., 4.]], vec![vec![5., 6.], vec![7.]]];
        assert_eq!(
            space_from_nested(&ragged),
            Err(TransformError::RaggedInput {
                row: 3,
                expected: 2,
                got: 1
            })
        );
        assert_eq!(space_from_nested::<f64>(&[]), Err(TransformError::EmptyInput));
    }

    #[test]
    fn timing_large_space() {
        let t = WaveletTransform::fast(Wavelet::<f32>::new(WaveletType::Daub08));
        let space = Array3::<f32>::from_shape_fn((64, 64, 64), |(i, j, k)| (i + j + k) as f32);
        let now = Instant::now();
        let hilb = forward_3d(&t, &space).unwrap();
        let back = reverse_3d(&t, &hilb).unwrap();
        println!("3-D round trip took {} ms", now.elapsed().as_millis());
        let err = space
            .iter()
            .zip(back.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0f32, f32::max);
        assert!(err < 1e-2, "max error {err}");
    }
}
