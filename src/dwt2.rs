//! Two-dimensional extension of the 1-D engines.
//!
//! The separable transform runs the full 1-D engine over every row, then over
//! every column of the result; reverse undoes columns first, then rows.
//! The pyramid (Mallat) variant interleaves the axes per level instead, and
//! only ever touches the shrinking top-left approximation block.

use crate::{
    dwt::{LevelPlan, WaveletXForm1D},
    error::TransformError,
    transform::{LeveledTransform, Transform1D},
    utils::Scalar,
    wavelet::WaveletFilter,
};
use ndarray::{s, Array2, ArrayBase, Axis, DataMut, Dimension};
use tracing::debug;

/// Applies `f` to every lane of `array` running along `axis`, writing the
/// result back into the lane.
pub fn transform_axis<S, T, D, F>(
    array: &mut ArrayBase<S, D>,
    axis: Axis,
    f: &F,
) -> Result<(), TransformError>
where
    S: DataMut<Elem = T>,
    T: Copy,
    D: Dimension,
    F: Fn(&[T]) -> Result<Vec<T>, TransformError>,
{
    let mut lane_buf = Vec::with_capacity(array.len_of(axis));
    for mut lane in array.lanes_mut(axis) {
        lane_buf.clear();
        lane_buf.extend(lane.iter().copied());
        let out = f(&lane_buf)?;
        lane.iter_mut().zip(out).for_each(|(x, y)| *x = y);
    }
    Ok(())
}

/// Rows (axis 1) then columns (axis 0), in place.
pub(crate) fn forward_plane<S, T, F>(
    plane: &mut ArrayBase<S, ndarray::Ix2>,
    f: &F,
) -> Result<(), TransformError>
where
    S: DataMut<Elem = T>,
    T: Copy,
    F: Fn(&[T]) -> Result<Vec<T>, TransformError>,
{
    transform_axis(plane, Axis(1), f)?;
    transform_axis(plane, Axis(0), f)
}

/// Columns (axis 0) then rows (axis 1), in place.
pub(crate) fn reverse_plane<S, T, F>(
    plane: &mut ArrayBase<S, ndarray::Ix2>,
    f: &F,
) -> Result<(), TransformError>
where
    S: DataMut<Elem = T>,
    T: Copy,
    F: Fn(&[T]) -> Result<Vec<T>, TransformError>,
{
    transform_axis(plane, Axis(0), f)?;
    transform_axis(plane, Axis(1), f)
}

fn admit_matrix<T>(matrix: &Array2<T>) -> Result<(), TransformError> {
    if matrix.is_empty() {
        return Err(TransformError::EmptyInput);
    }
    Ok(())
}

/// Separable 2-D forward using the engine's configured depth.
pub fn forward_2d<T, E>(engine: &E, matrix: &Array2<T>) -> Result<Array2<T>, TransformError>
where
    T: Copy,
    E: Transform1D<T> + ?Sized,
{
    admit_matrix(matrix)?;
    let mut mat_hilb = matrix.to_owned();
    forward_plane(&mut mat_hilb, &|lane: &[T]| engine.forward(lane))?;
    Ok(mat_hilb)
}

/// Separable 2-D reverse using the engine's configured depth.
pub fn reverse_2d<T, E>(engine: &E, matrix: &Array2<T>) -> Result<Array2<T>, TransformError>
where
    T: Copy,
    E: Transform1D<T> + ?Sized,
{
    admit_matrix(matrix)?;
    let mut mat_time = matrix.to_owned();
    reverse_plane(&mut mat_time, &|lane: &[T]| engine.reverse(lane))?;
    Ok(mat_time)
}

/// Separable 2-D forward limited to `to_level` levels per axis.
pub fn forward_2d_to_level<T, E>(
    engine: &E,
    matrix: &Array2<T>,
    to_level: Option<usize>,
) -> Result<Array2<T>, TransformError>
where
    T: Copy,
    E: LeveledTransform<T> + ?Sized,
{
    admit_matrix(matrix)?;
    let mut mat_hilb = matrix.to_owned();
    forward_plane(&mut mat_hilb, &|lane: &[T]| {
        engine.forward_to_level(lane, to_level)
    })?;
    Ok(mat_hilb)
}

/// Separable 2-D reverse of a forward limited to `from_level` levels.
pub fn reverse_2d_from_level<T, E>(
    engine: &E,
    matrix: &Array2<T>,
    from_level: Option<usize>,
) -> Result<Array2<T>, TransformError>
where
    T: Copy,
    E: LeveledTransform<T> + ?Sized,
{
    admit_matrix(matrix)?;
    let mut mat_time = matrix.to_owned();
    reverse_plane(&mut mat_time, &|lane: &[T]| {
        engine.reverse_from_level(lane, from_level)
    })?;
    Ok(mat_time)
}

/// Builds a matrix from nested rows, rejecting rows of unequal length.
pub fn matrix_from_rows<T: Copy>(rows: &[Vec<T>]) -> Result<Array2<T>, TransformError> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if n_rows == 0 || n_cols == 0 {
        return Err(TransformError::EmptyInput);
    }
    let mut flat = Vec::with_capacity(n_rows * n_cols);
    for (row, values) in rows.iter().enumerate() {
        if values.len() != n_cols {
            return Err(TransformError::RaggedInput {
                row,
                expected: n_cols,
                got: values.len(),
            });
        }
        flat.extend_from_slice(values);
    }
    Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|_| TransformError::RaggedInput {
        row: 0,
        expected: n_cols,
        got: n_cols,
    })
}

/// Levels the pyramid runs: both axes must still be splittable.
fn pyramid_levels(n_rows: usize, n_cols: usize, filt_len: usize, to_level: Option<usize>) -> usize {
    LevelPlan::new(n_rows, filt_len, to_level)
        .levels()
        .min(LevelPlan::new(n_cols, filt_len, to_level).levels())
}

fn block_axis<T, W>(
    block: &mut ndarray::ArrayViewMut2<'_, T>,
    axis: Axis,
    wavelet: &W,
    xform: &mut WaveletXForm1D<T>,
    forward: bool,
) where
    T: Scalar,
    W: WaveletFilter<T>,
{
    let mut buf = Vec::with_capacity(block.len_of(axis));
    for mut lane in block.lanes_mut(axis) {
        buf.clear();
        buf.extend(lane.iter().copied());
        if forward {
            xform.decompose(wavelet, &mut buf);
        } else {
            xform.reconstruct(wavelet, &mut buf);
        }
        lane.iter_mut().zip(buf.iter()).for_each(|(x, &y)| *x = y);
    }
}

/// Mallat 2-D decomposition: at each level, rows then columns of the
/// `rows/2^level × cols/2^level` top-left block are split once.
pub fn pyramid_forward_2d<T, W>(
    wavelet: &W,
    matrix: &Array2<T>,
    to_level: Option<usize>,
) -> Result<Array2<T>, TransformError>
where
    T: Scalar,
    W: WaveletFilter<T>,
{
    admit_matrix(matrix)?;
    let (n_rows, n_cols) = matrix.dim();
    let levels = pyramid_levels(n_rows, n_cols, wavelet.filt_len(), to_level);
    debug!(n_rows, n_cols, levels, "pyramid forward");

    let mut mat_hilb = matrix.to_owned();
    let mut xform = WaveletXForm1D::new(n_rows.max(n_cols));
    for level in 0..levels {
        let (hr, hc) = (n_rows >> level, n_cols >> level);
        let mut block = mat_hilb.slice_mut(s![..hr, ..hc]);
        block_axis(&mut block, Axis(1), wavelet, &mut xform, true);
        block_axis(&mut block, Axis(0), wavelet, &mut xform, true);
    }
    Ok(mat_hilb)
}

/// Inverse of [`pyramid_forward_2d`] for the same `from_level`.
pub fn pyramid_reverse_2d<T, W>(
    wavelet: &W,
    matrix: &Array2<T>,
    from_level: Option<usize>,
) -> Result<Array2<T>, TransformError>
where
    T: Scalar,
    W: WaveletFilter<T>,
{
    admit_matrix(matrix)?;
    let (n_rows, n_cols) = matrix.dim();
    let levels = pyramid_levels(n_rows, n_cols, wavelet.filt_len(), from_level);
    debug!(n_rows, n_cols, levels, "pyramid reverse");

    let mut mat_time = matrix.to_owned();
    let mut xform = WaveletXForm1D::new(n_rows.max(n_cols));
    for level in (0..levels).rev() {
        let (hr, hc) = (n_rows >> level, n_cols >> level);
        let mut block = mat_time.slice_mut(s![..hr, ..hc]);
        block_axis(&mut block, Axis(0), wavelet, &mut xform, false);
        block_axis(&mut block, Axis(1), wavelet, &mut xform, false);
    }
    Ok(mat_time)
}
