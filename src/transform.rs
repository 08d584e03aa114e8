use crate::{
    dft::DiscreteFourierTransform,
    dwt::WaveletTransform,
    dwt2, dwt3,
    egyptian::AncientEgyptian,
    error::TransformError,
    utils::Scalar,
};
use ndarray::{Array2, Array3};

/// A 1-D transform between the time domain and a same-length coefficient
/// domain. Neither direction mutates its input.
pub trait Transform1D<T> {
    fn forward(&self, signal: &[T]) -> Result<Vec<T>, TransformError>;
    fn reverse(&self, coeffs: &[T]) -> Result<Vec<T>, TransformError>;
}

/// A pyramid transform whose depth can be chosen per call.
///
/// `None` runs every level the length allows. A reverse only inverts a
/// forward that used the same limit.
pub trait LeveledTransform<T>: Transform1D<T> {
    fn forward_to_level(
        &self,
        signal: &[T],
        to_level: Option<usize>,
    ) -> Result<Vec<T>, TransformError>;
    fn reverse_from_level(
        &self,
        coeffs: &[T],
        from_level: Option<usize>,
    ) -> Result<Vec<T>, TransformError>;

    /// Shortest segment the transform does anything with.
    fn min_len(&self) -> usize;
}

/// Any transform a [`TransformConfig`](crate::config::TransformConfig) can build.
#[derive(Clone, Debug)]
pub enum Transform<T> {
    Wavelet(WaveletTransform<T>),
    Egyptian(AncientEgyptian<WaveletTransform<T>>),
    Fourier(DiscreteFourierTransform),
}

impl<T: Scalar> Transform<T> {
    /// Short label for logs and the CLI banner.
    pub fn describe(&self) -> String {
        match self {
            Transform::Wavelet(t) => format!("{:?} / {}", t.kind(), t.wavelet().name()),
            Transform::Egyptian(t) => format!(
                "{:?} / {} (any length)",
                t.inner().kind(),
                t.inner().wavelet().name()
            ),
            Transform::Fourier(_) => "DFT".to_string(),
        }
    }

    fn leveled(&self) -> Result<&dyn LeveledTransform<T>, TransformError> {
        match self {
            Transform::Wavelet(t) => Ok(t),
            Transform::Egyptian(t) => Ok(t),
            Transform::Fourier(_) => Err(TransformError::UnsupportedOption(
                "multi-dimensional input needs a wavelet transform".to_string(),
            )),
        }
    }

    pub fn forward_2d(&self, matrix: &Array2<T>) -> Result<Array2<T>, TransformError> {
        dwt2::forward_2d(self.leveled()?, matrix)
    }

    pub fn reverse_2d(&self, matrix: &Array2<T>) -> Result<Array2<T>, TransformError> {
        dwt2::reverse_2d(self.leveled()?, matrix)
    }

    pub fn forward_3d(&self, space: &Array3<T>) -> Result<Array3<T>, TransformError> {
        dwt3::forward_3d(self.leveled()?, space)
    }

    pub fn reverse_3d(&self, space: &Array3<T>) -> Result<Array3<T>, TransformError> {
        dwt3::reverse_3d(self.leveled()?, space)
    }
}

impl<T: Scalar> Transform1D<T> for Transform<T> {
    fn forward(&self, signal: &[T]) -> Result<Vec<T>, TransformError> {
        match self {
            Transform::Wavelet(t) => t.forward(signal),
            Transform::Egyptian(t) => t.forward(signal),
            Transform::Fourier(t) => t.forward(signal),
        }
    }

    fn reverse(&self, coeffs: &[T]) -> Result<Vec<T>, TransformError> {
        match self {
            Transform::Wavelet(t) => t.reverse(coeffs),
            Transform::Egyptian(t) => t.reverse(coeffs),
            Transform::Fourier(t) => t.reverse(coeffs),
        }
    }
}
