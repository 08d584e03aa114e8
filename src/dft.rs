//! Direct O(N²) discrete Fourier transform.
//!
//! The real-valued [`Transform1D`] form reads interleaved `(re, im)` pairs.
//! Forward is normalised by the number of complex samples, reverse is not.

use crate::{error::TransformError, transform::Transform1D, utils::Scalar};
use num_complex::Complex;
use std::f64::consts::PI;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiscreteFourierTransform;

impl DiscreteFourierTransform {
    pub fn new() -> Self {
        Self
    }

    fn dft<T: Scalar>(input: &[Complex<T>], sign: f64) -> Vec<Complex<T>> {
        let n = input.len();
        let step = sign * 2. * PI / n as f64;
        (0..n)
            .map(|i| {
                let zero = Complex::new(T::zero(), T::zero());
                input.iter().enumerate().fold(zero, |acc, (k, &x)| {
                    // k*i wraps mod n so the phase stays small
                    let phase = T::lit(step * ((k * i) % n) as f64);
                    acc + x * Complex::from_polar(T::one(), phase)
                })
            })
            .collect()
    }

    /// Frequency spectrum of `signal`, scaled by `1/n`.
    pub fn forward_complex<T: Scalar>(
        &self,
        signal: &[Complex<T>],
    ) -> Result<Vec<Complex<T>>, TransformError> {
        if signal.is_empty() {
            return Err(TransformError::EmptyInput);
        }
        let n = T::lit(signal.len() as f64);
        Ok(Self::dft(signal, -1.).into_iter().map(|x| x.unscale(n)).collect())
    }

    /// Time samples of `spectrum`; exact inverse of [`forward_complex`](Self::forward_complex).
    pub fn reverse_complex<T: Scalar>(
        &self,
        spectrum: &[Complex<T>],
    ) -> Result<Vec<Complex<T>>, TransformError> {
        if spectrum.is_empty() {
            return Err(TransformError::EmptyInput);
        }
        Ok(Self::dft(spectrum, 1.))
    }
}

fn to_complex<T: Scalar>(interleaved: &[T]) -> Result<Vec<Complex<T>>, TransformError> {
    if interleaved.is_empty() {
        return Err(TransformError::EmptyInput);
    }
    if interleaved.len() % 2 != 0 {
        return Err(TransformError::OddSpectrumLength(interleaved.len()));
    }
    Ok(interleaved
        .chunks_exact(2)
        .map(|pair| Complex::new(pair[0], pair[1]))
        .collect())
}

fn to_interleaved<T: Scalar>(values: Vec<Complex<T>>) -> Vec<T> {
    values.into_iter().flat_map(|c| [c.re, c.im]).collect()
}

impl<T: Scalar> Transform1D<T> for DiscreteFourierTransform {
    fn forward(&self, signal: &[T]) -> Result<Vec<T>, TransformError> {
        let samples = to_complex(signal)?;
        debug!(n = samples.len(), "dft forward");
        Ok(to_interleaved(self.forward_complex(&samples)?))
    }

    fn reverse(&self, coeffs: &[T]) -> Result<Vec<T>, TransformError> {
        let spectrum = to_complex(coeffs)?;
        debug!(n = spectrum.len(), "dft reverse");
        Ok(to_interleaved(self.reverse_complex(&spectrum)?))
    }
}
