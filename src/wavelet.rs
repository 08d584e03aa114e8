//! Filter banks: the named wavelet catalog and the coefficient pair every
//! engine runs on.
//!
//! | Wavelet                           | Taps | Orthonormal |
//! |-----------------------------------|------|-------------|
//! | [`WaveletType::Haar02`]           | 2    | yes         |
//! | [`WaveletType::Haar02Orthogonal`] | 2    | no (gain ½) |
//! | [`WaveletType::Lege02`]           | 2    | yes         |
//! | [`WaveletType::Daub04`]           | 4    | yes         |
//! | [`WaveletType::Lege04`]           | 4    | no          |
//! | [`WaveletType::Daub06`]           | 6    | yes         |
//! | [`WaveletType::Lege06`]           | 6    | no          |
//! | [`WaveletType::Coif06`]           | 6    | yes         |
//! | [`WaveletType::Daub08`]           | 8    | yes         |

use crate::{error::TransformError, utils::Scalar};
use std::{fmt, str::FromStr};

const SQRT2: f64 = std::f64::consts::SQRT_2;

/// Named wavelet families with a built-in coefficient table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveletType {
    /// Orthonormal Haar wavelet.
    Haar02,
    /// Haar wavelet with unit taps; reconstruction halves the sum.
    Haar02Orthogonal,
    /// Daubechies, two vanishing moments.
    Daub04,
    /// Daubechies, three vanishing moments.
    Daub06,
    /// Daubechies, four vanishing moments.
    Daub08,
    /// Legendre, two taps.
    Lege02,
    /// Legendre, four taps.
    Lege04,
    /// Legendre, six taps.
    Lege06,
    /// Coiflet, six taps.
    Coif06,
}

impl WaveletType {
    /// Every catalog entry, shortest filter first.
    pub const ALL: [WaveletType; 9] = [
        WaveletType::Haar02,
        WaveletType::Haar02Orthogonal,
        WaveletType::Lege02,
        WaveletType::Daub04,
        WaveletType::Lege04,
        WaveletType::Daub06,
        WaveletType::Lege06,
        WaveletType::Coif06,
        WaveletType::Daub08,
    ];

    /// Catalog name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Haar02 => "haar02",
            Self::Haar02Orthogonal => "haar02orthogonal",
            Self::Daub04 => "daub04",
            Self::Daub06 => "daub06",
            Self::Daub08 => "daub08",
            Self::Lege02 => "lege02",
            Self::Lege04 => "lege04",
            Self::Lege06 => "lege06",
            Self::Coif06 => "coif06",
        }
    }

    /// Minimal segment length the filter operates on.
    pub fn wave_length(&self) -> usize {
        match self {
            Self::Haar02 | Self::Haar02Orthogonal | Self::Lege02 => 2,
            Self::Daub04 | Self::Lege04 => 4,
            Self::Daub06 | Self::Lege06 | Self::Coif06 => 6,
            Self::Daub08 => 8,
        }
    }

    /// Scaling (low-pass) taps in f64.
    fn scales(&self) -> Vec<f64> {
        match self {
            Self::Haar02 => vec![1. / SQRT2, 1. / SQRT2],
            Self::Haar02Orthogonal => vec![1., 1.],
            Self::Lege02 => vec![-1. / SQRT2, -1. / SQRT2],
            Self::Daub04 => {
                let r3 = 3f64.sqrt();
                vec![
                    (1. + r3) / 4. / SQRT2,
                    (3. + r3) / 4. / SQRT2,
                    (3. - r3) / 4. / SQRT2,
                    (1. - r3) / 4. / SQRT2,
                ]
            }
            Self::Daub06 => {
                let r10 = 10f64.sqrt();
                let a = (5. + 2. * r10).sqrt();
                vec![
                    (1. + r10 + a) / 16. / SQRT2,
                    (5. + r10 + 3. * a) / 16. / SQRT2,
                    (10. - 2. * r10 + 2. * a) / 16. / SQRT2,
                    (10. - 2. * r10 - 2. * a) / 16. / SQRT2,
                    (5. + r10 - 3. * a) / 16. / SQRT2,
                    (1. + r10 - a) / 16. / SQRT2,
                ]
            }
            Self::Daub08 => vec![
                0.2303778133088965,
                0.7148465705529156,
                0.6308807679298589,
                -0.0279837694168599,
                -0.1870348117190930,
                0.0308413818355607,
                0.0328830116668852,
                -0.0105974017850690,
            ],
            Self::Lege04 => [-5., -3., -3., -5.]
                .iter()
                .map(|x| x / 8. / SQRT2)
                .collect(),
            Self::Lege06 => [-63., -35., -30., -30., -35., -63.]
                .iter()
                .map(|x| x / 128. / SQRT2)
                .collect(),
            Self::Coif06 => {
                let r15 = 15f64.sqrt();
                [r15 - 3., 1. - r15, 6. - 2. * r15, 2. * r15 + 6., r15 + 13., 9. - r15]
                    .iter()
                    .map(|x| SQRT2 * x / 32.)
                    .collect()
            }
        }
    }

    fn synthesis_gain(&self) -> f64 {
        match self {
            Self::Haar02Orthogonal => 0.5,
            _ => 1.0,
        }
    }
}

impl fmt::Display for WaveletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveletType {
    type Err = TransformError;

    /// Case-insensitive lookup by catalog name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        WaveletType::ALL
            .iter()
            .copied()
            .find(|w| w.name() == lower)
            .ok_or_else(|| TransformError::UnknownWavelet(s.to_string()))
    }
}

/// Read access to a filter bank, which is all the transform primitive needs.
pub trait WaveletFilter<T> {
    /// Number of taps, i.e. the minimal segment length.
    fn filt_len(&self) -> usize;
    /// Scaling (low-pass) taps.
    fn scales(&self) -> &[T];
    /// Wavelet (high-pass) taps.
    fn coeffs(&self) -> &[T];
    /// Factor applied to every reconstructed sample.
    fn synthesis_gain(&self) -> T;
}

/// An immutable analysis/synthesis filter pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Wavelet<T> {
    wavelet_type: Option<WaveletType>,
    scales: Vec<T>,
    coeffs: Vec<T>,
    synthesis_gain: T,
}

impl<T: Scalar> Wavelet<T> {
    /// Builds the bank for a catalog entry. The high-pass taps follow the
    /// mirror rule `coeffs[j] = (-1)^j * scales[L-1-j]`.
    pub fn new(wavelet_type: WaveletType) -> Self {
        let scales: Vec<f64> = wavelet_type.scales();
        let coeffs = mirror(&scales);
        Self {
            wavelet_type: Some(wavelet_type),
            scales: scales.into_iter().map(T::lit).collect(),
            coeffs: coeffs.into_iter().map(T::lit).collect(),
            synthesis_gain: T::lit(wavelet_type.synthesis_gain()),
        }
    }

    /// Builds a custom bank. Both tap vectors must share one even length >= 2.
    pub fn from_coefficients(
        scales: Vec<T>,
        coeffs: Vec<T>,
        synthesis_gain: T,
    ) -> Result<Self, TransformError> {
        let len = scales.len();
        if len < 2 || len % 2 != 0 || coeffs.len() != len {
            return Err(TransformError::InvalidFilter {
                scales: len,
                coeffs: coeffs.len(),
            });
        }
        Ok(Self {
            wavelet_type: None,
            scales,
            coeffs,
            synthesis_gain,
        })
    }

    /// Catalog entry this bank was built from; `None` for custom banks.
    pub fn wavelet_type(&self) -> Option<WaveletType> {
        self.wavelet_type
    }

    /// Catalog name, or "custom".
    pub fn name(&self) -> &'static str {
        self.wavelet_type.map_or("custom", |w| w.name())
    }

    /// Checks the orthonormality conditions within `tol`:
    /// `|Σ scales| = √2`, `Σ coeffs = 0`, `Σ scales² = 1`. The sign of the
    /// scaling taps is free (the Legendre tables are negative).
    pub fn is_orthonormal(&self, tol: T) -> bool {
        let sum_s = self.scales.iter().fold(T::zero(), |acc, &x| acc + x);
        let sum_c = self.coeffs.iter().fold(T::zero(), |acc, &x| acc + x);
        let energy = self.scales.iter().fold(T::zero(), |acc, &x| acc + x * x);
        (sum_s.abs() - T::lit(SQRT2)).abs() <= tol
            && sum_c.abs() <= tol
            && (energy - T::one()).abs() <= tol
    }
}

impl<T: Scalar> WaveletFilter<T> for Wavelet<T> {
    fn filt_len(&self) -> usize {
        self.scales.len()
    }

    fn scales(&self) -> &[T] {
        &self.scales
    }

    fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    fn synthesis_gain(&self) -> T {
        self.synthesis_gain
    }
}

fn mirror(scales: &[f64]) -> Vec<f64> {
    let len = scales.len();
    (0..len)
        .map(|j| {
            let tap = scales[len - 1 - j];
            if j % 2 == 0 {
                tap
            } else {
                -tap
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lengths_match_tables() {
        for w in WaveletType::ALL {
            let bank = Wavelet::<f64>::new(w);
            assert_eq!(bank.filt_len(), w.wave_length(), "{w}");
            assert_eq!(bank.coeffs().len(), w.wave_length(), "{w}");
        }
    }

    #[test]
    fn orthonormal_families() {
        for w in [
            WaveletType::Haar02,
            WaveletType::Lege02,
            WaveletType::Daub04,
            WaveletType::Daub06,
            WaveletType::Daub08,
            WaveletType::Coif06,
        ] {
            assert!(Wavelet::<f64>::new(w).is_orthonormal(1e-14), "{w}");
        }
        assert!(!Wavelet::<f64>::new(WaveletType::Lege04).is_orthonormal(1e-10));
        assert!(!Wavelet::<f64>::new(WaveletType::Haar02Orthogonal).is_orthonormal(1e-10));
    }

    #[test]
    fn haar_taps() {
        let w = Wavelet::<f64>::new(WaveletType::Haar02);
        let h = 1. / SQRT2;
        assert_eq!(w.scales(), &[h, h]);
        assert_eq!(w.coeffs(), &[h, -h]);
        assert_eq!(w.synthesis_gain(), 1.0);

        let o = Wavelet::<f64>::new(WaveletType::Haar02Orthogonal);
        assert_eq!(o.scales(), &[1., 1.]);
        assert_eq!(o.coeffs(), &[1., -1.]);
        assert_eq!(o.synthesis_gain(), 0.5);
    }

    #[test]
    fn mirror_rule() {
        let w = Wavelet::<f64>::new(WaveletType::Daub06);
        let s = w.scales();
        let c = w.coeffs();
        assert_eq!(c[0], s[5]);
        assert_eq!(c[1], -s[4]);
        assert_eq!(c[4], s[1]);
        assert_eq!(c[5], -s[0]);
    }

    #[test]
    fn parse_names_case_insensitive() {
        assert_eq!("HAAR02".parse::<WaveletType>(), Ok(WaveletType::Haar02));
        assert_eq!(" Daub04 ".parse::<WaveletType>(), Ok(WaveletType::Daub04));
        assert_eq!("coif06".parse::<WaveletType>(), Ok(WaveletType::Coif06));
        for w in WaveletType::ALL {
            assert_eq!(w.to_string().parse::<WaveletType>(), Ok(w));
        }
        assert_eq!(
            "daub99".parse::<WaveletType>(),
            Err(TransformError::UnknownWavelet("daub99".into()))
        );
    }

    #[test]
    fn custom_bank_validation() {
        assert!(Wavelet::from_coefficients(vec![1.0f64, 1.0], vec![1.0, -1.0], 0.5).is_ok());
        assert_eq!(
            Wavelet::from_coefficients(vec![1.0f64], vec![1.0], 1.0),
            Err(TransformError::InvalidFilter {
                scales: 1,
                coeffs: 1
            })
        );
        assert_eq!(
            Wavelet::from_coefficients(vec![1.0f64, 1.0, 1.0], vec![1.0, 1.0, 1.0], 1.0),
            Err(TransformError::InvalidFilter {
                scales: 3,
                coeffs: 3
            })
        );
        assert!(Wavelet::from_coefficients(vec![1.0f64, 1.0], vec![1.0], 1.0).is_err());
    }

    #[test]
    fn f32_bank() {
        let w = Wavelet::<f32>::new(WaveletType::Daub04);
        assert!(w.is_orthonormal(1e-5));
    }
}
