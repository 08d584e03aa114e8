//! # dwt-engine
//!
//! Multi-level discrete wavelet transforms on periodic signals.
//!
//! * [`WaveletTransform`] runs the fast wavelet transform (only the
//!   approximation band recurses) or the wavelet packet transform (every band
//!   recurses) over a [`Wavelet`] filter bank.
//! * [`AncientEgyptian`] lifts either engine to signals of any length.
//! * [`dwt2`] and [`dwt3`] extend any 1-D engine to matrices and spaces.
//! * [`DiscreteFourierTransform`] is the direct DFT, behind the same
//!   [`Transform1D`] trait.
//!
//! ```
//! use dwt_engine::{Transform1D, Wavelet, WaveletTransform, WaveletType};
//!
//! let fwt = WaveletTransform::fast(Wavelet::<f64>::new(WaveletType::Daub04));
//! let signal: Vec<f64> = (0..16).map(|i| (i as f64).cos()).collect();
//! let coeffs = fwt.forward(&signal).unwrap();
//! let back = fwt.reverse(&coeffs).unwrap();
//! assert!(signal.iter().zip(&back).all(|(a, b)| (a - b).abs() < 1e-12));
//! ```

pub mod config;
pub mod dft;
pub mod dwt;
pub mod dwt2;
pub mod dwt3;
pub mod egyptian;
mod error;
pub mod transform;
pub mod utils;
pub mod wavelet;

pub use config::{TransformConfig, TransformKind};
pub use dft::DiscreteFourierTransform;
pub use dwt::{forward_step, reverse_step, EngineKind, LevelPlan, Precondition, WaveletTransform};
pub use egyptian::{AncientEgyptian, SegmentPlan};
pub use error::TransformError;
pub use transform::{LeveledTransform, Transform, Transform1D};
pub use utils::{w_max_level, Scalar};
pub use wavelet::{Wavelet, WaveletFilter, WaveletType};
