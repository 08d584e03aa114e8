//! Configuration for building a transform.

use crate::{
    dft::DiscreteFourierTransform,
    dwt::{EngineKind, Precondition, WaveletTransform},
    egyptian::AncientEgyptian,
    error::TransformError,
    transform::Transform,
    utils::Scalar,
    wavelet::{Wavelet, WaveletType},
};
use std::{fmt, str::FromStr};
use tracing::debug;

/// Transform family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Direct discrete Fourier transform.
    Dft,
    /// Fast wavelet transform.
    #[default]
    Fwt,
    /// Wavelet packet transform.
    Wpt,
}

impl TransformKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dft => "dft",
            Self::Fwt => "fwt",
            Self::Wpt => "wpt",
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dft" => Ok(Self::Dft),
            "fwt" => Ok(Self::Fwt),
            "wpt" => Ok(Self::Wpt),
            _ => Err(TransformError::UnknownTransform(s.to_string())),
        }
    }
}

/// Configuration for a 1-D (and, for wavelet kinds, 2-D/3-D) transform.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use dwt_engine::{TransformConfig, TransformKind, Transform1D, WaveletType};
///
/// let t = TransformConfig::new(TransformKind::Fwt)
///     .with_wavelet(WaveletType::Haar02)
///     .with_any_length(true)
///     .build::<f64>()
///     .unwrap();
///
/// let hilb = t.forward(&[1.0; 7]).unwrap();
/// assert!((hilb[0] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    kind: TransformKind,
    /// Filter bank for the wavelet kinds.
    wavelet: WaveletType,
    /// Level limit; `None` runs every level.
    steps: Option<usize>,
    precondition: Precondition,
    /// Wraps the engine in the Ancient Egyptian adapter.
    any_length: bool,
}

impl TransformConfig {
    /// Creates a new configuration for `kind`.
    ///
    /// Defaults: Haar02, unlimited steps, pass-through preconditions,
    /// power-of-two lengths only.
    pub fn new(kind: TransformKind) -> Self {
        Self {
            kind,
            wavelet: WaveletType::Haar02,
            steps: None,
            precondition: Precondition::default(),
            any_length: false,
        }
    }

    pub fn with_wavelet(mut self, wavelet: WaveletType) -> Self {
        self.wavelet = wavelet;
        self
    }

    /// Limits the decomposition depth. Zero is rejected by [`validate`](Self::validate).
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn with_precondition(mut self, precondition: Precondition) -> Self {
        self.precondition = precondition;
        self
    }

    /// Accepts input of any length by splitting it into power-of-two segments.
    pub fn with_any_length(mut self, any_length: bool) -> Self {
        self.any_length = any_length;
        self
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn wavelet(&self) -> WaveletType {
        self.wavelet
    }

    pub fn steps(&self) -> Option<usize> {
        self.steps
    }

    pub fn precondition(&self) -> Precondition {
        self.precondition
    }

    pub fn any_length(&self) -> bool {
        self.any_length
    }

    /// Validates this configuration.
    ///
    /// Returns an error if steps is zero, or if a DFT is combined with a
    /// level limit or the any-length adapter.
    pub fn validate(&self) -> Result<(), TransformError> {
        if self.steps == Some(0) {
            return Err(TransformError::InvalidSteps(0));
        }
        if self.kind == TransformKind::Dft {
            if self.steps.is_some() {
                return Err(TransformError::UnsupportedOption(
                    "dft has no decomposition levels".to_string(),
                ));
            }
            if self.any_length {
                return Err(TransformError::UnsupportedOption(
                    "dft does not take the any-length adapter".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Validates, then builds the transform.
    pub fn build<T: Scalar>(&self) -> Result<Transform<T>, TransformError> {
        self.validate()?;
        debug!(
            kind = %self.kind,
            wavelet = %self.wavelet,
            steps = ?self.steps,
            any_length = self.any_length,
            "building transform"
        );
        let engine_kind = match self.kind {
            TransformKind::Dft => return Ok(Transform::Fourier(DiscreteFourierTransform::new())),
            TransformKind::Fwt => EngineKind::Fast,
            TransformKind::Wpt => EngineKind::Packet,
        };
        let mut engine = WaveletTransform::new(Wavelet::new(self.wavelet), engine_kind)
            .with_precondition(self.precondition);
        if let Some(steps) = self.steps {
            engine = engine.with_steps(steps)?;
        }
        Ok(if self.any_length {
            Transform::Egyptian(AncientEgyptian::new(engine))
        } else {
            Transform::Wavelet(engine)
        })
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self::new(TransformKind::default())
    }
}
