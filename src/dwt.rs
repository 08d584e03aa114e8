//! One-level filter-bank primitive and the two pyramid engines built on it.
//!
//! The primitive treats every segment as periodic: sample `k` past the end
//! wraps to `k - h`. Forward writes `[approx | detail]`, reverse accumulates
//! the overlapping filter support back into the time domain.

use crate::{
    error::TransformError,
    transform::{LeveledTransform, Transform1D},
    utils::{is_power_of_two, periodic_index, w_max_level, Scalar},
    wavelet::{Wavelet, WaveletFilter},
};
use tracing::{debug, trace};

/// Which sub-bands are split again at each level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// Fast wavelet transform: only the approximation band recurses.
    #[default]
    Fast,
    /// Wavelet packet transform: every sub-band recurses.
    Packet,
}

/// What a transform call does with input it cannot fully decompose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precondition {
    /// Too-short input is returned unchanged; a non-power-of-two length is
    /// decomposed only while the sub-band size stays even.
    #[default]
    PassThrough,
    /// Too-short or non-power-of-two input is an error.
    Reject,
}

/// Applies one analysis step to `arr_time` and returns `[approx | detail]`.
/// Segments shorter than the filter, or of odd length, are returned unchanged.
pub fn forward_step<T, W>(wavelet: &W, arr_time: &[T]) -> Vec<T>
where
    T: Scalar,
    W: WaveletFilter<T>,
{
    let mut out = arr_time.to_vec();
    WaveletXForm1D::new(out.len()).decompose(wavelet, &mut out);
    out
}

/// Applies one synthesis step to `[approx | detail]` and returns the time samples.
pub fn reverse_step<T, W>(wavelet: &W, arr_hilb: &[T]) -> Vec<T>
where
    T: Scalar,
    W: WaveletFilter<T>,
{
    let mut out = arr_hilb.to_vec();
    WaveletXForm1D::new(out.len()).reconstruct(wavelet, &mut out);
    out
}

/// One-level transform handler owning the scratch buffer reused across levels.
pub struct WaveletXForm1D<T> {
    scratch: Vec<T>,
}

impl<T: Scalar> WaveletXForm1D<T> {
    pub fn new(sig_len: usize) -> Self {
        Self {
            scratch: Vec::with_capacity(sig_len),
        }
    }

    fn runs_on<W: WaveletFilter<T>>(wavelet: &W, h: usize) -> bool {
        h >= wavelet.filt_len() && h % 2 == 0
    }

    /// Replaces `segment` with its approximation and detail halves.
    pub fn decompose<W: WaveletFilter<T>>(&mut self, wavelet: &W, segment: &mut [T]) {
        let h = segment.len();
        if !Self::runs_on(wavelet, h) {
            return;
        }
        let half = h / 2;
        let scales = wavelet.scales();
        let coeffs = wavelet.coeffs();

        self.scratch.clear();
        self.scratch.resize(h, T::zero());
        let (approx, detail) = self.scratch.split_at_mut(half);
        for i in 0..half {
            let mut a = T::zero();
            let mut d = T::zero();
            for (j, (&s, &c)) in scales.iter().zip(coeffs.iter()).enumerate() {
                let x = segment[periodic_index(2 * i + j, h)];
                a = a + x * s;
                d = d + x * c;
            }
            approx[i] = a;
            detail[i] = d;
        }
        segment.copy_from_slice(&self.scratch);
    }

    /// Inverse of [`decompose`](Self::decompose): accumulates both halves of
    /// `segment` back onto the periodic support and applies the synthesis gain.
    pub fn reconstruct<W: WaveletFilter<T>>(&mut self, wavelet: &W, segment: &mut [T]) {
        let h = segment.len();
        if !Self::runs_on(wavelet, h) {
            return;
        }
        let half = h / 2;
        let scales = wavelet.scales();
        let coeffs = wavelet.coeffs();

        self.scratch.clear();
        self.scratch.resize(h, T::zero());
        for i in 0..half {
            let a = segment[i];
            let d = segment[i + half];
            for (j, (&s, &c)) in scales.iter().zip(coeffs.iter()).enumerate() {
                let k = periodic_index(2 * i + j, h);
                self.scratch[k] = self.scratch[k] + (a * s + d * c);
            }
        }
        let gain = wavelet.synthesis_gain();
        segment
            .iter_mut()
            .zip(self.scratch.iter())
            .for_each(|(x, &r)| *x = r * gain);
    }
}

/// Sub-band sizes visited by a forward pass, largest first.
///
/// Reverse walks the same sizes smallest first, so a level-limited reverse
/// starts at the last size the matching forward produced
/// (`len / 2^(levels - 1)`), never at the bare filter length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelPlan {
    sizes: Vec<usize>,
}

impl LevelPlan {
    pub fn new(sig_len: usize, filt_len: usize, to_level: Option<usize>) -> Self {
        let max = w_max_level(sig_len, filt_len);
        let levels = to_level.map_or(max, |l| l.min(max));
        let sizes = (0..levels).map(|level| sig_len >> level).collect();
        Self { sizes }
    }

    /// Number of levels in the plan.
    pub fn levels(&self) -> usize {
        self.sizes.len()
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Size of the deepest sub-band, i.e. where reverse begins.
    pub fn smallest(&self) -> Option<usize> {
        self.sizes.last().copied()
    }
}

/// Multi-level FWT or WPT over a fixed filter bank.
#[derive(Clone, Debug)]
pub struct WaveletTransform<T> {
    wavelet: Wavelet<T>,
    kind: EngineKind,
    steps: Option<usize>,
    precondition: Precondition,
}

impl<T: Scalar> WaveletTransform<T> {
    /// Engine running all possible levels, passing through short input.
    pub fn new(wavelet: Wavelet<T>, kind: EngineKind) -> Self {
        Self {
            wavelet,
            kind,
            steps: None,
            precondition: Precondition::default(),
        }
    }

    /// Fast wavelet transform engine.
    pub fn fast(wavelet: Wavelet<T>) -> Self {
        Self::new(wavelet, EngineKind::Fast)
    }

    /// Wavelet packet transform engine.
    pub fn packet(wavelet: Wavelet<T>) -> Self {
        Self::new(wavelet, EngineKind::Packet)
    }

    /// Limits [`forward`](Transform1D::forward) and
    /// [`reverse`](Transform1D::reverse) to `steps` levels.
    pub fn with_steps(mut self, steps: usize) -> Result<Self, TransformError> {
        if steps < 1 {
            return Err(TransformError::InvalidSteps(steps));
        }
        self.steps = Some(steps);
        Ok(self)
    }

    pub fn with_precondition(mut self, precondition: Precondition) -> Self {
        self.precondition = precondition;
        self
    }

    pub fn wavelet(&self) -> &Wavelet<T> {
        &self.wavelet
    }

    pub fn kind(&self) -> EngineKind {
        self.kind
    }

    pub fn steps(&self) -> Option<usize> {
        self.steps
    }

    pub fn precondition(&self) -> Precondition {
        self.precondition
    }

    /// Levels an unlimited forward performs on `sig_len` samples.
    pub fn max_level(&self, sig_len: usize) -> usize {
        w_max_level(sig_len, self.wavelet.filt_len())
    }

    pub fn plan(&self, sig_len: usize, to_level: Option<usize>) -> LevelPlan {
        LevelPlan::new(sig_len, self.wavelet.filt_len(), to_level)
    }

    fn admit(&self, len: usize) -> Result<(), TransformError> {
        if len == 0 {
            return Err(TransformError::EmptyInput);
        }
        if self.precondition == Precondition::Reject {
            let min = self.wavelet.filt_len();
            if len < min {
                return Err(TransformError::TooShort { len, min });
            }
            if !is_power_of_two(len) {
                return Err(TransformError::NotPowerOfTwo(len));
            }
        }
        Ok(())
    }

    fn run_level(&self, xform: &mut WaveletXForm1D<T>, data: &mut [T], h: usize, forward: bool) {
        let bands: Vec<&mut [T]> = match self.kind {
            EngineKind::Fast => vec![&mut data[..h]],
            EngineKind::Packet => data.chunks_exact_mut(h).collect(),
        };
        for band in bands {
            if forward {
                xform.decompose(&self.wavelet, band);
            } else {
                xform.reconstruct(&self.wavelet, band);
            }
        }
    }

    fn run_forward(&self, data: &mut [T], sizes: &[usize], first_level: usize) {
        let mut xform = WaveletXForm1D::new(data.len());
        for (offset, &h) in sizes.iter().enumerate() {
            trace!(level = first_level + offset, size = h, "decompose");
            self.run_level(&mut xform, data, h, true);
        }
    }

    fn run_reverse(&self, data: &mut [T], sizes: &[usize]) {
        let mut xform = WaveletXForm1D::new(data.len());
        for (level, &h) in sizes.iter().enumerate().rev() {
            trace!(level, size = h, "reconstruct");
            self.run_level(&mut xform, data, h, false);
        }
    }

    /// Continues a forward transform on coefficients that already went
    /// through `done` levels, stopping at `to_level` (`None` = all levels).
    pub fn forward_resume(
        &self,
        coeffs: &[T],
        done: usize,
        to_level: Option<usize>,
    ) -> Result<Vec<T>, TransformError> {
        self.admit(coeffs.len())?;
        let plan = self.plan(coeffs.len(), to_level);
        if done > plan.levels() {
            return Err(TransformError::LevelOutOfRange {
                requested: done,
                max: plan.levels(),
            });
        }
        let mut arr_hilb = coeffs.to_vec();
        self.run_forward(&mut arr_hilb, &plan.sizes()[done..], done);
        Ok(arr_hilb)
    }
}

impl<T: Scalar> Transform1D<T> for WaveletTransform<T> {
    fn forward(&self, signal: &[T]) -> Result<Vec<T>, TransformError> {
        self.forward_to_level(signal, self.steps)
    }

    fn reverse(&self, coeffs: &[T]) -> Result<Vec<T>, TransformError> {
        self.reverse_from_level(coeffs, self.steps)
    }
}

impl<T: Scalar> LeveledTransform<T> for WaveletTransform<T> {
    fn forward_to_level(
        &self,
        signal: &[T],
        to_level: Option<usize>,
    ) -> Result<Vec<T>, TransformError> {
        self.admit(signal.len())?;
        let plan = self.plan(signal.len(), to_level);
        debug!(kind = ?self.kind, len = signal.len(), levels = plan.levels(), "forward");
        let mut arr_hilb = signal.to_vec();
        self.run_forward(&mut arr_hilb, plan.sizes(), 0);
        Ok(arr_hilb)
    }

    fn reverse_from_level(
        &self,
        coeffs: &[T],
        from_level: Option<usize>,
    ) -> Result<Vec<T>, TransformError> {
        self.admit(coeffs.len())?;
        let plan = self.plan(coeffs.len(), from_level);
        debug!(kind = ?self.kind, len = coeffs.len(), levels = plan.levels(), "reverse");
        let mut arr_time = coeffs.to_vec();
        self.run_reverse(&mut arr_time, plan.sizes());
        Ok(arr_time)
    }

    fn min_len(&self) -> usize {
        self.wavelet.filt_len()
    }
}
