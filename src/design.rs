use crate::math::{ceil, cos, fabs, log10, pow, sin};
use crate::window::{FilterWindow, KaiserWindow};
use alloc::vec::Vec;
use core::f64::consts::PI;
use num_complex::Complex64;
use thiserror::Error;

//--- Specification ------------------------------------------------------------

/// Specification of a low-pass filter design.
///
/// All frequencies are in Hz, the stopband ripple in dB. A specification is
/// physically realizable only when the whole transition band fits below the
/// Nyquist rate:
/// ```text
///    cutoff + transition_width / 2  <  sample_rate / 2
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Cutoff frequency in Hz (half-amplitude point of the designed filter).
    pub cutoff: f64,
    /// Width of the passband-to-stopband transition in Hz.
    pub transition_width: f64,
    /// Minimum stopband suppression in dB.
    pub stopband_ripple_db: f64,
}

impl FilterSpec {
    /// Half the sample rate, the highest representable frequency.
    #[must_use]
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Checks every field against its domain and the Nyquist invariant.
    ///
    /// # Errors
    /// Returns the [`InvalidSpecification`] naming the first violated
    /// constraint.
    pub fn validate(&self) -> Result<(), InvalidSpecification> {
        if self.sample_rate <= 0.0 {
            return Err(InvalidSpecification::NonPositiveSampleRate(
                self.sample_rate,
            ));
        }
        if self.cutoff <= 0.0 {
            return Err(InvalidSpecification::NonPositiveCutoff(self.cutoff));
        }
        if self.transition_width <= 0.0 {
            return Err(InvalidSpecification::NonPositiveTransitionWidth(
                self.transition_width,
            ));
        }
        if self.stopband_ripple_db <= 0.0 {
            return Err(InvalidSpecification::NonPositiveRipple(
                self.stopband_ripple_db,
            ));
        }
        if self.cutoff + self.transition_width / 2.0 >= self.nyquist() {
            return Err(InvalidSpecification::BeyondNyquist {
                cutoff: self.cutoff,
                transition_width: self.transition_width,
                nyquist: self.nyquist(),
            });
        }
        Ok(())
    }
}

/// A filter specification that violates its domain or the Nyquist invariant.
///
/// Each variant names the violated constraint and carries the offending
/// value, so the message identifies what to fix.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidSpecification {
    #[error("sample rate must be positive, got {0} Hz")]
    NonPositiveSampleRate(f64),
    #[error("cutoff frequency must be positive, got {0} Hz")]
    NonPositiveCutoff(f64),
    #[error("transition width must be positive, got {0} Hz")]
    NonPositiveTransitionWidth(f64),
    #[error("stopband ripple must be positive, got {0} dB")]
    NonPositiveRipple(f64),
    #[error(
        "cutoff {cutoff} Hz plus half the transition width {transition_width} Hz \
         must stay below the Nyquist rate {nyquist} Hz"
    )]
    BeyondNyquist {
        cutoff: f64,
        transition_width: f64,
        nyquist: f64,
    },
    #[error("normalized transition width must be in (0, 1), got {0}")]
    WidthOutOfRange(f64),
    #[error("cutoff frequency {cutoff} Hz must stay below the Nyquist rate {nyquist} Hz")]
    CutoffBeyondNyquist { cutoff: f64, nyquist: f64 },
    #[error("derived filter length is not positive; the ripple/width tradeoff needs no taps")]
    NoTaps,
}

//--- Parameter derivation -----------------------------------------------------

/// Filter length and Kaiser shape parameter derived from a ripple/width
/// specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignParams {
    /// Number of taps; odd, for a Type-I linear-phase filter.
    pub num_taps: usize,
    /// Kaiser window shape parameter.
    pub beta: f64,
}

/// Derives the filter length and Kaiser beta meeting a stopband suppression
/// of `ripple_db` over a transition band of `normalized_width` (transition
/// width divided by the Nyquist rate).
///
/// Kaiser's empirical formulas, as described in Oppenheim & Schafer,
/// "Discrete-Time Signal Processing", ch. 7:
/// ```text
///    beta = 0.1102 (A - 8.7)                             A > 50
///           0.5842 (A - 21)^0.4 + 0.07886 (A - 21)       21 <= A <= 50
///           0                                            A < 21
///    N    = ceil((A - 8) / (2.285 pi dw)) + 1
/// ```
/// with `dw` the transition width in units of the Nyquist rate. An even `N`
/// is bumped to the next odd value.
///
/// # Errors
/// [`InvalidSpecification`] when `ripple_db <= 0`, `normalized_width` is
/// outside `(0, 1)`, or the derived length is not positive.
#[allow(clippy::cast_sign_loss)]
pub fn kaiser_order(
    ripple_db: f64,
    normalized_width: f64,
) -> Result<DesignParams, InvalidSpecification> {
    if ripple_db <= 0.0 {
        return Err(InvalidSpecification::NonPositiveRipple(ripple_db));
    }
    if normalized_width <= 0.0 || normalized_width >= 1.0 {
        return Err(InvalidSpecification::WidthOutOfRange(normalized_width));
    }
    let beta = if ripple_db > 50.0 {
        0.1102 * (ripple_db - 8.7)
    } else if ripple_db >= 21.0 {
        0.5842 * pow(ripple_db - 21.0, 0.4) + 0.07886 * (ripple_db - 21.0)
    } else {
        0.0
    };
    let length = ceil((ripple_db - 8.0) / (2.285 * PI * normalized_width)) + 1.0;
    if length < 1.0 {
        return Err(InvalidSpecification::NoTaps);
    }
    let mut num_taps = length as usize;
    if num_taps % 2 == 0 {
        num_taps += 1;
    }
    Ok(DesignParams { num_taps, beta })
}

//--- Coefficient generation ---------------------------------------------------

/// Ideal windowed-sinc low-pass taps, before DC normalization.
///
/// `cutoff_ratio` is the cutoff frequency in units of the Nyquist rate, in
/// `(0, 1)`. The sinc is centered at `(num_taps - 1) / 2` and multiplied
/// pointwise by `window`.
#[must_use]
pub fn ideal_lowpass<W: FilterWindow>(num_taps: usize, cutoff_ratio: f64, window: &W) -> Vec<f64> {
    let alpha = (num_taps - 1) as f64 / 2.0;
    (0..num_taps)
        .map(|n| {
            let x = n as f64 - alpha;
            let tap = if fabs(x) < 1e-12 {
                cutoff_ratio
            } else {
                sin(PI * cutoff_ratio * x) / (PI * x)
            };
            tap * window.get(n)
        })
        .collect()
}

/// Generates the tap coefficients of a Kaiser-windowed low-pass filter.
///
/// The returned sequence has length `num_taps`, is symmetric, and is
/// normalized to unity gain at DC (the coefficients sum to 1.0).
///
/// # Errors
/// [`InvalidSpecification`] when `num_taps < 1`, `cutoff <= 0`, or `cutoff`
/// is at or above the Nyquist rate.
pub fn kaiser_lowpass(
    num_taps: usize,
    cutoff: f64,
    sample_rate: f64,
    beta: f64,
) -> Result<Vec<f64>, InvalidSpecification> {
    if num_taps < 1 {
        return Err(InvalidSpecification::NoTaps);
    }
    if cutoff <= 0.0 {
        return Err(InvalidSpecification::NonPositiveCutoff(cutoff));
    }
    let nyquist = sample_rate / 2.0;
    if cutoff >= nyquist {
        return Err(InvalidSpecification::CutoffBeyondNyquist { cutoff, nyquist });
    }
    let window = KaiserWindow::new(num_taps, beta);
    let mut taps = ideal_lowpass(num_taps, cutoff / nyquist, &window);
    let sum: f64 = taps.iter().sum();
    for tap in &mut taps {
        *tap /= sum;
    }
    Ok(taps)
}

//--- Full pipeline ------------------------------------------------------------

/// A designed FIR low-pass filter: the derived parameters plus its taps.
#[derive(Debug, Clone, PartialEq)]
pub struct FirFilter {
    pub params: DesignParams,
    pub taps: Vec<f64>,
}

/// Designs a low-pass filter for `spec`: validates it, derives the filter
/// length and Kaiser beta from the ripple/width requirement, and generates
/// the coefficients.
///
/// # Errors
/// [`InvalidSpecification`] naming the violated constraint; no coefficients
/// are produced on failure.
pub fn design_lowpass(spec: &FilterSpec) -> Result<FirFilter, InvalidSpecification> {
    spec.validate()?;
    let params = kaiser_order(spec.stopband_ripple_db, spec.transition_width / spec.nyquist())?;
    let taps = kaiser_lowpass(params.num_taps, spec.cutoff, spec.sample_rate, params.beta)?;
    Ok(FirFilter { params, taps })
}

//--- Response diagnostics -----------------------------------------------------

/// Evaluates the frequency response `H(e^jw)` of a tap sequence at
/// `frequency` Hz for the given sample rate.
#[must_use]
pub fn frequency_response(taps: &[f64], frequency: f64, sample_rate: f64) -> Complex64 {
    let omega = 2.0 * PI * frequency / sample_rate;
    let mut response = Complex64::new(0.0, 0.0);
    for (n, &tap) in taps.iter().enumerate() {
        let phase = -(omega * n as f64);
        response += tap * Complex64::new(cos(phase), sin(phase));
    }
    response
}

/// Magnitude of the frequency response at `frequency` Hz, in dB.
#[must_use]
pub fn magnitude_db(taps: &[f64], frequency: f64, sample_rate: f64) -> f64 {
    20.0 * log10(frequency_response(taps, frequency, sample_rate).norm())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::rngs::mock::StepRng;

    #[test]
    fn beta_branches() {
        // > 50 dB branch
        let params = kaiser_order(70.0, 0.025).unwrap();
        assert!((params.beta - 0.1102 * 61.3).abs() < 1e-12);
        // 21..=50 dB branch
        let params = kaiser_order(40.0, 0.1).unwrap();
        let expected = 0.5842 * 19.0_f64.powf(0.4) + 0.07886 * 19.0;
        assert!((params.beta - expected).abs() < 1e-12);
        // < 21 dB branch degenerates to the rectangular window
        let params = kaiser_order(15.0, 0.1).unwrap();
        assert!(params.beta.abs() < 1e-12);
    }

    #[test]
    fn derived_length_is_odd() {
        let params = kaiser_order(70.0, 0.025).unwrap();
        assert_eq!(params.num_taps, 347);
        // 69 dB over 3650/240000 lands on an even estimate; bumped to odd
        let params = kaiser_order(69.0, 3_650.0 / 240_000.0).unwrap();
        assert_eq!(params.num_taps, 561);
    }

    #[test]
    fn length_grows_with_suppression() {
        let mut last = 0;
        for ripple_db in 10..90 {
            let params = kaiser_order(f64::from(ripple_db), 0.05).unwrap();
            assert!(
                params.num_taps >= last,
                "tap count dropped at {ripple_db} dB"
            );
            last = params.num_taps;
        }
    }

    #[test]
    fn out_of_domain_order_inputs_are_rejected() {
        assert!(matches!(
            kaiser_order(0.0, 0.1),
            Err(InvalidSpecification::NonPositiveRipple(_))
        ));
        assert!(matches!(
            kaiser_order(60.0, 0.0),
            Err(InvalidSpecification::WidthOutOfRange(_))
        ));
        assert!(matches!(
            kaiser_order(60.0, 1.0),
            Err(InvalidSpecification::WidthOutOfRange(_))
        ));
    }

    #[test]
    fn rectangular_taps_match_sinc_by_hand() {
        // beta = 0, cutoff at half Nyquist: the unnormalized taps are
        // [0, 1/pi, 1/2, 1/pi, 0], sum 1/2 + 2/pi.
        let taps = kaiser_lowpass(5, 12_000.0, 48_000.0, 0.0).unwrap();
        let sum = 0.5 + 2.0 / PI;
        let expected = [0.0, (1.0 / PI) / sum, 0.5 / sum, (1.0 / PI) / sum, 0.0];
        for (tap, want) in taps.iter().zip(expected) {
            assert!((tap - want).abs() < 1e-12, "got {tap}, want {want}");
        }
    }

    #[test]
    fn taps_sum_to_unity_and_are_symmetric() {
        let taps = kaiser_lowpass(101, 2_000.0, 48_000.0, 6.0).unwrap();
        let sum: f64 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        for i in 0..taps.len() / 2 {
            assert!(
                (taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-12,
                "asymmetry at index {i}"
            );
        }
    }

    #[test]
    fn out_of_domain_generator_inputs_are_rejected() {
        assert!(matches!(
            kaiser_lowpass(0, 2_000.0, 48_000.0, 6.0),
            Err(InvalidSpecification::NoTaps)
        ));
        assert!(matches!(
            kaiser_lowpass(11, 0.0, 48_000.0, 6.0),
            Err(InvalidSpecification::NonPositiveCutoff(_))
        ));
        assert!(matches!(
            kaiser_lowpass(11, 24_000.0, 48_000.0, 6.0),
            Err(InvalidSpecification::CutoffBeyondNyquist { .. })
        ));
    }

    #[test]
    fn nyquist_invariant_is_enforced() {
        let spec = FilterSpec {
            sample_rate: 48_000.0,
            cutoff: 23_000.0,
            transition_width: 4_000.0,
            stopband_ripple_db: 60.0,
        };
        assert!(matches!(
            design_lowpass(&spec),
            Err(InvalidSpecification::BeyondNyquist { .. })
        ));
    }

    #[test]
    fn dc_gain_is_unity() {
        let taps = kaiser_lowpass(201, 4_000.0, 96_000.0, 7.0).unwrap();
        let response = frequency_response(&taps, 0.0, 96_000.0);
        assert!((response.re - 1.0).abs() < 1e-9);
        assert!(response.im.abs() < 1e-9);
    }

    #[test]
    fn random_valid_specs_hold_the_design_properties() {
        // deterministic, portable sweep
        let mut rng = StepRng::new(0, 0x9e37_79b9_7f4a_7c15);
        for _ in 0..50 {
            let sample_rate = rng.random_range(8_000.0..4_000_000.0);
            let cutoff = rng.random_range(0.02..0.35) * sample_rate;
            let transition_width = rng.random_range(0.01..0.1) * sample_rate;
            let stopband_ripple_db = rng.random_range(10.0..90.0);
            let spec = FilterSpec {
                sample_rate,
                cutoff,
                transition_width,
                stopband_ripple_db,
            };
            let filter = design_lowpass(&spec).unwrap();
            assert_eq!(filter.params.num_taps % 2, 1);
            assert!(filter.params.beta >= 0.0);
            assert_eq!(filter.taps.len(), filter.params.num_taps);
            let sum: f64 = filter.taps.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            for i in 0..filter.taps.len() / 2 {
                let mirrored = filter.taps[filter.taps.len() - 1 - i];
                assert!((filter.taps[i] - mirrored).abs() < 1e-12);
            }
        }
    }
}
