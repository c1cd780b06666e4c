//! Window functions for windowed-sinc filter design.

use crate::math::sqrt;
use alloc::vec;
use alloc::vec::Vec;

/// A window usable by the windowed-sinc design routines.
///
/// Implementations return one window value per tap index, so the sinc core
/// stays independent of the window shape.
pub trait FilterWindow {
    /// Returns the window value at tap index `n`.
    fn get(&self, n: usize) -> f64;
}

/// Modified Bessel function of the first kind, order zero.
///
/// Power-series expansion. Converges quickly for the beta range that occurs
/// in filter design (roughly 0 to 15); the term cutoff keeps the relative
/// error well below 1e-12.
#[must_use]
pub fn bessel_i0(x: f64) -> f64 {
    let mut sum = 1.0;
    let mut term = 1.0;
    let x_sq_over_4 = x * x / 4.0;
    for k in 1..=30 {
        term *= x_sq_over_4 / ((k * k) as f64);
        sum += term;
        if term < sum * 1e-12 {
            break;
        }
    }
    sum
}

/// A symmetric Kaiser window with shape parameter `beta`.
///
/// # Formula
/// ```text
///    w[n] = I0(beta * sqrt(1 - ((n - a) / a)^2)) / I0(beta),  a = (N - 1) / 2
/// ```
/// `beta = 0` degenerates to the rectangular window.
pub struct KaiserWindow {
    values: Vec<f64>,
}

impl KaiserWindow {
    #[must_use]
    pub fn new(num_taps: usize, beta: f64) -> Self {
        if num_taps <= 1 {
            return KaiserWindow {
                values: vec![1.0; num_taps],
            };
        }
        let alpha = (num_taps - 1) as f64 / 2.0;
        let denom = bessel_i0(beta);
        let values = (0..num_taps)
            .map(|n| {
                let x = (n as f64 - alpha) / alpha;
                // x*x can exceed 1.0 by an ulp at the edges
                let arg = beta * sqrt((1.0 - x * x).max(0.0));
                bessel_i0(arg) / denom
            })
            .collect();
        KaiserWindow { values }
    }
}

impl FilterWindow for KaiserWindow {
    fn get(&self, n: usize) -> f64 {
        self.values[n]
    }
}
