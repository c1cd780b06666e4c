//! Kaiser-window FIR low-pass filter design in Rust.
//!
//! *NOTE*: This is _not_ a streaming DSP engine.
//! This only computes tap coefficients from a filter specification;
//! applying them to samples is up to the caller.
//! See the binary for the two built-in use cases (radio and audio).
//!
//! ## `no_std`
//!
//! This library is unconditionally `no_std` compatible.
//! `alloc` is required for the coefficient vectors.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(
    clippy::all,
    clippy::cargo,
    clippy::pedantic,
    unsafe_code,
    rustdoc::all
)]
// fine for us since loss of precision/sign is not that imporatnt, as long as it's the same every time.
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]

#[cfg(all(feature = "std", feature = "libm"))]
compile_error!("Features \"std\" and \"libm\" are mutually exclusive.");

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("Must specify a math feature: either \"std\" or \"libm\".");

extern crate alloc;

mod design;
pub use design::{
    DesignParams, FilterSpec, FirFilter, InvalidSpecification, design_lowpass, frequency_response,
    ideal_lowpass, kaiser_lowpass, kaiser_order, magnitude_db,
};
mod math;
mod window;
pub use window::{FilterWindow, KaiserWindow, bessel_i0};
