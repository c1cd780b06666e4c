//! Core math functions for the filter design.
//! If the `libm` feature is enabled, this just exports the required functions.
//! If the `std` feature is enabled, this converts the syntax from the std variety: `f.sqrt()` into
//! the `libm` equiv. `sqrt(f)`.

#[cfg(feature = "libm")]
pub(crate) use libm::{ceil, cos, fabs, log10, pow, sin, sqrt};

#[cfg(feature = "std")]
pub(crate) fn sqrt(f: f64) -> f64 {
    f.sqrt()
}
#[cfg(feature = "std")]
pub(crate) fn pow(f1: f64, f2: f64) -> f64 {
    f1.powf(f2)
}
#[cfg(feature = "std")]
pub(crate) fn cos(f: f64) -> f64 {
    f.cos()
}
#[cfg(feature = "std")]
pub(crate) fn sin(f: f64) -> f64 {
    f.sin()
}
#[cfg(feature = "std")]
pub(crate) fn ceil(f: f64) -> f64 {
    f.ceil()
}
#[cfg(feature = "std")]
pub(crate) fn fabs(f: f64) -> f64 {
    f.abs()
}
#[cfg(feature = "std")]
pub(crate) fn log10(f: f64) -> f64 {
    f.log10()
}
