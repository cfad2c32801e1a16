//! Decibel conversions
//!
//! Reflection loss is an amplitude ratio: `RL = 20·log10(|Γ|)`.

/// Convert magnitude to dB (20*log10(mag))
///
/// A zero magnitude maps to `-inf` and an infinite one to `+inf`.
pub fn magnitude_2_db(mag: f64) -> f64 {
    20.0 * mag.log10()
}

/// Fraction of incident power absorbed for a reflection loss in dB
///
/// `1 - |Γ|²`; -10 dB absorbs 90 %, -20 dB absorbs 99 %.
pub fn absorbed_fraction(rl_db: f64) -> f64 {
    1.0 - 10.0_f64.powf(rl_db / 10.0)
}
