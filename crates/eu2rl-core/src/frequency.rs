//! Frequency axis of a measured spectrum
//!
//! Points are kept in Hz internally; the engine reads them in GHz.

use crate::constants::HZ_PER_GHZ;

/// Frequency unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    Hz,
    KHz,
    MHz,
    #[default]
    GHz,
    THz,
}

impl FrequencyUnit {
    /// Get the multiplier to convert to Hz
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => HZ_PER_GHZ,
            FrequencyUnit::THz => 1e12,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hz" => Some(FrequencyUnit::Hz),
            "khz" => Some(FrequencyUnit::KHz),
            "mhz" => Some(FrequencyUnit::MHz),
            "ghz" => Some(FrequencyUnit::GHz),
            "thz" => Some(FrequencyUnit::THz),
            _ => None,
        }
    }

    /// Label used in sheet headers
    pub fn label(&self) -> &'static str {
        match self {
            FrequencyUnit::Hz => "Hz",
            FrequencyUnit::KHz => "kHz",
            FrequencyUnit::MHz => "MHz",
            FrequencyUnit::GHz => "GHz",
            FrequencyUnit::THz => "THz",
        }
    }
}

/// Sweep type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepType {
    #[default]
    Linear,
    Log,
}

/// An ordered set of frequency points.
///
/// Monotonicity is not enforced; measurement files are conventionally
/// increasing but the engine only relies on index alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    /// Frequency vector in Hz
    f: Vec<f64>,
    /// Display unit
    unit: FrequencyUnit,
}

impl Frequency {
    /// Create a synthetic sweep with start/stop/npoints
    ///
    /// # Example
    /// ```
    /// use eu2rl_core::frequency::{Frequency, FrequencyUnit, SweepType};
    /// let freq = Frequency::new(2.0, 18.0, 161, FrequencyUnit::GHz, SweepType::Linear);
    /// assert_eq!(freq.npoints(), 161);
    /// ```
    pub fn new(
        start: f64,
        stop: f64,
        npoints: usize,
        unit: FrequencyUnit,
        sweep_type: SweepType,
    ) -> Self {
        let mult = unit.multiplier();
        let start_hz = start * mult;
        let stop_hz = stop * mult;

        let f = match (sweep_type, npoints) {
            (_, 0) => Vec::new(),
            (_, 1) => vec![start_hz],
            (SweepType::Linear, n) => {
                let step = (stop_hz - start_hz) / (n - 1) as f64;
                (0..n).map(|i| start_hz + i as f64 * step).collect()
            }
            (SweepType::Log, n) => {
                let log_start = start_hz.ln();
                let log_step = (stop_hz.ln() - log_start) / (n - 1) as f64;
                (0..n)
                    .map(|i| (log_start + i as f64 * log_step).exp())
                    .collect()
            }
        };

        Self { f, unit }
    }

    /// Create from values expressed in `unit`
    pub fn from_f(f: Vec<f64>, unit: FrequencyUnit) -> Self {
        let mult = unit.multiplier();
        Self {
            f: f.into_iter().map(|x| x * mult).collect(),
            unit,
        }
    }

    /// Create from values already in GHz
    pub fn from_ghz(f: Vec<f64>) -> Self {
        Self::from_f(f, FrequencyUnit::GHz)
    }

    /// Get frequency vector in Hz
    #[inline]
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    /// Get frequency vector in the display unit
    pub fn f_scaled(&self) -> Vec<f64> {
        self.f_in(self.unit)
    }

    /// Get frequency vector in GHz
    pub fn f_ghz(&self) -> Vec<f64> {
        self.f_in(FrequencyUnit::GHz)
    }

    /// Get frequency vector in an arbitrary unit
    pub fn f_in(&self, unit: FrequencyUnit) -> Vec<f64> {
        let mult = unit.multiplier();
        self.f.iter().map(|&x| x / mult).collect()
    }

    #[inline]
    pub fn npoints(&self) -> usize {
        self.f.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.f.is_empty()
    }

    /// First frequency point in Hz
    #[inline]
    pub fn start(&self) -> f64 {
        self.f.first().copied().unwrap_or(0.0)
    }

    /// Last frequency point in Hz
    #[inline]
    pub fn stop(&self) -> f64 {
        self.f.last().copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_create_linear_sweep() {
        let freq = Frequency::new(2.0, 18.0, 17, FrequencyUnit::GHz, SweepType::Linear);

        assert_eq!(freq.npoints(), 17);
        assert_relative_eq!(freq.start(), 2e9, epsilon = 1.0);
        assert_relative_eq!(freq.stop(), 18e9, epsilon = 1.0);

        let f_ghz = freq.f_ghz();
        assert_relative_eq!(f_ghz[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_create_log_sweep() {
        let freq = Frequency::new(1.0, 10.0, 10, FrequencyUnit::GHz, SweepType::Log);
        let ratios: Vec<f64> = freq.f().windows(2).map(|w| w[1] / w[0]).collect();
        for r in &ratios[1..] {
            assert_relative_eq!(*r, ratios[0], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_degenerate_point_counts() {
        let empty = Frequency::new(1.0, 2.0, 0, FrequencyUnit::GHz, SweepType::Linear);
        assert!(empty.is_empty());
        let one = Frequency::new(1.0, 2.0, 1, FrequencyUnit::GHz, SweepType::Log);
        assert_eq!(one.f(), &[1e9]);
    }

    #[test]
    fn test_hz_input_reads_back_in_ghz() {
        let freq = Frequency::from_f(vec![2.0e9, 12.5e9], FrequencyUnit::Hz);
        assert_eq!(freq.unit(), FrequencyUnit::Hz);
        let f_ghz = freq.f_ghz();
        assert_relative_eq!(f_ghz[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(f_ghz[1], 12.5, epsilon = 1e-12);
    }

    #[test]
    fn test_frequency_unit_from_str() {
        assert_eq!(FrequencyUnit::from_str("ghz"), Some(FrequencyUnit::GHz));
        assert_eq!(FrequencyUnit::from_str("MHz"), Some(FrequencyUnit::MHz));
        assert_eq!(FrequencyUnit::from_str("furlong"), None);
        assert_eq!(FrequencyUnit::default().label(), "GHz");
    }
}
