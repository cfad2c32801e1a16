//! Measured electromagnetic parameters of an absorber sample
//!
//! A `MaterialSpectrum` bundles the frequency axis with the complex relative
//! permittivity ε(f) and permeability μ(f). The imaginary parts are stored
//! with the passive-material sign, ε = ε′ − jε″, so a lossy sample has a
//! negative imaginary part while the measured loss components stay positive.

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{RlError, RlResult};
use crate::frequency::Frequency;
use crate::reflection::{self, RlTable};
use crate::thickness::ThicknessSet;

/// Index-aligned frequency, permittivity and permeability spectra
#[derive(Debug, Clone)]
pub struct MaterialSpectrum {
    name: String,
    frequency: Frequency,
    epsilon: Array1<Complex64>,
    mu: Array1<Complex64>,
}

impl MaterialSpectrum {
    /// Create a spectrum, rejecting empty or misaligned data
    pub fn new(
        name: impl Into<String>,
        frequency: Frequency,
        epsilon: Array1<Complex64>,
        mu: Array1<Complex64>,
    ) -> RlResult<Self> {
        reflection::check_aligned(frequency.npoints(), epsilon.len(), mu.len())?;
        Ok(Self {
            name: name.into(),
            frequency,
            epsilon,
            mu,
        })
    }

    /// Build ε = e1 − j·e2 and μ = u1 − j·u2 from the measured components
    pub fn from_loss_components(
        name: impl Into<String>,
        frequency: Frequency,
        e1: &[f64],
        e2: &[f64],
        u1: &[f64],
        u2: &[f64],
    ) -> RlResult<Self> {
        let n = frequency.npoints();
        let epsilon = combine("epsilon", n, e1, e2)?;
        let mu = combine("mu", n, u1, u2)?;
        Self::new(name, frequency, epsilon, mu)
    }

    /// Sample label, normally the measurement file stem
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    #[inline]
    pub fn epsilon(&self) -> &Array1<Complex64> {
        &self.epsilon
    }

    #[inline]
    pub fn mu(&self) -> &Array1<Complex64> {
        &self.mu
    }

    /// Number of spectral samples
    #[inline]
    pub fn npoints(&self) -> usize {
        self.epsilon.len()
    }

    /// Real permittivity ε′
    pub fn e1(&self) -> Vec<f64> {
        self.epsilon.iter().map(|e| e.re).collect()
    }

    /// Permittivity loss ε″ (positive for a lossy sample)
    pub fn e2(&self) -> Vec<f64> {
        self.epsilon.iter().map(|e| -e.im).collect()
    }

    /// Real permeability μ′
    pub fn u1(&self) -> Vec<f64> {
        self.mu.iter().map(|u| u.re).collect()
    }

    /// Permeability loss μ″ (positive for a lossy sample)
    pub fn u2(&self) -> Vec<f64> {
        self.mu.iter().map(|u| -u.im).collect()
    }

    /// Dielectric loss tangent ε″/ε′
    pub fn dielectric_loss_tangent(&self) -> Vec<f64> {
        self.epsilon.iter().map(|e| -e.im / e.re).collect()
    }

    /// Magnetic loss tangent μ″/μ′
    pub fn magnetic_loss_tangent(&self) -> Vec<f64> {
        self.mu.iter().map(|u| -u.im / u.re).collect()
    }

    /// Reflection loss in dB at a single thickness (mm)
    pub fn reflection_loss(&self, thickness_mm: f64) -> RlResult<Array1<f64>> {
        reflection::compute_rl(
            &self.frequency.f_ghz(),
            &self.epsilon,
            &self.mu,
            thickness_mm,
        )
    }

    /// Reflection loss table across a thickness set
    pub fn reflection_loss_sweep(&self, thicknesses: &ThicknessSet) -> RlResult<RlTable> {
        reflection::compute_rl_sweep(
            &self.frequency.f_ghz(),
            &self.epsilon,
            &self.mu,
            thicknesses,
        )
    }

    /// Same as [`MaterialSpectrum::reflection_loss_sweep`], one rayon task per thickness
    #[cfg(feature = "parallel")]
    pub fn reflection_loss_sweep_parallel(&self, thicknesses: &ThicknessSet) -> RlResult<RlTable> {
        reflection::compute_rl_sweep_parallel(
            &self.frequency.f_ghz(),
            &self.epsilon,
            &self.mu,
            thicknesses,
        )
    }
}

fn combine(
    what: &'static str,
    n: usize,
    real: &[f64],
    loss: &[f64],
) -> RlResult<Array1<Complex64>> {
    for len in [real.len(), loss.len()] {
        if len != n {
            return Err(RlError::LengthMismatch {
                what,
                expected: n,
                actual: len,
            });
        }
    }
    Ok(real
        .iter()
        .zip(loss)
        .map(|(&re, &im)| Complex64::new(re, -im))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> MaterialSpectrum {
        MaterialSpectrum::from_loss_components(
            "ferrite",
            Frequency::from_ghz(vec![8.0, 12.0]),
            &[10.0, 9.5],
            &[3.0, 2.5],
            &[1.2, 1.1],
            &[0.5, 0.4],
        )
        .unwrap()
    }

    #[test]
    fn test_loss_components_are_stored_negated() {
        let m = sample();
        assert_eq!(m.epsilon()[0], Complex64::new(10.0, -3.0));
        assert_eq!(m.mu()[1], Complex64::new(1.1, -0.4));
        assert_eq!(m.e2(), vec![3.0, 2.5]);
        assert_eq!(m.u2(), vec![0.5, 0.4]);
        assert_eq!(m.name(), "ferrite");
    }

    #[test]
    fn test_loss_tangents() {
        let m = sample();
        assert_relative_eq!(m.dielectric_loss_tangent()[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(m.magnetic_loss_tangent()[1], 0.4 / 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_misaligned_components_rejected() {
        let err = MaterialSpectrum::from_loss_components(
            "bad",
            Frequency::from_ghz(vec![1.0, 2.0]),
            &[1.0, 1.0],
            &[0.0],
            &[1.0, 1.0],
            &[0.0, 0.0],
        )
        .unwrap_err();
        assert_eq!(
            err,
            RlError::LengthMismatch {
                what: "epsilon",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_empty_spectrum_rejected() {
        let err = MaterialSpectrum::new(
            "empty",
            Frequency::from_ghz(Vec::new()),
            Array1::zeros(0),
            Array1::zeros(0),
        )
        .unwrap_err();
        assert_eq!(err, RlError::EmptySpectrum);
    }
}
