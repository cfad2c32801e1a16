//! Reflection loss at a fixed thickness

use std::f64::consts::PI;

use ndarray::{Array1, ArrayView1, Zip};
use num_complex::Complex64;

use crate::constants::SPEED_OF_LIGHT_GHZ_MM;
use crate::error::{RlError, RlResult};
use crate::math::conversions::magnitude_2_db;

/// Normalized input impedance of a conductor-backed slab
///
/// `f_ghz` in GHz, `thickness_mm` in mm; ε and μ are relative and use the
/// ε′ − jε″ sign convention. Square roots take the principal branch.
#[inline]
pub fn input_impedance(f_ghz: f64, epsilon: Complex64, mu: Complex64, thickness_mm: f64) -> Complex64 {
    let z_ratio = (mu / epsilon).sqrt();
    let gamma_d = propagation_factor(thickness_mm) * f_ghz * (mu * epsilon).sqrt();
    z_ratio * gamma_d.tanh()
}

/// Reflection loss in dB for a normalized input impedance
///
/// `|Γ|` is formed from two real magnitudes so the limits stay exact:
/// `Z_in = 1` gives `-inf` and `Z_in = -1` gives `+inf`.
#[inline]
pub fn reflection_loss_db(z_in: Complex64) -> f64 {
    let one = Complex64::new(1.0, 0.0);
    magnitude_2_db((z_in - one).norm() / (z_in + one).norm())
}

/// Reflection loss spectrum at one thickness
///
/// Returns one dB value per frequency point. Fails on an empty spectrum,
/// misaligned lengths or a thickness that is not positive.
pub fn compute_rl(
    frequency_ghz: &[f64],
    epsilon: &Array1<Complex64>,
    mu: &Array1<Complex64>,
    thickness_mm: f64,
) -> RlResult<Array1<f64>> {
    check_aligned(frequency_ghz.len(), epsilon.len(), mu.len())?;
    check_thickness(thickness_mm)?;

    let f = ArrayView1::from(frequency_ghz);
    let k = propagation_factor(thickness_mm);

    let z_ratio = (mu / epsilon).mapv(Complex64::sqrt);
    let n = (mu * epsilon).mapv(Complex64::sqrt);
    let gamma_d = f.mapv(|x| k * x) * &n;

    Ok(Zip::from(&z_ratio)
        .and(&gamma_d)
        .map_collect(|&z, &g| slab_loss_db(z, g)))
}

/// `20·log10|Γ|` for `Z_in = z·tanh(γd)`
///
/// With `e = exp(−2γd)`, `tanh(γd) = (1 − e)/(1 + e)` and the common
/// denominator cancels out of Γ:
///
/// ```text
/// Γ = (z(1 − e) − (1 + e)) / (z(1 − e) + (1 + e))
/// ```
///
/// This stays finite at the pole of `tanh` (a lossless quarter-wave layer),
/// where it gives `|Γ| = 1`.
#[inline]
fn slab_loss_db(z_ratio: Complex64, gamma_d: Complex64) -> f64 {
    let one = Complex64::new(1.0, 0.0);
    let e = (-2.0 * gamma_d).exp();
    let num = z_ratio * (one - e);
    let den = one + e;
    magnitude_2_db((num - den).norm() / (num + den).norm())
}

/// `j · 2π·d / c`
#[inline]
fn propagation_factor(thickness_mm: f64) -> Complex64 {
    Complex64::i() * (2.0 * PI * thickness_mm / SPEED_OF_LIGHT_GHZ_MM)
}

pub(crate) fn check_aligned(nfreq: usize, nepsilon: usize, nmu: usize) -> RlResult<()> {
    if nfreq == 0 {
        return Err(RlError::EmptySpectrum);
    }
    if nepsilon != nfreq {
        return Err(RlError::LengthMismatch {
            what: "epsilon",
            expected: nfreq,
            actual: nepsilon,
        });
    }
    if nmu != nfreq {
        return Err(RlError::LengthMismatch {
            what: "mu",
            expected: nfreq,
            actual: nmu,
        });
    }
    Ok(())
}

pub(crate) fn check_thickness(thickness_mm: f64) -> RlResult<()> {
    if thickness_mm.is_finite() && thickness_mm > 0.0 {
        Ok(())
    } else {
        Err(RlError::InvalidThickness(thickness_mm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_lossy_golden_values() {
        let eps = Array1::from_elem(2, c(10.0, -3.0));
        let mu = Array1::from_elem(2, c(1.2, -0.5));

        let rl = compute_rl(&[8.0, 12.0], &eps, &mu, 2.0).unwrap();
        assert_relative_eq!(rl[0], -8.039135353357754, epsilon = 1e-9);
        assert_relative_eq!(rl[1], -11.221443309093498, epsilon = 1e-9);
    }

    #[test]
    fn test_lossless_dielectric_reflects_everything() {
        // ε = 4, μ = 1, d = 5 mm: Z_in is purely imaginary so |Γ| = 1
        let eps = Array1::from_elem(2, c(4.0, 0.0));
        let mu = Array1::from_elem(2, c(1.0, 0.0));

        let rl = compute_rl(&[1.0, 2.0], &eps, &mu, 5.0).unwrap();
        assert_eq!(rl.len(), 2);
        for v in rl.iter() {
            assert!(v.abs() < 1e-9, "expected 0 dB, got {}", v);
        }
    }

    #[test]
    fn test_scalar_and_vector_paths_agree() {
        let eps = Array1::from(vec![c(12.0, -4.0), c(7.5, -1.5), c(5.0, -0.2)]);
        let mu = Array1::from(vec![c(1.4, -0.9), c(1.1, -0.3), c(1.0, -0.05)]);
        let f = [2.0, 9.5, 17.0];

        let rl = compute_rl(&f, &eps, &mu, 3.3).unwrap();
        for i in 0..3 {
            let expected = reflection_loss_db(input_impedance(f[i], eps[i], mu[i], 3.3));
            assert_relative_eq!(rl[i], expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_rl_depends_on_frequency_thickness_product() {
        let eps = Array1::from_elem(1, c(10.0, -3.0));
        let mu = Array1::from_elem(1, c(1.2, -0.5));

        let a = compute_rl(&[12.0], &eps, &mu, 2.0).unwrap();
        let b = compute_rl(&[8.0], &eps, &mu, 3.0).unwrap();
        assert_relative_eq!(a[0], b[0], epsilon = 1e-9);
    }

    #[test]
    fn test_quarter_wave_lossless_layer_is_finite() {
        // ε = μ = 1, f·d = 75 GHz·mm puts γd exactly on the pole of tanh
        let eps = Array1::from_elem(1, c(1.0, 0.0));
        let mu = Array1::from_elem(1, c(1.0, 0.0));

        let rl = compute_rl(&[10.0], &eps, &mu, 7.5).unwrap();
        assert!(rl[0].is_finite());
        assert_relative_eq!(rl[0], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_impedance_limits() {
        assert_eq!(reflection_loss_db(c(1.0, 0.0)), f64::NEG_INFINITY);
        assert_eq!(reflection_loss_db(c(-1.0, 0.0)), f64::INFINITY);
        assert_relative_eq!(reflection_loss_db(c(0.0, 0.0)), 0.0);
        // Short circuit termination at the surface
        assert_relative_eq!(reflection_loss_db(c(0.0, 2.5)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shape_errors() {
        let eps = Array1::from_elem(2, c(4.0, 0.0));
        let mu = Array1::from_elem(3, c(1.0, 0.0));
        let empty = Array1::<Complex64>::zeros(0);

        assert_eq!(
            compute_rl(&[], &empty, &empty, 1.0),
            Err(RlError::EmptySpectrum)
        );
        assert_eq!(
            compute_rl(&[1.0, 2.0], &eps, &mu, 1.0),
            Err(RlError::LengthMismatch {
                what: "mu",
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            compute_rl(&[1.0, 2.0, 3.0], &eps, &mu, 1.0),
            Err(RlError::LengthMismatch {
                what: "epsilon",
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_invalid_thickness() {
        let eps = Array1::from_elem(1, c(4.0, 0.0));
        let mu = Array1::from_elem(1, c(1.0, 0.0));
        assert_eq!(
            compute_rl(&[1.0], &eps, &mu, 0.0),
            Err(RlError::InvalidThickness(0.0))
        );
        assert!(compute_rl(&[1.0], &eps, &mu, f64::NAN).is_err());
    }
}
