//! Reflection loss across a set of thicknesses

use log::debug;
use ndarray::{Array1, Array2};
use num_complex::Complex64;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::loss::{check_aligned, compute_rl};
use super::table::RlTable;
use crate::error::RlResult;
use crate::thickness::ThicknessSet;

/// Evaluate [`compute_rl`] once per thickness
///
/// Column `j` of the resulting table is the spectrum at `thicknesses[j]`;
/// thickness order is preserved.
pub fn compute_rl_sweep(
    frequency_ghz: &[f64],
    epsilon: &Array1<Complex64>,
    mu: &Array1<Complex64>,
    thicknesses: &ThicknessSet,
) -> RlResult<RlTable> {
    check_aligned(frequency_ghz.len(), epsilon.len(), mu.len())?;
    debug!(
        "RL sweep: {} frequency points x {} thicknesses",
        frequency_ghz.len(),
        thicknesses.len()
    );

    let mut rl = Array2::<f64>::zeros((frequency_ghz.len(), thicknesses.len()));
    for (j, &d) in thicknesses.iter().enumerate() {
        let column = compute_rl(frequency_ghz, epsilon, mu, d)?;
        rl.column_mut(j).assign(&column);
    }

    RlTable::from_parts(rl, frequency_ghz.to_vec(), thicknesses.values().to_vec())
}

/// Parallel variant of [`compute_rl_sweep`]
///
/// Columns have no data dependency; each thickness is evaluated as its own
/// rayon task and placed at its index. The result equals the sequential one.
#[cfg(feature = "parallel")]
pub fn compute_rl_sweep_parallel(
    frequency_ghz: &[f64],
    epsilon: &Array1<Complex64>,
    mu: &Array1<Complex64>,
    thicknesses: &ThicknessSet,
) -> RlResult<RlTable> {
    check_aligned(frequency_ghz.len(), epsilon.len(), mu.len())?;
    debug!(
        "Parallel RL sweep: {} frequency points x {} thicknesses",
        frequency_ghz.len(),
        thicknesses.len()
    );

    let columns = thicknesses
        .values()
        .par_iter()
        .map(|&d| compute_rl(frequency_ghz, epsilon, mu, d))
        .collect::<RlResult<Vec<_>>>()?;

    let mut rl = Array2::<f64>::zeros((frequency_ghz.len(), thicknesses.len()));
    for (j, column) in columns.iter().enumerate() {
        rl.column_mut(j).assign(column);
    }

    RlTable::from_parts(rl, frequency_ghz.to_vec(), thicknesses.values().to_vec())
}
