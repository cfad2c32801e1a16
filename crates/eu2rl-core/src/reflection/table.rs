//! Reflection loss table (frequency x thickness) and its analyses

use ndarray::{Array2, ArrayView1};
use serde::Serialize;

use crate::constants::NEGLIGIBLE_RL_DB;
use crate::error::{RlError, RlResult};
use crate::math::absorbed_fraction;

/// Location and value of the strongest absorption in a table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Absorption {
    pub freq_index: usize,
    pub thickness_index: usize,
    /// Reflection loss in dB
    pub value: f64,
}

/// An absorption entry resolved to physical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbsorptionPoint {
    pub frequency_ghz: f64,
    pub thickness_mm: f64,
    pub rl_db: f64,
}

impl AbsorptionPoint {
    /// Share of the incident power absorbed at this point, 0 to 1
    #[inline]
    pub fn absorbed_fraction(&self) -> f64 {
        absorbed_fraction(self.rl_db)
    }
}

/// A contiguous frequency interval, in GHz
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub start_ghz: f64,
    pub stop_ghz: f64,
}

impl Band {
    #[inline]
    pub fn width(&self) -> f64 {
        (self.stop_ghz - self.start_ghz).abs()
    }
}

/// Scan for the most negative reflection loss
///
/// The accumulator starts at 0 dB and is replaced only on a strictly smaller
/// value, scanning frequency-outer, thickness-inner. Ties keep the first
/// entry. A table with no entry below 0 dB yields `(0, 0, 0.0)`; use
/// [`RlTable::strongest_absorption`] to tell that case apart.
pub fn find_maximum_absorption(rl: &Array2<f64>) -> Absorption {
    let mut best = Absorption {
        freq_index: 0,
        thickness_index: 0,
        value: 0.0,
    };
    for ((i, j), &v) in rl.indexed_iter() {
        if v < best.value {
            best = Absorption {
                freq_index: i,
                thickness_index: j,
                value: v,
            };
        }
    }
    best
}

/// Reflection loss in dB, rows = frequency, columns = thickness
#[derive(Debug, Clone, PartialEq)]
pub struct RlTable {
    values: Array2<f64>,
    frequency_ghz: Vec<f64>,
    thickness_mm: Vec<f64>,
}

impl RlTable {
    /// Assemble a table, checking that both axes match its shape
    pub fn from_parts(
        values: Array2<f64>,
        frequency_ghz: Vec<f64>,
        thickness_mm: Vec<f64>,
    ) -> RlResult<Self> {
        let (nfreq, nthickness) = values.dim();
        if frequency_ghz.len() != nfreq {
            return Err(RlError::LengthMismatch {
                what: "table rows",
                expected: frequency_ghz.len(),
                actual: nfreq,
            });
        }
        if thickness_mm.len() != nthickness {
            return Err(RlError::LengthMismatch {
                what: "table columns",
                expected: thickness_mm.len(),
                actual: nthickness,
            });
        }
        Ok(Self {
            values,
            frequency_ghz,
            thickness_mm,
        })
    }

    #[inline]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    #[inline]
    pub fn frequency_ghz(&self) -> &[f64] {
        &self.frequency_ghz
    }

    #[inline]
    pub fn thickness_mm(&self) -> &[f64] {
        &self.thickness_mm
    }

    #[inline]
    pub fn nfreq(&self) -> usize {
        self.values.nrows()
    }

    #[inline]
    pub fn nthickness(&self) -> usize {
        self.values.ncols()
    }

    /// RL spectrum for thickness `j`
    ///
    /// # Panics
    /// If `j` is out of range.
    pub fn column(&self, j: usize) -> ArrayView1<'_, f64> {
        self.values.column(j)
    }

    /// See [`find_maximum_absorption`]
    pub fn maximum_absorption(&self) -> Absorption {
        find_maximum_absorption(&self.values)
    }

    /// Like [`RlTable::maximum_absorption`], but `None` when no entry
    /// attenuates (every value is NaN or above [`NEGLIGIBLE_RL_DB`])
    pub fn strongest_absorption(&self) -> Option<Absorption> {
        let best = self.maximum_absorption();
        (best.value < NEGLIGIBLE_RL_DB).then_some(best)
    }

    /// Resolve table indices to frequency, thickness and RL
    pub fn absorption_at(
        &self,
        freq_index: usize,
        thickness_index: usize,
    ) -> RlResult<AbsorptionPoint> {
        match self.values.get((freq_index, thickness_index)) {
            Some(&rl_db) => Ok(AbsorptionPoint {
                frequency_ghz: self.frequency_ghz[freq_index],
                thickness_mm: self.thickness_mm[thickness_index],
                rl_db,
            }),
            None => Err(RlError::IndexOutOfRange {
                freq_index,
                thickness_index,
                nfreq: self.nfreq(),
                nthickness: self.nthickness(),
            }),
        }
    }

    /// Frequency intervals where RL <= `threshold_db` at one thickness
    ///
    /// Each run of consecutive qualifying samples becomes one band spanning
    /// its first to last frequency. An isolated sample is a zero-width band.
    pub fn bands_below(&self, thickness_index: usize, threshold_db: f64) -> RlResult<Vec<Band>> {
        if thickness_index >= self.nthickness() {
            return Err(RlError::IndexOutOfRange {
                freq_index: 0,
                thickness_index,
                nfreq: self.nfreq(),
                nthickness: self.nthickness(),
            });
        }

        let column = self.values.column(thickness_index);
        let mut bands = Vec::new();
        let mut run_start: Option<usize> = None;

        for (i, &v) in column.iter().enumerate() {
            match (v <= threshold_db, run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(start)) => {
                    bands.push(self.band(start, i - 1));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            bands.push(self.band(start, column.len() - 1));
        }
        Ok(bands)
    }

    /// Total width in GHz of the bands where RL <= `threshold_db`
    pub fn effective_bandwidth(&self, thickness_index: usize, threshold_db: f64) -> RlResult<f64> {
        Ok(self
            .bands_below(thickness_index, threshold_db)?
            .iter()
            .map(Band::width)
            .sum())
    }

    fn band(&self, first: usize, last: usize) -> Band {
        Band {
            start_ghz: self.frequency_ghz[first],
            stop_ghz: self.frequency_ghz[last],
        }
    }
}
