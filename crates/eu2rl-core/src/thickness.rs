//! Candidate absorber thicknesses (mm)
//!
//! Input syntax accepted by [`ThicknessSet::from_str`]:
//! - `3.5`: a single thickness
//! - `2, 3, 4`: an explicit list
//! - `2 : 0.01 : 6`: an arithmetic range `begin:step:end`, expanded eagerly

use std::str::FromStr;

use crate::constants::{MAX_RANGE_POINTS, RANGE_TOL};
use crate::error::{RlError, RlResult};

/// A non-empty ordered list of positive thicknesses in mm
#[derive(Debug, Clone, PartialEq)]
pub struct ThicknessSet {
    values: Vec<f64>,
}

impl ThicknessSet {
    /// A set holding one thickness
    pub fn single(thickness_mm: f64) -> RlResult<Self> {
        Self::from_values(vec![thickness_mm])
    }

    /// A set from explicit values, order preserved
    pub fn from_values(values: Vec<f64>) -> RlResult<Self> {
        if values.is_empty() {
            return Err(RlError::EmptyThicknessSet);
        }
        if let Some(&bad) = values.iter().find(|&&d| !(d.is_finite() && d > 0.0)) {
            return Err(RlError::InvalidThickness(bad));
        }
        Ok(Self { values })
    }

    /// Expand `begin, begin + step, ...` up to and including `end`
    ///
    /// The point count is `floor((end - begin) / step) + 1`. A degenerate
    /// range fails instead of yielding an empty set, and so does one with
    /// more than [`MAX_RANGE_POINTS`] points.
    pub fn range(begin: f64, step: f64, end: f64) -> RlResult<Self> {
        let degenerate = |reason| RlError::DegenerateRange {
            begin,
            step,
            end,
            reason,
        };

        if !(begin.is_finite() && step.is_finite() && end.is_finite()) {
            return Err(degenerate("bounds and step must be finite"));
        }
        if step <= 0.0 {
            return Err(degenerate("step must be positive"));
        }
        if end < begin {
            return Err(degenerate("end is smaller than begin"));
        }

        let span = (end - begin) / step;
        let last = (span + span.abs().max(1.0) * RANGE_TOL).floor();
        if !last.is_finite() || last >= MAX_RANGE_POINTS as f64 {
            return Err(degenerate("too many points"));
        }
        let n = last as usize;
        let values = (0..=n).map(|i| begin + i as f64 * step).collect();
        Self::from_values(values)
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn first(&self) -> f64 {
        self.values[0]
    }

    #[inline]
    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a ThicknessSet {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromStr for ThicknessSet {
    type Err = RlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(RlError::EmptyThicknessSet);
        }

        if input.contains(',') {
            let values = input
                .split(',')
                .map(|tok| parse_number(input, tok))
                .collect::<RlResult<Vec<_>>>()?;
            Self::from_values(values)
        } else if input.contains(':') {
            let parts: Vec<&str> = input.split(':').collect();
            if parts.len() != 3 {
                return Err(RlError::ThicknessSyntax {
                    input: input.to_string(),
                    message: format!(
                        "expected 'begin : step : end', found {} fields",
                        parts.len()
                    ),
                });
            }
            Self::range(
                parse_number(input, parts[0])?,
                parse_number(input, parts[1])?,
                parse_number(input, parts[2])?,
            )
        } else {
            Self::single(parse_number(input, input)?)
        }
    }
}

fn parse_number(input: &str, token: &str) -> RlResult<f64> {
    let token = token.trim();
    token.parse::<f64>().map_err(|_| RlError::ThicknessSyntax {
        input: input.to_string(),
        message: format!("'{}' is not a number", token),
    })
}
