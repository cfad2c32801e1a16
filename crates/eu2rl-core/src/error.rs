//! Error types for the spectrum model and the reflection loss engine

use thiserror::Error;

/// Result type for engine operations
pub type RlResult<T> = Result<T, RlError>;

/// Input errors rejected before any computation takes place
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RlError {
    /// A spectrum with no samples
    #[error("Empty spectrum: at least one frequency point is required")]
    EmptySpectrum,

    /// Spectra that are not index-aligned
    #[error("Spectrum length mismatch: frequency has {expected} points but {what} has {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A thickness that is zero, negative, NaN or infinite
    #[error("Invalid thickness {0} mm: thickness must be a positive finite number")]
    InvalidThickness(f64),

    /// A thickness list that expanded to nothing
    #[error("Empty thickness set")]
    EmptyThicknessSet,

    /// A `begin:step:end` range that produces no points, or too many
    #[error("Degenerate thickness range {begin}:{step}:{end}: {reason}")]
    DegenerateRange {
        begin: f64,
        step: f64,
        end: f64,
        reason: &'static str,
    },

    /// Unparsable thickness input
    #[error("Invalid thickness input '{input}': {message}")]
    ThicknessSyntax { input: String, message: String },

    /// A table index outside its bounds
    #[error("Index ({freq_index}, {thickness_index}) out of range for a {nfreq}x{nthickness} table")]
    IndexOutOfRange {
        freq_index: usize,
        thickness_index: usize,
        nfreq: usize,
        nthickness: usize,
    },
}
