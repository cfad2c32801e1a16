//! eu2rl-core: microwave absorber reflection loss
//!
//! Computes the reflection loss (RL) of a single-layer, metal-backed
//! absorber from measured complex permittivity ε(f) and permeability μ(f),
//! for one thickness or a sweep of candidate thicknesses.
//!
//! ## Modules
//!
//! - `frequency` - Frequency axis with units
//! - `material` - Index-aligned ε/μ spectra of a sample
//! - `thickness` - Thickness sets and `begin:step:end` parsing
//! - `reflection` - The RL engine, sweep table and absorption analyses
//! - `measurement` - Measurement CSV reading and sheet writing
//! - `report` - Export of spectra and RL tables
//!
//! ## Example
//! ```
//! use eu2rl_core::{Frequency, MaterialSpectrum, ThicknessSet};
//!
//! let sample = MaterialSpectrum::from_loss_components(
//!     "ferrite",
//!     Frequency::from_ghz(vec![8.0, 12.0]),
//!     &[10.0, 10.0],
//!     &[3.0, 3.0],
//!     &[1.2, 1.2],
//!     &[0.5, 0.5],
//! )?;
//! let table = sample.reflection_loss_sweep(&"1.5, 2".parse::<ThicknessSet>()?)?;
//! assert_eq!(table.values().dim(), (2, 2));
//! # Ok::<(), eu2rl_core::RlError>(())
//! ```

pub mod constants;
pub mod error;
pub mod frequency;
pub mod material;
pub mod math;
pub mod measurement;
pub mod reflection;
pub mod report;
pub mod thickness;

pub use error::{RlError, RlResult};
pub use frequency::Frequency;
pub use material::MaterialSpectrum;
pub use reflection::{Absorption, RlTable};
pub use thickness::ThicknessSet;
