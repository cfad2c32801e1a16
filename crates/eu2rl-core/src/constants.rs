//! Physical and numerical constants for reflection loss calculations
//!
//! Units follow the measurement convention of the tool: frequency in GHz,
//! thickness in mm.

/// Speed of light expressed in GHz·mm.
///
/// With `f` in GHz and `d` in mm the propagation argument is
/// `j · (2π·d / SPEED_OF_LIGHT_GHZ_MM) · f · sqrt(μ·ε)`.
pub const SPEED_OF_LIGHT_GHZ_MM: f64 = 300.0;

/// Hz per GHz. Measurement files store frequency in Hz.
pub const HZ_PER_GHZ: f64 = 1e9;

/// Relative tolerance used when expanding `begin:step:end` ranges so that an
/// endpoint reachable in exact arithmetic is not lost to rounding.
pub const RANGE_TOL: f64 = 1e-9;

/// Conventional qualified-absorption threshold: -10 dB, i.e. 90 % of the
/// incident power absorbed.
pub const QUALIFIED_ABSORPTION_DB: f64 = -10.0;

/// Reflection losses above this are rounding noise of a lossless layer,
/// not absorption.
pub const NEGLIGIBLE_RL_DB: f64 = -1e-9;

/// Upper bound on the points a `begin:step:end` range may expand to.
pub const MAX_RANGE_POINTS: usize = 1_000_000;
