//! Reflection loss engine
//!
//! Single-layer absorber backed by a perfect conductor. For each spectral
//! sample the transmission-line model gives
//!
//! ```text
//! Z_in = sqrt(μ/ε) · tanh(j · (2π·d/c) · f · sqrt(μ·ε))
//! RL   = 20 · log10(|(Z_in − 1) / (Z_in + 1)|)
//! ```
//!
//! with `f` in GHz, `d` in mm and `c` = 300 GHz·mm.

mod loss;
mod sweep;
mod table;

pub(crate) use loss::check_aligned;
pub use loss::{compute_rl, input_impedance, reflection_loss_db};
pub use sweep::compute_rl_sweep;
#[cfg(feature = "parallel")]
pub use sweep::compute_rl_sweep_parallel;
pub use table::{find_maximum_absorption, Absorption, AbsorptionPoint, Band, RlTable};
