//! Mathematical helpers shared by the engine and the report layer

pub mod conversions;

pub use conversions::*;
