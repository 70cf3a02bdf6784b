//! Foundation types for lockstep.
//!
//! This crate provides the immutable option record and the small value types
//! shared by the comparators and their output sinks. Every other lockstep
//! crate depends on `lockstep-types`.
//!
//! # Key Types
//!
//! - [`CompareOptions`] -- Normalization switches, limits, section headers and colors
//! - [`Color`] -- Foreground color applied to a rendered category
//! - [`ColorDirective`] -- Per-write color instruction (keep, set, reset)
//! - [`DiffCategory`] -- Which side of a divergence a rendered block belongs to

pub mod color;
pub mod error;
pub mod options;

pub use color::{Color, ColorDirective, DiffCategory};
pub use error::ConfigError;
pub use options::CompareOptions;
