//! Comparison engine for lockstep.
//!
//! Validates that a received output matches an expected reference while
//! tolerating benign reformatting and benign shifts, and renders a bounded,
//! human-readable account of where the two inputs diverge.
//!
//! # Key Types
//!
//! - [`TextComparer`] / [`TextReport`] -- Line-oriented comparison with bounded resynchronization
//! - [`TreeComparer`] / [`TreeReport`] / [`CompResult`] -- Recursive element tree comparison
//! - [`DiffSink`] / [`MemorySink`] -- Destination for rendered divergence blocks
//!
//! Both comparators are synchronous and keep all of their running state local
//! to one call, so a comparer can be shared freely between threads.

pub mod error;
mod macros;
pub mod normalize;
mod render;
pub mod sink;
pub mod text;
pub mod tree;

pub use error::{DiffError, DiffResult};
pub use lockstep_types::{Color, ColorDirective, CompareOptions, DiffCategory};
pub use lockstep_xml::Element;
pub use normalize::{are_equal, is_empty};
pub use render::ELLIPSIS;
pub use sink::{DiffSink, MemorySink, SinkEvent};
pub use text::{compare_texts, split_lines, TextComparer, TextReport, TextVerdict};
pub use tree::{compare_trees, CompResult, TreeComparer, TreeReport, TreeVerdict};
