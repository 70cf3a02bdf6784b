//! Element trees for lockstep's structural comparison.
//!
//! Markup is parsed once into a fully materialized, immutable [`Element`]
//! tree. The comparator only reads these trees; [`render_lines`] turns a node
//! back into indented markup lines when a divergence has to be shown.
//!
//! # Key Types
//!
//! - [`Element`] -- Qualified name, attributes, ordered children, leaf text
//! - [`QName`] -- Namespace URI plus local name (prefix kept for display)
//! - [`Attribute`] -- Qualified name and value

pub mod error;
pub mod node;
pub mod parser;
pub mod render;

pub use error::{Result, XmlError};
pub use node::{Attribute, Element, QName};
pub use parser::{parse_file, parse_str};
pub use render::render_lines;
