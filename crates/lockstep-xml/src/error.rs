//! Error types for markup parsing.

use thiserror::Error;

/// Errors that can occur while building an element tree.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The markup is not well formed.
    #[error("markup parse error: {0}")]
    Parse(String),

    /// An attribute could not be read or unescaped.
    #[error("attribute error: {0}")]
    Attribute(String),

    /// The document contains no root element.
    #[error("document has no root element")]
    Empty,

    /// Low-level reader error from quick-xml.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error while reading a document from disk.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for markup operations.
pub type Result<T> = std::result::Result<T, XmlError>;
