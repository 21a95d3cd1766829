//! XMLTV writer error types.

use thiserror::Error;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, XmltvError>;

/// Errors that can occur while serializing a document.
#[derive(Error, Debug)]
pub enum XmltvError {
    /// Markup errors reported by the XML writer
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO errors from the underlying sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
