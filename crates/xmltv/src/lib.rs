//! XMLTV document model and writer.
//!
//! This crate holds the small subset of the XMLTV schema needed to publish a
//! channel list and a programme guide:
//!
//! - [`Tv`] - the document root, channels followed by programmes
//! - [`Channel`] - a channel id and its display name
//! - [`Programme`] - a titled interval on one channel
//! - [`XmltvWriter`] - serializes a [`Tv`] as an indented UTF-8 document

pub mod error;
pub mod model;
pub mod writer;

pub use error::{Result, XmltvError};
pub use model::{Channel, Programme, Tv, XMLTV_TIME_FORMAT, format_time};
pub use writer::{DEFAULT_INDENT, XmltvWriter};
