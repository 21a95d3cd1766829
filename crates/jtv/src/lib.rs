//! Decoder for JTV 3.x TV schedule archives.
//!
//! A JTV archive is a zip of paired blocks per channel:
//!
//! - `<name>.pdt` - length-prefixed Windows-1251 programme titles
//! - `<name>.ndx` - FILETIME boundaries between consecutive programmes
//!
//! ## Decoding
//!
//! - [`TitleDecoder`] / [`decode_titles`] - title blocks
//! - [`decode_schedule`] / [`ScheduleRecord`] - schedule blocks
//! - [`filetime`] - 100 ns tick counts since 1601 to calendar time
//! - [`correlate`] - positional pairing of titles and boundaries
//!
//! ## Archives
//!
//! - [`JtvArchive`] - walks a zip container and builds an [`xmltv::Tv`]
//! - [`convert_archive`] - open and convert in one call

pub mod archive;
pub mod correlate;
pub mod error;
pub mod filetime;
pub mod schedule;
pub mod title;

pub use archive::{
    ChannelGuide, ChannelSource, ConvertOptions, JtvArchive, SCHEDULE_EXTENSION,
    TITLE_EXTENSION, assemble, convert_archive, decode_channel,
};
pub use correlate::correlate;
pub use error::{FormatError, JtvError, Result};
pub use schedule::{SCHEDULE_RECORD_SIZE, ScheduleRecord, decode_schedule, parse_records};
pub use title::{
    JTV_SIGNATURE, LEGACY_TITLE_WINDOW, TitleDecoder, decode_titles, decode_titles_with_window,
};
