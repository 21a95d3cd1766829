//! `.pdt` title block decoding.
//!
//! Layout:
//!
//! ```text
//! "JTV 3.x TV Program Data\n\n\n"   26 bytes
//! repeated:
//!   length                            u16 little-endian
//!   title                             `length` bytes, Windows-1251
//! ```

use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::WINDOWS_1251;
use tracing::trace;

use crate::error::FormatError;

/// Signature every title block starts with.
pub const JTV_SIGNATURE: &[u8; 26] = b"JTV 3.x TV Program Data\n\n\n";

/// Number of bytes that must remain beyond the cursor before another record
/// is attempted. Legacy converters stop once 26 bytes or fewer are left.
pub const LEGACY_TITLE_WINDOW: usize = 26;

/// The one byte Windows-1251 leaves unassigned. `encoding_rs` passes it
/// through as the C1 control U+0098; it is reported as U+FFFD instead.
const UNASSIGNED_BYTE: u8 = 0x98;

/// Streaming decoder over a `.pdt` block.
///
/// The signature is checked on construction; titles are then produced lazily
/// through [`Iterator`]. Once a record fails to decode the iterator is fused.
pub struct TitleDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    window: usize,
}

impl<'a> TitleDecoder<'a> {
    /// Validate the block signature and position the cursor on the first record.
    pub fn new(data: &'a [u8]) -> Result<Self, FormatError> {
        if !data.starts_with(JTV_SIGNATURE) {
            return Err(FormatError::BadMagic);
        }

        Ok(Self {
            data,
            pos: JTV_SIGNATURE.len(),
            window: LEGACY_TITLE_WINDOW,
        })
    }

    /// Override the trailing-bytes window (see [`LEGACY_TITLE_WINDOW`]).
    /// A window of `0` decodes every record up to the end of the block.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Bytes left after the cursor.
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Read `len` bytes from the buffer, advancing the position.
    fn read_bytes(&mut self, len: usize, context: &'static str) -> Result<&'a [u8], FormatError> {
        let available = self.remaining();
        if len > available {
            return Err(FormatError::truncated(context, len, available));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_title(&mut self) -> Result<String, FormatError> {
        let len = LittleEndian::read_u16(self.read_bytes(2, "title length")?) as usize;
        let raw = self.read_bytes(len, "title")?;

        let (title, _) = WINDOWS_1251.decode_without_bom_handling(raw);
        if raw.contains(&UNASSIGNED_BYTE) {
            trace!(offset = self.pos - len, "replaced unassigned bytes in title");
            return Ok(title.replace('\u{98}', "\u{FFFD}"));
        }
        Ok(title.into_owned())
    }

    /// Decode every remaining title, failing on the first malformed record.
    pub fn decode_all(self) -> Result<Vec<String>, FormatError> {
        self.collect()
    }
}

impl Iterator for TitleDecoder<'_> {
    type Item = Result<String, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() <= self.window {
            return None;
        }

        let result = self.read_title();
        if result.is_err() {
            self.pos = self.data.len();
        }
        Some(result)
    }
}

/// Decode a title block with the legacy trailing window.
pub fn decode_titles(data: &[u8]) -> Result<Vec<String>, FormatError> {
    TitleDecoder::new(data)?.decode_all()
}

/// Decode a title block with a custom trailing window.
pub fn decode_titles_with_window(data: &[u8], window: usize) -> Result<Vec<String>, FormatError> {
    TitleDecoder::new(data)?.with_window(window).decode_all()
}
