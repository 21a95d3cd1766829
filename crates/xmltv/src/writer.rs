use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;
use crate::model::{Channel, Programme, Tv, format_time};

/// Indentation width used when none is configured.
pub const DEFAULT_INDENT: usize = 4;

/// Writes a [`Tv`] document as UTF-8 XMLTV markup.
///
/// The writer is purely sequential: declaration, `<tv>`, every channel, every
/// programme, `</tv>`. Callers should build the whole [`Tv`] first so that a
/// failed conversion never leaves a partial document behind.
pub struct XmltvWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmltvWriter<W> {
    /// Creates a writer indenting nested elements by [`DEFAULT_INDENT`] spaces.
    pub fn new(inner: W) -> Self {
        Self::with_indent(inner, DEFAULT_INDENT)
    }

    /// Creates a writer with a custom indentation width. `0` disables indentation.
    pub fn with_indent(inner: W, indent: usize) -> Self {
        let writer = if indent == 0 {
            Writer::new(inner)
        } else {
            Writer::new_with_indent(inner, b' ', indent)
        };
        Self { writer }
    }

    /// Writes the complete document, including the XML declaration.
    pub fn write_document(&mut self, tv: &Tv) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.writer.write_event(Event::Start(BytesStart::new("tv")))?;

        for channel in &tv.channels {
            self.write_channel(channel)?;
        }
        for programme in &tv.programmes {
            self.write_programme(programme)?;
        }

        self.writer.write_event(Event::End(BytesEnd::new("tv")))?;
        self.writer.get_mut().write_all(b"\n")?;
        self.writer.get_mut().flush()?;
        Ok(())
    }

    fn write_channel(&mut self, channel: &Channel) -> Result<()> {
        let mut start = BytesStart::new("channel");
        start.push_attribute(("id", channel.id.as_str()));

        self.writer.write_event(Event::Start(start))?;
        self.write_text_element("display-name", &channel.display_name)?;
        self.writer
            .write_event(Event::End(BytesEnd::new("channel")))?;
        Ok(())
    }

    fn write_programme(&mut self, programme: &Programme) -> Result<()> {
        let start_time = format_time(&programme.start);
        let stop_time = format_time(&programme.stop);

        let mut start = BytesStart::new("programme");
        start.push_attribute(("channel", programme.channel.as_str()));
        start.push_attribute(("start", start_time.as_str()));
        start.push_attribute(("stop", stop_time.as_str()));

        self.writer.write_event(Event::Start(start))?;
        self.write_text_element("title", &programme.title)?;
        self.writer
            .write_event(Event::End(BytesEnd::new("programme")))?;
        Ok(())
    }

    fn write_text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
