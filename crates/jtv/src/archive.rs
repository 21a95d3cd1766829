//! Archive traversal.
//!
//! A JTV archive is a zip container holding one `<name>.pdt` title block per
//! channel, usually next to a `<name>.ndx` schedule block. Channels are
//! numbered from 1 in central-directory order of their title entries.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::{debug, info, warn};
use xmltv::{Channel, Programme, Tv};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::correlate::correlate;
use crate::error::{JtvError, Result};
use crate::schedule::decode_schedule;
use crate::title::{LEGACY_TITLE_WINDOW, TitleDecoder};

/// Extension of title entries.
pub const TITLE_EXTENSION: &str = ".pdt";

/// Extension of schedule entries.
pub const SCHEDULE_EXTENSION: &str = ".ndx";

/// Conversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Trailing-bytes window for the title decoder.
    pub title_window: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            title_window: LEGACY_TITLE_WINDOW,
        }
    }
}

/// Raw bytes of one channel, as read from the archive.
#[derive(Debug, Clone)]
pub struct ChannelSource {
    /// Sequential channel number, starting at 1.
    pub id: u32,
    /// Name of the `.pdt` entry.
    pub title_entry: String,
    /// Name of the sibling `.ndx` entry, if present.
    pub schedule_entry: Option<String>,
    pub titles: Vec<u8>,
    pub schedule: Option<Vec<u8>>,
}

impl ChannelSource {
    /// Display name: the title entry's full name without its extension,
    /// directories included.
    pub fn display_name(&self) -> &str {
        entry_stem(&self.title_entry).unwrap_or(self.title_entry.as_str())
    }
}

/// Decoded result for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelGuide {
    pub channel: Channel,
    pub programmes: Vec<Programme>,
}

/// Decodes one channel's title and schedule blocks.
///
/// A missing schedule yields a channel with no programmes.
pub fn decode_channel(source: &ChannelSource, options: &ConvertOptions) -> Result<ChannelGuide> {
    let channel = Channel::new(source.id.to_string(), source.display_name());

    let titles = TitleDecoder::new(&source.titles)
        .and_then(|decoder| decoder.with_window(options.title_window).decode_all())
        .map_err(|e| JtvError::format(source.title_entry.as_str(), e))?;

    let boundaries = match (&source.schedule, &source.schedule_entry) {
        (Some(data), Some(entry)) => {
            decode_schedule(data).map_err(|e| JtvError::format(entry.as_str(), e))?
        }
        _ => Vec::new(),
    };

    let programmes = correlate(&channel.id, &titles, &boundaries);

    debug!(
        channel = %channel.id,
        name = %channel.display_name,
        titles = titles.len(),
        boundaries = boundaries.len(),
        programmes = programmes.len(),
        "decoded channel"
    );

    Ok(ChannelGuide {
        channel,
        programmes,
    })
}

/// Folds per-channel results into a single document, preserving order.
pub fn assemble(guides: impl IntoIterator<Item = ChannelGuide>) -> Tv {
    guides.into_iter().fold(Tv::new(), |mut tv, guide| {
        tv.channels.push(guide.channel);
        tv.programmes.extend(guide.programmes);
        tv
    })
}

/// Strips the title extension from an entry name.
fn entry_stem(name: &str) -> Option<&str> {
    name.strip_suffix(TITLE_EXTENSION)
}

/// A zip container of JTV entries.
pub struct JtvArchive<R> {
    archive: ZipArchive<R>,
}

impl JtvArchive<BufReader<File>> {
    /// Opens an archive on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let archive_open = |source: ZipError| JtvError::ArchiveOpen {
            path: Some(path.to_path_buf()),
            source,
        };

        let file = File::open(path).map_err(|e| archive_open(ZipError::Io(e)))?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(archive_open)?;

        info!(path = %path.display(), entries = archive.len(), "opened archive");
        Ok(Self { archive })
    }
}

impl<R: Read + Seek> JtvArchive<R> {
    /// Wraps an already opened reader.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|source| JtvError::ArchiveOpen { path: None, source })?;
        Ok(Self { archive })
    }

    /// File entry names in central-directory order.
    pub fn entry_names(&mut self) -> Result<Vec<String>> {
        let mut names = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let entry = self.archive.by_index(index)?;
            if !entry.is_dir() {
                names.push(entry.name().to_string());
            }
        }
        Ok(names)
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut entry = self.archive.by_name(name)?;
        let mut buffer = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// Reads the raw bytes of every channel.
    ///
    /// Every `.pdt` entry becomes a channel. Its schedule is the entry with the
    /// same name and a `.ndx` extension; `.ndx` entries without a title sibling
    /// are never read.
    pub fn sources(&mut self) -> Result<Vec<ChannelSource>> {
        let names = self.entry_names()?;
        let available: HashSet<&str> = names.iter().map(String::as_str).collect();

        let mut sources = Vec::new();
        for name in &names {
            let Some(stem) = entry_stem(name) else {
                continue;
            };

            let id = sources.len() as u32 + 1;
            let titles = self.read_entry(name)?;

            let schedule_name = format!("{stem}{SCHEDULE_EXTENSION}");
            let (schedule_entry, schedule) = if available.contains(schedule_name.as_str()) {
                let data = self.read_entry(&schedule_name)?;
                (Some(schedule_name), Some(data))
            } else {
                warn!(entry = %name, "no schedule entry, channel will have no programmes");
                (None, None)
            };

            sources.push(ChannelSource {
                id,
                title_entry: name.clone(),
                schedule_entry,
                titles,
                schedule,
            });
        }

        Ok(sources)
    }

    /// Decodes the whole archive into an XMLTV document.
    ///
    /// Any malformed entry aborts the conversion.
    pub fn convert(&mut self, options: &ConvertOptions) -> Result<Tv> {
        let sources = self.sources()?;
        let guides = sources
            .iter()
            .map(|source| decode_channel(source, options))
            .collect::<Result<Vec<_>>>()?;

        let tv = assemble(guides);
        info!(
            channels = tv.channels.len(),
            programmes = tv.programmes.len(),
            "converted archive"
        );
        Ok(tv)
    }
}

/// Opens and converts the archive at `path`.
pub fn convert_archive<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<Tv> {
    JtvArchive::open(path)?.convert(options)
}
