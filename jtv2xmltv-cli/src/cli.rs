use clap::Parser;
use jtv::LEGACY_TITLE_WINDOW;
use std::path::PathBuf;
use xmltv::DEFAULT_INDENT;

#[derive(Parser, Debug)]
#[command(
    name = "jtv2xmltv",
    about = "Convert a JTV 3.x TV schedule archive (zip of .pdt/.ndx pairs) to XMLTV",
    version
)]
pub struct Args {
    /// Zip archive containing .pdt/.ndx pairs
    pub archive: Option<PathBuf>,

    /// Write the XMLTV document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Spaces per indentation level (0 disables indentation)
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    pub indent: usize,

    /// Stop decoding titles once this many bytes or fewer remain in a .pdt block.
    ///
    /// The default of 26 matches legacy converters and drops short trailing
    /// titles, so a block holding a single short title yields no programmes.
    /// Use 0 to decode every complete record.
    #[arg(long, default_value_t = LEGACY_TITLE_WINDOW)]
    pub title_window: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn convert_options(&self) -> jtv::ConvertOptions {
        jtv::ConvertOptions {
            title_window: self.title_window,
        }
    }
}
