use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use xmltv::{Tv, XmltvWriter};

/// Writes the finished document to `path`, or to stdout when no path is given.
///
/// The destination is only touched here, after the whole guide has been
/// decoded, so a failed conversion never produces partial output.
pub fn write_document(tv: &Tv, path: Option<&Path>, indent: usize) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            write_to(tv, BufWriter::new(file), indent)
                .with_context(|| format!("Failed to write {}", path.display()))
        }
        None => write_to(tv, BufWriter::new(io::stdout().lock()), indent)
            .context("Failed to write to stdout"),
    }
}

fn write_to<W: Write>(tv: &Tv, sink: W, indent: usize) -> Result<()> {
    let mut writer = XmltvWriter::with_indent(sink, indent);
    writer.write_document(tv)?;
    Ok(())
}

/// Check if an error was caused by the consumer closing stdout.
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}
