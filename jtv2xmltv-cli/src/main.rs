mod cli;
mod output;

use crate::cli::Args;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::process;
use tracing::{Level, debug, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.quiet) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }

    if let Err(e) = run(args) {
        if output::is_broken_pipe(&e) {
            debug!("Output closed by consumer");
            return;
        }
        error!("Application error: {:#}", e);
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let Some(archive) = args.archive.as_deref() else {
        Args::command().print_help()?;
        println!();
        return Ok(());
    };

    let tv = jtv::convert_archive(archive, &args.convert_options())
        .with_context(|| format!("Failed to convert {}", archive.display()))?;

    output::write_document(&tv, args.output.as_deref(), args.indent)
}

fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    // stdout carries the document, diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(verbose),
        )
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::io::Write;
    use std::path::Path;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, entries: &[(&str, Vec<u8>)]) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }

    fn title_block(title: &[u8]) -> Vec<u8> {
        let mut buffer = jtv::JTV_SIGNATURE.to_vec();
        buffer.extend_from_slice(&(title.len() as u16).to_le_bytes());
        buffer.extend_from_slice(title);
        buffer
    }

    fn schedule_block(ticks: &[u64]) -> Vec<u8> {
        let mut buffer = (ticks.len() as u16).to_le_bytes().to_vec();
        for tick in ticks {
            buffer.extend_from_slice(&[0, 0]);
            buffer.extend_from_slice(&tick.to_le_bytes());
            buffer.extend_from_slice(&[0, 0]);
        }
        buffer
    }

    fn args(archive: &Path, output: &Path) -> Args {
        let argv: Vec<OsString> = vec![
            "jtv2xmltv".into(),
            archive.into(),
            "--output".into(),
            output.into(),
            "--title-window".into(),
            "0".into(),
        ];
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_run_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("tv.zip");
        let output = dir.path().join("tv.xml");
        let start = 129_439_476_000_000_000u64;

        write_archive(
            &archive,
            &[
                ("ch1.pdt", title_block(b"Test")),
                ("ch1.ndx", schedule_block(&[start, start + 36_000_000_000])),
            ],
        );

        run(args(&archive, &output)).unwrap();

        let xml = std::fs::read_to_string(&output).unwrap();
        assert!(xml.contains("<display-name>ch1</display-name>"));
        assert!(xml.contains("start=\"20110307050000\" stop=\"20110307060000\""));
        assert!(xml.contains("<title>Test</title>"));
    }

    #[test]
    fn test_bad_magic_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("tv.zip");
        let output = dir.path().join("tv.xml");

        let mut broken = title_block(b"Test");
        broken[0] = b'X';
        write_archive(&archive, &[("ch1.pdt", broken)]);

        assert!(run(args(&archive, &output)).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_archive_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("tv.xml");

        let err = run(args(&dir.path().join("missing.zip"), &output)).unwrap_err();
        assert!(err.to_string().contains("missing.zip"));
        assert!(!output.exists());
    }
}
