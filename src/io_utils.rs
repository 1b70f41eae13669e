//! Reading uploads and writing reports.
//!
//! - **Uploads**: whole-file reads from a path or stdin (`-`), size ceiling,
//!   and decoding via `encoding_rs` (UTF-8 by default, BOM aware).
//! - **Reports**: pretty JSON to a file or stdout.
//! - **Rejects**: CSV output with `QuoteStyle::Always` so previews containing
//!   commas survive re-upload.

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;

use crate::error::IntakeError;

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Rejects oversized uploads, then decodes them to text.
pub fn decode_upload(
    bytes: &[u8],
    encoding: &'static Encoding,
    max_bytes: usize,
) -> std::result::Result<String, IntakeError> {
    if bytes.len() > max_bytes {
        return Err(IntakeError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(IntakeError::Decode {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

pub fn read_upload(path: &Path, encoding: &'static Encoding, max_bytes: usize) -> Result<String> {
    let mut bytes = Vec::new();
    if is_dash(path) {
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Reading upload from stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Opening input file {path:?}"))?
            .read_to_end(&mut bytes)
            .with_context(|| format!("Reading input file {path:?}"))?;
    }
    let text = decode_upload(&bytes, encoding, max_bytes)
        .with_context(|| format!("Decoding upload {path:?}"))?;
    Ok(text)
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(io::stdout()),
    };
    Ok(writer)
}

pub fn write_json<T: Serialize + ?Sized>(path: Option<&Path>, value: &T) -> Result<()> {
    let mut writer = open_output(path)?;
    serde_json::to_writer_pretty(&mut writer, value).context("Writing JSON output")?;
    writeln!(writer)?;
    writer.flush().context("Flushing JSON output")
}

pub fn open_csv_writer(path: &Path) -> Result<csv::Writer<Box<dyn Write>>> {
    let base = open_output(Some(path))?;
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(b',')
        .quote_style(QuoteStyle::Always)
        .double_quote(true);
    Ok(builder.from_writer(base))
}
