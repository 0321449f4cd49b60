//! Binary-to-source transcoding.
//!
//! This module turns a byte blob into a C source fragment declaring a
//! `uint8_t` array and a `uint32_t` length variable.
//!
//! ## Output Format
//!
//! ```text
//! #include <stdint.h>
//!
//! uint8_t fw[] = {
//! 	0x00, 0x01, 0xff,
//! };
//!
//! uint32_t fw_len = sizeof(fw);
//! ```
//!
//! Bytes are grouped [`DEFAULT_BYTES_PER_LINE`] per line in input order.
//! The final line holds the remainder and is never padded.
//!
//! ## Extensibility
//!
//! The [`SourceEmitter`] trait allows alternative output formats; see
//! [`Transcoder::emit`].

mod emitter;

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, trace};

pub use emitter::{CArrayEmitter, LengthStyle, NullEmitter, SourceEmitter, StatsEmitter};

/// Number of bytes rendered on each data line
pub const DEFAULT_BYTES_PER_LINE: usize = 16;

/// Configuration for the transcoder
#[derive(Debug, Clone)]
pub struct TranscoderConfig {
    /// Bytes per data line (0 is treated as 1)
    pub bytes_per_line: usize,
    /// Prefix for every data line (default: one tab)
    pub indent: String,
    /// How `<name>_len` is initialized
    pub length_style: LengthStyle,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
            indent: "\t".to_string(),
            length_style: LengthStyle::SizeOf,
        }
    }
}

impl TranscoderConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of bytes per data line
    pub fn bytes_per_line(mut self, n: usize) -> Self {
        self.bytes_per_line = n;
        self
    }

    /// Sets the data line prefix
    pub fn indent(mut self, s: impl Into<String>) -> Self {
        self.indent = s.into();
        self
    }

    /// Sets the length variable style
    pub fn length_style(mut self, style: LengthStyle) -> Self {
        self.length_style = style;
        self
    }

    fn line_width(&self) -> usize {
        self.bytes_per_line.max(1)
    }
}

/// Summary of a completed transcode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscodeStats {
    /// Number of input bytes emitted
    pub bytes: usize,
    /// Number of data lines emitted
    pub lines: usize,
}

/// Converts byte blobs into source fragments
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    config: TranscoderConfig,
}

impl Transcoder {
    /// Creates a new transcoder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new transcoder with custom configuration
    pub fn with_config(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Drives `emitter` over `data`, one chunk per line.
    pub fn emit<E: SourceEmitter>(
        &self,
        data: &[u8],
        name: &str,
        emitter: &mut E,
    ) -> Result<TranscodeStats> {
        check_symbol(name)?;

        emitter.begin(name)?;
        let mut lines = 0;
        for chunk in data.chunks(self.config.line_width()) {
            emitter.chunk(chunk)?;
            lines += 1;
        }
        emitter.finish(name, data.len())?;

        trace!("Emitted {} bytes over {} lines for '{}'", data.len(), lines, name);
        Ok(TranscodeStats {
            bytes: data.len(),
            lines,
        })
    }

    /// Writes the C fragment for `data` into `sink` and flushes it.
    pub fn write_to<W: Write>(&self, data: &[u8], name: &str, sink: W) -> Result<TranscodeStats> {
        let mut emitter = CArrayEmitter::new(sink)
            .indent(self.config.indent.as_str())
            .length_style(self.config.length_style);
        let stats = self.emit(data, name, &mut emitter)?;
        emitter.into_inner().flush()?;
        Ok(stats)
    }

    /// Renders the C fragment for `data` as a string
    pub fn render(&self, data: &[u8], name: &str) -> Result<String> {
        let mut buf = Vec::with_capacity(data.len() * 6 + 128);
        self.write_to(data, name, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Reads `input` and writes its C fragment to `output`.
    ///
    /// The input is read completely before `output` is opened, so a read
    /// failure leaves the output path untouched. `output` is created if
    /// absent and truncated if present.
    pub fn transcode_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        name: &str,
    ) -> Result<TranscodeStats> {
        let input = input.as_ref();
        let output = output.as_ref();
        check_symbol(name)?;

        let data = fs::read(input).map_err(|e| Error::file_read(input, e))?;
        debug!("Read {} bytes from {}", data.len(), input.display());

        let file = File::create(output).map_err(|e| Error::file_write(output, e))?;
        let stats = self
            .write_to(&data, name, BufWriter::new(file))
            .map_err(|e| e.at_output(output))?;

        debug!(
            "Wrote '{}' ({} lines) to {}",
            name,
            stats.lines,
            output.display()
        );
        Ok(stats)
    }
}

fn check_symbol(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptySymbolName);
    }
    Ok(())
}

/// Transcode a file with the default configuration
///
/// This is a convenience wrapper around [`Transcoder::transcode_file`].
pub fn transcode(input: impl AsRef<Path>, output: impl AsRef<Path>, name: &str) -> Result<()> {
    Transcoder::new().transcode_file(input, output, name)?;
    Ok(())
}
