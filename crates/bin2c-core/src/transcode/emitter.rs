//! Extensible source emission traits.
//!
//! This module provides the [`SourceEmitter`] trait for customizing
//! how a byte array declaration is written to output.

use std::io::{self, Write};

/// How the `<name>_len` variable gets its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthStyle {
    /// `sizeof(<name>)`, computed by the consuming compiler
    #[default]
    SizeOf,
    /// The byte count written out as a decimal literal
    Literal,
}

/// Trait for writing a byte array declaration to output.
///
/// [`Transcoder::emit`](super::Transcoder::emit) calls `begin` once,
/// `chunk` once per line of bytes in input order, then `finish` once.
/// `chunk` is never called with an empty slice.
///
/// # Example
///
/// ```ignore
/// use bin2c_core::SourceEmitter;
///
/// struct RustSliceEmitter {
///     output: String,
/// }
///
/// impl SourceEmitter for RustSliceEmitter {
///     fn begin(&mut self, name: &str) -> std::io::Result<()> {
///         self.output.push_str(&format!("pub static {}: &[u8] = &[\n", name.to_uppercase()));
///         Ok(())
///     }
///     // ... implement chunk and finish
/// }
/// ```
pub trait SourceEmitter {
    /// Write everything that precedes the first data line
    fn begin(&mut self, name: &str) -> io::Result<()> {
        let _ = name;
        Ok(())
    }

    /// Write one line of data
    fn chunk(&mut self, bytes: &[u8]) -> io::Result<()> {
        let _ = bytes;
        Ok(())
    }

    /// Write everything that follows the last data line
    fn finish(&mut self, name: &str, len: usize) -> io::Result<()> {
        let _ = (name, len);
        Ok(())
    }
}

/// Writes a C fragment: a `uint8_t` array followed by a `uint32_t` length.
#[derive(Debug)]
pub struct CArrayEmitter<W> {
    sink: W,
    indent: String,
    length_style: LengthStyle,
}

impl<W: Write> CArrayEmitter<W> {
    /// Creates an emitter with tab indentation and a `sizeof` length
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            indent: "\t".to_string(),
            length_style: LengthStyle::SizeOf,
        }
    }

    /// Sets the prefix written before every data line
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets how the length variable is initialized
    pub fn length_style(mut self, style: LengthStyle) -> Self {
        self.length_style = style;
        self
    }

    /// Returns the underlying sink
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> SourceEmitter for CArrayEmitter<W> {
    fn begin(&mut self, name: &str) -> io::Result<()> {
        self.sink.write_all(b"#include <stdint.h>\n\n")?;
        writeln!(self.sink, "uint8_t {}[] = {{", name)
    }

    fn chunk(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sink.write_all(self.indent.as_bytes())?;
        for (i, byte) in bytes.iter().enumerate() {
            if i > 0 {
                self.sink.write_all(b", ")?;
            }
            write!(self.sink, "0x{:02x}", byte)?;
        }
        self.sink.write_all(b",\n")
    }

    fn finish(&mut self, name: &str, len: usize) -> io::Result<()> {
        self.sink.write_all(b"};\n\n")?;
        match self.length_style {
            LengthStyle::SizeOf => writeln!(self.sink, "uint32_t {0}_len = sizeof({0});", name),
            LengthStyle::Literal => writeln!(self.sink, "uint32_t {}_len = {};", name, len),
        }
    }
}

/// A no-op emitter that discards all output
pub struct NullEmitter;

impl SourceEmitter for NullEmitter {}

/// An emitter that only counts what would be written
#[derive(Debug, Default)]
pub struct StatsEmitter {
    /// Number of data lines
    pub lines: usize,
    /// Number of bytes across all lines
    pub bytes: usize,
    /// Length of the longest line, in bytes of input
    pub widest_line: usize,
}

impl SourceEmitter for StatsEmitter {
    fn chunk(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.lines += 1;
        self.bytes += bytes.len();
        self.widest_line = self.widest_line.max(bytes.len());
        Ok(())
    }
}
