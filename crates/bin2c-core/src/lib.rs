//! # bin2c-core
//!
//! A library for embedding binary blobs in C sources.
//!
//! This crate provides the core functionality for:
//! - Rendering a byte blob as a `uint8_t` array plus a `uint32_t` length
//! - Locating bundled per-platform native helper executables
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`transcode`]: Binary-to-source transcoding
//! - [`locator`]: Platform helper binary resolution
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use bin2c_core::{Transcoder, TranscoderConfig, LengthStyle};
//!
//! // Default layout: 16 bytes per line, `sizeof` length
//! bin2c_core::transcode("firmware.bin", "firmware.c", "firmware")?;
//!
//! // Render in memory with a literal length instead
//! let config = TranscoderConfig::new().length_style(LengthStyle::Literal);
//! let source = Transcoder::with_config(config).render(&[0x00, 0x01, 0xff], "blob")?;
//! assert!(source.contains("uint32_t blob_len = 3;"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`SourceEmitter`]: Customize how the array declaration is written
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod error;
pub mod locator;
pub mod transcode;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use locator::{binary_file_name, locate_binary, Arch, BinaryLocator, Libc, OsFamily, Platform};
pub use transcode::{
    transcode, CArrayEmitter, LengthStyle, NullEmitter, SourceEmitter, StatsEmitter,
    TranscodeStats, Transcoder, TranscoderConfig, DEFAULT_BYTES_PER_LINE,
};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
