//! bin2c - Convert a binary file into an embeddable C byte array
//!
//! Writes a C fragment declaring `uint8_t <name>[]` with the file's bytes,
//! sixteen per line, followed by `uint32_t <name>_len`.

use anyhow::{Context, Result};
use bin2c_core::{LengthStyle, Transcoder, TranscoderConfig};
use clap::builder::{NonEmptyStringValueParser, OsStringValueParser, TypedValueParser};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Printed on stdout when the positional arguments are missing or invalid.
/// Paths starting with `-` go after `--`.
const USAGE: &str = "Usage: bin2c [options] [--] <input> <output> <name>";

/// Exit status for usage errors (-1 as seen by the shell)
const USAGE_EXIT_CODE: i32 = 255;

/// Convert a binary file into an embeddable C byte array
#[derive(Parser, Debug)]
#[command(name = "bin2c")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Binary file to embed
    #[arg(value_parser = non_empty_path())]
    input: PathBuf,

    /// C source file to write (created or truncated)
    #[arg(value_parser = non_empty_path())]
    output: PathBuf,

    /// Name of the generated array; the length is `<name>_len`
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    name: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// How `<name>_len` is initialized
    #[arg(long, value_enum, default_value = "sizeof")]
    length: LengthArg,
}

/// Initializer for the length variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LengthArg {
    /// `sizeof(<name>)`, stays correct if the array is edited by hand
    Sizeof,
    /// The byte count as a decimal literal
    Literal,
}

impl From<LengthArg> for LengthStyle {
    fn from(arg: LengthArg) -> Self {
        match arg {
            LengthArg::Sizeof => LengthStyle::SizeOf,
            LengthArg::Literal => LengthStyle::Literal,
        }
    }
}

fn main() -> Result<()> {
    let cli = parse_args(std::env::args_os());

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run(&cli)
}

/// Parses arguments, exiting with the usage line on anything but help/version
fn parse_args<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if is_informational(e.kind()) => e.exit(),
        Err(_) => {
            println!("{}", USAGE);
            process::exit(USAGE_EXIT_CODE);
        }
    }
}

/// Path parser that treats an empty argument like a missing one
fn non_empty_path() -> impl TypedValueParser<Value = PathBuf> {
    OsStringValueParser::new().try_map(|value| {
        if value.is_empty() {
            Err("value must not be empty")
        } else {
            Ok(PathBuf::from(value))
        }
    })
}

fn is_informational(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

/// Transcode the input named on the command line
fn run(cli: &Cli) -> Result<()> {
    let config = TranscoderConfig::new().length_style(cli.length.into());
    let stats = Transcoder::with_config(config)
        .transcode_file(&cli.input, &cli.output, &cli.name)
        .with_context(|| {
            format!(
                "Failed to convert {} into {}",
                cli.input.display(),
                cli.output.display()
            )
        })?;

    info!(
        "Wrote {} ({} bytes, {} lines) to {}",
        cli.name,
        stats.bytes,
        stats.lines,
        cli.output.display()
    );

    Ok(())
}
