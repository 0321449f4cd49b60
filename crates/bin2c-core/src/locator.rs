//! Resolution of bundled per-platform helper executables.
//!
//! Native helpers ship next to a packaged tool under names of the form
//! `<stem>-<os>-<arch>[.exe]`, for example `cskburn-linux-x64`,
//! `cskburn-linux-musl-arm64` or `cskburn-win32-x64.exe`.
//!
//! The name is a pure function of a [`Platform`] descriptor, so lookups can
//! be tested with synthetic platforms. [`locate_binary`] adds the existence
//! check. Unrecognized OS and architecture tokens are passed through as-is,
//! so `cskburn-sunos-riscv64` is found if it ships. A platform with no usable
//! token is not an error; it simply has no binary.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Operating system family
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OsFamily {
    /// Linux
    Linux,
    /// macOS
    MacOs,
    /// Windows
    Windows,
    /// FreeBSD
    FreeBsd,
    /// Any other OS, by its lowercase token
    Other(String),
}

impl OsFamily {
    /// Parses an OS token in either Node (`darwin`, `win32`) or Rust
    /// (`macos`, `windows`) spelling
    pub fn parse(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "linux" => Self::Linux,
            "darwin" | "macos" => Self::MacOs,
            "win32" | "windows" => Self::Windows,
            "freebsd" => Self::FreeBsd,
            other => Self::Other(other.to_string()),
        }
    }

    fn token(&self, libc: Libc) -> Option<&str> {
        match (self, libc) {
            (Self::Linux, Libc::Musl) => Some("linux-musl"),
            (Self::Linux, _) => Some("linux"),
            (Self::MacOs, _) => Some("darwin"),
            (Self::Windows, _) => Some("win32"),
            (Self::FreeBsd, _) => Some("freebsd"),
            (Self::Other(raw), _) => passthrough(raw),
        }
    }
}

/// Processor architecture
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arch {
    /// x86-64
    X64,
    /// AArch64
    Arm64,
    /// 32-bit x86
    Ia32,
    /// 32-bit ARM
    Arm,
    /// Any other architecture, by its lowercase token
    Other(String),
}

impl Arch {
    /// Parses an architecture token in either Node (`x64`, `ia32`) or Rust
    /// (`x86_64`, `aarch64`) spelling
    pub fn parse(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "x64" | "x86_64" | "amd64" => Self::X64,
            "arm64" | "aarch64" => Self::Arm64,
            "ia32" | "x86" | "i386" | "i686" => Self::Ia32,
            "arm" => Self::Arm,
            other => Self::Other(other.to_string()),
        }
    }

    fn token(&self) -> Option<&str> {
        match self {
            Self::X64 => Some("x64"),
            Self::Arm64 => Some("arm64"),
            Self::Ia32 => Some("ia32"),
            Self::Arm => Some("arm"),
            Self::Other(raw) => passthrough(raw),
        }
    }
}

/// Accepts a raw token only if it is a plain file name component
fn passthrough(raw: &str) -> Option<&str> {
    let valid = !raw.is_empty()
        && raw
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    valid.then_some(raw)
}

/// C standard library variant. Only meaningful on Linux.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Libc {
    /// glibc
    Gnu,
    /// musl
    Musl,
    /// Not known or not applicable
    #[default]
    Unspecified,
}

/// Host description used to pick a helper binary
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    /// Operating system family
    pub os: OsFamily,
    /// Processor architecture
    pub arch: Arch,
    /// C library variant
    pub libc: Libc,
}

impl Platform {
    /// Creates a platform descriptor
    pub const fn new(os: OsFamily, arch: Arch, libc: Libc) -> Self {
        Self { os, arch, libc }
    }

    /// Describes the platform this crate was compiled for
    pub fn current() -> Self {
        let libc = if cfg!(target_env = "musl") {
            Libc::Musl
        } else if cfg!(target_env = "gnu") {
            Libc::Gnu
        } else {
            Libc::Unspecified
        };

        Self {
            os: OsFamily::parse(std::env::consts::OS),
            arch: Arch::parse(std::env::consts::ARCH),
            libc,
        }
    }

    /// Returns true if a helper binary name exists for this platform
    pub fn is_supported(&self) -> bool {
        self.os.token(self.libc).is_some() && self.arch.token().is_some()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.os.token(self.libc), self.arch.token()) {
            (Some(os), Some(arch)) => write!(f, "{}-{}", os, arch),
            _ => write!(f, "unsupported ({:?}/{:?})", self.os, self.arch),
        }
    }
}

/// Computes the helper file name for `platform`, or `None` if unsupported.
pub fn binary_file_name(stem: &str, platform: &Platform) -> Option<String> {
    let os = platform.os.token(platform.libc)?;
    let arch = platform.arch.token()?;
    let suffix = if platform.os == OsFamily::Windows {
        ".exe"
    } else {
        ""
    };
    Some(format!("{}-{}-{}{}", stem, os, arch, suffix))
}

/// Returns the helper path inside `dir` if a file exists there right now.
pub fn locate_binary(dir: impl AsRef<Path>, stem: &str, platform: &Platform) -> Option<PathBuf> {
    let Some(name) = binary_file_name(stem, platform) else {
        debug!("No {} binary for platform {}", stem, platform);
        return None;
    };

    let path = dir.as_ref().join(name);
    if path.is_file() {
        debug!("Resolved {} binary: {}", stem, path.display());
        Some(path)
    } else {
        trace!("Missing {} binary at {}", stem, path.display());
        None
    }
}

/// A directory of bundled helpers sharing one file stem
#[derive(Debug, Clone)]
pub struct BinaryLocator {
    dir: PathBuf,
    stem: String,
}

impl BinaryLocator {
    /// Creates a locator for `<dir>/<stem>-<os>-<arch>[.exe]`
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
        }
    }

    /// Looks up the helper for an explicit platform
    pub fn locate(&self, platform: &Platform) -> Option<PathBuf> {
        locate_binary(&self.dir, &self.stem, platform)
    }

    /// Looks up the helper for the host platform
    pub fn locate_current(&self) -> Option<PathBuf> {
        self.locate(&Platform::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const LINUX_X64: Platform = Platform::new(OsFamily::Linux, Arch::X64, Libc::Gnu);

    #[test]
    fn test_binary_file_names() {
        let cases = [
            (OsFamily::Linux, Arch::X64, Libc::Gnu, "cskburn-linux-x64"),
            (OsFamily::Linux, Arch::Arm64, Libc::Unspecified, "cskburn-linux-arm64"),
            (OsFamily::Linux, Arch::Arm, Libc::Musl, "cskburn-linux-musl-arm"),
            (OsFamily::MacOs, Arch::Arm64, Libc::Unspecified, "cskburn-darwin-arm64"),
            (OsFamily::Windows, Arch::Ia32, Libc::Unspecified, "cskburn-win32-ia32.exe"),
            (OsFamily::FreeBsd, Arch::X64, Libc::Unspecified, "cskburn-freebsd-x64"),
        ];

        for (os, arch, libc, expected) in cases {
            let platform = Platform::new(os, arch, libc);
            assert_eq!(binary_file_name("cskburn", &platform).as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_musl_only_affects_linux() {
        let mac = Platform::new(OsFamily::MacOs, Arch::X64, Libc::Musl);
        assert_eq!(binary_file_name("tool", &mac).as_deref(), Some("tool-darwin-x64"));
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let platform = Platform::new(OsFamily::parse("SunOS"), Arch::parse("riscv64"), Libc::Musl);
        assert_eq!(
            binary_file_name("tool", &platform).as_deref(),
            Some("tool-sunos-riscv64")
        );
        assert!(platform.is_supported());
    }

    #[test]
    fn test_unusable_tokens() {
        let empty = Platform::new(OsFamily::parse(""), Arch::X64, Libc::Unspecified);
        let escape = Platform::new(OsFamily::Linux, Arch::parse("../x64"), Libc::Gnu);

        assert_eq!(binary_file_name("tool", &empty), None);
        assert_eq!(binary_file_name("tool", &escape), None);
        assert!(!empty.is_supported());
        assert!(LINUX_X64.is_supported());
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(OsFamily::parse("darwin"), OsFamily::MacOs);
        assert_eq!(OsFamily::parse("macos"), OsFamily::MacOs);
        assert_eq!(OsFamily::parse("Win32"), OsFamily::Windows);
        assert_eq!(OsFamily::parse("solaris"), OsFamily::Other("solaris".to_string()));
        assert_eq!(Arch::parse("x86_64"), Arch::X64);
        assert_eq!(Arch::parse("aarch64"), Arch::Arm64);
        assert_eq!(Arch::parse("x86"), Arch::Ia32);
        assert_eq!(Arch::parse("RISCV64"), Arch::Other("riscv64".to_string()));
    }

    #[test]
    fn test_display() {
        let musl = Platform::new(OsFamily::Linux, Arch::Arm64, Libc::Musl);
        assert_eq!(musl.to_string(), "linux-musl-arm64");
        assert!(Platform::new(OsFamily::parse("a/b"), Arch::X64, Libc::Gnu)
            .to_string()
            .starts_with("unsupported"));
    }

    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    #[test]
    fn test_current_platform() {
        let current = Platform::current();
        assert_eq!(current.os, OsFamily::Linux);
        assert_eq!(current.arch, Arch::X64);
    }

    #[test]
    fn test_locate_existing_binary() {
        let dir = TempDir::new().unwrap();
        let expected = dir.path().join("cskburn-linux-x64");
        fs::write(&expected, b"\x7fELF").unwrap();

        let locator = BinaryLocator::new(dir.path(), "cskburn");
        assert_eq!(locator.locate(&LINUX_X64), Some(expected));
    }

    #[test]
    fn test_locate_missing_binary() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("cskburn-darwin-x64"), b"").unwrap();

        assert_eq!(locate_binary(dir.path(), "cskburn", &LINUX_X64), None);
    }

    #[test]
    fn test_locate_ignores_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("cskburn-linux-x64")).unwrap();

        assert_eq!(locate_binary(dir.path(), "cskburn", &LINUX_X64), None);
    }

    #[test]
    fn test_locate_unsupported_platform() {
        let dir = TempDir::new().unwrap();
        let platform = Platform::new(OsFamily::parse(""), Arch::parse(""), Libc::Unspecified);
        assert_eq!(locate_binary(dir.path(), "cskburn", &platform), None);
    }

    #[test]
    fn test_locate_unlisted_platform() {
        let dir = TempDir::new().unwrap();
        let expected = dir.path().join("cskburn-openbsd-x64");
        fs::write(&expected, b"").unwrap();

        let platform = Platform::new(OsFamily::parse("openbsd"), Arch::X64, Libc::Unspecified);
        assert_eq!(locate_binary(dir.path(), "cskburn", &platform), Some(expected));
    }
}
