//! Error types for VTF decoding.

use thiserror::Error;

use crate::format::ImageFormat;

/// Errors that can occur when decoding a VTF file.
///
/// Every malformed input maps to an error; decoding never panics.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error (truncated reads, bad magic).
    #[error("{0}")]
    Common(#[from] vtf_common::Error),

    /// File is smaller than the minimum parseable header.
    #[error("file too small for a VTF header: {0} bytes")]
    FileTooSmall(usize),

    /// Unsupported VTF version.
    #[error("unsupported VTF version {major}.{minor}")]
    UnsupportedVersion { major: u32, minor: u32 },

    /// Image format has no decode routine.
    #[error("cannot decode image format {0:?}")]
    UnsupportedFormat(ImageFormat),

    /// Computed image data region lies outside the file.
    #[error("image data out of bounds: byte {offset} in a {len}-byte file")]
    OutOfBounds { offset: usize, len: usize },
}

/// Result type for VTF operations.
pub type Result<T> = std::result::Result<T, Error>;
