//! Valve Texture Format (VTF) decoder.
//!
//! VTF is the texture container used by Source engine games: a versioned
//! (7.0 through 7.5) header, an optional resource directory, an optional
//! low-resolution thumbnail, then image data stored smallest-mip-first,
//! optionally as a cubemap and optionally block-compressed.
//!
//! This crate turns a fully loaded `.vtf` byte buffer into uncompressed
//! RGBA8888 pixel data for the highest-resolution mip level, ready for
//! upload to a GPU texture. Mipmap generation, sampler setup and any other
//! GPU-side work are left to the caller, which can consult the parsed
//! header (`mip_count`, the `NoMip` flag) to decide what to do.
//!
//! # File Format
//!
//! - 4 bytes: Magic (`"VTF\0"`)
//! - 8 bytes: Version (major.minor, always 7.0 - 7.5)
//! - 51 bytes: Fixed fields (dimensions, flags, frames, format, mip count,
//!   thumbnail format and dimensions)
//! - 7.2+: 2 bytes texture depth
//! - 7.3+: resource directory (8-byte tagged entries; the entry tagged
//!   `0x30` locates the high-res image data)
//! - Image data: mip levels from smallest to largest, each mip holding
//!   `frames * faces * depth` images
//!
//! # Example
//!
//! ```no_run
//! use vtf::{decode_texture, DecodedImage};
//!
//! let bytes = std::fs::read("texture.vtf")?;
//! let decoded = decode_texture(&bytes)?;
//! match &decoded.image {
//!     DecodedImage::TwoD { pixels } => {
//!         println!("{}x{}: {} bytes", decoded.header.width, decoded.header.height, pixels.len());
//!     }
//!     DecodedImage::Cube { .. } => {
//!         let face = decoded.face(0).unwrap();
//!         println!("cubemap face 0: {} bytes", face.len());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod block;
mod error;
mod float;
mod format;
mod header;
mod raster;
mod texture;

pub use error::{Error, Result};
pub use format::{image_size, mip_offset, ImageFormat};
pub use header::{TextureFlags, VtfHeader};
pub use texture::{decode_image, decode_texture, DecodedImage, DecodedTexture};

/// VTF file magic bytes ("VTF\0").
pub const VTF_MAGIC: &[u8; 4] = b"VTF\0";
