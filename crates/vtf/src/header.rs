//! VTF header parsing.

use vtf_common::BinaryReader;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::format::{image_size, ImageFormat};
use crate::{Error, Result, VTF_MAGIC};

/// Minimum byte length of a parseable VTF file.
const MIN_FILE_SIZE: usize = 64;

/// Resource directory tag (low 24 bits) locating the high-res image data.
const RSRC_IMAGE_DATA: u32 = 0x0000_0030;

/// Fixed header fields shared by every 7.x version, directly after the
/// four-byte signature. Version-dependent fields (depth, resource
/// directory) follow and are read separately.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
struct VtfHeaderRaw {
    version: [u32; 2],
    header_size: u32,
    width: u16,
    height: u16,
    flags: u32,
    frames: u16,
    first_frame: u16,
    padding0: [u8; 4],
    reflectivity: [f32; 3],
    padding1: [u8; 4],
    bumpmap_scale: f32,
    high_res_format: i32,
    mipmap_count: u8,
    low_res_format: i32,
    low_res_width: u8,
    low_res_height: u8,
}

/// Texture flags (the subset that affects decoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureFlags(pub u32);

impl TextureFlags {
    /// Texture has no mip levels beyond the base image.
    pub const NO_MIP: u32 = 0x0000_0100;
    /// Texture is a six-face environment map.
    pub const ENV_MAP: u32 = 0x0000_4000;

    /// Check whether a flag bit is set.
    pub const fn contains(self, bit: u32) -> bool {
        self.0 & bit != 0
    }
}

/// Parsed VTF header.
#[derive(Debug, Clone)]
pub struct VtfHeader {
    /// Image width in texels.
    pub width: u16,
    /// Image height in texels.
    pub height: u16,
    /// Texture depth (z-slices); 1 for everything before 7.2.
    pub depth: u16,
    /// Texture flags.
    pub flags: TextureFlags,
    /// Number of animation frames.
    pub frame_count: u16,
    /// First frame index; `0xFFFF` marks legacy cubemaps carrying a
    /// seventh spheremap face.
    pub first_frame: u16,
    /// Minor version (major is always 7).
    pub version_minor: u32,
    /// High-resolution image format.
    pub format: ImageFormat,
    /// Number of mip levels stored in the file.
    pub mip_count: u8,
    /// Absolute byte offset of the high-res image data.
    pub image_data_offset: usize,
}

impl VtfHeader {
    /// Parse a VTF header from the start of a file buffer.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_FILE_SIZE {
            return Err(Error::FileTooSmall(data.len()));
        }

        let mut reader = BinaryReader::new(data);
        reader.expect_magic(VTF_MAGIC)?;

        let raw: VtfHeaderRaw = reader.read_struct()?;
        // Copy out of the packed struct before indexing.
        let version = raw.version;
        let (major, minor) = (version[0], version[1]);
        if major != 7 || minor > 5 {
            return Err(Error::UnsupportedVersion { major, minor });
        }

        let depth = if minor >= 2 { reader.read_u16()? } else { 1 };

        // The thumbnail is stored between the header and the image data, so
        // its size locates the image data when no resource entry does.
        let low_res_size = image_size(
            ImageFormat::from_raw(raw.low_res_format),
            u32::from(raw.low_res_width),
            u32::from(raw.low_res_height),
        );
        let mut image_data_offset = raw.header_size as usize + low_res_size;

        if minor >= 3 {
            reader.advance(3);
            let num_resources = reader.read_u32()?;
            reader.advance(8);

            for _ in 0..num_resources {
                let tag = reader.read_u32()?;
                let offset = reader.read_u32()?;
                if tag & 0x00FF_FFFF == RSRC_IMAGE_DATA {
                    image_data_offset = offset as usize;
                    break;
                }
            }
        }

        Ok(Self {
            width: raw.width,
            height: raw.height,
            depth,
            flags: TextureFlags(raw.flags),
            frame_count: raw.frames,
            first_frame: raw.first_frame,
            version_minor: minor,
            format: ImageFormat::from_raw(raw.high_res_format),
            mip_count: raw.mipmap_count,
            image_data_offset,
        })
    }

    /// Whether this texture is a cubemap.
    pub fn is_env_map(&self) -> bool {
        self.flags.contains(TextureFlags::ENV_MAP)
    }

    /// Whether downstream mip generation should be suppressed.
    pub fn no_mip(&self) -> bool {
        self.flags.contains(TextureFlags::NO_MIP)
    }

    /// Number of per-face image blocks stored for each mip level.
    ///
    /// Legacy cubemaps (first frame `0xFFFF`, version < 7.5) store a
    /// seventh spheremap face alongside the six cube faces.
    pub(crate) fn face_count(&self) -> u32 {
        if !self.is_env_map() {
            1
        } else if self.first_frame == 0xFFFF && self.version_minor < 5 {
            7
        } else {
            6
        }
    }
}
