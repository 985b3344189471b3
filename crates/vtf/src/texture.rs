//! Top-level texture decoding: format dispatch, 2D and cubemap assembly.

use crate::format::{image_size, mip_offset, ImageFormat};
use crate::header::VtfHeader;
use crate::{block, float, raster, Error, Result};

/// A decoded texture: the parsed header plus RGBA8888 pixel data for the
/// highest-resolution mip level.
///
/// The header is surfaced so callers can drive texture construction
/// (mip generation from [`VtfHeader::no_mip`] and `mip_count`, cubemap
/// binding from [`VtfHeader::is_env_map`]).
#[derive(Debug, Clone)]
pub struct DecodedTexture {
    pub header: VtfHeader,
    pub image: DecodedImage,
}

/// RGBA8888 pixel data for a decoded texture.
#[derive(Debug, Clone)]
pub enum DecodedImage {
    /// A single 2D image of `width * height * 4` bytes.
    TwoD { pixels: Vec<u8> },
    /// Six cubemap faces concatenated in face order,
    /// `6 * width * height * 4` bytes total.
    Cube { faces: Vec<u8> },
}

impl DecodedTexture {
    /// The whole decoded buffer, regardless of layout.
    pub fn pixels(&self) -> &[u8] {
        match &self.image {
            DecodedImage::TwoD { pixels } => pixels,
            DecodedImage::Cube { faces } => faces,
        }
    }

    /// Pixels of one cube face. `None` for 2D textures or `index >= 6`.
    pub fn face(&self, index: usize) -> Option<&[u8]> {
        match &self.image {
            DecodedImage::Cube { faces } if index < 6 => {
                let size = faces.len() / 6;
                Some(&faces[index * size..(index + 1) * size])
            }
            _ => None,
        }
    }
}

/// Decode a complete VTF file to RGBA8888.
///
/// `data` must hold the entire file; decoding is a pure function of the
/// buffer and touches nothing else.
pub fn decode_texture(data: &[u8]) -> Result<DecodedTexture> {
    let header = VtfHeader::parse(data)?;
    let image = if header.is_env_map() {
        decode_cube(data, &header)?
    } else {
        decode_2d(data, &header)?
    };
    Ok(DecodedTexture { header, image })
}

/// Decode one image (one face, one mip) to RGBA8888.
pub fn decode_image(format: ImageFormat, src: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let pixels = width as usize * height as usize;
    Ok(match format {
        ImageFormat::Rgba8888 => raster::rgba8888(src, pixels),
        ImageFormat::Abgr8888 => raster::abgr8888(src, pixels),
        ImageFormat::Argb8888 => raster::argb8888(src, pixels),
        ImageFormat::Bgra8888 => raster::bgra8888(src, pixels),
        ImageFormat::Bgrx8888 => raster::bgrx8888(src, pixels),
        ImageFormat::Rgb888 | ImageFormat::Rgb888Bluescreen => raster::rgb888(src, pixels),
        ImageFormat::Bgr888 | ImageFormat::Bgr888Bluescreen => raster::bgr888(src, pixels),
        ImageFormat::Uvwq8888 | ImageFormat::Uvlx8888 => raster::uvwq8888(src, pixels),
        ImageFormat::Rgb565 => raster::rgb565(src, pixels),
        ImageFormat::Bgr565 => raster::bgr565(src, pixels),
        ImageFormat::Bgra4444 => raster::bgra4444(src, pixels),
        ImageFormat::Bgra5551 => raster::bgra5551(src, pixels),
        ImageFormat::Bgrx5551 => raster::bgrx5551(src, pixels),
        ImageFormat::Uv88 => raster::uv88(src, pixels),
        ImageFormat::I8 | ImageFormat::P8 => raster::i8(src, pixels),
        ImageFormat::A8 => raster::a8(src, pixels),
        ImageFormat::Ia88 => raster::ia88(src, pixels),
        ImageFormat::Rgba16161616 => raster::rgba16161616(src, pixels),
        ImageFormat::Rgba16161616F => float::rgba16161616f(src, pixels),
        ImageFormat::R32F => float::r32f(src, pixels),
        ImageFormat::Rgb323232F => float::rgb323232f(src, pixels),
        ImageFormat::Rgba32323232F => float::rgba32323232f(src, pixels),
        ImageFormat::Dxt1 => block::dxt1(src, width, height, false),
        ImageFormat::Dxt1OneBitAlpha => block::dxt1(src, width, height, true),
        ImageFormat::Dxt3 => block::dxt3(src, width, height),
        ImageFormat::Dxt5 => block::dxt5(src, width, height),
        ImageFormat::Ati1N => block::ati1n(src, width, height),
        ImageFormat::Ati2N => block::ati2n(src, width, height),
        _ => return Err(Error::UnsupportedFormat(format)),
    })
}

/// Byte offset of the top mip level within the file.
fn top_mip_offset(header: &VtfHeader, face_count: u32) -> usize {
    header.image_data_offset
        + mip_offset(
            header.format,
            u32::from(header.width),
            u32::from(header.height),
            u32::from(header.depth),
            u32::from(header.mip_count),
            u32::from(header.frame_count),
            face_count,
        )
}

/// Slice `count` bytes at `start`, failing instead of indexing out of range.
fn slice_region(data: &[u8], start: usize, count: usize) -> Result<&[u8]> {
    data.get(start..start + count).ok_or(Error::OutOfBounds {
        offset: start + count,
        len: data.len(),
    })
}

fn decode_2d(data: &[u8], header: &VtfHeader) -> Result<DecodedImage> {
    let (width, height) = (u32::from(header.width), u32::from(header.height));
    let offset = top_mip_offset(header, 1);
    if offset >= data.len() {
        return Err(Error::OutOfBounds {
            offset,
            len: data.len(),
        });
    }

    let size = image_size(header.format, width, height) * usize::from(header.depth.max(1));
    let src = slice_region(data, offset, size)?;
    let pixels = decode_image(header.format, src, width, height)?;
    Ok(DecodedImage::TwoD { pixels })
}

fn decode_cube(data: &[u8], header: &VtfHeader) -> Result<DecodedImage> {
    let (width, height) = (u32::from(header.width), u32::from(header.height));
    let face_count = header.face_count();
    let offset = top_mip_offset(header, face_count);
    if offset >= data.len() {
        return Err(Error::OutOfBounds {
            offset,
            len: data.len(),
        });
    }

    let face_size = image_size(header.format, width, height);
    let mut faces = Vec::with_capacity(6 * width as usize * height as usize * 4);
    for face in 0..face_count as usize {
        let src = slice_region(data, offset + face * face_size, face_size)?;
        // The legacy seventh (spheremap) face is consumed to keep the
        // cursor honest but never decoded into output.
        if face < 6 {
            faces.extend_from_slice(&decode_image(header.format, src, width, height)?);
        }
    }
    Ok(DecodedImage::Cube { faces })
}

#[cfg(test)]
pub(crate) mod test_util {
    /// Builds synthetic VTF buffers for tests.
    pub(crate) struct VtfBuilder {
        minor: u32,
        width: u16,
        height: u16,
        format: i32,
        flags: u32,
        frames: u16,
        first_frame: u16,
        mip_count: u8,
        depth: u16,
        resources: Vec<(u32, u32)>,
        data: Vec<u8>,
    }

    impl VtfBuilder {
        pub(crate) fn new(minor: u32, width: u16, height: u16, format: i32) -> Self {
            Self {
                minor,
                width,
                height,
                format,
                flags: 0,
                frames: 1,
                first_frame: 0,
                mip_count: 1,
                depth: 1,
                resources: Vec::new(),
                data: Vec::new(),
            }
        }

        pub(crate) fn flags(mut self, bit: u32) -> Self {
            self.flags |= bit;
            self
        }

        pub(crate) fn frames(mut self, count: u16, first: u16) -> Self {
            self.frames = count;
            self.first_frame = first;
            self
        }

        pub(crate) fn mip_count(mut self, count: u8) -> Self {
            self.mip_count = count;
            self
        }

        pub(crate) fn depth(mut self, depth: u16) -> Self {
            self.depth = depth;
            self
        }

        pub(crate) fn resources(mut self, entries: &[(u32, u32)]) -> Self {
            self.resources = entries.to_vec();
            self
        }

        pub(crate) fn data(mut self, bytes: &[u8]) -> Self {
            self.data = bytes.to_vec();
            self
        }

        /// Serialize the header (padded to at least 64 bytes, header size
        /// patched in) followed by the image data.
        pub(crate) fn build(self) -> Vec<u8> {
            let mut v = Vec::new();
            v.extend_from_slice(b"VTF\0");
            v.extend_from_slice(&7u32.to_le_bytes());
            v.extend_from_slice(&self.minor.to_le_bytes());
            v.extend_from_slice(&[0u8; 4]); // header size, patched below
            v.extend_from_slice(&self.width.to_le_bytes());
            v.extend_from_slice(&self.height.to_le_bytes());
            v.extend_from_slice(&self.flags.to_le_bytes());
            v.extend_from_slice(&self.frames.to_le_bytes());
            v.extend_from_slice(&self.first_frame.to_le_bytes());
            v.extend_from_slice(&[0u8; 4]);
            v.extend_from_slice(&[0u8; 12]); // reflectivity
            v.extend_from_slice(&[0u8; 4]);
            v.extend_from_slice(&[0u8; 4]); // bumpmap scale
            v.extend_from_slice(&self.format.to_le_bytes());
            v.push(self.mip_count);
            v.extend_from_slice(&(-1i32).to_le_bytes()); // no thumbnail
            v.push(0);
            v.push(0);
            if self.minor >= 2 {
                v.extend_from_slice(&self.depth.to_le_bytes());
            }
            if self.minor >= 3 {
                v.extend_from_slice(&[0u8; 3]);
                v.extend_from_slice(&(self.resources.len() as u32).to_le_bytes());
                v.extend_from_slice(&[0u8; 8]);
                for (tag, offset) in &self.resources {
                    v.extend_from_slice(&tag.to_le_bytes());
                    v.extend_from_slice(&offset.to_le_bytes());
                }
            }
            while v.len() < 64 {
                v.push(0);
            }
            let header_size = v.len() as u32;
            v[12..16].copy_from_slice(&header_size.to_le_bytes());
            v.extend_from_slice(&self.data);
            v
        }
    }
}
