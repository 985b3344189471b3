//! VTF image formats and image size arithmetic.

/// VTF image format identifiers.
///
/// Numeric tags follow Valve's `IMAGE_FORMAT` enum; [`ImageFormat::Unknown`]
/// stands in for `-1` and any unrecognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Unknown,
    Rgba8888,
    Abgr8888,
    Rgb888,
    Bgr888,
    Rgb565,
    I8,
    Ia88,
    P8,
    A8,
    Rgb888Bluescreen,
    Bgr888Bluescreen,
    Argb8888,
    Bgra8888,
    Dxt1,
    Dxt3,
    Dxt5,
    Bgrx8888,
    Bgr565,
    Bgrx5551,
    Bgra4444,
    Dxt1OneBitAlpha,
    Bgra5551,
    Uv88,
    Uvwq8888,
    Rgba16161616F,
    Rgba16161616,
    Uvlx8888,
    R32F,
    Rgb323232F,
    Rgba32323232F,
    NvDst16,
    NvDst24,
    NvIntz,
    NvRawz,
    AtiDst16,
    AtiDst24,
    NvNull,
    Ati2N,
    Ati1N,
}

impl ImageFormat {
    /// Map an on-disk format tag to an [`ImageFormat`].
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Rgba8888,
            1 => Self::Abgr8888,
            2 => Self::Rgb888,
            3 => Self::Bgr888,
            4 => Self::Rgb565,
            5 => Self::I8,
            6 => Self::Ia88,
            7 => Self::P8,
            8 => Self::A8,
            9 => Self::Rgb888Bluescreen,
            10 => Self::Bgr888Bluescreen,
            11 => Self::Argb8888,
            12 => Self::Bgra8888,
            13 => Self::Dxt1,
            14 => Self::Dxt3,
            15 => Self::Dxt5,
            16 => Self::Bgrx8888,
            17 => Self::Bgr565,
            18 => Self::Bgrx5551,
            19 => Self::Bgra4444,
            20 => Self::Dxt1OneBitAlpha,
            21 => Self::Bgra5551,
            22 => Self::Uv88,
            23 => Self::Uvwq8888,
            24 => Self::Rgba16161616F,
            25 => Self::Rgba16161616,
            26 => Self::Uvlx8888,
            27 => Self::R32F,
            28 => Self::Rgb323232F,
            29 => Self::Rgba32323232F,
            30 => Self::NvDst16,
            31 => Self::NvDst24,
            32 => Self::NvIntz,
            33 => Self::NvRawz,
            34 => Self::AtiDst16,
            35 => Self::AtiDst24,
            36 => Self::NvNull,
            37 => Self::Ati2N,
            38 => Self::Ati1N,
            _ => Self::Unknown,
        }
    }

    /// Whether the format stores 4x4 texel blocks instead of raw texels.
    pub const fn is_compressed(self) -> bool {
        matches!(
            self,
            Self::Dxt1 | Self::Dxt1OneBitAlpha | Self::Dxt3 | Self::Dxt5 | Self::Ati1N | Self::Ati2N
        )
    }

    /// Bytes per 4x4 block for compressed formats.
    pub const fn block_size(self) -> usize {
        match self {
            Self::Dxt1 | Self::Dxt1OneBitAlpha | Self::Ati1N => 8,
            _ => 16,
        }
    }

    /// Bytes per texel for raster formats.
    ///
    /// Unknown and depth-buffer formats fall back to 4, which matches how
    /// the on-disk sizes of unhandled formats are conventionally estimated.
    pub const fn bytes_per_texel(self) -> usize {
        match self {
            Self::I8 | Self::P8 | Self::A8 => 1,
            Self::Rgb565 | Self::Bgr565 | Self::Bgrx5551 | Self::Bgra4444 | Self::Bgra5551 => 2,
            Self::Ia88 | Self::Uv88 => 2,
            Self::Rgb888 | Self::Bgr888 | Self::Rgb888Bluescreen | Self::Bgr888Bluescreen => 3,
            Self::Rgba8888
            | Self::Abgr8888
            | Self::Argb8888
            | Self::Bgra8888
            | Self::Bgrx8888
            | Self::Uvwq8888
            | Self::Uvlx8888
            | Self::R32F => 4,
            Self::Rgba16161616F | Self::Rgba16161616 => 8,
            Self::Rgb323232F => 12,
            Self::Rgba32323232F => 16,
            _ => 4,
        }
    }
}

/// Size in bytes of one image (one face, one mip, one z-slice) at the
/// given dimensions.
///
/// Block-compressed formats round both dimensions up to at least one whole
/// 4x4 block; raster formats are exactly `w * h * bytes_per_texel`.
pub fn image_size(format: ImageFormat, width: u32, height: u32) -> usize {
    if format.is_compressed() {
        let blocks_x = (width.max(4) as usize).div_ceil(4);
        let blocks_y = (height.max(4) as usize).div_ceil(4);
        blocks_x * blocks_y * format.block_size()
    } else {
        width as usize * height as usize * format.bytes_per_texel()
    }
}

/// Byte offset of the largest mip level relative to the start of image data.
///
/// VTF stores mip levels smallest-first, so the top mip sits after every
/// smaller level. Each level holds `frames * faces * depth` images.
pub fn mip_offset(
    format: ImageFormat,
    width: u32,
    height: u32,
    depth: u32,
    mip_count: u32,
    frame_count: u32,
    face_count: u32,
) -> usize {
    let mut offset = 0;
    for mip in 1..mip_count {
        let mip_width = (width >> mip).max(1);
        let mip_height = (height >> mip).max(1);
        let mip_depth = (depth >> mip).max(1) as usize;
        offset += image_size(format, mip_width, mip_height)
            * mip_depth
            * face_count as usize
            * frame_count as usize;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_sizes() {
        assert_eq!(image_size(ImageFormat::Rgba8888, 16, 16), 16 * 16 * 4);
        assert_eq!(image_size(ImageFormat::Rgb888, 5, 3), 5 * 3 * 3);
        assert_eq!(image_size(ImageFormat::I8, 7, 7), 49);
        assert_eq!(image_size(ImageFormat::Rgb565, 8, 8), 128);
        assert_eq!(image_size(ImageFormat::Rgba16161616F, 2, 2), 32);
        assert_eq!(image_size(ImageFormat::Rgb323232F, 2, 2), 48);
        assert_eq!(image_size(ImageFormat::Rgba32323232F, 2, 2), 64);
        // Unknown formats estimate 4 bytes per texel.
        assert_eq!(image_size(ImageFormat::Unknown, 3, 3), 36);
    }

    #[test]
    fn test_block_sizes() {
        // One block minimum, even below 4x4.
        assert_eq!(image_size(ImageFormat::Dxt1, 1, 1), 8);
        assert_eq!(image_size(ImageFormat::Dxt1, 4, 4), 8);
        assert_eq!(image_size(ImageFormat::Dxt5, 1, 1), 16);
        assert_eq!(image_size(ImageFormat::Dxt1, 8, 8), 32);
        assert_eq!(image_size(ImageFormat::Dxt3, 16, 8), 8 * 16);
        assert_eq!(image_size(ImageFormat::Ati1N, 16, 16), 128);
        assert_eq!(image_size(ImageFormat::Ati2N, 16, 16), 256);
        // Non-multiple-of-4 dimensions round up to whole blocks.
        assert_eq!(image_size(ImageFormat::Dxt1, 5, 5), 4 * 8);
    }

    #[test]
    fn test_mip_offset_single_level() {
        assert_eq!(mip_offset(ImageFormat::Dxt1, 256, 256, 1, 1, 1, 1), 0);
        assert_eq!(mip_offset(ImageFormat::Rgba8888, 64, 64, 1, 1, 1, 6), 0);
    }

    #[test]
    fn test_mip_offset_additivity() {
        // 16x16 RGBA8888 with 3 mips: levels 8x8 and 4x4 precede the top.
        let expected = image_size(ImageFormat::Rgba8888, 8, 8)
            + image_size(ImageFormat::Rgba8888, 4, 4);
        assert_eq!(
            mip_offset(ImageFormat::Rgba8888, 16, 16, 1, 3, 1, 1),
            expected
        );

        // Faces and frames multiply every smaller level.
        assert_eq!(
            mip_offset(ImageFormat::Rgba8888, 16, 16, 1, 3, 2, 6),
            expected * 2 * 6
        );
    }

    #[test]
    fn test_mip_offset_clamps_small_mips() {
        // 16x4 with 5 mips: the smallest levels clamp to 1 texel per axis.
        let expected: usize = (1..5)
            .map(|mip| {
                image_size(
                    ImageFormat::Rgba8888,
                    (16u32 >> mip).max(1),
                    (4u32 >> mip).max(1),
                )
            })
            .sum();
        assert_eq!(
            mip_offset(ImageFormat::Rgba8888, 16, 4, 1, 5, 1, 1),
            expected
        );
    }

    #[test]
    fn test_from_raw_round_trip() {
        assert_eq!(ImageFormat::from_raw(0), ImageFormat::Rgba8888);
        assert_eq!(ImageFormat::from_raw(13), ImageFormat::Dxt1);
        assert_eq!(ImageFormat::from_raw(15), ImageFormat::Dxt5);
        assert_eq!(ImageFormat::from_raw(20), ImageFormat::Dxt1OneBitAlpha);
        assert_eq!(ImageFormat::from_raw(37), ImageFormat::Ati2N);
        assert_eq!(ImageFormat::from_raw(38), ImageFormat::Ati1N);
        assert_eq!(ImageFormat::from_raw(-1), ImageFormat::Unknown);
        assert_eq!(ImageFormat::from_raw(99), ImageFormat::Unknown);
    }
}
