//! Raster (non-block) pixel format conversions to RGBA8888.
//!
//! Every routine maps tightly packed source texels to straight RGBA8888.
//! Output is sized for `pixels` texels and zero-initialized, so a short
//! source buffer yields trailing zero texels instead of a panic.

/// Convert each `N`-byte source texel to one RGBA8888 texel.
pub(crate) fn per_texel<const N: usize>(
    src: &[u8],
    pixels: usize,
    f: impl Fn(&[u8]) -> [u8; 4],
) -> Vec<u8> {
    let mut out = vec![0u8; pixels * 4];
    for (s, d) in src.chunks_exact(N).zip(out.chunks_exact_mut(4)) {
        d.copy_from_slice(&f(s));
    }
    out
}

/// Expand a 5-bit channel to 8 bits.
pub(crate) fn expand5(v: u16) -> u8 {
    (u32::from(v) * 255 / 31) as u8
}

/// Expand a 6-bit channel to 8 bits.
pub(crate) fn expand6(v: u16) -> u8 {
    (u32::from(v) * 255 / 63) as u8
}

pub(crate) fn rgba8888(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<4>(src, pixels, |s| [s[0], s[1], s[2], s[3]])
}

pub(crate) fn abgr8888(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<4>(src, pixels, |s| [s[3], s[2], s[1], s[0]])
}

pub(crate) fn argb8888(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<4>(src, pixels, |s| [s[1], s[2], s[3], s[0]])
}

pub(crate) fn bgra8888(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<4>(src, pixels, |s| [s[2], s[1], s[0], s[3]])
}

pub(crate) fn bgrx8888(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<4>(src, pixels, |s| [s[2], s[1], s[0], 255])
}

pub(crate) fn rgb888(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<3>(src, pixels, |s| [s[0], s[1], s[2], 255])
}

pub(crate) fn bgr888(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<3>(src, pixels, |s| [s[2], s[1], s[0], 255])
}

/// UVWQ8888/UVLX8888: U, V, W map onto R, G, B; the fourth channel is dropped.
pub(crate) fn uvwq8888(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<4>(src, pixels, |s| [s[0], s[1], s[2], 255])
}

/// Channels are packed low-to-high: R in bits 0-4, G in 5-10, B in 11-15.
pub(crate) fn rgb565(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<2>(src, pixels, |s| {
        let v = u16::from_le_bytes([s[0], s[1]]);
        [expand5(v & 31), expand6((v >> 5) & 63), expand5(v >> 11), 255]
    })
}

pub(crate) fn bgr565(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<2>(src, pixels, |s| {
        let v = u16::from_le_bytes([s[0], s[1]]);
        [expand5(v >> 11), expand6((v >> 5) & 63), expand5(v & 31), 255]
    })
}

pub(crate) fn bgra4444(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<2>(src, pixels, |s| {
        let v = u16::from_le_bytes([s[0], s[1]]);
        [
            ((v >> 8) & 15) as u8 * 17,
            ((v >> 4) & 15) as u8 * 17,
            (v & 15) as u8 * 17,
            (v >> 12) as u8 * 17,
        ]
    })
}

pub(crate) fn bgra5551(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<2>(src, pixels, |s| {
        let v = u16::from_le_bytes([s[0], s[1]]);
        let alpha = if v & 0x8000 != 0 { 255 } else { 0 };
        [
            expand5((v >> 10) & 31),
            expand5((v >> 5) & 31),
            expand5(v & 31),
            alpha,
        ]
    })
}

pub(crate) fn bgrx5551(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<2>(src, pixels, |s| {
        let v = u16::from_le_bytes([s[0], s[1]]);
        [
            expand5((v >> 10) & 31),
            expand5((v >> 5) & 31),
            expand5(v & 31),
            255,
        ]
    })
}

pub(crate) fn uv88(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<2>(src, pixels, |s| [s[0], s[1], 255, 255])
}

/// I8 and P8: one intensity byte replicated across RGB.
pub(crate) fn i8(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<1>(src, pixels, |s| [s[0], s[0], s[0], 255])
}

pub(crate) fn a8(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<1>(src, pixels, |s| [255, 255, 255, s[0]])
}

pub(crate) fn ia88(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<2>(src, pixels, |s| [s[0], s[0], s[0], s[1]])
}

/// RGBA16161616: lossy 16-to-8 bit truncation keeping each channel's
/// high byte. Not a half-float format.
pub(crate) fn rgba16161616(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<8>(src, pixels, |s| [s[1], s[3], s[5], s[7]])
}
