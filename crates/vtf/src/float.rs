//! HDR float formats: half/full float decode with Reinhard tone mapping.
//!
//! HDR channels are unbounded, so RGB values are compressed into the
//! displayable range with `ldr = hdr / (1 + hdr)` before quantizing to
//! bytes. Alpha is linear and only scaled.

use byteorder::{ByteOrder, LittleEndian};
use half::f16;

use crate::raster::per_texel;

/// Reinhard-map an HDR channel to a display byte.
fn tone_map(hdr: f32) -> u8 {
    (hdr / (1.0 + hdr) * 255.0).clamp(0.0, 255.0) as u8
}

/// Scale a linear alpha channel to a byte.
fn scale_alpha(a: f32) -> u8 {
    (a * 255.0).clamp(0.0, 255.0) as u8
}

fn read_half(bytes: &[u8]) -> f32 {
    f16::from_bits(LittleEndian::read_u16(bytes)).to_f32()
}

/// RGBA16161616F: four IEEE-754 half floats per texel.
pub(crate) fn rgba16161616f(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<8>(src, pixels, |s| {
        [
            tone_map(read_half(&s[0..2])),
            tone_map(read_half(&s[2..4])),
            tone_map(read_half(&s[4..6])),
            scale_alpha(read_half(&s[6..8])),
        ]
    })
}

/// R32F: one f32 per texel, replicated to RGB.
pub(crate) fn r32f(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<4>(src, pixels, |s| {
        let v = tone_map(LittleEndian::read_f32(s));
        [v, v, v, 255]
    })
}

/// RGB323232F: three f32 channels per texel.
pub(crate) fn rgb323232f(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<12>(src, pixels, |s| {
        [
            tone_map(LittleEndian::read_f32(&s[0..4])),
            tone_map(LittleEndian::read_f32(&s[4..8])),
            tone_map(LittleEndian::read_f32(&s[8..12])),
            255,
        ]
    })
}

/// RGBA32323232F: four f32 channels per texel.
pub(crate) fn rgba32323232f(src: &[u8], pixels: usize) -> Vec<u8> {
    per_texel::<16>(src, pixels, |s| {
        [
            tone_map(LittleEndian::read_f32(&s[0..4])),
            tone_map(LittleEndian::read_f32(&s[4..8])),
            tone_map(LittleEndian::read_f32(&s[8..12])),
            scale_alpha(LittleEndian::read_f32(&s[12..16])),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_bytes(v: f32) -> [u8; 2] {
        f16::from_f32(v).to_bits().to_le_bytes()
    }

    #[test]
    fn test_tone_map() {
        assert_eq!(tone_map(0.0), 0);
        // 1.0 maps to half intensity.
        assert_eq!(tone_map(1.0), 127);
        assert_eq!(tone_map(3.0), 191);
        // Unbounded input saturates below 255 instead of wrapping.
        assert_eq!(tone_map(1.0e6), 254);
        // Negative input clamps to black.
        assert_eq!(tone_map(-0.5), 0);
    }

    #[test]
    fn test_rgba16161616f() {
        let mut src = Vec::new();
        src.extend_from_slice(&half_bytes(1.0)); // r
        src.extend_from_slice(&half_bytes(0.0)); // g
        src.extend_from_slice(&half_bytes(3.0)); // b
        src.extend_from_slice(&half_bytes(1.0)); // a, linear
        assert_eq!(rgba16161616f(&src, 1), vec![127, 0, 191, 255]);
    }

    #[test]
    fn test_half_special_values() {
        let mut src = Vec::new();
        src.extend_from_slice(&0x7C00u16.to_le_bytes()); // +inf
        src.extend_from_slice(&0xFC00u16.to_le_bytes()); // -inf
        src.extend_from_slice(&0x0001u16.to_le_bytes()); // subnormal
        src.extend_from_slice(&half_bytes(0.5)); // a
        let out = rgba16161616f(&src, 1);
        // inf/(1+inf) is NaN, which quantizes to zero rather than panicking.
        assert_eq!(out[0], 0);
        assert_eq!(out[1], 0);
        assert_eq!(out[2], 0); // subnormal rounds to zero intensity
        assert_eq!(out[3], 127);
    }

    #[test]
    fn test_r32f() {
        let src = 3.0f32.to_le_bytes();
        assert_eq!(r32f(&src, 1), vec![191, 191, 191, 255]);
    }

    #[test]
    fn test_rgb323232f() {
        let mut src = Vec::new();
        src.extend_from_slice(&1.0f32.to_le_bytes());
        src.extend_from_slice(&0.0f32.to_le_bytes());
        src.extend_from_slice(&3.0f32.to_le_bytes());
        assert_eq!(rgb323232f(&src, 1), vec![127, 0, 191, 255]);
    }

    #[test]
    fn test_rgba32323232f_linear_alpha() {
        let mut src = Vec::new();
        src.extend_from_slice(&0.0f32.to_le_bytes());
        src.extend_from_slice(&0.0f32.to_le_bytes());
        src.extend_from_slice(&0.0f32.to_le_bytes());
        src.extend_from_slice(&0.5f32.to_le_bytes());
        assert_eq!(rgba32323232f(&src, 1), vec![0, 0, 0, 127]);
    }

    #[test]
    fn test_truncated_input_stops_at_last_texel() {
        // 7 bytes hold one complete f32 texel; the second pixel stays zero.
        let mut src = 3.0f32.to_le_bytes().to_vec();
        src.extend_from_slice(&[0, 0, 0]);
        assert_eq!(r32f(&src, 2), vec![191, 191, 191, 255, 0, 0, 0, 0]);
    }
}
