//! Block-compressed format decompression: DXT1/DXT3/DXT5, ATI1N/ATI2N.
//!
//! All five formats store 4x4 texel blocks in block-row-major order. Edge
//! blocks of non-multiple-of-4 images carry texels past the image border,
//! which are decoded and discarded. Palettes are built on the stack as
//! fixed-size arrays; nothing is heap-allocated per block.

use byteorder::{ByteOrder, LittleEndian};

use crate::raster::{expand5, expand6};

/// Expand a DXT 5-6-5 endpoint (red in the high bits) to RGB888.
fn expand565(c: u16) -> [u8; 3] {
    [expand5((c >> 11) & 31), expand6((c >> 5) & 63), expand5(c & 31)]
}

/// Two-thirds/one-third blend of two endpoints.
fn third(a: [u8; 3], b: [u8; 3], alpha: u8) -> [u8; 4] {
    [
        ((2 * u32::from(a[0]) + u32::from(b[0])) / 3) as u8,
        ((2 * u32::from(a[1]) + u32::from(b[1])) / 3) as u8,
        ((2 * u32::from(a[2]) + u32::from(b[2])) / 3) as u8,
        alpha,
    ]
}

/// Even blend of two endpoints.
fn half(a: [u8; 3], b: [u8; 3], alpha: u8) -> [u8; 4] {
    [
        ((u32::from(a[0]) + u32::from(b[0])) / 2) as u8,
        ((u32::from(a[1]) + u32::from(b[1])) / 2) as u8,
        ((u32::from(a[2]) + u32::from(b[2])) / 2) as u8,
        alpha,
    ]
}

/// Build the four-entry color palette for a DXT color block.
///
/// DXT1 is two-mode: `c0 > c1` selects four interpolated colors, otherwise
/// index 2 is the midpoint and index 3 is transparent black (one-bit-alpha
/// variant) or the midpoint again (opaque variant). The DXT3/DXT5 color
/// block ignores the endpoint ordering and always interpolates four colors.
fn color_palette(c0: u16, c1: u16, dxt1: bool, one_bit_alpha: bool) -> [[u8; 4]; 4] {
    let a = expand565(c0);
    let b = expand565(c1);
    let mut palette = [[0u8; 4]; 4];
    palette[0] = [a[0], a[1], a[2], 255];
    palette[1] = [b[0], b[1], b[2], 255];

    if !dxt1 || c0 > c1 {
        palette[2] = third(a, b, 255);
        palette[3] = third(b, a, 255);
    } else {
        palette[2] = half(a, b, 255);
        palette[3] = if one_bit_alpha {
            [0, 0, 0, 0]
        } else {
            half(a, b, 255)
        };
    }
    palette
}

/// Build the eight-entry alpha palette shared by DXT5, ATI1N and ATI2N.
fn alpha_palette(a0: u8, a1: u8) -> [u8; 8] {
    let (x, y) = (u32::from(a0), u32::from(a1));
    let mut palette = [0u8; 8];
    palette[0] = a0;
    palette[1] = a1;
    if a0 > a1 {
        for (i, slot) in palette.iter_mut().enumerate().skip(2) {
            let i = i as u32;
            *slot = (((8 - i) * x + (i - 1) * y) / 7) as u8;
        }
    } else {
        for (i, slot) in palette.iter_mut().enumerate().take(6).skip(2) {
            let i = i as u32;
            *slot = (((6 - i) * x + (i - 1) * y) / 5) as u8;
        }
        palette[6] = 0;
        palette[7] = 255;
    }
    palette
}

/// 48-bit packed table of 3-bit indices into an alpha palette.
fn alpha_indices(block: &[u8]) -> u64 {
    LittleEndian::read_u48(&block[2..8])
}

/// Iterate the 4x4 blocks available in `src`, block-row-major.
///
/// Stops at the last whole block in `src`, so a short buffer decodes as far
/// as it can and leaves the rest of the output zeroed.
fn for_each_block(
    src: &[u8],
    width: u32,
    height: u32,
    block_bytes: usize,
    mut decode: impl FnMut(&[u8], u32, u32),
) {
    let blocks_x = (width.div_ceil(4)) as usize;
    let blocks_y = (height.div_ceil(4)) as usize;
    if blocks_x == 0 {
        return;
    }

    let expected = blocks_x * blocks_y;
    let available = src.len() / block_bytes;

    for index in 0..expected.min(available) {
        let block = &src[index * block_bytes..(index + 1) * block_bytes];
        let bx = (index % blocks_x) as u32;
        let by = (index / blocks_x) as u32;
        decode(block, bx * 4, by * 4);
    }
}

/// Write one texel, skipping positions past the image border.
fn write_texel(out: &mut [u8], width: u32, x: u32, y: u32, rgba: [u8; 4]) {
    let index = (y as usize * width as usize + x as usize) * 4;
    out[index..index + 4].copy_from_slice(&rgba);
}

pub(crate) fn dxt1(src: &[u8], width: u32, height: u32, one_bit_alpha: bool) -> Vec<u8> {
    let mut out = vec![0u8; width as usize * height as usize * 4];
    for_each_block(src, width, height, 8, |block, x0, y0| {
        let c0 = LittleEndian::read_u16(&block[0..2]);
        let c1 = LittleEndian::read_u16(&block[2..4]);
        let indices = LittleEndian::read_u32(&block[4..8]);
        let palette = color_palette(c0, c1, true, one_bit_alpha);

        for i in 0..16u32 {
            let (x, y) = (x0 + i % 4, y0 + i / 4);
            if x < width && y < height {
                let index = ((indices >> (2 * i)) & 3) as usize;
                write_texel(&mut out, width, x, y, palette[index]);
            }
        }
    });
    out
}

pub(crate) fn dxt3(src: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut out = vec![0u8; width as usize * height as usize * 4];
    for_each_block(src, width, height, 16, |block, x0, y0| {
        // 8 bytes of explicit 4-bit alpha, then a DXT1-style color block.
        let alpha_bits = LittleEndian::read_u64(&block[0..8]);
        let c0 = LittleEndian::read_u16(&block[8..10]);
        let c1 = LittleEndian::read_u16(&block[10..12]);
        let indices = LittleEndian::read_u32(&block[12..16]);
        let palette = color_palette(c0, c1, false, false);

        for i in 0..16u32 {
            let (x, y) = (x0 + i % 4, y0 + i / 4);
            if x < width && y < height {
                let index = ((indices >> (2 * i)) & 3) as usize;
                let mut rgba = palette[index];
                rgba[3] = ((alpha_bits >> (4 * i)) & 15) as u8 * 17;
                write_texel(&mut out, width, x, y, rgba);
            }
        }
    });
    out
}

pub(crate) fn dxt5(src: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut out = vec![0u8; width as usize * height as usize * 4];
    for_each_block(src, width, height, 16, |block, x0, y0| {
        let alphas = alpha_palette(block[0], block[1]);
        let alpha_bits = alpha_indices(block);
        let c0 = LittleEndian::read_u16(&block[8..10]);
        let c1 = LittleEndian::read_u16(&block[10..12]);
        let indices = LittleEndian::read_u32(&block[12..16]);
        let palette = color_palette(c0, c1, false, false);

        for i in 0..16u32 {
            let (x, y) = (x0 + i % 4, y0 + i / 4);
            if x < width && y < height {
                let index = ((indices >> (2 * i)) & 3) as usize;
                let mut rgba = palette[index];
                rgba[3] = alphas[((alpha_bits >> (3 * i)) & 7) as usize];
                write_texel(&mut out, width, x, y, rgba);
            }
        }
    });
    out
}

/// ATI1N (BC4): one DXT5-style alpha block holding a single channel,
/// replicated to RGB on output.
pub(crate) fn ati1n(src: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut out = vec![0u8; width as usize * height as usize * 4];
    for_each_block(src, width, height, 8, |block, x0, y0| {
        let values = alpha_palette(block[0], block[1]);
        let bits = alpha_indices(block);

        for i in 0..16u32 {
            let (x, y) = (x0 + i % 4, y0 + i / 4);
            if x < width && y < height {
                let v = values[((bits >> (3 * i)) & 7) as usize];
                write_texel(&mut out, width, x, y, [v, v, v, 255]);
            }
        }
    });
    out
}

/// ATI2N (BC5): two independent single-channel sub-blocks (red, then
/// green). The blue channel is reconstructed as the Z of a unit normal.
pub(crate) fn ati2n(src: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut out = vec![0u8; width as usize * height as usize * 4];
    for_each_block(src, width, height, 16, |block, x0, y0| {
        let reds = alpha_palette(block[0], block[1]);
        let red_bits = alpha_indices(&block[0..8]);
        let greens = alpha_palette(block[8], block[9]);
        let green_bits = alpha_indices(&block[8..16]);

        for i in 0..16u32 {
            let (x, y) = (x0 + i % 4, y0 + i / 4);
            if x < width && y < height {
                let r = reds[((red_bits >> (3 * i)) & 7) as usize];
                let g = greens[((green_bits >> (3 * i)) & 7) as usize];
                let nx = f32::from(r) / 255.0 * 2.0 - 1.0;
                let ny = f32::from(g) / 255.0 * 2.0 - 1.0;
                let nz = (1.0 - nx * nx - ny * ny).max(0.0).sqrt();
                let b = ((nz * 0.5 + 0.5) * 255.0) as u8;
                write_texel(&mut out, width, x, y, [r, g, b, 255]);
            }
        }
    });
    out
}
