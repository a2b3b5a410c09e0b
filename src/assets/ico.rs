//! Single-image ICO container around already-encoded PNG bytes.
//!
//! Layout (little endian):
//! ```text
//! header     reserved u16 = 0 | type u16 = 1 | count u16 = 1
//! directory  width u8 | height u8 | colors u8 = 0 | reserved u8 = 0
//!            planes u16 = 0 | bit depth u16 = 0 | size u32 | offset u32
//! data       PNG bytes
//! ```
//! Width and height of 256 or more are stored as 0.

const HEADER_LEN: usize = 6;
const DIR_ENTRY_LEN: usize = 16;

/// Offset of the image data: header plus one directory entry.
pub const DATA_OFFSET: usize = HEADER_LEN + DIR_ENTRY_LEN;

pub fn wrap_png(png: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(DATA_OFFSET + png.len());

    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());

    out.push(dimension_byte(width));
    out.push(dimension_byte(height));
    out.push(0);
    out.push(0);
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(png.len() as u32).to_le_bytes());
    out.extend_from_slice(&(DATA_OFFSET as u32).to_le_bytes());

    out.extend_from_slice(png);
    out
}

fn dimension_byte(value: u32) -> u8 {
    if value >= 256 {
        0
    } else {
        value as u8
    }
}
