//! Decoder for uncompressed 24-bit raster containers
//!
//! The container is the classic single-plane, 24 bits-per-pixel bitmap layout:
//! an 18 byte prologue, little-endian dimensions at offset 18, plane count and
//! bit depth at offset 26, the rest of a 54 byte header, then row-major pixel
//! data with every row padded to a 4 byte boundary and channels stored as BGR.

use std::io::{self, Read};

use thiserror::Error;

/// Bytes ignored before the width field.
const PROLOGUE_LEN: usize = 18;
/// Bytes ignored between the bit depth field and the pixel data.
const HEADER_REMAINDER_LEN: usize = 24;
/// Offset of the first pixel byte.
pub const PIXEL_DATA_OFFSET: usize = 54;

const SUPPORTED_PLANES: u16 = 1;
const SUPPORTED_BITS_PER_PIXEL: u16 = 24;
const BYTES_PER_PIXEL: usize = 3;

/// Errors raised while decoding a raster container.
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("truncated header: container ends before the pixel data offset")]
    TruncatedHeader,

    #[error("unsupported plane count: {0} (expected 1)")]
    UnsupportedPlaneCount(u16),

    #[error("unsupported bit depth: {0} (expected 24)")]
    UnsupportedBitDepth(u16),

    #[error("truncated pixel data: expected {expected} bytes, read {actual}")]
    TruncatedPixelData { expected: usize, actual: usize },

    #[error("image dimensions {width}x{height} exceed addressable memory")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Decoded image with channels in RGB order and row padding removed.
///
/// Rows keep the order in which they are stored in the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl RasterImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB triples, `width * height` of them.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Pixels of row `y`, or `None` when out of range.
    pub fn row(&self, y: u32) -> Option<&[[u8; 3]]> {
        if y >= self.height {
            return None;
        }
        let width = self.width as usize;
        let start = y as usize * width;
        self.pixels.get(start..start + width)
    }
}

/// Stored size of one row in bytes, padded to the next multiple of 4.
///
/// Equal to `4 * ceil(width * 24 / 32)` computed in integers.
pub fn row_byte_size(width: u32) -> u64 {
    (u64::from(width) * BYTES_PER_PIXEL as u64).div_ceil(4) * 4
}

/// Total size of the padded pixel payload in bytes.
pub fn payload_size(width: u32, height: u32) -> Result<usize, RasterError> {
    row_byte_size(width)
        .checked_mul(u64::from(height))
        .and_then(|size| usize::try_from(size).ok())
        .ok_or(RasterError::DimensionsTooLarge { width, height })
}

/// Swap the first and third byte of every pixel in every row of a padded
/// buffer, skipping each row's padding. Applying it twice is the identity.
pub fn reverse_channels(data: &mut [u8], width: usize, row_size: usize) {
    if row_size == 0 {
        return;
    }
    let row_data = width * BYTES_PER_PIXEL;
    for row in data.chunks_exact_mut(row_size) {
        for pixel in row[..row_data].chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.swap(0, 2);
        }
    }
}

/// Decode a raster container from `reader`.
///
/// Header fields are validated before any pixel storage is allocated. Bytes
/// following the pixel payload are ignored.
pub fn decode<R: Read>(mut reader: R) -> Result<RasterImage, RasterError> {
    skip(&mut reader, PROLOGUE_LEN)?;
    let width = read_u32_le(&mut reader)?;
    let height = read_u32_le(&mut reader)?;

    let planes = read_u16_le(&mut reader)?;
    if planes != SUPPORTED_PLANES {
        return Err(RasterError::UnsupportedPlaneCount(planes));
    }
    let bits_per_pixel = read_u16_le(&mut reader)?;
    if bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
        return Err(RasterError::UnsupportedBitDepth(bits_per_pixel));
    }
    skip(&mut reader, HEADER_REMAINDER_LEN)?;

    let expected = payload_size(width, height)?;
    // Grow with the bytes actually present so a lying header cannot force a
    // huge allocation.
    let mut data = Vec::new();
    reader.take(expected as u64).read_to_end(&mut data)?;
    if data.len() < expected {
        return Err(RasterError::TruncatedPixelData {
            expected,
            actual: data.len(),
        });
    }

    let row_size = row_byte_size(width) as usize;
    let row_data = width as usize * BYTES_PER_PIXEL;
    reverse_channels(&mut data, width as usize, row_size);

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    if row_size > 0 {
        for row in data.chunks_exact(row_size) {
            pixels.extend(
                row[..row_data]
                    .chunks_exact(BYTES_PER_PIXEL)
                    .map(|p| [p[0], p[1], p[2]]),
            );
        }
    }

    Ok(RasterImage {
        width,
        height,
        pixels,
    })
}

fn read_header_bytes<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), RasterError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => RasterError::TruncatedHeader,
        _ => RasterError::Io(e),
    })
}

fn skip<R: Read>(reader: &mut R, len: usize) -> Result<(), RasterError> {
    let mut buf = [0u8; HEADER_REMAINDER_LEN];
    read_header_bytes(reader, &mut buf[..len])
}

// Assembled byte by byte so the result does not depend on host endianness.
fn read_u32_le<R: Read>(reader: &mut R) -> Result<u32, RasterError> {
    let mut b = [0u8; 4];
    read_header_bytes(reader, &mut b)?;
    Ok(u32::from(b[0]) | u32::from(b[1]) << 8 | u32::from(b[2]) << 16 | u32::from(b[3]) << 24)
}

fn read_u16_le<R: Read>(reader: &mut R) -> Result<u16, RasterError> {
    let mut b = [0u8; 2];
    read_header_bytes(reader, &mut b)?;
    Ok(u16::from(b[0]) | u16::from(b[1]) << 8)
}
