pub use error::DecodeError;
pub use header::{read_header, ImageHeader, HEADER_SIZE, PCX_IDENTIFIER, RLE_ENCODING};
use image::{Rgb, RgbImage};
use log::{debug, warn};
pub use palette::{read_palette, Palette, PALETTE_BYTES, PALETTE_MARKER, PALETTE_SIZE};
pub use rle::{decode_scanlines, RunPolicy};
use std::io::{Read, Seek, SeekFrom};

mod error;
mod header;
mod palette;
mod rle;

/// Substitutes each palette index with its RGB triple.
///
/// Emits raw `[r, g, b]` bytes in index order; any color-space normalization
/// is left to the consumer. Fails with [`DecodeError::IndexOutOfRange`] if an
/// index has no palette entry. A full [`Palette`] always has 256 entries, so
/// the check only fires for shorter palette slices.
pub fn expand_indices(indices: &[u8], palette: &[Rgb<u8>]) -> Result<Vec<u8>, DecodeError> {
    let mut pixels = Vec::with_capacity(indices.len() * 3);
    for &index in indices {
        let Rgb(triple) = palette
            .get(index as usize)
            .ok_or(DecodeError::IndexOutOfRange)?;
        pixels.extend_from_slice(triple);
    }
    Ok(pixels)
}

/// Decodes a complete PCX image from the given source.
///
/// Equivalent to [`decode_image_with`] under [`RunPolicy::Lenient`].
pub fn decode_image<R>(from: R) -> Result<RgbImage, DecodeError>
where
    R: Read + Seek,
{
    decode_image_with(from, RunPolicy::default())
}

/// Decodes a complete PCX image from the given source with an explicit policy
/// for runs that spill past a scanline.
///
/// The source must span a whole PCX file: the 128-byte header, the
/// RLE-compressed pixel data, and the VGA palette in the final 768 bytes. The
/// stages run in sequence over the one handle, each seeking to the byte range
/// it owns. The decoded image is `scanline_stride()` pixels wide and
/// `scanline_count()` pixels tall; either being zero fails with
/// [`DecodeError::InvalidDimensions`].
///
/// Header fields are not validated (matching the historical decoder), but a
/// layout other than 8-bpp single-plane RLE is logged as a warning and will
/// generally produce garbage pixels.
pub fn decode_image_with<R>(mut from: R, policy: RunPolicy) -> Result<RgbImage, DecodeError>
where
    R: Read + Seek,
{
    let header = read_header(&mut from)?;
    if !header.is_vga_indexed() {
        warn!(
            "unsupported pcx layout: {} bpp, {} planes, encoding {}",
            header.bits_per_pixel, header.num_bit_planes, header.encoding
        );
    }

    let stride = header.scanline_stride();
    let scanlines = header.scanline_count();
    debug!(
        "decoding pcx: stride {} bytes, {} scanlines, bounding box width {}",
        stride,
        scanlines,
        header.image_width()
    );
    if stride == 0 || scanlines == 0 {
        return Err(DecodeError::InvalidDimensions);
    }

    let palette = read_palette(&mut from)?;

    from.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
    let indices = decode_scanlines(&mut from, stride, scanlines, policy)?;

    let pixels = expand_indices(&indices, palette.entries())?;
    let image = RgbImage::from_raw(stride as u32, scanlines as u32, pixels).unwrap();
    Ok(image)
}

#[cfg(test)]
mod test {
    use super::{expand_indices, DecodeError};
    use image::Rgb;

    #[test]
    fn test_palette_substitution() {
        let palette = [Rgb([10, 20, 30]), Rgb([40, 50, 60])];
        let pixels = expand_indices(&[0, 1], &palette).unwrap();
        assert_eq!(pixels, vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_index_without_entry() {
        let palette = [Rgb([10, 20, 30]), Rgb([40, 50, 60])];
        let result = expand_indices(&[0, 2], &palette);
        assert!(matches!(result, Err(DecodeError::IndexOutOfRange)));
    }

    #[test]
    fn test_empty_indices() {
        let palette = [Rgb([1, 2, 3])];
        assert_eq!(expand_indices(&[], &palette).unwrap(), Vec::<u8>::new());
    }
}
