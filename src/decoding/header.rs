use super::error::DecodeError;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Size of the fixed PCX header, in bytes.
pub const HEADER_SIZE: usize = 128;

/// Identifier byte at offset 0 of every PCX file.
pub const PCX_IDENTIFIER: u8 = 0x0A;

/// Value of the `encoding` field for run-length encoded pixel data.
pub const RLE_ENCODING: u8 = 1;

/// The fixed 128-byte header at the start of a PCX file.
///
/// All multi-byte fields are little-endian. Bytes 74..128 are padding and are
/// consumed but not stored. None of the fields are validated during parsing;
/// they are exposed so that callers can enforce their own policy (see
/// [`ImageHeader::is_vga_indexed`]).
#[derive(Debug, Clone)]
pub struct ImageHeader {
    pub identifier: u8,
    pub version: u8,
    pub encoding: u8,
    pub bits_per_pixel: u8,
    pub x_start: i16,
    pub y_start: i16,
    pub x_end: i16,
    pub y_end: i16,
    pub horizontal_resolution: i16,
    pub vertical_resolution: i16,
    /// 16-color palette used by EGA-era images. Unused for 8-bpp files.
    pub ega_palette: [u8; 48],
    pub num_bit_planes: u8,
    pub bytes_per_line: i16,
    pub palette_type: i16,
    pub horizontal_screen_size: i16,
    pub vertical_screen_size: i16,
}

impl ImageHeader {
    /// Width in bytes of one decompressed scanline.
    ///
    /// This is authoritative over the bounding box for the layout of the
    /// decoded bitmap.
    pub fn scanline_stride(&self) -> usize {
        self.bytes_per_line.max(0) as usize
    }

    /// Number of scanlines described by the bounding box.
    pub fn scanline_count(&self) -> usize {
        let count = i32::from(self.y_end) - i32::from(self.y_start) + 1;
        count.max(0) as usize
    }

    /// Width in pixels of the bounding box.
    ///
    /// May be narrower than [`ImageHeader::scanline_stride`] when scanlines
    /// carry padding; the decoded image uses the stride, so callers wanting
    /// the exact bounding box must crop.
    pub fn image_width(&self) -> usize {
        let width = i32::from(self.x_end) - i32::from(self.x_start) + 1;
        width.max(0) as usize
    }

    /// Whether the header describes the one layout this decoder understands:
    /// 8 bits per pixel, a single bit plane, RLE-compressed pixel data.
    pub fn is_vga_indexed(&self) -> bool {
        self.bits_per_pixel == 8 && self.num_bit_planes == 1 && self.encoding == RLE_ENCODING
    }
}

/// Reads the 128-byte PCX header from the start of the given source.
///
/// Consumes exactly [`HEADER_SIZE`] bytes on success. Fails with
/// [`DecodeError::MalformedHeader`] if the source holds fewer than 128 bytes.
pub fn read_header<T>(mut from: T) -> Result<ImageHeader, DecodeError>
where
    T: Read,
{
    let mut raw = [0; HEADER_SIZE];
    from.read_exact(&mut raw).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::MalformedHeader
        } else {
            DecodeError::IoError(err)
        }
    })?;

    // Reads from the buffered header cannot fail past this point.
    let mut fields = &raw[..];

    let identifier = fields.read_u8()?;
    let version = fields.read_u8()?;
    let encoding = fields.read_u8()?;
    let bits_per_pixel = fields.read_u8()?;
    let x_start = fields.read_i16::<LittleEndian>()?;
    let y_start = fields.read_i16::<LittleEndian>()?;
    let x_end = fields.read_i16::<LittleEndian>()?;
    let y_end = fields.read_i16::<LittleEndian>()?;
    let horizontal_resolution = fields.read_i16::<LittleEndian>()?;
    let vertical_resolution = fields.read_i16::<LittleEndian>()?;
    let mut ega_palette = [0; 48];
    fields.read_exact(&mut ega_palette)?;
    fields.read_u8()?; // reserved
    let num_bit_planes = fields.read_u8()?;
    let bytes_per_line = fields.read_i16::<LittleEndian>()?;
    let palette_type = fields.read_i16::<LittleEndian>()?;
    let horizontal_screen_size = fields.read_i16::<LittleEndian>()?;
    let vertical_screen_size = fields.read_i16::<LittleEndian>()?;

    Ok(ImageHeader {
        identifier,
        version,
        encoding,
        bits_per_pixel,
        x_start,
        y_start,
        x_end,
        y_end,
        horizontal_resolution,
        vertical_resolution,
        ega_palette,
        num_bit_planes,
        bytes_per_line,
        palette_type,
        horizontal_screen_size,
        vertical_screen_size,
    })
}

#[cfg(test)]
mod test {
    use super::{read_header, DecodeError, HEADER_SIZE, PCX_IDENTIFIER};
    use std::io::{Cursor, Read};

    // A header for a 4x3 image with a 6-byte stride, byte by byte.
    fn sample_header() -> Vec<u8> {
        let mut raw = vec![0u8; HEADER_SIZE];
        raw[0] = PCX_IDENTIFIER;
        raw[1] = 5; // version
        raw[2] = 1; // encoding
        raw[3] = 8; // bits per pixel
        raw[4..6].copy_from_slice(&1i16.to_le_bytes()); // x_start
        raw[6..8].copy_from_slice(&2i16.to_le_bytes()); // y_start
        raw[8..10].copy_from_slice(&4i16.to_le_bytes()); // x_end
        raw[10..12].copy_from_slice(&4i16.to_le_bytes()); // y_end
        raw[12..14].copy_from_slice(&300i16.to_le_bytes());
        raw[14..16].copy_from_slice(&600i16.to_le_bytes());
        for (i, byte) in raw[16..64].iter_mut().enumerate() {
            *byte = i as u8;
        }
        raw[64] = 0xFF; // reserved, must be skipped
        raw[65] = 1; // bit planes
        raw[66..68].copy_from_slice(&6i16.to_le_bytes()); // bytes per line
        raw[68..70].copy_from_slice(&1i16.to_le_bytes()); // palette type
        raw[70..72].copy_from_slice(&640i16.to_le_bytes());
        raw[72..74].copy_from_slice(&480i16.to_le_bytes());
        raw
    }

    #[test]
    fn test_parse_is_byte_exact() {
        let header = read_header(Cursor::new(sample_header())).unwrap();

        assert_eq!(header.identifier, PCX_IDENTIFIER);
        assert_eq!(header.version, 5);
        assert_eq!(header.encoding, 1);
        assert_eq!(header.bits_per_pixel, 8);
        assert_eq!(header.x_start, 1);
        assert_eq!(header.y_start, 2);
        assert_eq!(header.x_end, 4);
        assert_eq!(header.y_end, 4);
        assert_eq!(header.horizontal_resolution, 300);
        assert_eq!(header.vertical_resolution, 600);
        let expected: Vec<u8> = (0..48).collect();
        assert_eq!(header.ega_palette.as_slice(), expected.as_slice());
        assert_eq!(header.num_bit_planes, 1);
        assert_eq!(header.bytes_per_line, 6);
        assert_eq!(header.palette_type, 1);
        assert_eq!(header.horizontal_screen_size, 640);
        assert_eq!(header.vertical_screen_size, 480);
    }

    #[test]
    fn test_derived_geometry() {
        let header = read_header(Cursor::new(sample_header())).unwrap();
        assert_eq!(header.scanline_stride(), 6);
        assert_eq!(header.scanline_count(), 3);
        assert_eq!(header.image_width(), 4);
        assert!(header.is_vga_indexed());
    }

    #[test]
    fn test_cursor_advances_past_header() {
        let mut raw = sample_header();
        raw.push(0xAB);

        let mut cursor = Cursor::new(raw);
        read_header(&mut cursor).unwrap();

        let mut next = [0; 1];
        cursor.read_exact(&mut next).unwrap();
        assert_eq!(next[0], 0xAB);
    }

    #[test]
    fn test_short_source_is_malformed() {
        let raw = vec![0u8; 100];
        let result = read_header(Cursor::new(raw));
        assert!(matches!(result, Err(DecodeError::MalformedHeader)));
    }

    #[test]
    fn test_negative_bounding_box_clamps_to_zero() {
        let mut raw = sample_header();
        raw[10..12].copy_from_slice(&(-5i16).to_le_bytes()); // y_end < y_start
        let header = read_header(Cursor::new(raw)).unwrap();
        assert_eq!(header.scanline_count(), 0);
    }
}
