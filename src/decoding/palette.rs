use super::error::DecodeError;
use image::Rgb;
use std::io::{self, Read, Seek, SeekFrom};

/// Number of entries in a VGA palette.
pub const PALETTE_SIZE: usize = 256;

/// Size of the serialized palette: 256 RGB triples.
pub const PALETTE_BYTES: usize = PALETTE_SIZE * 3;

/// Marker byte that conventionally precedes the palette. Not validated here;
/// the reference layout locates the palette purely by offset from the end.
pub const PALETTE_MARKER: u8 = 0x0C;

/// The 256-entry VGA palette stored in the last 768 bytes of a PCX file.
///
/// Triple `i` of the serialized form corresponds to palette index `i`.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: [Rgb<u8>; PALETTE_SIZE],
}

impl Palette {
    /// Builds a palette from its 768-byte serialized form.
    pub fn from_bytes(raw: &[u8; PALETTE_BYTES]) -> Palette {
        let mut entries = [Rgb([0, 0, 0]); PALETTE_SIZE];
        for (index, triple) in raw.chunks_exact(3).enumerate() {
            entries[index] = Rgb([triple[0], triple[1], triple[2]]);
        }
        Palette { entries }
    }

    /// The color at the given palette index.
    pub fn get(&self, index: u8) -> Rgb<u8> {
        self.entries[index as usize]
    }

    /// All 256 entries, in index order.
    pub fn entries(&self) -> &[Rgb<u8>] {
        &self.entries
    }
}

/// Reads the palette from the last 768 bytes of the given source.
///
/// Seeks relative to the end of the source, so the cursor may be anywhere
/// beforehand. Fails with [`DecodeError::TruncatedPalette`] if the source is
/// shorter than 768 bytes.
pub fn read_palette<T>(mut from: T) -> Result<Palette, DecodeError>
where
    T: Read + Seek,
{
    let total = from.seek(SeekFrom::End(0))?;
    if total < PALETTE_BYTES as u64 {
        return Err(DecodeError::TruncatedPalette);
    }
    from.seek(SeekFrom::End(-(PALETTE_BYTES as i64)))?;

    let mut raw = [0; PALETTE_BYTES];
    from.read_exact(&mut raw).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::TruncatedPalette
        } else {
            DecodeError::IoError(err)
        }
    })?;

    Ok(Palette::from_bytes(&raw))
}
