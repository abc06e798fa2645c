use super::error::DecodeError;
use byteorder::ReadBytesExt;
use std::cmp;
use std::io::{self, Read};

/// A control byte with both top bits set introduces a run.
const RUN_ESCAPE: u8 = 0xC0;

/// Low six bits of a run control byte hold the run length.
const RUN_LENGTH_MASK: u8 = 0x3F;

/// How to treat a run whose declared length spills past the end of its
/// scanline. Well-formed encoders never emit such a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum RunPolicy {
    /// Write pixels until the scanline fills and silently drop the excess.
    /// This matches the historical decoder behavior.
    #[default]
    Lenient,
    /// Fail with [`DecodeError::MalformedRun`].
    Strict,
}

/// Decompresses the run-length encoded pixel stream into one palette index
/// byte per pixel.
///
/// The source must be positioned at the first control byte (offset 128 of a
/// PCX file). The output is row-major with a stride of `bytes_per_line` and
/// its length is fixed up front at `bytes_per_line * scanlines`.
///
/// The stream is a sequence of control bytes. A byte whose top two bits are
/// both set carries a run length in its low six bits and is followed by one
/// value byte; any other byte is a single literal pixel whose value is the
/// whole byte. A run never continues into the next scanline: the control byte
/// after a row fills always starts the next row.
///
/// Fails with [`DecodeError::TruncatedStream`] if the source ends while rows
/// remain, and with [`DecodeError::InvalidDimensions`] if either dimension is
/// zero or their product overflows.
pub fn decode_scanlines<R>(
    mut from: R,
    bytes_per_line: usize,
    scanlines: usize,
    policy: RunPolicy,
) -> Result<Vec<u8>, DecodeError>
where
    R: Read,
{
    if bytes_per_line == 0 || scanlines == 0 {
        return Err(DecodeError::InvalidDimensions);
    }
    let total_size = bytes_per_line
        .checked_mul(scanlines)
        .ok_or(DecodeError::InvalidDimensions)?;

    let mut data = vec![0; total_size];

    for row in data.chunks_exact_mut(bytes_per_line) {
        let mut column = 0;
        while column < bytes_per_line {
            let control = read_pixel_byte(&mut from)?;

            if control & RUN_ESCAPE == RUN_ESCAPE {
                let length = (control & RUN_LENGTH_MASK) as usize;
                let value = read_pixel_byte(&mut from)?;

                let remaining = bytes_per_line - column;
                if length > remaining && policy == RunPolicy::Strict {
                    return Err(DecodeError::MalformedRun);
                }
                let written = cmp::min(length, remaining);
                row[column..column + written].fill(value);
                column += written;
            } else {
                row[column] = control;
                column += 1;
            }
        }
    }

    Ok(data)
}

fn read_pixel_byte<R>(from: &mut R) -> Result<u8, DecodeError>
where
    R: Read,
{
    from.read_u8().map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::TruncatedStream
        } else {
            DecodeError::IoError(err)
        }
    })
}
