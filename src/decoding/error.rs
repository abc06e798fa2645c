use std::convert::From;
use std::io;

#[derive(Debug)]
pub enum DecodeError {
    IoError(io::Error),
    /// The source ended before the full 128-byte header could be read.
    MalformedHeader,
    /// The source is too short to hold the 768-byte VGA palette at its tail.
    TruncatedPalette,
    /// The source ended while compressed scanline data was still expected.
    TruncatedStream,
    /// A run would spill past the end of its scanline (strict decoding only).
    MalformedRun,
    /// A pixel index has no corresponding palette entry.
    IndexOutOfRange,
    /// The header does not describe a decodable image geometry.
    InvalidDimensions,
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> DecodeError {
        DecodeError::IoError(err)
    }
}
