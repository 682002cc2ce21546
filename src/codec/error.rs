// Error types shared by the decoder and encoder

use std::fmt;
use std::io;

use thiserror::Error;

/// Structural problems with an Xcursor stream or with a cursor handed to the encoder
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("bad magic: expected \"Xcur\", got {found:02x?}")]
    BadMagic { found: [u8; 4] },

    #[error("truncated stream: {field} at offset {offset}{}", ChunkSuffix(*chunk))]
    Truncated {
        field: &'static str,
        offset: u64,
        chunk: Option<usize>,
    },

    #[error(
        "frame {frame}: pixel buffer holds {actual} bytes, {width}x{height} needs {expected}"
    )]
    PixelBufferMismatch {
        frame: usize,
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("frame {frame}: chunk offset {offset} does not fit in 32 bits")]
    OffsetOverflow { frame: usize, offset: u64 },

    #[error("{count} frames do not fit in the table of contents")]
    TooManyFrames { count: usize },
}

struct ChunkSuffix(Option<usize>);

impl fmt::Display for ChunkSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(index) => write!(f, " (chunk {})", index),
            None => Ok(()),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            Error::Format(e) => Some(e),
            Error::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Turns an end-of-stream read into a `Truncated` error, leaves other IO errors alone
pub(crate) fn truncated(
    err: io::Error,
    field: &'static str,
    offset: u64,
    chunk: Option<usize>,
) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        FormatError::Truncated {
            field,
            offset,
            chunk,
        }
        .into()
    } else {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_maps_eof() {
        let err = truncated(
            io::Error::from(io::ErrorKind::UnexpectedEof),
            "pixel data",
            52,
            Some(1),
        );
        assert!(err.is_format());
        assert_eq!(
            err.to_string(),
            "truncated stream: pixel data at offset 52 (chunk 1)"
        );
    }

    #[test]
    fn test_truncated_keeps_other_io_errors() {
        let err = truncated(
            io::Error::from(io::ErrorKind::PermissionDenied),
            "magic",
            0,
            None,
        );
        assert!(!err.is_format());
        assert!(err.as_format().is_none());
    }

    #[test]
    fn test_bad_magic_message() {
        let err = FormatError::BadMagic {
            found: *b"RIFF",
        };
        assert!(err.to_string().starts_with("bad magic"));
    }
}
