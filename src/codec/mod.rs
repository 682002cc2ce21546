// Xcursor binary codec

pub mod chunk;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod pixels;

pub use chunk::ChunkType;
pub use decoder::{decode, decode_with_log};
pub use encoder::{encode, encode_to_vec, encode_with_log};
pub use error::{Error, FormatError, Result};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::model::cursor::Cursor;

pub fn decode_bytes(data: &[u8]) -> Result<Cursor> {
    decode(std::io::Cursor::new(data))
}

/// Opens and decodes an Xcursor file; the file is closed before returning.
pub fn read_xcursor<P: AsRef<Path>>(path: P) -> Result<Cursor> {
    let file = File::open(path)?;
    decode(BufReader::new(file))
}

/// Creates (or truncates) `path` and writes `cursor` to it.
pub fn write_xcursor<P: AsRef<Path>>(cursor: &Cursor, path: P) -> Result<()> {
    let file = File::create(path)?;
    encode(cursor, BufWriter::new(file))
}
