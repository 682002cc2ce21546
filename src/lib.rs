// Xcursor file decoding and encoding

pub mod batch;
pub mod codec;
pub mod config;
pub mod export;
pub mod model;

pub use codec::{
    Error, FormatError, Result, decode, decode_bytes, decode_with_log, encode, encode_to_vec,
    encode_with_log, read_xcursor, write_xcursor,
};
pub use model::{Cursor, CursorFrame};
