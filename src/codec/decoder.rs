// Xcursor stream -> Cursor

use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

use super::chunk::{ChunkHeader, ChunkType, FILE_HEADER_SIZE, FileHeader, ImageHeader, TocEntry};
use super::error::{FormatError, Result};
use super::pixels::rgba_from_bgra;
use crate::model::cursor::{Cursor, CursorFrame};

/// Decodes an Xcursor stream, sending diagnostics to `tracing` at debug level.
pub fn decode<R: Read + Seek>(reader: R) -> Result<Cursor> {
    decode_with_log(reader, |msg| debug!(target: "xcursor_codec::decode", "{}", msg))
}

/// Decodes an Xcursor stream into its frames, in table-of-contents order.
///
/// Every chunk is reached by seeking to the offset listed in the table, so
/// skipped or out-of-order chunks never desynchronize the reads that follow.
/// Table offsets count from the reader's position at entry, matching what
/// the encoder writes. Comment chunks and chunks of unknown type produce no
/// frame.
pub fn decode_with_log<R, F>(mut reader: R, mut log_fn: F) -> Result<Cursor>
where
    R: Read + Seek,
    F: FnMut(String),
{
    let base = reader.stream_position()?;
    let header = FileHeader::read(&mut reader)?;
    log_fn(format!("header size: {}", header.header_size));
    if header.header_size != FILE_HEADER_SIZE {
        log_fn(format!(
            "declared header size {} differs from {}, using the fixed layout",
            header.header_size, FILE_HEADER_SIZE
        ));
    }

    let [v0, v1, v2, v3] = header.version;
    log_fn(format!("file version: {}.{}.{}.{}", v0, v1, v2, v3));
    log_fn(format!("header entries: {}", header.n_entry));

    let mut entries = Vec::new();
    for i in 0..header.n_entry {
        let entry = TocEntry::read(&mut reader)?;
        log_fn(format!(
            "toc {}: {} chunk, subtype {}, at {}",
            i, entry.chunk_type, entry.subtype, entry.position
        ));
        entries.push(entry);
    }

    let mut frames = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if let ChunkType::Unknown(raw) = entry.chunk_type {
            log_fn(format!("toc {}: unknown chunk type 0x{:08x}, skipping", index, raw));
            continue;
        }

        reader.seek(SeekFrom::Start(base + entry.position as u64))?;
        let chunk = ChunkHeader::read(&mut reader, index)?;

        if chunk.chunk_type != entry.chunk_type {
            log_fn(format!(
                "chunk {}: table says {}, chunk says {}, using the chunk type",
                index, entry.chunk_type, chunk.chunk_type
            ));
        }

        match chunk.chunk_type {
            ChunkType::Image => {
                let frame = read_image(&mut reader, index)?;
                log_fn(format!(
                    "chunk {}: image {}x{}, hotspot ({}, {}), delay {}ms",
                    index,
                    frame.width(),
                    frame.height(),
                    frame.hot_spot.0,
                    frame.hot_spot.1,
                    frame.duration
                ));
                frames.push(frame);
            }
            ChunkType::Comment => {
                log_fn(format!("chunk {}: comment, skipping", index));
            }
            ChunkType::Unknown(raw) => {
                log_fn(format!("chunk {}: unknown chunk type 0x{:08x}, skipping", index, raw));
            }
        }
    }

    Ok(Cursor::new(frames))
}

fn read_image<R: Read + Seek>(reader: &mut R, index: usize) -> Result<CursorFrame> {
    let header = ImageHeader::read(reader, index)?;

    let offset = reader.stream_position()?;
    let expected = header.pixel_len();
    let short = || FormatError::Truncated {
        field: "pixel data",
        offset,
        chunk: Some(index),
    };

    // Bounded by what the stream actually holds, not by the declared size.
    let mut data = Vec::new();
    reader.by_ref().take(expected).read_to_end(&mut data)?;
    if data.len() as u64 != expected {
        return Err(short().into());
    }

    let pixels = rgba_from_bgra(header.width, header.height, data).ok_or_else(short)?;

    Ok(CursorFrame {
        pixels,
        hot_spot: (header.xhot, header.yhot),
        duration: header.delay,
    })
}
