// Cursor -> Xcursor stream, with table-of-contents backpatching

use std::io::{self, Seek, SeekFrom, Write};
use tracing::trace;

use super::chunk::{
    ChunkType, FILE_HEADER_SIZE, FileHeader, IMAGE_VERSION, ImageHeader, TOC_ENTRY_SIZE, TocEntry,
};
use super::error::{FormatError, Result};
use super::pixels::bgra_from_rgba;
use crate::model::cursor::{Cursor, CursorFrame};

/// Encodes a cursor, sending diagnostics to `tracing` at trace level.
pub fn encode<W: Write + Seek>(cursor: &Cursor, writer: W) -> Result<()> {
    encode_with_log(cursor, writer, |msg| trace!(target: "xcursor_codec::encode", "{}", msg))
}

/// Encodes a cursor into an in-memory Xcursor file
pub fn encode_to_vec(cursor: &Cursor) -> Result<Vec<u8>> {
    let mut output = io::Cursor::new(Vec::new());
    encode(cursor, &mut output)?;
    Ok(output.into_inner())
}

/// Writes `cursor` as an Xcursor file starting at the writer's current position.
///
/// The table of contents is reserved up front and each entry is backpatched
/// once the offset of its chunk is known. Offsets are relative to the position
/// the file starts at. Comment chunks are never written.
///
/// On error the writer holds a partial file that should be discarded.
pub fn encode_with_log<W, F>(cursor: &Cursor, mut writer: W, mut log_fn: F) -> Result<()>
where
    W: Write + Seek,
    F: FnMut(String),
{
    let n_entry = u32::try_from(cursor.len()).map_err(|_| FormatError::TooManyFrames {
        count: cursor.len(),
    })?;

    let base = writer.stream_position()?;
    FileHeader::new(n_entry).write(&mut writer)?;
    log_fn(format!("header written, {} entries", n_entry));

    let mut toc_cursor = base + FILE_HEADER_SIZE as u64;
    writer.write_all(&vec![0u8; cursor.len() * TOC_ENTRY_SIZE as usize])?;

    for (index, frame) in cursor.iter().enumerate() {
        check_pixel_buffer(frame, index)?;

        let chunk_start = writer.stream_position()?;
        let position = u32::try_from(chunk_start - base).map_err(|_| FormatError::OffsetOverflow {
            frame: index,
            offset: chunk_start - base,
        })?;

        writer.seek(SeekFrom::Start(toc_cursor))?;
        TocEntry {
            chunk_type: ChunkType::Image,
            subtype: frame.width(),
            position,
        }
        .write(&mut writer)?;
        toc_cursor += TOC_ENTRY_SIZE as u64;
        writer.seek(SeekFrom::Start(chunk_start))?;

        ImageHeader {
            subtype: frame.width(),
            version: IMAGE_VERSION,
            width: frame.width(),
            height: frame.height(),
            xhot: frame.hot_spot.0,
            yhot: frame.hot_spot.1,
            delay: frame.duration,
        }
        .write(&mut writer)?;
        writer.write_all(&bgra_from_rgba(&frame.pixels))?;

        log_fn(format!(
            "frame {}: {}x{} image chunk at {}",
            index,
            frame.width(),
            frame.height(),
            position
        ));
    }

    writer.flush()?;
    Ok(())
}

fn check_pixel_buffer(frame: &CursorFrame, index: usize) -> Result<()> {
    let (width, height) = frame.size();
    let expected = width as usize * height as usize * 4;
    let actual = frame.pixels.as_raw().len();
    if actual != expected {
        return Err(FormatError::PixelBufferMismatch {
            frame: index,
            width,
            height,
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn u32_at(data: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
    }

    #[test]
    fn test_encode_layout() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        let cursor = Cursor::new(vec![
            CursorFrame::new(img).with_hot_spot(1, 1).with_duration(80),
            CursorFrame::new(RgbaImage::new(1, 1)),
        ]);

        let data = encode_to_vec(&cursor).unwrap();

        assert_eq!(&data[0..4], b"Xcur");
        assert_eq!(u32_at(&data, 4), 16);
        assert_eq!(&data[8..12], &[0, 0, 1, 0]);
        assert_eq!(u32_at(&data, 12), 2);

        // toc
        assert_eq!(u32_at(&data, 16), 0xfffd0002);
        assert_eq!(u32_at(&data, 20), 3);
        assert_eq!(u32_at(&data, 24), 40);
        assert_eq!(u32_at(&data, 28), 0xfffd0002);
        assert_eq!(u32_at(&data, 32), 1);
        assert_eq!(u32_at(&data, 36), 40 + 36 + 3 * 2 * 4);

        // first chunk header
        assert_eq!(u32_at(&data, 40), 36);
        assert_eq!(u32_at(&data, 44), 0xfffd0002);
        assert_eq!(u32_at(&data, 48), 3);
        assert_eq!(u32_at(&data, 52), 1);
        assert_eq!(u32_at(&data, 56), 3);
        assert_eq!(u32_at(&data, 60), 2);
        assert_eq!(u32_at(&data, 64), 1);
        assert_eq!(u32_at(&data, 68), 1);
        assert_eq!(u32_at(&data, 72), 80);
        assert_eq!(&data[76..80], &[3, 2, 1, 4]);

        assert_eq!(data.len(), 40 + 36 + 24 + 36 + 4);
    }

    #[test]
    fn test_encode_empty_cursor() {
        let data = encode_to_vec(&Cursor::default()).unwrap();
        assert_eq!(data.len(), 16);
        assert_eq!(u32_at(&data, 12), 0);
    }

    #[test]
    fn test_encode_rejects_oversized_buffer() {
        let pixels = RgbaImage::from_raw(2, 2, vec![0u8; 20]).unwrap();
        let cursor = Cursor::new(vec![CursorFrame::new(pixels)]);

        let err = encode_to_vec(&cursor).unwrap_err();
        match err.as_format() {
            Some(FormatError::PixelBufferMismatch {
                frame,
                expected,
                actual,
                ..
            }) => {
                assert_eq!(*frame, 0);
                assert_eq!(*expected, 16);
                assert_eq!(*actual, 20);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_encode_offsets_relative_to_start() {
        let cursor = Cursor::new(vec![CursorFrame::new(RgbaImage::new(1, 1))]);
        let mut output = io::Cursor::new(vec![0xaa; 8]);
        output.set_position(8);
        encode(&cursor, &mut output).unwrap();

        let data = output.into_inner();
        assert_eq!(&data[8..12], b"Xcur");
        assert_eq!(u32_at(&data, 8 + 24), 28);
    }

    #[test]
    fn test_encode_log_messages() {
        let cursor = Cursor::new(vec![CursorFrame::new(RgbaImage::new(2, 2))]);
        let mut messages = Vec::new();
        encode_with_log(&cursor, io::Cursor::new(Vec::new()), |msg| messages.push(msg)).unwrap();
        assert!(messages.iter().any(|m| m.contains("frame 0: 2x2 image chunk at 28")));
    }
}
