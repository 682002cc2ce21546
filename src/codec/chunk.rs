// On-disk records of the Xcursor format, all little-endian

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Read, Seek, Write};

use super::error::{FormatError, Result, truncated};

pub const MAGIC: &[u8; 4] = b"Xcur";
pub const FILE_HEADER_SIZE: u32 = 16;
pub const FILE_VERSION: [u8; 4] = [0, 0, 1, 0];
pub const TOC_ENTRY_SIZE: u32 = 12;
pub const IMAGE_HEADER_SIZE: u32 = 36;
pub const IMAGE_VERSION: u32 = 1;

const COMMENT_TYPE: u32 = 0xfffe_0001;
const IMAGE_TYPE: u32 = 0xfffd_0002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkType {
    Comment,
    Image,
    Unknown(u32),
}

impl ChunkType {
    pub fn raw(self) -> u32 {
        match self {
            ChunkType::Comment => COMMENT_TYPE,
            ChunkType::Image => IMAGE_TYPE,
            ChunkType::Unknown(raw) => raw,
        }
    }
}

impl From<u32> for ChunkType {
    fn from(raw: u32) -> Self {
        match raw {
            COMMENT_TYPE => ChunkType::Comment,
            IMAGE_TYPE => ChunkType::Image,
            other => ChunkType::Unknown(other),
        }
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkType::Comment => f.write_str("comment"),
            ChunkType::Image => f.write_str("image"),
            ChunkType::Unknown(raw) => write!(f, "unknown(0x{:08x})", raw),
        }
    }
}

pub(crate) fn read_u32<R: Read + Seek>(
    reader: &mut R,
    field: &'static str,
    chunk: Option<usize>,
) -> Result<u32> {
    let offset = reader.stream_position()?;
    reader
        .read_u32::<LittleEndian>()
        .map_err(|e| truncated(e, field, offset, chunk))
}

pub(crate) fn read_array<R: Read + Seek, const N: usize>(
    reader: &mut R,
    field: &'static str,
    chunk: Option<usize>,
) -> Result<[u8; N]> {
    let offset = reader.stream_position()?;
    let mut buf = [0u8; N];
    reader
        .read_exact(&mut buf)
        .map_err(|e| truncated(e, field, offset, chunk))?;
    Ok(buf)
}

/// The fixed 16-byte file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub header_size: u32,
    pub version: [u8; 4],
    pub n_entry: u32,
}

impl FileHeader {
    pub fn new(n_entry: u32) -> Self {
        Self {
            header_size: FILE_HEADER_SIZE,
            version: FILE_VERSION,
            n_entry,
        }
    }

    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let magic: [u8; 4] = read_array(reader, "magic", None)?;
        if &magic != MAGIC {
            return Err(FormatError::BadMagic { found: magic }.into());
        }

        // The declared size is informational; the field layout below is fixed.
        let header_size = read_u32(reader, "header size", None)?;
        let version = read_array(reader, "file version", None)?;
        let n_entry = read_u32(reader, "entry count", None)?;

        Ok(Self {
            header_size,
            version,
            n_entry,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(MAGIC)?;
        writer.write_u32::<LittleEndian>(self.header_size)?;
        writer.write_all(&self.version)?;
        writer.write_u32::<LittleEndian>(self.n_entry)?;
        Ok(())
    }
}

/// One table-of-contents entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocEntry {
    pub chunk_type: ChunkType,
    pub subtype: u32,
    pub position: u32,
}

impl TocEntry {
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            chunk_type: read_u32(reader, "toc entry type", None)?.into(),
            subtype: read_u32(reader, "toc entry subtype", None)?,
            position: read_u32(reader, "toc entry position", None)?,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.chunk_type.raw())?;
        writer.write_u32::<LittleEndian>(self.subtype)?;
        writer.write_u32::<LittleEndian>(self.position)?;
        Ok(())
    }
}

/// The 8 bytes every chunk starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub header_size: u32,
    pub chunk_type: ChunkType,
}

impl ChunkHeader {
    pub fn read<R: Read + Seek>(reader: &mut R, index: usize) -> Result<Self> {
        Ok(Self {
            header_size: read_u32(reader, "chunk header size", Some(index))?,
            chunk_type: read_u32(reader, "chunk type", Some(index))?.into(),
        })
    }
}

/// Fields of an image chunk following the common chunk header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub subtype: u32,
    pub version: u32,
    pub width: u32,
    pub height: u32,
    pub xhot: u32,
    pub yhot: u32,
    pub delay: u32,
}

impl ImageHeader {
    pub fn read<R: Read + Seek>(reader: &mut R, index: usize) -> Result<Self> {
        let chunk = Some(index);
        Ok(Self {
            subtype: read_u32(reader, "image subtype", chunk)?,
            version: read_u32(reader, "image version", chunk)?,
            width: read_u32(reader, "image width", chunk)?,
            height: read_u32(reader, "image height", chunk)?,
            xhot: read_u32(reader, "image xhot", chunk)?,
            yhot: read_u32(reader, "image yhot", chunk)?,
            delay: read_u32(reader, "image delay", chunk)?,
        })
    }

    /// Writes the full 36-byte chunk header, common part included
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(IMAGE_HEADER_SIZE)?;
        writer.write_u32::<LittleEndian>(ChunkType::Image.raw())?;
        writer.write_u32::<LittleEndian>(self.subtype)?;
        writer.write_u32::<LittleEndian>(self.version)?;
        writer.write_u32::<LittleEndian>(self.width)?;
        writer.write_u32::<LittleEndian>(self.height)?;
        writer.write_u32::<LittleEndian>(self.xhot)?;
        writer.write_u32::<LittleEndian>(self.yhot)?;
        writer.write_u32::<LittleEndian>(self.delay)?;
        Ok(())
    }

    pub fn pixel_len(&self) -> u64 {
        self.width as u64 * self.height as u64 * 4
    }
}
