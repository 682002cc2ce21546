// Cursor and frame data holders

use image::RgbaImage;

pub const DEFAULT_DURATION_MS: u32 = 50;

/// One still image of an animated cursor.
///
/// Pixels are held in RGBA order; width and height come from the buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct CursorFrame {
    pub pixels: RgbaImage,
    pub hot_spot: (u32, u32),
    pub duration: u32,
}

impl CursorFrame {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            hot_spot: (0, 0),
            duration: DEFAULT_DURATION_MS,
        }
    }

    pub fn with_hot_spot(mut self, x: u32, y: u32) -> Self {
        self.hot_spot = (x, y);
        self
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration = duration_ms;
        self
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Nominal cursor size, the longer side of the frame
    pub fn nominal_size(&self) -> u32 {
        self.width().max(self.height())
    }
}

/// Ordered frames of a cursor, kept in the order they appear in the file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cursor {
    frames: Vec<CursorFrame>,
}

impl Cursor {
    pub fn new(frames: Vec<CursorFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[CursorFrame] {
        &self.frames
    }

    pub fn push(&mut self, frame: CursorFrame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CursorFrame> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<CursorFrame> {
        self.frames
    }

    /// Distinct nominal sizes present in this cursor, ascending
    pub fn nominal_sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<u32> = self.frames.iter().map(CursorFrame::nominal_size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

impl From<Vec<CursorFrame>> for Cursor {
    fn from(frames: Vec<CursorFrame>) -> Self {
        Self::new(frames)
    }
}

impl<'a> IntoIterator for &'a Cursor {
    type Item = &'a CursorFrame;
    type IntoIter = std::slice::Iter<'a, CursorFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
