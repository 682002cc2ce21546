// Channel-order conversion between stored BGRA and in-memory RGBA

use image::RgbaImage;

/// Swaps byte 0 and byte 2 of every 4-byte sample.
///
/// The same swap turns BGRA into RGBA and back.
pub fn swap_red_blue(samples: &mut [u8]) {
    for pixel in samples.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }
}

/// Builds an RGBA buffer from BGRA bytes as stored on disk
pub fn rgba_from_bgra(width: u32, height: u32, mut data: Vec<u8>) -> Option<RgbaImage> {
    if data.len() as u64 != width as u64 * height as u64 * 4 {
        return None;
    }
    swap_red_blue(&mut data);
    RgbaImage::from_raw(width, height, data)
}

/// Flattens an RGBA buffer into BGRA bytes for writing
pub fn bgra_from_rgba(image: &RgbaImage) -> Vec<u8> {
    let mut data = image.as_raw().clone();
    swap_red_blue(&mut data);
    data
}
