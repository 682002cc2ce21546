// Dumping cursor frames to PNG files with an xcursorgen-style listing

use anyhow::{Result, bail};
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::CodecConfig;
use crate::model::cursor::{Cursor, CursorFrame};

const MAX_SUFFIX: usize = 999;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub prefix: String,
    pub initial_suffix: usize,
    pub write_config: bool,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self {
            prefix: "cursor".to_string(),
            initial_suffix: 0,
            write_config: true,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_initial_suffix(mut self, suffix: usize) -> Self {
        self.initial_suffix = suffix;
        self
    }

    pub fn with_config(mut self, write: bool) -> Self {
        self.write_config = write;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CodecConfig> for ExportOptions {
    fn from(config: &CodecConfig) -> Self {
        Self::new()
            .with_prefix(config.export_prefix.clone())
            .with_config(config.write_export_config)
    }
}

/// Writes each frame as `<prefix>_NNN.png`, in cursor order.
///
/// With `write_config` set, `<prefix>.conf` lists size, hotspot, file and
/// delay for every frame so the set can be fed back to xcursorgen.
pub fn export_frames(
    cursor: &Cursor,
    output_dir: &Path,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>> {
    check_exportable(cursor, options)?;
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    let mut lines = Vec::new();

    for (i, frame) in cursor.iter().enumerate() {
        let suffix = options.initial_suffix + i;
        let filename = format!("{}_{:03}.png", options.prefix, suffix);
        let path = output_dir.join(&filename);
        write_png(&frame.pixels, &path)?;
        written.push(path);

        if options.write_config {
            lines.push(config_line(frame, &filename));
        }
    }

    if options.write_config && !lines.is_empty() {
        let config_path = output_dir.join(format!("{}.conf", options.prefix));
        let mut file = fs::File::create(config_path)?;
        writeln!(file, "#size\txhot\tyhot\tPath to PNG image\tdelay")?;
        for line in lines {
            writeln!(file, "{}", line)?;
        }
    }

    Ok(written)
}

/// Rejects the whole export before any file is written
fn check_exportable(cursor: &Cursor, options: &ExportOptions) -> Result<()> {
    if let Some(last) = cursor.len().checked_sub(1) {
        if options.initial_suffix + last > MAX_SUFFIX {
            bail!(
                "Suffix exceeded {}: {} frames starting at {}",
                MAX_SUFFIX,
                cursor.len(),
                options.initial_suffix
            );
        }
    }

    if let Some(index) = cursor.iter().position(|f| f.width() == 0 || f.height() == 0) {
        let (width, height) = cursor.frames()[index].size();
        bail!("Frame {} is {}x{}, PNG needs a non-empty image", index, width, height);
    }

    Ok(())
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

fn config_line(frame: &CursorFrame, filename: &str) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        frame.nominal_size(),
        frame.hot_spot.0,
        frame.hot_spot.1,
        filename,
        frame.duration
    )
}
