// Scanning and decoding many cursor files at once

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::codec::chunk::MAGIC;
use crate::codec::decoder::decode_with_log;
use crate::config::CodecConfig;
use crate::model::cursor::Cursor;

/// Lists the Xcursor files directly inside `dir`, sorted by path
pub fn scan_xcursor_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && has_xcursor_magic(path) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn has_xcursor_magic(path: &Path) -> bool {
    let mut magic = [0u8; 4];
    File::open(path)
        .and_then(|mut file| file.read_exact(&mut magic))
        .map(|_| &magic == MAGIC)
        .unwrap_or(false)
}

/// Decodes every file in `paths`, in parallel.
///
/// Results come back in input order. A file that fails to decode does not
/// stop the others.
pub fn decode_all(
    paths: &[PathBuf],
    config: &CodecConfig,
) -> Result<Vec<(PathBuf, crate::codec::Result<Cursor>)>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count)
        .build()
        .context("Failed to build decode thread pool")?;

    let debug_enabled = config.debug;
    let results: Vec<(PathBuf, crate::codec::Result<Cursor>)> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let result = decode_file(path, debug_enabled);
                if let Err(e) = &result {
                    warn!(path = %path.display(), error = %e, "failed to decode cursor");
                }
                (path.clone(), result)
            })
            .collect()
    });

    Ok(results)
}

/// Decodes every Xcursor file found in `dir`
pub fn decode_dir(
    dir: &Path,
    config: &CodecConfig,
) -> Result<Vec<(PathBuf, crate::codec::Result<Cursor>)>> {
    let paths = scan_xcursor_files(dir)?;
    debug!(dir = %dir.display(), count = paths.len(), "found cursor files");
    decode_all(&paths, config)
}

fn decode_file(path: &Path, debug_enabled: bool) -> crate::codec::Result<Cursor> {
    let file = File::open(path)?;
    decode_with_log(BufReader::new(file), |msg| {
        if debug_enabled {
            debug!(path = %path.display(), "{}", msg);
        }
    })
}
