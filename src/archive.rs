//! Packing a materialized tree into the output zip archive.
use std::fs::{self, File};
use std::io;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

/// Writes every file under `root` into a deflate-compressed archive.
///
/// Entry names are relative to `root` and use `/` separators, so the archive's top
/// level holds the contents of `root` rather than `root` itself. Returns the number
/// of entries written.
pub fn archive_tree<P: AsRef<Path>, Q: AsRef<Path>>(root: P, archive_path: Q) -> Result<usize> {
    let root = root.as_ref();
    let archive_path = archive_path.as_ref();

    if let Some(parent) = archive_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = ZipWriter::new(File::create(archive_path)?);
    let mut written = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry_name(root, entry.path())?;
        debug!("Archiving {} as {}", entry.path().display(), name);

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        writer.start_file(name, options)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut writer)?;
        written += 1;
    }

    writer.finish()?;
    Ok(written)
}

/// Archives `root` and then deletes it, leaving the archive as the only output.
pub fn package<P: AsRef<Path>, Q: AsRef<Path>>(root: P, archive_path: Q) -> Result<usize> {
    let root = root.as_ref();
    let written = archive_tree(root, archive_path)?;
    debug!("Removing {}", root.display());
    fs::remove_dir_all(root)?;
    Ok(written)
}

fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|e| Error::IoError(io::Error::other(e)))?;
    let segments = relative
        .components()
        .map(|component| {
            component.as_os_str().to_str().map(str::to_string).ok_or_else(|| {
                Error::IoError(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("non UTF-8 path: {}", path.display()),
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(segments.join("/"))
}
