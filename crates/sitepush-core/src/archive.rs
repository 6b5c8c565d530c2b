//! Packing a site directory into an in-memory zip archive

use crate::error::{DeployError, Result};
use std::fs::File;
use std::io::{self, Cursor};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Entry name prefix expected by the remote unpacker.
const ENTRY_PREFIX: &str = "public";

/// Pack every regular file under `root` into an in-memory zip archive.
///
/// Entry names are `public/` followed by the file's path relative to `root`,
/// always with forward slashes. Directories are traversal nodes only and are
/// never written as entries. The writer is finished before returning, so the
/// buffer is a complete archive usable standalone.
pub fn build_archive(root: &Path) -> Result<Vec<u8>> {
    if !root.exists() {
        return Err(DeployError::SourceMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DeployError::SourceNotADirectory(root.to_path_buf()));
    }
    // Resolves `.`/`..` segments and trailing separators.
    let root = root.canonicalize()?;

    debug!("Compressing {}", root.display());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in WalkDir::new(&root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry.path().strip_prefix(&root).unwrap_or_else(|_| entry.path());
        let name = entry_name(rel);
        debug!("Adding file: {name}");

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(modified_time(&entry));
        zip.start_file(name, options)?;

        // Scoped so each handle closes before the next file is visited.
        let mut file = File::open(entry.path())?;
        io::copy(&mut file, &mut zip)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Forward-slash entry name under the fixed prefix, on every platform.
fn entry_name(rel: &Path) -> String {
    let mut name = String::from(ENTRY_PREFIX);
    for component in rel.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

/// File modification time as a zip timestamp.
///
/// Zip timestamps only cover 1980..=2107; anything outside that range (or an
/// unreadable mtime) falls back to the format's epoch.
fn modified_time(entry: &walkdir::DirEntry) -> zip::DateTime {
    use chrono::{DateTime, Datelike, Local, Timelike};

    let modified = match entry.metadata().ok().and_then(|m| m.modified().ok()) {
        Some(time) => time,
        None => return zip::DateTime::default(),
    };

    let local: DateTime<Local> = modified.into();
    zip::DateTime::from_date_and_time(
        local.year() as u16,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::fs;
    use std::io::Read;

    fn read_entries(buf: &[u8]) -> BTreeMap<String, Vec<u8>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(buf.to_vec())).unwrap();
        let mut entries = BTreeMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).unwrap();
            let mut contents = Vec::new();
            file.read_to_end(&mut contents).unwrap();
            entries.insert(file.name().to_string(), contents);
        }
        entries
    }

    #[test]
    fn packs_every_regular_file_under_the_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), b"<html>").unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/site.css"), b"body{}").unwrap();
        fs::create_dir_all(dir.path().join("img/icons")).unwrap();
        fs::write(dir.path().join("img/icons/logo.svg"), b"<svg/>").unwrap();
        // Empty directories must not produce entries.
        fs::create_dir_all(dir.path().join("drafts")).unwrap();

        let buf = build_archive(dir.path()).unwrap();
        let names: BTreeSet<String> = read_entries(&buf).into_keys().collect();

        let expected: BTreeSet<String> = [
            "public/index.html",
            "public/css/site.css",
            "public/img/icons/logo.svg",
        ]
        .map(str::to_string)
        .into();
        assert_eq!(names, expected);
    }

    #[test]
    fn round_trips_file_contents_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let blob: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        fs::write(dir.path().join("index.html"), b"<html>hello</html>").unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/blob.bin"), &blob).unwrap();

        let buf = build_archive(dir.path()).unwrap();
        let entries = read_entries(&buf);

        assert_eq!(
            entries["public/index.html"],
            b"<html>hello</html>".to_vec()
        );
        assert_eq!(entries["public/assets/blob.bin"], blob);
    }

    #[test]
    fn missing_root_is_reported() {
        let err = build_archive(Path::new("/no/such/site/folder")).unwrap_err();
        assert!(matches!(err, DeployError::SourceMissing(_)));
    }

    #[test]
    fn file_root_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("index.html");
        fs::write(&file, b"<html>").unwrap();

        let err = build_archive(&file).unwrap_err();
        assert!(matches!(err, DeployError::SourceNotADirectory(_)));
    }

    #[test]
    fn normalizes_dot_segments_in_the_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/index.html"), b"ok").unwrap();

        let dotted = dir.path().join("public").join(".");
        let buf = build_archive(&dotted).unwrap();
        let names: BTreeSet<String> = read_entries(&buf).into_keys().collect();
        assert!(names.contains("public/index.html"));
    }
}
