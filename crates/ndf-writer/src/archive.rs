//! Packaging the workspace into a single deflate-compressed zip archive.
//!
//! Entries are the regular files under the source directory, named by their
//! path relative to it (`lists/000001.json`, `nodes/000101.json`, ...) with
//! `/` separators, added in sorted order. Archiving is blocking; async callers
//! should go through [`tokio::task::spawn_blocking`].

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::WriterError;

/// Outcome of a successful [`archive`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub output_path: PathBuf,
    pub file_count: usize,
}

/// Package every file under `source_dir` into `output_path`, replacing any
/// existing file there.
///
/// # Errors
///
/// Returns [`WriterError::MissingSource`] or [`WriterError::EmptySource`] when
/// there is nothing to archive, [`WriterError::Io`] or [`WriterError::Walk`]
/// on filesystem failures, and [`WriterError::Zip`] when the zip writer fails.
pub fn archive(source_dir: &Path, output_path: &Path) -> Result<ArchiveSummary, WriterError> {
    if !source_dir.is_dir() {
        return Err(WriterError::MissingSource(source_dir.to_path_buf()));
    }

    let files = collect_files(source_dir)?;
    if files.is_empty() {
        return Err(WriterError::EmptySource(source_dir.to_path_buf()));
    }

    match std::fs::remove_file(output_path) {
        Ok(()) => tracing::debug!(path = %output_path.display(), "replaced existing archive"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(WriterError::io(output_path, e)),
    }
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| WriterError::io(parent, e))?;
    }

    let file = File::create(output_path).map_err(|e| WriterError::io(output_path, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for relative in &files {
        let absolute = source_dir.join(relative);
        let body = std::fs::read(&absolute).map_err(|e| WriterError::io(&absolute, e))?;
        zip.start_file(entry_name(relative), options)?;
        zip.write_all(&body).map_err(|e| WriterError::io(output_path, e))?;
    }

    let mut writer = zip.finish()?;
    writer.flush().map_err(|e| WriterError::io(output_path, e))?;

    tracing::debug!(
        path = %output_path.display(),
        files = files.len(),
        "archive written"
    );
    Ok(ArchiveSummary {
        output_path: output_path.to_path_buf(),
        file_count: files.len(),
    })
}

/// Zip entry name for a relative path: components joined with `/`.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative paths of every regular file under `root`, sorted.
fn collect_files(root: &Path) -> Result<Vec<PathBuf>, WriterError> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use pretty_assertions::assert_eq;
    use zip::ZipArchive;

    use super::*;

    fn entry_names(archive_path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    fn seed(root: &Path) {
        for (rel, body) in [
            ("lists/000001.json", "{}"),
            ("nodes/000002.json", "[2]"),
            ("nodes/000001.json", "[1]"),
            ("relations/000001.json", "[]"),
        ] {
            let path = root.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, body).unwrap();
        }
    }

    #[test]
    fn entries_keep_relative_paths_in_sorted_order() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("NDF");
        seed(&source);
        let output = temp.path().join("ndf.zip");

        let summary = archive(&source, &output).unwrap();

        assert_eq!(summary.file_count, 4);
        assert_eq!(
            entry_names(&output),
            [
                "lists/000001.json",
                "nodes/000001.json",
                "nodes/000002.json",
                "relations/000001.json",
            ]
        );
    }

    #[test]
    fn entry_contents_match_source() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("NDF");
        seed(&source);
        let output = temp.path().join("ndf.zip");
        archive(&source, &output).unwrap();

        let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        assert_eq!(archive.len(), 4);
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).unwrap();
            assert_eq!(entry.compression(), zip::CompressionMethod::Deflated);
            let rel = entry.name().to_string();
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            assert_eq!(body, std::fs::read_to_string(source.join(rel)).unwrap());
        }
    }

    #[test]
    fn existing_output_is_replaced() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("NDF");
        seed(&source);
        let output = temp.path().join("out/ndf.zip");
        std::fs::create_dir_all(output.parent().unwrap()).unwrap();
        std::fs::write(&output, "not an archive").unwrap();

        archive(&source, &output).unwrap();

        assert_eq!(entry_names(&output).len(), 4);
    }

    #[test]
    fn missing_source_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let err = archive(&temp.path().join("absent"), &temp.path().join("x.zip")).unwrap_err();
        assert!(matches!(err, WriterError::MissingSource(_)), "{err}");
    }

    #[test]
    fn source_without_files_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("NDF");
        std::fs::create_dir_all(source.join("nodes")).unwrap();
        let output = temp.path().join("x.zip");

        let err = archive(&source, &output).unwrap_err();

        assert!(matches!(err, WriterError::EmptySource(_)), "{err}");
        assert!(!output.exists());
    }
}
