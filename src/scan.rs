//! Local file set enumeration.
//!
//! Walks a root directory and produces one [`LocalFile`] per regular file
//! beneath it. Relative keys are slash-normalized so manifests are portable
//! across operating systems. Symbolic links and non-regular files are skipped
//! (build output trees do not meaningfully contain them, and following links
//! can escape the root); unreadable entries are never skipped silently, since
//! a missing entry would break later diffing.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::logging::*;

/// One regular file under the sync root
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFile {
	/// Slash-normalized path relative to the root; unique key within a run
	pub relative: String,

	/// Absolute path used for reading the file's content
	pub absolute: PathBuf,
}

/// Glob-based exclusion filter matched against relative keys
pub struct ScanFilter {
	exclude: GlobSet,
}

impl ScanFilter {
	/// Compile exclusion patterns; an empty list excludes nothing
	pub fn new(patterns: &[String]) -> Result<Self, SyncError> {
		let mut builder = GlobSetBuilder::new();
		for pattern in patterns {
			let glob = Glob::new(pattern).map_err(|e| SyncError::InvalidConfig {
				message: format!("invalid exclude pattern '{}': {}", pattern, e),
			})?;
			builder.add(glob);
		}
		let exclude = builder.build().map_err(|e| SyncError::InvalidConfig {
			message: format!("failed to compile exclude patterns: {}", e),
		})?;
		Ok(ScanFilter { exclude })
	}

	pub fn empty() -> Self {
		ScanFilter { exclude: GlobSet::empty() }
	}

	fn is_excluded(&self, relative: &str) -> bool {
		self.exclude.is_match(relative)
	}
}

impl Default for ScanFilter {
	fn default() -> Self {
		ScanFilter::empty()
	}
}

/// Enumerate every regular file under `root`.
///
/// Entries are visited in sorted filename order per directory, so the
/// returned sequence is deterministic for a given tree.
pub fn scan_root(root: &Path, filter: &ScanFilter) -> Result<Vec<LocalFile>, SyncError> {
	let meta = fs::metadata(root).map_err(|e| match e.kind() {
		io::ErrorKind::NotFound => SyncError::RootNotFound { path: root.display().to_string() },
		io::ErrorKind::PermissionDenied => {
			SyncError::PermissionDenied { path: root.display().to_string() }
		}
		_ => SyncError::Io(e),
	})?;

	if !meta.is_dir() {
		return Err(SyncError::InvalidConfig {
			message: format!("{} is not a directory", root.display()),
		});
	}

	let mut files = Vec::new();
	walk_dir(root, root, filter, &mut files)?;
	Ok(files)
}

fn walk_dir(
	root: &Path,
	dir: &Path,
	filter: &ScanFilter,
	out: &mut Vec<LocalFile>,
) -> Result<(), SyncError> {
	let reader = fs::read_dir(dir).map_err(|e| walk_error(dir, e))?;

	let mut entries = Vec::new();
	for entry in reader {
		entries.push(entry.map_err(|e| walk_error(dir, e))?);
	}
	entries.sort_by_key(|e| e.file_name());

	for entry in entries {
		let path = entry.path();
		let file_type = entry.file_type().map_err(|e| walk_error(&path, e))?;

		if file_type.is_symlink() {
			debug!("Skipping symlink: {}", path.display());
			continue;
		}

		if file_type.is_dir() {
			walk_dir(root, &path, filter, out)?;
		} else if file_type.is_file() {
			let relative = relative_key(root, &path)?;
			if filter.is_excluded(&relative) {
				debug!("Excluded: {}", relative);
				continue;
			}
			out.push(LocalFile { relative, absolute: path });
		} else {
			debug!("Skipping non-regular entry: {}", path.display());
		}
	}

	Ok(())
}

fn walk_error(path: &Path, e: io::Error) -> SyncError {
	match e.kind() {
		io::ErrorKind::PermissionDenied => {
			SyncError::PermissionDenied { path: path.display().to_string() }
		}
		_ => SyncError::Io(e),
	}
}

/// Strip the root and join components with forward slashes
fn relative_key(root: &Path, path: &Path) -> Result<String, SyncError> {
	let rel = path.strip_prefix(root).map_err(|_| SyncError::Other {
		message: format!("{} is outside root {}", path.display(), root.display()),
	})?;

	let parts: Vec<String> =
		rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
	Ok(parts.join("/"))
}


// vim: ts=4
