//! Content fingerprinting using BLAKE3.
//!
//! A fingerprint is the hex-encoded 256-bit digest of a file's full byte
//! content. Filesystem metadata never participates, so identical bytes yield
//! identical fingerprints on every host.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use futures::future;
use tokio::sync::Semaphore;

use crate::error::SyncError;
use crate::manifest::Manifest;
use crate::scan::LocalFile;

/// Fingerprint an in-memory byte sequence
pub fn fingerprint_bytes(data: &[u8]) -> String {
	hex::encode(blake3::hash(data).as_bytes())
}

/// Fingerprint a file's content with streaming reads.
///
/// Any read failure propagates; a truncated prefix must never be
/// fingerprinted as if it were the whole file.
pub fn fingerprint_file(path: &Path) -> Result<String, SyncError> {
	let mut file = fs::File::open(path).map_err(|e| read_error(path, e))?;
	let mut hasher = blake3::Hasher::new();
	let mut buffer = [0u8; 64 * 1024];

	loop {
		let n = file.read(&mut buffer).map_err(|e| read_error(path, e))?;
		if n == 0 {
			break;
		}
		hasher.update(&buffer[..n]);
	}

	Ok(hex::encode(hasher.finalize().as_bytes()))
}

/// Fingerprint a scanned file set with a bounded worker pool.
///
/// Hashing has no ordering dependency between files, so it fans out over
/// `spawn_blocking` workers; the manifest map restores deterministic order.
/// `parallel = 0` selects the host's available parallelism. The first read
/// failure aborts the whole set.
pub async fn fingerprint_set(files: &[LocalFile], parallel: usize) -> Result<Manifest, SyncError> {
	let parallel = if parallel == 0 {
		std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
	} else {
		parallel
	};

	let semaphore = Arc::new(Semaphore::new(parallel));
	let mut handles = Vec::with_capacity(files.len());

	for file in files {
		let permit = semaphore.clone().acquire_owned().await.map_err(|e| SyncError::Other {
			message: format!("hash worker pool closed: {}", e),
		})?;
		let relative = file.relative.clone();
		let absolute = file.absolute.clone();

		handles.push(tokio::task::spawn_blocking(move || {
			let result = fingerprint_file(&absolute);
			drop(permit);
			(relative, result)
		}));
	}

	let mut manifest = Manifest::new();
	for joined in future::join_all(handles).await {
		let (relative, result) = joined.map_err(|e| SyncError::Other {
			message: format!("hashing task failed: {}", e),
		})?;
		manifest.insert(relative, result?);
	}

	Ok(manifest)
}

fn read_error(path: &Path, e: io::Error) -> SyncError {
	match e.kind() {
		io::ErrorKind::PermissionDenied => {
			SyncError::PermissionDenied { path: path.display().to_string() }
		}
		_ => SyncError::ReadFailed { path: path.display().to_string(), source: e },
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;
	use tempfile::TempDir;

	#[test]
	fn test_fingerprint_deterministic() {
		let a = fingerprint_bytes(b"hello world");
		let b = fingerprint_bytes(b"hello world");
		assert_eq!(a, b);
	}

	#[test]
	fn test_fingerprint_differs_on_content() {
		assert_ne!(fingerprint_bytes(b"hello"), fingerprint_bytes(b"hellp"));
	}

	#[test]
	fn test_fingerprint_is_hex_256bit() {
		let fp = fingerprint_bytes(b"");
		assert_eq!(fp.len(), 64);
		assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
	}

	#[test]
	fn test_file_matches_bytes() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("data.bin");
		let content = vec![0xAB; 200_000]; // spans multiple read buffers
		fs::write(&path, &content).unwrap();

		assert_eq!(fingerprint_file(&path).unwrap(), fingerprint_bytes(&content));
	}

	#[test]
	fn test_missing_file_fails() {
		let result = fingerprint_file(&PathBuf::from("/nonexistent/path/file.bin"));
		assert!(result.is_err());
	}

	#[tokio::test]
	async fn test_fingerprint_set() {
		let dir = TempDir::new().unwrap();
		fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
		fs::write(dir.path().join("b.txt"), b"beta").unwrap();

		let files = vec![
			LocalFile { relative: "a.txt".to_string(), absolute: dir.path().join("a.txt") },
			LocalFile { relative: "b.txt".to_string(), absolute: dir.path().join("b.txt") },
		];

		let manifest = fingerprint_set(&files, 2).await.unwrap();
		assert_eq!(manifest.len(), 2);
		assert_eq!(manifest.get("a.txt"), Some(fingerprint_bytes(b"alpha").as_str()));
		assert_eq!(manifest.get("b.txt"), Some(fingerprint_bytes(b"beta").as_str()));
	}
}

// vim: ts=4
