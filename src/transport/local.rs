//! Filesystem-backed transport for local targets and tests

use async_trait::async_trait;
use std::io;
use std::path::Path;

use super::Transport;
use crate::error::TransportError;

/// Transport where remote paths are plain filesystem paths
#[derive(Debug, Default)]
pub struct LocalTransport;

impl LocalTransport {
	pub fn new() -> Self {
		LocalTransport
	}
}

#[async_trait]
impl Transport for LocalTransport {
	async fn upload(&self, remote_path: &str, content: &[u8]) -> Result<(), TransportError> {
		let path = Path::new(remote_path);
		if let Some(parent) = path.parent() {
			if !parent.as_os_str().is_empty() {
				tokio::fs::create_dir_all(parent).await?;
			}
		}
		tokio::fs::write(path, content).await?;
		Ok(())
	}

	async fn download(&self, remote_path: &str) -> Result<Vec<u8>, TransportError> {
		match tokio::fs::read(remote_path).await {
			Ok(data) => Ok(data),
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				Err(TransportError::NotFound { path: remote_path.to_string() })
			}
			Err(e) => Err(TransportError::Io(e)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[tokio::test]
	async fn test_upload_creates_parents() {
		let dir = TempDir::new().unwrap();
		let target = dir.path().join("a/b/c.txt");
		let transport = LocalTransport::new();

		transport.upload(target.to_str().unwrap(), b"payload").await.unwrap();
		assert_eq!(std::fs::read(&target).unwrap(), b"payload");
	}

	#[tokio::test]
	async fn test_download_round_trip() {
		let dir = TempDir::new().unwrap();
		let target = dir.path().join("file.bin");
		let transport = LocalTransport::new();

		transport.upload(target.to_str().unwrap(), b"12345").await.unwrap();
		let data = transport.download(target.to_str().unwrap()).await.unwrap();
		assert_eq!(data, b"12345");
	}

	#[tokio::test]
	async fn test_download_missing_is_not_found() {
		let dir = TempDir::new().unwrap();
		let target = dir.path().join("absent.bin");
		let transport = LocalTransport::new();

		let err = transport.download(target.to_str().unwrap()).await.unwrap_err();
		assert!(err.is_not_found());
	}
}

// vim: ts=4
