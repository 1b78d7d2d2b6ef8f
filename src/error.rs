//! Error types for publishr operations

use std::error::Error;
use std::fmt;
use std::io;

/// Main error type for publish/sync runs
#[derive(Debug)]
pub enum SyncError {
	/// Local root directory does not exist
	RootNotFound { path: String },

	/// Permission denied on a local path
	PermissionDenied { path: String },

	/// Local read failed partway
	ReadFailed { path: String, source: io::Error },

	/// I/O error
	Io(io::Error),

	/// Manifest error (nested)
	Manifest(ManifestError),

	/// Transport error (nested)
	Transport(TransportError),

	/// A file upload failed; the run aborts without publishing the manifest
	UploadFailed { path: String, source: TransportError },

	/// The manifest upload itself failed after all files transferred
	ManifestPublishFailed { source: TransportError },

	/// Build command exited with a non-zero status
	BuildFailed { command: String, code: Option<i32> },

	/// Invalid configuration
	InvalidConfig { message: String },

	/// Generic error message
	Other { message: String },
}

impl fmt::Display for SyncError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncError::RootNotFound { path } => {
				write!(f, "Local root not found: {}", path)
			}
			SyncError::PermissionDenied { path } => {
				write!(f, "Permission denied: {}", path)
			}
			SyncError::ReadFailed { path, source } => {
				write!(f, "Failed to read {}: {}", path, source)
			}
			SyncError::Io(e) => write!(f, "I/O error: {}", e),
			SyncError::Manifest(e) => write!(f, "Manifest error: {}", e),
			SyncError::Transport(e) => write!(f, "Transport error: {}", e),
			SyncError::UploadFailed { path, source } => {
				write!(f, "Upload of {} failed: {}", path, source)
			}
			SyncError::ManifestPublishFailed { source } => {
				write!(f, "Failed to publish manifest: {}", source)
			}
			SyncError::BuildFailed { command, code } => match code {
				Some(code) => write!(f, "Build command '{}' exited with code {}", command, code),
				None => write!(f, "Build command '{}' terminated by signal", command),
			},
			SyncError::InvalidConfig { message } => {
				write!(f, "Invalid configuration: {}", message)
			}
			SyncError::Other { message } => write!(f, "{}", message),
		}
	}
}

impl Error for SyncError {}

impl From<io::Error> for SyncError {
	fn from(e: io::Error) -> Self {
		SyncError::Io(e)
	}
}

impl From<String> for SyncError {
	fn from(e: String) -> Self {
		SyncError::Other { message: e }
	}
}

impl From<ManifestError> for SyncError {
	fn from(e: ManifestError) -> Self {
		SyncError::Manifest(e)
	}
}

impl From<TransportError> for SyncError {
	fn from(e: TransportError) -> Self {
		SyncError::Transport(e)
	}
}

/// Transport-specific errors
#[derive(Debug)]
pub enum TransportError {
	/// Remote path does not exist (distinguishable from connection failures)
	NotFound { path: String },

	/// Failed to reach the remote side
	ConnectionFailed { location: String, source: Box<dyn Error + Send + Sync> },

	/// Subprocess spawn failed
	SpawnFailed { cmd: String, source: io::Error },

	/// Remote command exited with a failure
	RemoteFailed { path: String, message: String },

	/// Stdio unavailable on a spawned subprocess
	StdioUnavailable { what: String },

	/// I/O error
	Io(io::Error),
}

impl TransportError {
	/// Not-found is the one transport condition the manifest fetch reports quietly
	pub fn is_not_found(&self) -> bool {
		matches!(self, TransportError::NotFound { .. })
	}
}

impl fmt::Display for TransportError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TransportError::NotFound { path } => {
				write!(f, "Remote path not found: {}", path)
			}
			TransportError::ConnectionFailed { location, source } => {
				write!(f, "Failed to connect to {}: {}", location, source)
			}
			TransportError::SpawnFailed { cmd, source } => {
				write!(f, "Failed to spawn '{}': {}", cmd, source)
			}
			TransportError::RemoteFailed { path, message } => {
				write!(f, "Remote operation on {} failed: {}", path, message)
			}
			TransportError::StdioUnavailable { what } => {
				write!(f, "Stdio unavailable: {}", what)
			}
			TransportError::Io(e) => write!(f, "I/O error: {}", e),
		}
	}
}

impl Error for TransportError {}

impl From<io::Error> for TransportError {
	fn from(e: io::Error) -> Self {
		TransportError::Io(e)
	}
}

/// Manifest codec errors
#[derive(Debug)]
pub enum ManifestError {
	/// Manifest bytes could not be parsed; callers treat this as "manifest absent"
	Corrupted { message: String },

	/// Manifest could not be serialized
	Encode { message: String },
}

impl fmt::Display for ManifestError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ManifestError::Corrupted { message } => {
				write!(f, "Manifest corrupted: {}", message)
			}
			ManifestError::Encode { message } => {
				write!(f, "Manifest encode failed: {}", message)
			}
		}
	}
}

impl Error for ManifestError {}

// vim: ts=4
