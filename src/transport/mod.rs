//! Transport boundary for remote file transfer.
//!
//! The sync engine depends only on the [`Transport`] trait, never on a
//! concrete channel. Two implementations ship here: a local filesystem
//! transport and an SSH transport spawning the system ssh binary.

use async_trait::async_trait;

use crate::config::SshConfig;
pub use crate::error::TransportError;

pub mod local;
pub mod ssh;

pub use local::LocalTransport;
pub use ssh::SshTransport;

/// Upload/download capability over the sync channel.
///
/// `download` reports a missing remote path as [`TransportError::NotFound`],
/// distinguishable from connection and I/O failures.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn upload(&self, remote_path: &str, content: &[u8]) -> Result<(), TransportError>;

	async fn download(&self, remote_path: &str) -> Result<Vec<u8>, TransportError>;
}

/// A resolved remote location: the transport plus its root path
pub struct Remote {
	pub transport: Box<dyn Transport>,
	pub root: String,
}

/// Select a transport for a location string.
///
/// A location starting with `/`, `.` or `~` (or containing no colon) is a
/// local path; otherwise `host:path` selects the SSH transport.
pub fn connect(location: &str, ssh: &SshConfig) -> Remote {
	let colon = if location.starts_with('/') || location.starts_with('.') || location.starts_with('~')
	{
		None
	} else {
		location.find(':')
	};

	match colon {
		Some(pos) => {
			let host = &location[..pos];
			let path = &location[pos + 1..];
			Remote {
				transport: Box::new(SshTransport::new(host, ssh)),
				root: path.to_string(),
			}
		}
		None => Remote {
			transport: Box::new(LocalTransport::new()),
			root: location.to_string(),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_connect_local_paths() {
		let ssh = SshConfig::default();
		for location in &["/srv/app", "./out", "~/deploy"] {
			let remote = connect(location, &ssh);
			assert_eq!(remote.root, *location);
		}
	}

	#[test]
	fn test_connect_host_colon_path() {
		let remote = connect("deploy@web1:/srv/app", &SshConfig::default());
		assert_eq!(remote.root, "/srv/app");
	}

	#[test]
	fn test_connect_no_colon_is_local() {
		let remote = connect("relative/dir", &SshConfig::default());
		assert_eq!(remote.root, "relative/dir");
	}
}

// vim: ts=4
