//! SSH transport spawning the system ssh binary per operation.
//!
//! No persistent session is held: each upload spawns
//! `ssh <host> 'mkdir -p <dir> && cat > <path>'` with the content piped to
//! stdin, each download spawns `ssh <host> 'cat <path>'` and captures stdout.
//! Remote paths are single-quote escaped before interpolation.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::Transport;
use crate::config::SshConfig;
use crate::error::TransportError;

pub struct SshTransport {
	host: String,
	ssh_command: String,
	port: Option<u16>,
}

impl SshTransport {
	pub fn new(host: &str, config: &SshConfig) -> Self {
		SshTransport {
			host: host.to_string(),
			ssh_command: config.ssh_command.clone().unwrap_or_else(|| "ssh".to_string()),
			port: config.port,
		}
	}

	fn command(&self) -> Command {
		let mut cmd = Command::new(&self.ssh_command);
		if let Some(port) = self.port {
			cmd.arg("-p").arg(port.to_string());
		}
		cmd.arg(&self.host);
		cmd
	}
}

#[async_trait]
impl Transport for SshTransport {
	async fn upload(&self, remote_path: &str, content: &[u8]) -> Result<(), TransportError> {
		let script = match parent_dir(remote_path) {
			Some(dir) => {
				format!("mkdir -p {} && cat > {}", shell_quote(dir), shell_quote(remote_path))
			}
			None => format!("cat > {}", shell_quote(remote_path)),
		};

		let mut child = self
			.command()
			.arg(script)
			.stdin(Stdio::piped())
			.stdout(Stdio::null())
			.stderr(Stdio::piped())
			.spawn()
			.map_err(|e| TransportError::SpawnFailed {
				cmd: self.ssh_command.clone(),
				source: e,
			})?;

		let mut stdin = child
			.stdin
			.take()
			.ok_or(TransportError::StdioUnavailable { what: "ssh stdin".to_string() })?;
		stdin.write_all(content).await?;
		drop(stdin);

		let output = child.wait_with_output().await?;
		if !output.status.success() {
			return Err(TransportError::RemoteFailed {
				path: remote_path.to_string(),
				message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}
		Ok(())
	}

	async fn download(&self, remote_path: &str) -> Result<Vec<u8>, TransportError> {
		let output = self
			.command()
			.arg(format!("cat {}", shell_quote(remote_path)))
			.stdin(Stdio::null())
			.output()
			.await
			.map_err(|e| TransportError::SpawnFailed {
				cmd: self.ssh_command.clone(),
				source: e,
			})?;

		if output.status.success() {
			return Ok(output.stdout);
		}

		let stderr = String::from_utf8_lossy(&output.stderr);
		if stderr.contains("No such file") {
			return Err(TransportError::NotFound { path: remote_path.to_string() });
		}
		Err(TransportError::RemoteFailed {
			path: remote_path.to_string(),
			message: stderr.trim().to_string(),
		})
	}
}

fn shell_quote(s: &str) -> String {
	format!("'{}'", s.replace('\'', "'\\''"))
}

/// Directory portion of a slash-separated remote path, if any
fn parent_dir(path: &str) -> Option<&str> {
	match path.rfind('/') {
		Some(0) | None => None,
		Some(pos) => Some(&path[..pos]),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_shell_quote_plain() {
		assert_eq!(shell_quote("/srv/app/file.txt"), "'/srv/app/file.txt'");
	}

	#[test]
	fn test_shell_quote_embedded_quote() {
		assert_eq!(shell_quote("it's"), "'it'\\''s'");
	}

	#[test]
	fn test_parent_dir() {
		assert_eq!(parent_dir("/srv/app/file.txt"), Some("/srv/app"));
		assert_eq!(parent_dir("srv/file.txt"), Some("srv"));
		assert_eq!(parent_dir("file.txt"), None);
		assert_eq!(parent_dir("/file.txt"), None);
	}
}

// vim: ts=4
