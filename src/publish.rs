//! Build-and-publish pipeline.
//!
//! Runs the configured build command into a scratch directory, syncs the
//! output to the remote location, and removes the scratch directory on every
//! exit path, success or failure.

use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::Config;
use crate::error::SyncError;
use crate::logging::*;
use crate::sync::{SyncBuilder, SyncReport};

/// Scratch directory for build output; removed on drop
pub struct ScratchDir {
	path: PathBuf,
}

impl ScratchDir {
	/// Create a fresh uniquely-named directory under the system temp dir
	pub fn create() -> Result<ScratchDir, SyncError> {
		let path = std::env::temp_dir().join(format!("publish.{}", Uuid::new_v4()));
		std::fs::create_dir_all(&path)?;
		Ok(ScratchDir { path })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl Drop for ScratchDir {
	fn drop(&mut self) {
		// Removed whether the run succeeded or failed
		let _ = std::fs::remove_dir_all(&self.path);
	}
}

/// Run the build command with `<output_flag> <out_dir>` appended.
///
/// The command inherits stdio so build output stays visible; a non-zero exit
/// aborts before any sync work.
pub async fn run_build(
	command: &str,
	args: &[String],
	output_flag: &str,
	out_dir: &Path,
) -> Result<(), SyncError> {
	if command.is_empty() {
		return Err(SyncError::InvalidConfig {
			message: "no build command configured".to_string(),
		});
	}

	info!("Starting `{} {}`", command, args.join(" "));
	let status = tokio::process::Command::new(command)
		.args(args)
		.arg(output_flag)
		.arg(out_dir)
		.status()
		.await
		.map_err(|e| SyncError::Other {
			message: format!("failed to spawn '{}': {}", command, e),
		})?;
	info!("Build command exited with {}", status);

	if !status.success() {
		return Err(SyncError::BuildFailed { command: command.to_string(), code: status.code() });
	}
	Ok(())
}

/// Build into a scratch directory, then sync it to the remote location
pub async fn publish(
	config: &Config,
	remote: &str,
	build_args: &[String],
) -> Result<SyncReport, SyncError> {
	let scratch = ScratchDir::create()?;

	run_build(&config.build_command, build_args, &config.output_flag, scratch.path()).await?;

	SyncBuilder::new()
		.local_root(scratch.path())
		.remote(remote)
		.manifest_name(&config.manifest_name)
		.exclude_patterns(config.exclude_patterns.clone())
		.parallel_hashing(config.parallel_hashing)
		.ssh(config.ssh.clone())
		.sync()
		.await
}


// vim: ts=4
