//! Sync orchestration: fetch the published manifest, plan, upload, republish.
//!
//! A run is phased: FetchingManifest -> Planning -> Uploading ->
//! PublishingManifest -> Done. Manifest-fetch failures of any kind degrade to
//! "no baseline" and the run continues with a full upload plan. Upload
//! failures are fatal on first occurrence and the manifest is never published
//! for a partially transferred run: a manifest must not claim file states
//! that were never achieved. Files already transferred stay in place; the
//! next run re-verifies them against their fingerprints.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::SshConfig;
use crate::error::SyncError;
use crate::fingerprint;
use crate::logging::*;
use crate::manifest::Manifest;
use crate::plan;
use crate::scan::{self, ScanFilter};
use crate::transport::{self, Transport};

/// Phases of a sync run, in order. Failed is terminal from any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
	Idle,
	FetchingManifest,
	Planning,
	Uploading,
	PublishingManifest,
	Done,
	Failed,
}

impl fmt::Display for SyncPhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			SyncPhase::Idle => "idle",
			SyncPhase::FetchingManifest => "fetching-manifest",
			SyncPhase::Planning => "planning",
			SyncPhase::Uploading => "uploading",
			SyncPhase::PublishingManifest => "publishing-manifest",
			SyncPhase::Done => "done",
			SyncPhase::Failed => "failed",
		};
		write!(f, "{}", name)
	}
}

/// Options for a single sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
	/// Manifest file name under the remote root
	pub manifest_name: String,

	/// Glob patterns excluded from the local set
	pub exclude_patterns: Vec<String>,

	/// Parallel hashing workers (0 = auto)
	pub parallel_hashing: usize,
}

impl Default for SyncOptions {
	fn default() -> Self {
		SyncOptions {
			manifest_name: "checksums.json".to_string(),
			exclude_patterns: vec![],
			parallel_hashing: 0,
		}
	}
}

/// Final report of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
	pub total_local_files: usize,
	pub uploaded_files: usize,
	pub skipped_unchanged: usize,

	/// Whether a usable remote manifest was found
	pub had_baseline: bool,
}

/// Run one sync of `root` against `remote_root` over the given transport.
///
/// This is the core entry; callers with a location string use [`SyncBuilder`]
/// instead, which resolves the transport first.
pub async fn run_sync(
	root: &Path,
	transport: &dyn Transport,
	remote_root: &str,
	options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
	let filter = ScanFilter::new(&options.exclude_patterns)?;
	let files = scan::scan_root(root, &filter)?;
	info!("Hashing {} local files under {}", files.len(), root.display());
	let local = fingerprint::fingerprint_set(&files, options.parallel_hashing).await?;

	let absolute: BTreeMap<&str, &Path> =
		files.iter().map(|f| (f.relative.as_str(), f.absolute.as_path())).collect();

	let manifest_path = remote_join(remote_root, &options.manifest_name);

	debug!("Phase: {}", SyncPhase::FetchingManifest);
	let remote = fetch_manifest(transport, &manifest_path).await;
	let had_baseline = remote.is_some();

	debug!("Phase: {}", SyncPhase::Planning);
	let plan = plan::plan(&local, remote.as_ref());
	info!("Planned {} of {} files for upload", plan.len(), local.len());

	debug!("Phase: {}", SyncPhase::Uploading);
	for path in plan.iter() {
		let source = absolute.get(path).copied().ok_or_else(|| SyncError::Other {
			message: format!("planned path {} missing from local set", path),
		})?;
		let content = tokio::fs::read(source).await.map_err(|e| SyncError::ReadFailed {
			path: source.display().to_string(),
			source: e,
		})?;

		debug!("Uploading {} ({} bytes)", path, content.len());
		transport
			.upload(&remote_join(remote_root, path), &content)
			.await
			.map_err(|source| SyncError::UploadFailed { path: path.to_string(), source })?;
	}

	// The full local manifest is published, not just the uploaded subset, so
	// unchanged files keep their recorded fingerprints for future diffing.
	// This also runs on an empty plan to keep the manifest current.
	debug!("Phase: {}", SyncPhase::PublishingManifest);
	let encoded = local.encode()?;
	transport
		.upload(&manifest_path, &encoded)
		.await
		.map_err(|source| SyncError::ManifestPublishFailed { source })?;

	debug!("Phase: {}", SyncPhase::Done);
	let report = SyncReport {
		total_local_files: local.len(),
		uploaded_files: plan.len(),
		skipped_unchanged: local.len() - plan.len(),
		had_baseline,
	};
	info!(
		"Sync done: {} uploaded, {} unchanged, {} total",
		report.uploaded_files, report.skipped_unchanged, report.total_local_files
	);
	Ok(report)
}

/// Fetch and decode the published manifest; every failure degrades to None
async fn fetch_manifest(transport: &dyn Transport, manifest_path: &str) -> Option<Manifest> {
	match transport.download(manifest_path).await {
		Ok(bytes) => match Manifest::decode(&bytes) {
			Ok(manifest) => {
				debug!("Fetched manifest with {} entries", manifest.len());
				Some(manifest)
			}
			Err(e) => {
				warn!("Published manifest unreadable, treating as absent: {}", e);
				None
			}
		},
		Err(e) if e.is_not_found() => {
			info!("No manifest published yet at {}", manifest_path);
			None
		}
		Err(e) => {
			warn!("Manifest fetch failed, uploading everything: {}", e);
			None
		}
	}
}

fn remote_join(root: &str, name: &str) -> String {
	if root.is_empty() {
		name.to_string()
	} else {
		format!("{}/{}", root.trim_end_matches('/'), name)
	}
}

/// Fluent front-end resolving a location string to a transport
pub struct SyncBuilder {
	local_root: Option<PathBuf>,
	remote: Option<String>,
	options: SyncOptions,
	ssh: SshConfig,
}

impl SyncBuilder {
	pub fn new() -> Self {
		SyncBuilder {
			local_root: None,
			remote: None,
			options: SyncOptions::default(),
			ssh: SshConfig::default(),
		}
	}

	/// Local directory to publish
	pub fn local_root(mut self, root: impl Into<PathBuf>) -> Self {
		self.local_root = Some(root.into());
		self
	}

	/// Remote location: a local path or `host:path`
	pub fn remote(mut self, location: &str) -> Self {
		self.remote = Some(location.to_string());
		self
	}

	pub fn manifest_name(mut self, name: &str) -> Self {
		self.options.manifest_name = name.to_string();
		self
	}

	pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
		self.options.exclude_patterns = patterns;
		self
	}

	pub fn parallel_hashing(mut self, workers: usize) -> Self {
		self.options.parallel_hashing = workers;
		self
	}

	pub fn ssh(mut self, ssh: SshConfig) -> Self {
		self.ssh = ssh;
		self
	}

	pub fn options(&self) -> &SyncOptions {
		&self.options
	}

	pub async fn sync(self) -> Result<SyncReport, SyncError> {
		let root = self.local_root.ok_or(SyncError::InvalidConfig {
			message: "A local root is required".to_string(),
		})?;
		let location = self.remote.ok_or(SyncError::InvalidConfig {
			message: "A remote location is required".to_string(),
		})?;

		let remote = transport::connect(&location, &self.ssh);
		run_sync(&root, remote.transport.as_ref(), &remote.root, &self.options).await
	}
}

impl Default for SyncBuilder {
	fn default() -> Self {
		SyncBuilder::new()
	}
}


// vim: ts=4
