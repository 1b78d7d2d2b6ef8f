//! # Publishr - Checksum-Aware Build Output Publisher
//!
//! Publishr synchronizes a local build output directory to a remote directory
//! incrementally: every file is fingerprinted (BLAKE3), the fingerprints are
//! diffed against the manifest published by the previous run, and only files
//! whose content actually changed are transferred. The updated manifest is
//! republished at the end of every successful run.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use publishr::sync::SyncBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = SyncBuilder::new()
//!         .local_root("./out")
//!         .remote("deploy@web1:/srv/app")
//!         .sync()
//!         .await?;
//!     println!("Uploaded {} of {} files", report.uploaded_files, report.total_local_files);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod manifest;
pub mod plan;
pub mod publish;
pub mod scan;
pub mod sync;
pub mod transport;

// Re-export commonly used types and functions
pub use config::{Config, SshConfig};
pub use error::{ManifestError, SyncError, TransportError};
pub use manifest::Manifest;
pub use plan::{plan, UploadPlan};
pub use scan::{LocalFile, ScanFilter};
pub use sync::{SyncBuilder, SyncOptions, SyncReport};
pub use transport::Transport;

// vim: ts=4
