//! Configuration for publishr runs.
//!
//! Priority chain: built-in defaults, then the config file
//! (`~/.config/publishr/config.toml`), then CLI flags (highest priority).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SyncError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
	/// Name of the manifest file published alongside the tree
	pub manifest_name: String,

	/// Glob patterns excluded from the local set
	pub exclude_patterns: Vec<String>,

	/// Number of parallel hashing workers (0 = auto)
	pub parallel_hashing: usize,

	/// Build command run by the `publish` subcommand
	pub build_command: String,

	/// Flag the build command takes before its output directory
	pub output_flag: String,

	/// SSH transport configuration
	pub ssh: SshConfig,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			manifest_name: "checksums.json".to_string(),
			exclude_patterns: vec![],
			parallel_hashing: 0,
			build_command: String::new(),
			output_flag: "-o".to_string(),
			ssh: SshConfig::default(),
		}
	}
}

impl Config {
	/// Load from the default location, falling back to defaults when absent
	pub fn load_default() -> Result<Config, SyncError> {
		match std::env::var("HOME") {
			Ok(home) => {
				let path = Path::new(&home).join(".config/publishr/config.toml");
				if path.exists() {
					Config::load_from(&path)
				} else {
					Ok(Config::default())
				}
			}
			Err(_) => Ok(Config::default()),
		}
	}

	pub fn load_from(path: &Path) -> Result<Config, SyncError> {
		let contents = std::fs::read_to_string(path).map_err(|e| SyncError::InvalidConfig {
			message: format!("cannot read {}: {}", path.display(), e),
		})?;
		toml::from_str(&contents).map_err(|e| SyncError::InvalidConfig {
			message: format!("cannot parse {}: {}", path.display(), e),
		})
	}
}

/// SSH/remote connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SshConfig {
	/// Custom SSH command (overrides the default "ssh")
	pub ssh_command: Option<String>,

	/// Custom port (if not handled by ssh config)
	pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_config_default() {
		let config = Config::default();
		assert_eq!(config.manifest_name, "checksums.json");
		assert_eq!(config.output_flag, "-o");
		assert_eq!(config.parallel_hashing, 0);
		assert!(config.exclude_patterns.is_empty());
		assert!(config.ssh.ssh_command.is_none());
	}

	#[test]
	fn test_config_toml_round_trip() {
		let mut config = Config::default();
		config.manifest_name = "sums.json".to_string();
		config.exclude_patterns = vec!["*.pdb".to_string()];
		config.ssh.port = Some(2222);

		let toml_str = toml::to_string(&config).unwrap();
		let parsed: Config = toml::from_str(&toml_str).unwrap();
		assert_eq!(parsed.manifest_name, "sums.json");
		assert_eq!(parsed.exclude_patterns, vec!["*.pdb".to_string()]);
		assert_eq!(parsed.ssh.port, Some(2222));
	}

	#[test]
	fn test_partial_file_keeps_defaults() {
		let parsed: Config = toml::from_str("manifestName = \"m.json\"").unwrap();
		assert_eq!(parsed.manifest_name, "m.json");
		assert_eq!(parsed.output_flag, "-o");
	}
}

// vim: ts=4
