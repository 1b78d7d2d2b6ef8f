//! Manifest: persisted mapping of relative file path to content fingerprint.
//!
//! The wire form is a flat JSON object (`{"sub/dir/file": "<hex digest>", ...}`)
//! so manifests published by earlier runs stay readable across versions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ManifestError;

/// Well-known state of a file tree: relative path -> fingerprint.
///
/// Keys are slash-normalized relative paths, unique by construction.
/// Iteration is in sorted path order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
	entries: BTreeMap<String, String>,
}

impl Manifest {
	pub fn new() -> Self {
		Manifest { entries: BTreeMap::new() }
	}

	pub fn insert(&mut self, path: String, fingerprint: String) {
		self.entries.insert(path, fingerprint);
	}

	pub fn get(&self, path: &str) -> Option<&str> {
		self.entries.get(path).map(String::as_str)
	}

	pub fn contains(&self, path: &str) -> bool {
		self.entries.contains_key(path)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate entries in sorted path order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Iterate paths in sorted order
	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Serialize to the transportable byte form
	pub fn encode(&self) -> Result<Vec<u8>, ManifestError> {
		serde_json::to_vec_pretty(self)
			.map_err(|e| ManifestError::Encode { message: e.to_string() })
	}

	/// Parse the byte form produced by `encode` (or by an earlier run).
	///
	/// A parse failure means the previous run left a corrupt or partial
	/// manifest behind; callers treat it exactly like a missing manifest.
	pub fn decode(data: &[u8]) -> Result<Manifest, ManifestError> {
		serde_json::from_slice(data)
			.map_err(|e| ManifestError::Corrupted { message: e.to_string() })
	}
}

impl std::iter::FromIterator<(String, String)> for Manifest {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		Manifest { entries: iter.into_iter().collect() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Manifest {
		vec![
			("bin/app".to_string(), "aa11".to_string()),
			("lib/core.so".to_string(), "bb22".to_string()),
			("web/index.html".to_string(), "cc33".to_string()),
		]
		.into_iter()
		.collect()
	}

	#[test]
	fn test_round_trip() {
		let manifest = sample();
		let encoded = manifest.encode().unwrap();
		let decoded = Manifest::decode(&encoded).unwrap();
		assert_eq!(manifest, decoded);
	}

	#[test]
	fn test_round_trip_empty() {
		let manifest = Manifest::new();
		let decoded = Manifest::decode(&manifest.encode().unwrap()).unwrap();
		assert!(decoded.is_empty());
	}

	#[test]
	fn test_decode_garbage_is_corrupted() {
		let result = Manifest::decode(b"{not json");
		assert!(matches!(result, Err(ManifestError::Corrupted { .. })));
	}

	#[test]
	fn test_decode_compact_form() {
		// Manifests written by other tools may not be pretty-printed
		let decoded = Manifest::decode(br#"{"a/b.txt":"1234"}"#).unwrap();
		assert_eq!(decoded.get("a/b.txt"), Some("1234"));
	}

	#[test]
	fn test_iteration_sorted() {
		let manifest = sample();
		let paths: Vec<&str> = manifest.paths().collect();
		assert_eq!(paths, vec!["bin/app", "lib/core.so", "web/index.html"]);
	}
}

// vim: ts=4
