//! Upload planning: diff the local manifest against the last published one.
//!
//! The remote manifest is advisory. When it is missing or unreadable there is
//! no trustworthy baseline, so the plan covers every local file. Files present
//! only remotely are never planned; deletion propagation is out of scope.

use crate::manifest::Manifest;

/// Ordered set of relative paths selected for transfer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadPlan {
	paths: Vec<String>,
}

impl UploadPlan {
	pub fn len(&self) -> usize {
		self.paths.len()
	}

	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}

	pub fn paths(&self) -> &[String] {
		&self.paths
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.paths.iter().map(String::as_str)
	}
}

/// Compute the subset of local files requiring upload.
///
/// A path is planned iff it is absent from `remote` or its fingerprint
/// differs. Plan order is sorted path order, deterministic for a given input.
pub fn plan(local: &Manifest, remote: Option<&Manifest>) -> UploadPlan {
	let paths = match remote {
		None => local.paths().map(str::to_string).collect(),
		Some(remote) => local
			.iter()
			.filter(|(path, fingerprint)| match remote.get(path) {
				Some(published) => published != *fingerprint,
				None => true,
			})
			.map(|(path, _)| path.to_string())
			.collect(),
	};

	UploadPlan { paths }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn manifest(entries: &[(&str, &str)]) -> Manifest {
		entries.iter().map(|(p, fp)| (p.to_string(), fp.to_string())).collect()
	}

	#[test]
	fn test_no_baseline_plans_everything() {
		let local = manifest(&[("a", "h1"), ("b", "h2")]);
		let plan = plan(&local, None);
		assert_eq!(plan.paths(), &["a".to_string(), "b".to_string()]);
	}

	#[test]
	fn test_selective_diffing() {
		let local = manifest(&[("a", "h1"), ("b", "h2")]);
		let remote = manifest(&[("a", "h1"), ("b", "h2x")]);
		let plan = plan(&local, Some(&remote));
		assert_eq!(plan.paths(), &["b".to_string()]);
	}

	#[test]
	fn test_new_file_is_planned() {
		let local = manifest(&[("a", "h1"), ("new", "h9")]);
		let remote = manifest(&[("a", "h1")]);
		let plan = plan(&local, Some(&remote));
		assert_eq!(plan.paths(), &["new".to_string()]);
	}

	#[test]
	fn test_deletion_is_not_propagated() {
		let local = manifest(&[("a", "h1")]);
		let remote = manifest(&[("a", "h1"), ("b", "h2")]);
		let plan = plan(&local, Some(&remote));
		assert!(plan.is_empty());
	}

	#[test]
	fn test_empty_local_yields_empty_plan() {
		let local = Manifest::new();
		let remote = manifest(&[("a", "h1")]);
		assert!(plan(&local, Some(&remote)).is_empty());
		assert!(plan(&local, None).is_empty());
	}

	#[test]
	fn test_plan_is_deterministic() {
		let local = manifest(&[("z", "h3"), ("a", "h1"), ("m", "h2")]);
		let first = plan(&local, None);
		let second = plan(&local, None);
		assert_eq!(first, second);
		assert_eq!(first.paths(), &["a".to_string(), "m".to_string(), "z".to_string()]);
	}
}

// vim: ts=4
