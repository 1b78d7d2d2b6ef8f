//! Scanner scenarios over realistic directory shapes

use std::fs;
use tempfile::TempDir;

use publishr::fingerprint::fingerprint_set;
use publishr::scan::{scan_root, ScanFilter};

fn create_test_file(dir: &TempDir, name: &str, content: &[u8]) {
	let path = dir.path().join(name);
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).unwrap();
	}
	fs::write(&path, content).unwrap();
}

#[test]
fn test_deeply_nested_tree() {
	let dir = TempDir::new().unwrap();
	let deep = "l0/l1/l2/l3/l4/l5/l6/l7/l8/l9/deep.txt";
	create_test_file(&dir, deep, b"bottom");

	let files = scan_root(dir.path(), &ScanFilter::empty()).unwrap();
	assert_eq!(files.len(), 1);
	assert_eq!(files[0].relative, deep);
}

#[test]
fn test_many_files_all_found() {
	let dir = TempDir::new().unwrap();
	for i in 0..100 {
		create_test_file(&dir, &format!("file_{:03}.txt", i), format!("content {}", i).as_bytes());
	}

	let files = scan_root(dir.path(), &ScanFilter::empty()).unwrap();
	assert_eq!(files.len(), 100);

	// Sorted filename order
	assert_eq!(files[0].relative, "file_000.txt");
	assert_eq!(files[99].relative, "file_099.txt");
}

#[test]
fn test_names_with_spaces_and_dots() {
	let dir = TempDir::new().unwrap();
	create_test_file(&dir, "release notes.txt", b"notes");
	create_test_file(&dir, "my.app.config.json", b"{}");

	let files = scan_root(dir.path(), &ScanFilter::empty()).unwrap();
	let keys: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
	assert_eq!(keys, vec!["my.app.config.json", "release notes.txt"]);
}

#[test]
fn test_directory_exclusion_prunes_subtree() {
	let dir = TempDir::new().unwrap();
	create_test_file(&dir, "app.bin", b"bin");
	create_test_file(&dir, "logs/a.log", b"a");
	create_test_file(&dir, "logs/nested/b.log", b"b");

	let filter = ScanFilter::new(&["logs/**".to_string()]).unwrap();
	let files = scan_root(dir.path(), &filter).unwrap();
	let keys: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
	assert_eq!(keys, vec!["app.bin"]);
}

#[tokio::test]
async fn test_scan_then_fingerprint_whole_tree() {
	let dir = TempDir::new().unwrap();
	create_test_file(&dir, "a.txt", b"alpha");
	create_test_file(&dir, "sub/b.bin", &[0xDE, 0xAD, 0xBE, 0xEF]);
	create_test_file(&dir, "sub/empty.txt", b"");

	let files = scan_root(dir.path(), &ScanFilter::empty()).unwrap();
	let manifest = fingerprint_set(&files, 0).await.unwrap();

	assert_eq!(manifest.len(), 3);
	for (_, fingerprint) in manifest.iter() {
		assert_eq!(fingerprint.len(), 64);
	}

	// Identical content under different keys gets identical fingerprints
	create_test_file(&dir, "copy.txt", b"alpha");
	let files = scan_root(dir.path(), &ScanFilter::empty()).unwrap();
	let manifest = fingerprint_set(&files, 0).await.unwrap();
	assert_eq!(manifest.get("a.txt"), manifest.get("copy.txt"));
}

// vim: ts=4
