use std::fs;

use contact_engine::{ensure_state_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("state");
    assert!(!new_dir.exists());
    ensure_state_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("prefs.ron", "(theme: \"dark\")").unwrap();
    assert_eq!(first.file_name().unwrap(), "prefs.ron");
    assert_eq!(
        writer.read("prefs.ron").unwrap().as_deref(),
        Some("(theme: \"dark\")")
    );

    let second = writer.write("prefs.ron", "(theme: \"light\")").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "(theme: \"light\")");
}

#[test]
fn missing_file_reads_as_none() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    assert_eq!(writer.read("absent.ron").unwrap(), None);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("prefs.ron", "data").is_err());
    assert!(!file_path.with_file_name("prefs.ron").exists());
}

#[test]
fn overwrite_swaps_file_in_place() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    writer.write("prefs.ron", "old").unwrap();
    writer.write("prefs.ron", "new").unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("prefs.ron")]);
    assert_eq!(writer.read("prefs.ron").unwrap().as_deref(), Some("new"));
}
