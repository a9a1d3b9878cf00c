use std::fs;

use otbozor_client::{ensure_state_dir, read_optional, remove_if_exists, write_atomic};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("state");
    assert!(!dir.exists());
    ensure_state_dir(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();

    let first = write_atomic(temp.path(), "session.ron", "(token: \"a\")").unwrap();
    let second = write_atomic(temp.path(), "session.ron", "(token: \"b\")").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "(token: \"b\")");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn state_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    assert!(write_atomic(&file_path, "session.ron", "data").is_err());
    assert!(!temp.path().join("session.ron").exists());
}

#[test]
fn missing_files_read_as_none_and_remove_quietly() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.ron");

    assert_eq!(read_optional(&path).unwrap(), None);
    remove_if_exists(&path).unwrap();

    fs::write(&path, "x").unwrap();
    assert_eq!(read_optional(&path).unwrap().as_deref(), Some("x"));
    remove_if_exists(&path).unwrap();
    assert!(!path.exists());
}
