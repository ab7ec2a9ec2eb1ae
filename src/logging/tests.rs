use super::open_log_file;
use std::io::Write;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bookcrab-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn log_file_parents_are_created() {
    let dir = scratch_dir("nested-logs");
    let path = dir.join("a").join("b").join("bookcrab.log");

    open_log_file(&path).unwrap();

    assert!(path.is_file());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn log_file_is_appended_not_truncated() {
    let dir = scratch_dir("append-logs");
    let path = dir.join("bookcrab.log");

    writeln!(open_log_file(&path).unwrap(), "first").unwrap();
    writeln!(open_log_file(&path).unwrap(), "second").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unopenable_log_file_names_the_path() {
    let dir = scratch_dir("dir-as-file");
    std::fs::create_dir_all(&dir).unwrap();

    // a directory can't be opened for appending
    let err = open_log_file(&dir).unwrap_err();

    assert!(format!("{err:#}").contains("Failed to open log file"));
    std::fs::remove_dir_all(&dir).unwrap();
}
