use pathsync_core::{SyncErrorKind, SyncMapping};
use pathsync_ops::{MappingExecutor, PathResolver, summarize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn executor(temp: &TempDir) -> MappingExecutor {
    MappingExecutor::with_resolver(PathResolver::with_base(temp.path()))
}

/// Relative path -> bytes for every file under `root`.
fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
                out.insert(rel, fs::read(&path).unwrap());
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

fn create_source_tree(root: &Path) {
    fs::create_dir_all(root.join("nested/deeper")).unwrap();
    fs::write(root.join("top.txt"), "top level").unwrap();
    fs::write(root.join("nested/mid.bin"), [0u8, 159, 146, 150]).unwrap();
    fs::write(root.join("nested/deeper/leaf.md"), "# leaf").unwrap();
}

#[test]
fn test_file_to_missing_parent_creates_it() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("report.csv"), "a,b\n1,2\n").unwrap();

    let result = executor(&temp).execute_one(&SyncMapping::new(
        "csv",
        "report.csv",
        "exports/2024/q1/report.csv",
    ));

    assert!(result.success, "{:?}", result.error);
    assert!(temp.path().join("exports/2024/q1").is_dir());
    assert_eq!(
        fs::read(temp.path().join("exports/2024/q1/report.csv")).unwrap(),
        fs::read(temp.path().join("report.csv")).unwrap()
    );
    let detail = result.detail.unwrap();
    assert!(detail.contains("report.csv"));
    assert!(detail.contains("exports"));
}

#[test]
fn test_directory_sync_is_additive_overwrite() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("project");
    let dst = temp.path().join("mirror");
    create_source_tree(&src);
    fs::create_dir_all(dst.join("nested")).unwrap();
    fs::write(dst.join("top.txt"), "stale content that is longer").unwrap();
    fs::write(dst.join("only-here.txt"), "untouched").unwrap();
    fs::write(dst.join("nested/also-here.txt"), "untouched too").unwrap();

    let result = executor(&temp).execute_one(&SyncMapping::new("dir", "project", "mirror"));
    assert!(result.success, "{:?}", result.error);

    let source = snapshot(&src);
    let target = snapshot(&dst);
    for (rel, bytes) in &source {
        assert_eq!(target.get(rel), Some(bytes), "mismatch at {rel}");
    }
    assert_eq!(target["only-here.txt"], b"untouched");
    assert_eq!(target[&format!("nested{}also-here.txt", std::path::MAIN_SEPARATOR)], b"untouched too");
    assert_eq!(result.stats.files_copied, 3);
}

#[test]
fn test_directory_to_nonexistent_target() {
    let temp = TempDir::new().unwrap();
    create_source_tree(&temp.path().join("project"));

    let result = executor(&temp).execute_one(&SyncMapping::new("dir", "project", "a/b/mirror"));

    assert!(result.success);
    assert_eq!(
        snapshot(&temp.path().join("project")),
        snapshot(&temp.path().join("a/b/mirror"))
    );
}

#[test]
fn test_execute_one_is_idempotent() {
    let temp = TempDir::new().unwrap();
    create_source_tree(&temp.path().join("project"));
    let exec = executor(&temp);
    let mapping = SyncMapping::new("dir", "project", "mirror");

    assert!(exec.execute_one(&mapping).success);
    let first = snapshot(&temp.path().join("mirror"));
    assert!(exec.execute_one(&mapping).success);
    let second = snapshot(&temp.path().join("mirror"));

    assert_eq!(first, second);
}

#[test]
fn test_file_into_existing_directory_keeps_name() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("a")).unwrap();
    fs::create_dir_all(temp.path().join("c")).unwrap();
    fs::write(temp.path().join("a/b.txt"), "payload").unwrap();

    let result = executor(&temp).execute_one(&SyncMapping::new("f", "a/b.txt", "c/"));

    assert!(result.success);
    assert!(temp.path().join("c").is_dir());
    assert_eq!(
        fs::read_to_string(temp.path().join("c/b.txt")).unwrap(),
        "payload"
    );
}

#[test]
fn test_file_over_existing_file_replaces_it() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("new.txt"), "new").unwrap();
    fs::write(temp.path().join("old.txt"), "old and longer").unwrap();

    let result = executor(&temp).execute_one(&SyncMapping::new("f", "new.txt", "old.txt"));

    assert!(result.success);
    assert_eq!(fs::read_to_string(temp.path().join("old.txt")).unwrap(), "new");
}

#[test]
fn test_disabled_mapping_emits_no_result() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("valid.txt"), "v").unwrap();

    let batch = executor(&temp).execute_all(&[
        SyncMapping::new("1", "valid.txt", "never.txt").with_enabled(false),
        SyncMapping::new("2", "valid.txt", "dest/valid.txt"),
    ]);

    assert!(batch.success);
    assert_eq!(batch.results.len(), 1);
    assert_eq!(batch.results[0].id, "2");
    assert!(batch.results[0].success);
    assert!(!temp.path().join("never.txt").exists());
}

#[test]
fn test_missing_source_writes_nothing() {
    let temp = TempDir::new().unwrap();

    let result = executor(&temp).execute_one(&SyncMapping::new("m", "ghost.txt", "out/ghost.txt"));

    assert!(!result.success);
    assert!(result.is_kind(SyncErrorKind::MissingSource));
    let error = result.error.unwrap();
    assert!(error.contains(&temp.path().join("ghost.txt").display().to_string()));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_failure_does_not_stop_batch() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    fs::write(temp.path().join("blocker"), "i am a file").unwrap();

    let batch = executor(&temp).execute_all(&[
        SyncMapping::new("missing", "nope.txt", "x.txt"),
        SyncMapping::new("blocked", "a.txt", "blocker/inside/a.txt"),
        SyncMapping::new("ok", "a.txt", "fine/a.txt"),
    ]);

    assert!(batch.success);
    let ids: Vec<_> = batch.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["missing", "blocked", "ok"]);
    assert!(!batch.results[0].success);
    assert!(batch.results[1].is_kind(SyncErrorKind::Io));
    assert!(batch.results[2].success);

    let summary = summarize(&batch.results);
    assert_eq!(summary.executed, 3);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.message(), "2 of 3 mappings failed");
}

#[test]
fn test_duplicate_ids_each_execute() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();

    let batch = executor(&temp).execute_all(&[
        SyncMapping::new("dup", "a.txt", "one/a.txt"),
        SyncMapping::new("dup", "a.txt", "two/a.txt"),
    ]);

    assert_eq!(batch.results.len(), 2);
    assert!(temp.path().join("one/a.txt").exists());
    assert!(temp.path().join("two/a.txt").exists());
}

#[test]
fn test_sequential_mappings_see_earlier_writes() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("seed.txt"), "seed").unwrap();

    let batch = executor(&temp).execute_all(&[
        SyncMapping::new("1", "seed.txt", "stage/seed.txt"),
        SyncMapping::new("2", "stage", "final"),
    ]);

    assert!(batch.results.iter().all(|r| r.success));
    assert_eq!(
        fs::read_to_string(temp.path().join("final/seed.txt")).unwrap(),
        "seed"
    );
}

#[test]
fn test_results_serialize_for_callers() {
    let temp = TempDir::new().unwrap();
    let batch = executor(&temp).execute_all(&[SyncMapping::new("x", "none", "out")]);

    let value = serde_json::to_value(&batch).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["results"][0]["id"], "x");
    assert_eq!(value["results"][0]["success"], false);
    assert_eq!(value["results"][0]["errorKind"], "missingSource");
}
