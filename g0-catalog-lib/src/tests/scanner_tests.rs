use super::*;
use std::fs;
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "{}").unwrap();
}

fn rel_names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| to_posix(p.strip_prefix(root).unwrap()))
        .collect()
}

#[test]
fn scan_finds_only_source_files_in_sorted_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    touch(root, "Zeta/_g0_z.json");
    touch(root, "alpha/_g0_a.json");
    touch(root, "Übung/_g0_u.json");
    touch(root, "alpha/_g1_other.json");
    touch(root, "alpha/game_a.json");
    touch(root, "alpha/notes.txt");

    let files = scan_source_files(root, &[]).unwrap();
    assert_eq!(
        rel_names(root, &files),
        vec!["alpha/_g0_a.json", "Übung/_g0_u.json", "Zeta/_g0_z.json"]
    );
}

#[test]
fn scan_skips_hidden_and_ignored_dirs() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    touch(root, ".git/_g0_hidden.json");
    touch(root, "node_modules/pkg/_g0_dep.json");
    touch(root, "a/.cache/_g0_cached.json");
    touch(root, "a/_g0_kept.json");

    let files = scan_source_files(root, &["node_modules".to_string()]).unwrap();
    assert_eq!(rel_names(root, &files), vec!["a/_g0_kept.json"]);
}

#[test]
fn missing_root_yields_empty_scan() {
    let tmp = TempDir::new().unwrap();
    let files = scan_source_files(&tmp.path().join("missing"), &[]).unwrap();
    assert!(files.is_empty());
}

#[test]
fn scan_is_repeatable() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    for name in ["b", "A", "c", "ä"] {
        touch(root, &format!("{name}/_g0_{name}.json"));
    }
    let first = scan_source_files(root, &[]).unwrap();
    let second = scan_source_files(root, &[]).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        rel_names(root, &first),
        vec!["A/_g0_A.json", "ä/_g0_ä.json", "b/_g0_b.json", "c/_g0_c.json"]
    );
}

#[test]
fn bundles_are_found_without_descending() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    touch(root, "Teil01/__02_doing_quiz/game_quiz.html");
    touch(root, "Teil01/__02_doing_quiz/__02_doing_nested/game_x.html");
    touch(root, "Teil02/topic/__02_doing_sort/_g0_sort.json");
    touch(root, "Teil02/topic/__01_planning/notes.md");

    let bundles = find_bundles(root, "__02_doing_", &[]).unwrap();
    assert_eq!(
        rel_names(root, &bundles),
        vec!["Teil01/__02_doing_quiz", "Teil02/topic/__02_doing_sort"]
    );
}

#[test]
fn list_files_ignores_directories() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "b.js");
    touch(tmp.path(), "a.html");
    fs::create_dir(tmp.path().join("sub")).unwrap();
    assert_eq!(list_files(tmp.path()).unwrap(), vec!["a.html", "b.js"]);
}
