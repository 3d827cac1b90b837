use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn maze_search() -> Command {
    let mut command = Command::cargo_bin("maze-search").expect("binary is built");
    let _ = command.env_remove("RUST_LOG").env_remove("MAZE_SEARCH_CONFIG");
    command
}

fn run_for_layout(args: &[&str]) -> String {
    let output = maze_search().args(args).output().expect("binary runs");
    assert!(output.status.success(), "{args:?} failed: {output:?}");
    String::from_utf8(output.stdout)
        .expect("utf-8 output")
        .trim()
        .to_owned()
}

#[test]
fn new_prints_bordered_default_layout() {
    let layout = run_for_layout(&["new"]);
    assert!(layout.starts_with("maze:v1:15x15:"), "unexpected layout {layout}");

    let _ = maze_search()
        .args(["solve", &layout])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("path 24 edges\n1,1\n"));
}

#[test]
fn toggled_walls_change_the_solution() {
    let layout = run_for_layout(&["new", "--size", "3", "--open"]);
    let walled = run_for_layout(&["toggle", &layout, "1,0", "1,1"]);

    let _ = maze_search()
        .args(["solve", &walled, "--algorithm", "bfs"])
        .assert()
        .success()
        .stdout("path 4 edges\n0,0\n0,1\n0,2\n1,2\n2,2\n");
}

#[test]
fn unreachable_goal_prints_visited_tiles() {
    let layout = run_for_layout(&["new", "--size", "3", "--open"]);
    let walled = run_for_layout(&["toggle", &layout, "1,2", "2,1"]);

    let _ = maze_search()
        .args(["solve", &walled, "--algorithm", "dfs", "--show-visited"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("no path\nvisited 6 tiles\n0,0\n"));
}

#[test]
fn out_of_bounds_toggle_fails() {
    let layout = run_for_layout(&["new", "--size", "5"]);

    let _ = maze_search()
        .args(["toggle", &layout, "-1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the 5x5 grid"));
}

#[test]
fn walls_on_endpoints_are_rejected() {
    let layout = run_for_layout(&["new", "--size", "5"]);

    let _ = maze_search()
        .args(["set-goal", &layout, "0,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be both a wall and a search endpoint"));
}

#[test]
fn json_layout_files_are_accepted() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("layout.json");
    fs::write(
        &path,
        r#"{"side_length": 5, "start": [1, 1], "goal": [3, 3], "walls": [[2, 2]]}"#,
    )
    .expect("write layout");
    let argument = format!("@{}", path.display());

    let _ = maze_search()
        .args(["solve", &argument])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("path 4 edges\n"));

    let exported = run_for_layout(&["export", &argument]);
    let value: serde_json::Value = serde_json::from_str(&exported).expect("json output");
    assert_eq!(value["walls"], serde_json::json!([[2, 2]]));
}

#[test]
fn config_file_supplies_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("maze-search.toml");
    fs::write(&path, "version = 1\ndefault_size = 7\nalgorithm = \"dfs\"\n").expect("write config");
    let config = path.display().to_string();

    let layout = run_for_layout(&["--config", &config, "new"]);
    assert!(layout.starts_with("maze:v1:7x7:"));

    fs::write(&path, "version = 3\n").expect("write config");
    let _ = maze_search()
        .args(["--config", &config, "new"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported configuration version 3"));
}

#[test]
fn set_start_moves_the_search_origin() {
    let layout = run_for_layout(&["new", "--size", "3", "--open"]);
    let moved = run_for_layout(&["set-start", &layout, "2,0"]);

    let _ = maze_search()
        .args(["solve", &moved, "--algorithm", "bfs"])
        .assert()
        .success()
        .stdout("path 2 edges\n2,0\n2,1\n2,2\n");
}

#[test]
fn clear_removes_every_wall() {
    let layout = run_for_layout(&["new", "--size", "5"]);
    let cleared = run_for_layout(&["clear", &layout]);

    let exported = run_for_layout(&["export", &cleared]);
    let value: serde_json::Value = serde_json::from_str(&exported).expect("json output");
    assert_eq!(value["walls"], serde_json::json!([]));
    assert_eq!(value["start"], serde_json::json!([1, 1]));
    assert_eq!(value["goal"], serde_json::json!([3, 3]));

    let _ = maze_search()
        .args(["solve", &cleared])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("path 4 edges\n1,1\n"));
}

#[test]
fn oversized_grid_is_rejected() {
    let _ = maze_search()
        .args(["new", "--size", "3000000000", "--open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "side length 3000000000 is not a valid grid size",
        ));
}
