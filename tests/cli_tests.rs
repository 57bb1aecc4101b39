use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn clipsift(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("clipsift").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["--log-format", "compact", "--log-level", "warn"]);
    cmd
}

fn write_movie_a_table(dir: &TempDir) {
    let samples = dir.path().join("samples");
    std::fs::create_dir_all(&samples).unwrap();
    std::fs::write(
        samples.join("movieA_info.csv"),
        "clip_index,start_frame,end_frame,start_time,end_time,sample_frame_name\n\
         0,0,900,0.0,30.0,movieA_clip_1_frame_1.jpg\n\
         1,900,1800,30.0,60.0,movieA_clip_2_frame_1.jpg\n",
    )
    .unwrap();
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    clipsift(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("retain"))
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn test_scan_of_empty_input_reports_nothing() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("videos")).unwrap();

    clipsift(&dir)
        .args(["--json", "scan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcomes\": []"));
}

#[test]
fn test_scan_of_missing_input_dir_fails() {
    let dir = TempDir::new().unwrap();
    clipsift(&dir)
        .args(["scan", "--input-dir", "nowhere"])
        .assert()
        .failure();
}

#[test]
fn test_resolve_reads_clip_table() {
    let dir = TempDir::new().unwrap();
    write_movie_a_table(&dir);

    clipsift(&dir)
        .args(["resolve", "selected/movieA_clip_2_frame_1.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("movieA clip 2"))
        .stdout(predicate::str::contains("frames 900..1800"));
}

#[test]
fn test_resolve_without_table_fails() {
    let dir = TempDir::new().unwrap();
    clipsift(&dir)
        .args(["resolve", "ghost_clip_1_frame_1.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No clip table found for video 'ghost'"));
}

#[test]
fn test_inspect_prints_rows() {
    let dir = TempDir::new().unwrap();
    write_movie_a_table(&dir);

    clipsift(&dir)
        .args(["inspect", "movieA.mp4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("movieA_clip_2_frame_1.jpg"));
}

#[test]
fn test_retain_dry_run_keeps_unprocessed_video() {
    let dir = TempDir::new().unwrap();
    let videos = dir.path().join("videos");
    std::fs::create_dir_all(&videos).unwrap();
    std::fs::write(videos.join("movieB.mp4"), b"x").unwrap();

    clipsift(&dir)
        .args(["--json", "retain", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep_unprocessed"));
    assert!(videos.join("movieB.mp4").exists());
}

#[test]
fn test_retain_without_routes_refuses_to_delete() {
    let dir = TempDir::new().unwrap();
    let videos = dir.path().join("videos");
    std::fs::create_dir_all(&videos).unwrap();
    std::fs::write(videos.join("movieB.mp4"), b"x").unwrap();

    clipsift(&dir)
        .arg("retain")
        .assert()
        .failure()
        .stderr(predicate::str::contains("selected-clip directory"));
    assert!(videos.join("movieB.mp4").exists());
}

#[test]
fn test_unpaired_route_flags_are_rejected() {
    let dir = TempDir::new().unwrap();
    clipsift(&dir)
        .args(["extract", "--selected-dir", "selected"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("in pairs"));
}

#[test]
fn test_routes_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("clipsift.toml"),
        "[pipeline]\n\
         input_dir = \"in\"\n\
         sample_dir = \"result\"\n\
         \n\
         [[pipeline.routes]]\n\
         selected_dir = \"selected_clip\"\n\
         output_dir = \"clips\"\n",
    )
    .unwrap();

    clipsift(&dir)
        .args(["--json", "extract"])
        .assert()
        .success()
        .stdout(predicate::str::contains("selected_clip"));
    assert!(dir.path().join("clips").is_dir());
}
