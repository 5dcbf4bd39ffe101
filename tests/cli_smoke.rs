use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lander"))
}

#[test]
fn frame_command_writes_a_png() {
    let dir = std::env::temp_dir().join("lander_cli_smoke");
    let out = dir.join("frame_0.png");
    let _ = std::fs::remove_file(&out);

    let status = bin()
        .args([
            "frame",
            "--seed",
            "11",
            "--mode",
            "Grid + Jitter",
            "--out",
        ])
        .arg(&out)
        .status()
        .expect("spawn lander");
    assert!(status.success());

    let bytes = std::fs::read(&out).expect("png written");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn scene_command_emits_valid_json() {
    let output = bin()
        .args(["scene", "--seed", "5", "--frame", "3"])
        .output()
        .expect("spawn lander");
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert!(v.get("ops").and_then(|o| o.as_array()).is_some());
}

#[test]
fn modes_lists_all_sixteen() {
    let output = bin().arg("modes").output().expect("spawn lander");
    assert!(output.status.success());
    let lines = String::from_utf8(output.stdout).unwrap();
    assert_eq!(lines.lines().count(), 16);
    assert!(lines.contains("Fibonacci Spiral"));
}
