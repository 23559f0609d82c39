use std::process::Command;
use tempfile::tempdir;

fn pfm() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pfm"))
}

#[test]
fn fill_then_info_json() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("grey.pfm");

    let status = pfm()
        .args(["fill", out.to_str().unwrap(), "-w", "4", "-H", "2", "--rgb", "0.5,0.25,1"])
        .status()
        .expect("run pfm fill");
    assert!(status.success());

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"PF\n4 2\n-1\n"));

    let info = pfm()
        .args(["info", out.to_str().unwrap(), "--stats", "--json"])
        .output()
        .expect("run pfm info");
    assert!(info.status.success());
    let stdout = String::from_utf8_lossy(&info.stdout);
    assert!(stdout.contains("\"channels\": 3"), "stdout: {stdout}");
    assert!(stdout.contains("\"kind\": \"PF\""), "stdout: {stdout}");
    assert!(stdout.contains("\"max\": 1.0"), "stdout: {stdout}");
}

#[test]
fn convert_to_gray_big_endian() {
    let dir = tempdir().expect("tempdir");
    let src = dir.path().join("white.pfm");
    let dst = dir.path().join("gray.pfm");

    let status = pfm()
        .args(["fill", src.to_str().unwrap(), "-w", "2", "-H", "2", "--rgb", "1,1,1"])
        .status()
        .expect("run pfm fill");
    assert!(status.success());

    let status = pfm()
        .args([
            "convert",
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            "--gray",
            "--big-endian",
        ])
        .status()
        .expect("run pfm convert");
    assert!(status.success());

    let bytes = std::fs::read(&dst).unwrap();
    let header = b"Pf\n2 2\n1\n";
    assert!(bytes.starts_with(header));
    assert_eq!(bytes.len(), header.len() + 4 * 4);
    let first = f32::from_be_bytes(bytes[header.len()..header.len() + 4].try_into().unwrap());
    assert!((first - 1.0).abs() < 1e-6);
}

#[test]
fn missing_input_fails_with_context() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("missing.pfm");

    let out = pfm()
        .args(["convert", missing.to_str().unwrap(), "out.pfm"])
        .current_dir(dir.path())
        .output()
        .expect("run pfm convert");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Failed to load"), "stderr: {stderr}");
}

#[test]
fn fill_requires_a_value() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("x.pfm");
    let status = pfm()
        .args(["fill", out.to_str().unwrap(), "-w", "1", "-H", "1"])
        .status()
        .expect("run pfm fill");
    assert!(!status.success());
    assert!(!out.exists());
}

#[test]
fn info_missing_input_names_the_path() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("missing.pfm");

    let out = pfm()
        .args(["info", missing.to_str().unwrap()])
        .output()
        .expect("run pfm info");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("missing.pfm"), "stderr: {stderr}");
}

#[test]
fn fill_accepts_negative_values() {
    let dir = tempdir().expect("tempdir");
    let gray = dir.path().join("neg.pfm");
    let color = dir.path().join("neg_rgb.pfm");

    let status = pfm()
        .args(["fill", gray.to_str().unwrap(), "-w", "1", "-H", "1", "--value", "-1"])
        .status()
        .expect("run pfm fill");
    assert!(status.success());
    let bytes = std::fs::read(&gray).unwrap();
    let header = b"Pf\n1 1\n-1\n";
    assert!(bytes.starts_with(header));
    assert_eq!(&bytes[header.len()..], &(-1.0f32).to_le_bytes());

    let status = pfm()
        .args(["fill", color.to_str().unwrap(), "-w", "1", "-H", "1", "--rgb", "-1,0,0"])
        .status()
        .expect("run pfm fill");
    assert!(status.success());
    let bytes = std::fs::read(&color).unwrap();
    let header = b"PF\n1 1\n-1\n";
    assert!(bytes.starts_with(header));
    assert_eq!(&bytes[header.len()..header.len() + 4], &(-1.0f32).to_le_bytes());
}
