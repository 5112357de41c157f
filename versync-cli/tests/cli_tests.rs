use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn versync_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("versync"))
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const INSTALLER: &str = indoc! {"
    [Setup]
    AppVersion=1.2.9
    AppVerName=Get Organized 1.2.9
"};

/// A project with every version artifact, returning the anchor path.
fn version_project(dir: &TempDir) -> PathBuf {
    let root = dir.path();
    write(
        root,
        "src/adl/go/gui/Domain.java",
        "class Domain {\n    public static final String VERSION = \"2.5.1\";\n}\n",
    );
    write(root, "installer/launcher.xml", "<launcher/>\n");
    write(root, "installer/Windows.iss", INSTALLER);
    write(
        root,
        "installer/OSX.packproj",
        "<key>CFBundleShortVersionString</key>\n<string>1.2.9</string>\n",
    );
    write(
        root,
        "installer/releasenotes.html",
        "<title>Get Organized 1.2.9 - Release Notes</title>\n",
    );
    write(root, "scripts/push-version", "");
    root.join("scripts/push-version")
}

fn resource_project(dir: &TempDir, fr_bundle: &str) -> PathBuf {
    let root = dir.path();
    write(
        root,
        "src/adl/go/gui/Frame.java",
        "class Frame {\n    String t = language.getString(\"menu.title\");\n}\n",
    );
    write(
        root,
        "src/adl/go/resource/languages/LanguageBundle_en.properties",
        "menu.title=Menu\n",
    );
    write(
        root,
        "src/adl/go/resource/languages/LanguageBundle_fr.properties",
        fr_bundle,
    );
    write(root, "scripts/verify-resources", "");
    root.join("scripts/verify-resources")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_version_mode_zero_propagates() {
    let dir = TempDir::new().unwrap();
    let anchor = version_project(&dir);

    let output = versync_cmd()
        .args(["version", anchor.to_str().unwrap(), "0"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output).trim(), "2.5.1");

    let iss = fs::read_to_string(dir.path().join("installer/Windows.iss")).unwrap();
    assert!(iss.contains("AppVersion=2.5.1"));
    assert!(iss.contains("AppVerName=Get Organized 2.5.1"));
    let packproj = fs::read_to_string(dir.path().join("installer/OSX.packproj")).unwrap();
    assert!(packproj.contains("<string>2.5.1</string>"));
    let notes = fs::read_to_string(dir.path().join("installer/releasenotes.html")).unwrap();
    assert!(notes.contains("Get Organized 2.5.1 - Release Notes"));
}

#[test]
fn test_version_mode_zero_twice_is_stable() {
    let dir = TempDir::new().unwrap();
    let anchor = version_project(&dir);

    for _ in 0..2 {
        let output = versync_cmd()
            .args(["version", anchor.to_str().unwrap(), "0", "true"])
            .output()
            .unwrap();
        assert!(output.status.success());
    }
    let iss = fs::read_to_string(dir.path().join("installer/Windows.iss")).unwrap();
    assert_eq!(iss, "[Setup]\nAppVersion=2.5.1\nAppVerName=Get Organized 2.5.1\n");
}

#[test]
fn test_version_silent_hides_info_logs() {
    let loud_dir = TempDir::new().unwrap();
    let loud_anchor = version_project(&loud_dir);
    let loud = versync_cmd()
        .env_remove("RUST_LOG")
        .args(["version", loud_anchor.to_str().unwrap(), "0"])
        .output()
        .unwrap();

    let silent_dir = TempDir::new().unwrap();
    let silent_anchor = version_project(&silent_dir);
    let silent = versync_cmd()
        .env_remove("RUST_LOG")
        .args(["version", silent_anchor.to_str().unwrap(), "0", "true"])
        .output()
        .unwrap();

    assert!(loud.status.success());
    assert!(silent.status.success());
    assert_eq!(stdout(&loud).trim(), "2.5.1");
    assert_eq!(stdout(&silent).trim(), "2.5.1");

    let loud_stderr = String::from_utf8_lossy(&loud.stderr);
    let silent_stderr = String::from_utf8_lossy(&silent.stderr);
    assert!(
        loud_stderr.contains("Updated Windows setup script AppVersion"),
        "stderr: {}",
        loud_stderr
    );
    assert!(
        !silent_stderr.contains("Updated Windows setup script AppVersion"),
        "stderr: {}",
        silent_stderr
    );

    // captured stderr is not a terminal
    assert!(!loud_stderr.contains('\u{1b}'), "stderr: {:?}", loud_stderr);

    // both runs rewrote the artifact
    let iss = fs::read_to_string(silent_dir.path().join("installer/Windows.iss")).unwrap();
    assert!(iss.contains("AppVersion=2.5.1"));
}

#[test]
fn test_version_components() {
    let dir = TempDir::new().unwrap();
    let anchor = version_project(&dir);

    for (mode, expected) in [("1", "2"), ("2", "5"), ("3", "1")] {
        let output = versync_cmd()
            .args(["version", anchor.to_str().unwrap(), mode])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(stdout(&output).trim(), expected);
    }

    // component modes never rewrite
    let iss = fs::read_to_string(dir.path().join("installer/Windows.iss")).unwrap();
    assert_eq!(iss, INSTALLER);
}

#[test]
fn test_version_invalid_mode() {
    let dir = TempDir::new().unwrap();
    let anchor = version_project(&dir);

    let output = versync_cmd()
        .args(["version", anchor.to_str().unwrap(), "7"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid selection"), "stderr: {}", stderr);
    let iss = fs::read_to_string(dir.path().join("installer/Windows.iss")).unwrap();
    assert_eq!(iss, INSTALLER);
}

#[test]
fn test_version_missing_prerequisite_leaves_files_alone() {
    let dir = TempDir::new().unwrap();
    let anchor = version_project(&dir);
    fs::remove_file(dir.path().join("installer/OSX.packproj")).unwrap();

    let output = versync_cmd()
        .args(["version", anchor.to_str().unwrap(), "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OSX.packproj"), "stderr: {}", stderr);
    let iss = fs::read_to_string(dir.path().join("installer/Windows.iss")).unwrap();
    assert_eq!(iss, INSTALLER);
}

#[test]
fn test_version_missing_anchor() {
    let output = versync_cmd()
        .args(["version", "/nonexistent/scripts/push-version", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Anchor does not exist"));
}

#[test]
fn test_version_respects_config_file() {
    let dir = TempDir::new().unwrap();
    let anchor = version_project(&dir);
    write(
        dir.path(),
        "versync.toml",
        indoc! {r#"
            [version]
            source = "VERSION.java"
        "#},
    );
    write(dir.path(), "VERSION.java", "final String VERSION = \"9.0\";\n");

    let output = versync_cmd()
        .args(["version", anchor.to_str().unwrap(), "2"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "0");
}

#[test]
fn test_verify_clean_project() {
    let dir = TempDir::new().unwrap();
    let anchor = resource_project(&dir, "menu.title=Menu\n");

    let output = versync_cmd()
        .args(["verify", anchor.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("::NO MISSING RESOURCES::"));
    assert!(out.contains("::NO DUPLICATE KEYS::"));
}

#[test]
fn test_verify_reports_findings() {
    let dir = TempDir::new().unwrap();
    let anchor = resource_project(&dir, "greeting=Bonjour\ngreeting=Salut\n");

    let output = versync_cmd()
        .args(["verify", anchor.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("::MISSING KEY::"));
    assert!(out.contains("menu.title"));
    assert!(out.contains("::DUPLICATE KEY::"));
    assert!(out.contains("greeting"));
}

#[test]
fn test_verify_json() {
    let dir = TempDir::new().unwrap();
    let anchor = resource_project(&dir, "other=Autre\n");

    let output = versync_cmd()
        .args(["verify", anchor.to_str().unwrap(), "--json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["missing_keys"].as_array().unwrap().len(), 1);
    assert_eq!(value["missing_keys"][0]["bundle"], "LanguageBundle_fr.properties");
    assert_eq!(value["missing_keys"][0]["reference"]["key"], "menu.title");
    assert_eq!(value["missing_keys"][0]["reference"]["line_number"], 2);
}

#[test]
fn test_manifest_against_published() {
    let dir = TempDir::new().unwrap();
    let anchor = version_project(&dir);
    write(dir.path(), "dist/GetOrganized.exe", "12345");
    write(dir.path(), "dist/GetOrganizedSetup.exe", "1234567");
    write(dir.path(), "dist/GetOrganizedSetup.pkg.zip", "12");
    write(dir.path(), "dist/version.txt", "version=2.10.0\n");

    let dist = dir.path().join("dist");
    let output = versync_cmd()
        .args([
            "manifest",
            anchor.to_str().unwrap(),
            "--portable",
            dist.join("GetOrganized.exe").to_str().unwrap(),
            "--win",
            dist.join("GetOrganizedSetup.exe").to_str().unwrap(),
            "--mac",
            dist.join("GetOrganizedSetup.pkg.zip").to_str().unwrap(),
            "--against",
            dist.join("version.txt").to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert!(out.starts_with("version=2.5.1\nportable=5\nwin=7\nmac=2\n"));
    assert!(out.contains("2.10.0, which is newer"));
}
