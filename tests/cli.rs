//! End-to-end tests driving the `script-meta` binary over a temporary build
//! output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

/// A project directory with `dist/` build output and a config file.
struct Project {
    dir: TempDir,
}

impl Project {
    fn new(config: &str, files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("script-meta.toml"), config).unwrap();
        for (path, content) in files {
            let target = dir.path().join("dist").join(path);
            fs::create_dir_all(target.parent().unwrap()).unwrap();
            fs::write(target, content).unwrap();
        }
        Self { dir }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn run(&self, command: &str) -> Output {
        Command::new(env!("CARGO_BIN_EXE_script-meta"))
            .current_dir(self.dir.path())
            .arg(command)
            .output()
            .expect("failed to run script-meta")
    }

    fn document(&self, relative: &str) -> serde_json::Value {
        let path = self.path("dist").join(relative);
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("{} not readable: {e}", path.display()));
        serde_json::from_str(&content).unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout:\n{}\nstderr:\n{}",
        stdout(output),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn list_files(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(root).unwrap();
            files.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
    files
}

const SCENARIO_CONFIG: &str = r#"
package = "pkg"
packageDescription = "All scripts"

[[folderDescriptionList]]
path = "/a"
description = "Letter A"
defaultAction = "open"
"#;

const SCENARIO_FILES: &[(&str, &str)] = &[
    ("a/one.js", "// @description first\nrun();\n"),
    ("a/b/two.js", "code"),
    ("a/logo.png", "png"),
    ("skip/hidden.js", "// @ignore\nmodule content"),
];

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

#[test]
fn build_writes_one_document_per_directory() {
    let project = Project::new(SCENARIO_CONFIG, SCENARIO_FILES);
    let output = project.run("build");
    assert_success(&output);

    let root = project.document("meta.json");
    assert_eq!(root["name"], "pkg");
    assert_eq!(root["description"], "All scripts");

    let a = project.document("a/meta.json");
    assert_eq!(a["description"], "Letter A");
    assert_eq!(a["defaultAction"], "open");
    assert_eq!(a["scripts"][0]["name"], "one");
    assert_eq!(a["scripts"][0]["file"], "one.js");
    assert_eq!(a["scripts"][0]["type"], "action");
    assert_eq!(a["scripts"][0]["description"], "first");
    assert_eq!(a["scripts"][1]["name"], "b");
    assert_eq!(a["scripts"][1]["type"], "folder");

    let b = project.document("a/b/meta.json");
    assert_eq!(b["scripts"][0]["file"], "two.js");
    assert_eq!(b["scripts"][0]["description"], "");

    let skip = project.document("skip/meta.json");
    assert_eq!(skip["scripts"], serde_json::json!([]));

    assert!(stdout(&output).contains("Build complete"));
}

#[test]
fn rebuild_is_idempotent() {
    let project = Project::new(SCENARIO_CONFIG, SCENARIO_FILES);
    assert_success(&project.run("build"));
    let first = list_files(&project.path("dist"));
    let first_root = fs::read_to_string(project.path("dist/a/meta.json")).unwrap();

    assert_success(&project.run("build"));
    let second = list_files(&project.path("dist"));
    let second_root = fs::read_to_string(project.path("dist/a/meta.json")).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_root, second_root);
}

#[test]
fn build_copies_icons_and_readme() {
    let config = r#"
package = "pkg"
packageIcon = "assets/pkg.png"
readmeFile = "DOCS.md"

[[folderDescriptionList]]
path = "/tools"
iconPath = "https://cdn.example/tools.png"
"#;
    let project = Project::new(config, &[("tools/run.js", "")]);
    fs::create_dir_all(project.path("assets")).unwrap();
    fs::write(project.path("assets/pkg.png"), "icon bytes").unwrap();
    fs::write(project.path("DOCS.md"), "# Docs").unwrap();
    // stale icon from an earlier build
    fs::create_dir_all(project.path("dist/icons")).unwrap();
    fs::write(project.path("dist/icons/old-1.png"), "old").unwrap();

    assert_success(&project.run("build"));

    let root = project.document("meta.json");
    let icon = root["icon"].as_str().unwrap();
    assert!(icon.starts_with("icons/pkg-") && icon.ends_with(".png"), "{icon}");
    assert_eq!(
        fs::read_to_string(project.path("dist").join(icon)).unwrap(),
        "icon bytes"
    );
    assert!(!project.path("dist/icons/old-1.png").exists());

    let tools = project.document("tools/meta.json");
    assert_eq!(tools["icon"], "https://cdn.example/tools.png");

    assert_eq!(
        fs::read_to_string(project.path("dist/README.md")).unwrap(),
        "# Docs"
    );
}

#[test]
fn missing_icon_fails_build() {
    let project = Project::new(
        "package = \"pkg\"\npackageIcon = \"missing.png\"\n",
        &[("x.js", "")],
    );
    let output = project.run("build");
    assert!(!output.status.success());
    assert!(!project.path("dist/meta.json").exists());
}

#[test]
fn invalid_config_fails_before_writing() {
    let config = r#"
package = "pkg"
[[folderDescriptionList]]
path = "./a"
"#;
    let project = Project::new(config, &[("a/x.js", "")]);
    let output = project.run("build");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("segments"));
    assert!(!project.path("dist/meta.json").exists());
}

// ---------------------------------------------------------------------------
// check / gen-config
// ---------------------------------------------------------------------------

#[test]
fn check_does_not_write() {
    let project = Project::new(SCENARIO_CONFIG, SCENARIO_FILES);
    let output = project.run("check");
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.contains("a \u{2192} a/meta.json"));
    assert!(out.contains("Configuration is valid"));
    assert!(!project.path("dist/meta.json").exists());
}

#[test]
fn gen_config_prints_valid_config() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_script-meta"))
        .current_dir(dir.path())
        .arg("gen-config")
        .output()
        .unwrap();
    assert_success(&output);

    let config = script_meta::config::parse_config(&stdout(&output)).unwrap();
    assert_eq!(config.package, "my-scripts");
}
