//! Integration tests for draftpad

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use serial_test::serial;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn draftpad() -> Command {
        cargo_bin_cmd!("draftpad")
    }

    /// A throwaway config whose state directory lives inside the tempdir,
    /// so tests never touch the real document or cache.
    fn workspace() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        let state_dir = temp.path().join("state");
        std::fs::write(
            &config_path,
            format!("[general]\nstate_dir = \"{}\"\n", state_dir.display()),
        )
        .unwrap();
        (temp, config_path)
    }

    fn scoped(config_path: &PathBuf) -> Command {
        let mut cmd = draftpad();
        cmd.arg("--no-local").arg("--config").arg(config_path);
        cmd
    }

    #[test]
    fn help_displays() {
        draftpad()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Offline-first"));
    }

    #[test]
    fn version_displays() {
        draftpad()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("draftpad"));
    }

    #[test]
    fn config_path_displays() {
        let (_temp, config_path) = workspace();
        scoped(&config_path)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_displays_sections() {
        let (_temp, config_path) = workspace();
        scoped(&config_path)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[editor]"))
            .stdout(predicate::str::contains("[cache]"));
    }

    #[test]
    fn write_then_show_roundtrip() {
        let (_temp, config_path) = workspace();

        scoped(&config_path)
            .args(["write", "hello offline world"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Saved"));

        scoped(&config_path)
            .arg("show")
            .assert()
            .success()
            .stdout("hello offline world\n");
    }

    #[test]
    fn write_reads_stdin_when_text_omitted() {
        let (_temp, config_path) = workspace();

        scoped(&config_path)
            .arg("write")
            .write_stdin("piped in")
            .assert()
            .success();

        scoped(&config_path)
            .arg("show")
            .assert()
            .success()
            .stdout("piped in\n");
    }

    #[test]
    fn show_empty_document_prints_nothing() {
        let (_temp, config_path) = workspace();
        scoped(&config_path)
            .arg("show")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn clear_deletes_saved_entry() {
        let (_temp, config_path) = workspace();

        scoped(&config_path)
            .args(["write", "scratch"])
            .assert()
            .success();

        scoped(&config_path)
            .args(["clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cleared"));

        scoped(&config_path)
            .arg("show")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn clear_without_yes_cancels_non_interactively() {
        let (_temp, config_path) = workspace();

        scoped(&config_path)
            .args(["write", "keep me"])
            .assert()
            .success();

        scoped(&config_path)
            .arg("clear")
            .assert()
            .success()
            .stdout(predicate::str::contains("Cancelled"));

        scoped(&config_path)
            .arg("show")
            .assert()
            .success()
            .stdout("keep me\n");
    }

    #[test]
    fn new_starts_empty_document() {
        let (_temp, config_path) = workspace();

        scoped(&config_path)
            .args(["write", "old draft"])
            .assert()
            .success();

        scoped(&config_path)
            .args(["new", "--yes"])
            .assert()
            .success();

        scoped(&config_path)
            .arg("show")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn export_writes_output_file() {
        let (temp, config_path) = workspace();
        let out = temp.path().join("exported.txt");

        scoped(&config_path)
            .args(["write", "portable copy"])
            .assert()
            .success();

        scoped(&config_path)
            .arg("export")
            .arg("--output")
            .arg(&out)
            .assert()
            .success();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "portable copy");
    }

    #[test]
    fn open_rejects_invalid_utf8() {
        let (temp, config_path) = workspace();
        let bad = temp.path().join("binary.dat");
        std::fs::write(&bad, [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        scoped(&config_path)
            .arg("open")
            .arg(&bad)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn open_loads_text_file() {
        let (temp, config_path) = workspace();
        let file = temp.path().join("notes.txt");
        std::fs::write(&file, "imported notes").unwrap();

        scoped(&config_path)
            .arg("open")
            .arg(&file)
            .assert()
            .success();

        scoped(&config_path)
            .arg("show")
            .assert()
            .success()
            .stdout("imported notes\n");
    }

    #[test]
    fn status_reports_document_state() {
        let (_temp, config_path) = workspace();

        scoped(&config_path)
            .args(["write", "four"])
            .assert()
            .success();

        scoped(&config_path)
            .args(["status", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"document_bytes\": 4"))
            .stdout(predicate::str::contains("\"saved_entry\": true"));
    }

    #[test]
    fn cache_status_empty() {
        let (_temp, config_path) = workspace();
        scoped(&config_path)
            .args(["cache", "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache generations found"));
    }

    #[test]
    fn cache_activate_requires_warm() {
        let (_temp, config_path) = workspace();
        scoped(&config_path)
            .args(["cache", "activate"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("v1"));
    }

    #[test]
    fn cache_rejects_path_like_version_tag() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        let state_dir = temp.path().join("state");
        std::fs::write(
            &config_path,
            format!(
                "[general]\nstate_dir = \"{}\"\n\n[cache]\nversion_tag = \"editor/v2\"\n",
                state_dir.display()
            ),
        )
        .unwrap();

        scoped(&config_path)
            .args(["cache", "status"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid cache generation tag"));
    }

    #[test]
    fn cache_serve_reports_pruning_on_stderr() {
        let (temp, config_path) = workspace();
        let cache_dir = temp.path().join("state").join("cache");
        std::fs::create_dir_all(cache_dir.join("v1")).unwrap();
        std::fs::create_dir_all(cache_dir.join("v0-old")).unwrap();

        scoped(&config_path)
            .args(["cache", "serve", "http://localhost:8080/index.html"])
            .assert()
            .stderr(predicate::str::contains("Pruned stale generation v0-old"));

        assert!(!cache_dir.join("v0-old").exists());
        assert!(cache_dir.join("v1").exists());
    }

    #[test]
    fn autosave_toggle_persists() {
        let (_temp, config_path) = workspace();

        scoped(&config_path)
            .args(["autosave", "off"])
            .assert()
            .success();

        scoped(&config_path)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("autosave = false"));
    }

    #[test]
    fn init_creates_local_config() {
        let temp = TempDir::new().unwrap();

        draftpad()
            .arg("init")
            .arg("--path")
            .arg(temp.path())
            .assert()
            .success();

        assert!(temp.path().join(".draftpad.toml").exists());
    }

    // Runs against the real global config path, so keep it serial
    #[test]
    #[serial]
    fn install_dismisses_non_interactively() {
        draftpad()
            .arg("install")
            .assert()
            .success()
            .stdout(predicate::str::contains("dismissed"));
    }

    #[test]
    fn local_config_overlays_global() {
        let (temp, config_path) = workspace();
        std::fs::write(
            temp.path().join(".draftpad.toml"),
            "[editor]\nexport_filename = \"local.txt\"\n",
        )
        .unwrap();

        let mut cmd = draftpad();
        cmd.current_dir(temp.path())
            .arg("--config")
            .arg(&config_path)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("export_filename = \"local.txt\""));
    }
}
