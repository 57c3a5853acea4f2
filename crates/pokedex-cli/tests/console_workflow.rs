#![allow(deprecated)] // cargo_bin is deprecated in assert_cmd but replacement not yet stable

//! End-to-end runs of the `pokedex` binary with piped input.
//!
//! Network-backed flows point the binary at a wiremock server; the tests use
//! the multi-thread runtime so the server keeps answering while the blocking
//! child process runs.

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::json;
use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestResult<T = ()> = std::result::Result<T, Box<dyn Error>>;

/// Throwaway working directory holding the history file.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> TestResult<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    fn history_path(&self) -> PathBuf {
        self.dir.path().join("history.json")
    }

    fn command(&self, api_url: &str) -> TestResult<Command> {
        let mut cmd = Command::cargo_bin("pokedex")?;
        cmd.current_dir(self.dir.path())
            .arg("--api-url")
            .arg(api_url)
            .arg("--history-file")
            .arg(self.history_path());
        Ok(cmd)
    }

    /// Run with only `--config`, so every setting comes from that file.
    fn command_with_config(&self, config_path: &Path) -> TestResult<Command> {
        let mut cmd = Command::cargo_bin("pokedex")?;
        cmd.current_dir(self.dir.path())
            .arg("--config")
            .arg(config_path);
        Ok(cmd)
    }

    /// Write `custom.toml` pointing at `api_url` and a nested history file.
    fn write_config(&self, api_url: &str, extra: &str) -> TestResult<(PathBuf, PathBuf)> {
        let config_path = self.dir.path().join("custom.toml");
        let history_path = self.dir.path().join("saved").join("history.json");
        fs::write(
            &config_path,
            format!(
                "api_url = {:?}\nhistory_file = {:?}\n{}",
                api_url,
                history_path.display().to_string(),
                extra
            ),
        )?;
        Ok((config_path, history_path))
    }

    fn history(&self) -> TestResult<Vec<String>> {
        let contents = fs::read_to_string(self.history_path())?;
        Ok(serde_json::from_str(&contents)?)
    }
}

async fn mount_bulbasaur(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"name": "bulbasaur", "url": format!("{}/api/v2/pokemon/1/", server.uri())},
                {"name": "charmander", "url": format!("{}/api/v2/pokemon/4/", server.uri())},
                {"name": "squirtle", "url": format!("{}/api/v2/pokemon/7/", server.uri())}
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "base_experience": 64,
            "types": [{"type": {"name": "grass"}}, {"type": {"name": "poison"}}],
            "abilities": [{"ability": {"name": "overgrow"}}],
            "moves": [{"move": {"name": "vine-whip"}}, {"move": {"name": "cut"}}]
        })))
        .mount(server)
        .await;
}

#[test]
fn exit_from_main_menu_prints_farewell() -> TestResult {
    let workspace = Workspace::new()?;

    workspace
        .command("http://127.0.0.1:9/api/v2/")?
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(contains("Welcome to the Pokemon Tool!"))
        .stdout(contains("=== Main Menu ==="))
        .stdout(contains("[3] ↩ Exit Application"))
        .stdout(contains("|_______||_______|"));

    assert!(!workspace.history_path().exists());
    Ok(())
}

#[test]
fn closed_input_exits_cleanly() -> TestResult {
    let workspace = Workspace::new()?;

    workspace
        .command("http://127.0.0.1:9/api/v2/")?
        .write_stdin("")
        .assert()
        .success();
    Ok(())
}

#[test]
fn invalid_choice_reprompts() -> TestResult {
    let workspace = Workspace::new()?;

    workspace
        .command("http://127.0.0.1:9/api/v2/")?
        .write_stdin("7\n3\n")
        .assert()
        .success()
        .stdout(contains("Error: Invalid choice. Please try again."));
    Ok(())
}

#[test]
fn corrupt_history_loads_as_empty() -> TestResult {
    let workspace = Workspace::new()?;
    fs::write(workspace.history_path(), "{ not json")?;

    workspace
        .command("http://127.0.0.1:9/api/v2/")?
        .write_stdin("2\n1\n3\n")
        .assert()
        .success()
        .stdout(contains("=== Search History ==="))
        .stdout(contains("[1] ↩ Back to Main Menu"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn search_shows_stats_and_saves_history() -> TestResult {
    let server = MockServer::start().await;
    mount_bulbasaur(&server).await;
    let workspace = Workspace::new()?;

    workspace
        .command(&format!("{}/api/v2/", server.uri()))?
        .write_stdin("1\nbulbasaur\n1\n3\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("Stats for Bulbasaur:"))
        .stdout(contains("Types: Grass, Poison"))
        .stdout(contains("- Cut\n- Vine Whip"));

    assert_eq!(workspace.history()?, vec!["bulbasaur"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn misspelled_name_suggests_closest() -> TestResult {
    let server = MockServer::start().await;
    mount_bulbasaur(&server).await;
    let workspace = Workspace::new()?;

    workspace
        .command(&format!("{}/api/v2/", server.uri()))?
        .write_stdin("1\nbulbasaurr\n1\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("Error: Pokémon 'Bulbasaurr' not found."))
        .stdout(contains("[1] Bulbasaur"))
        .stdout(contains("=== Options Menu for Bulbasaur ==="));

    assert_eq!(workspace.history()?, vec!["bulbasaur"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_catalog_offers_only_back() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let workspace = Workspace::new()?;

    workspace
        .command(&format!("{}/api/v2/", server.uri()))?
        .write_stdin("1\npikachu\n\n3\n")
        .assert()
        .success()
        .stdout(contains("Error: Pokémon 'Pikachu' not found."))
        .stdout(contains("Returning to main menu..."));

    assert!(!workspace.history_path().exists());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn config_flag_supplies_settings() -> TestResult {
    let server = MockServer::start().await;
    mount_bulbasaur(&server).await;
    let workspace = Workspace::new()?;
    let (config_path, history_path) =
        workspace.write_config(&format!("{}/api/v2/", server.uri()), "max_suggestions = 1\n")?;

    workspace
        .command_with_config(&config_path)?
        .write_stdin("1\nbulbasaurr\n1\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("[1] Bulbasaur"))
        .stdout(contains("[2] ↩ Back to Main Menu"))
        .stdout(contains("=== Options Menu for Bulbasaur ==="));

    let saved: Vec<String> = serde_json::from_str(&fs::read_to_string(history_path)?)?;
    assert_eq!(saved, vec!["bulbasaur"]);
    assert!(!workspace.history_path().exists());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn env_overrides_config_file() -> TestResult {
    let server = MockServer::start().await;
    mount_bulbasaur(&server).await;
    let workspace = Workspace::new()?;
    let (config_path, _) = workspace.write_config("http://127.0.0.1:9/api/v2/", "")?;

    workspace
        .command_with_config(&config_path)?
        .env("POKEDEX_API_URL", format!("{}/api/v2/", server.uri()))
        .env("POKEDEX_HISTORY_FILE", workspace.history_path())
        .write_stdin("1\nbulbasaur\n4\n3\n")
        .assert()
        .success()
        .stdout(contains("=== Options Menu for Bulbasaur ==="));

    assert_eq!(workspace.history()?, vec!["bulbasaur"]);
    Ok(())
}
