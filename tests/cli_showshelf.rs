use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use predicates::prelude::*;

fn spawn_listing_server() -> (String, mpsc::Sender<()>, thread::JoinHandle<()>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
    let addr = server.server_addr();
    let base_url = format!("http://{addr}");

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            let (status, body) = match request.url() {
                "/Shows/My%20Show%20S01/" => (
                    200,
                    r#"<!doctype html>
<html>
  <head><title>Index of /Shows/My Show S01</title></head>
  <body>
    <h1>Index of /Shows/My Show S01</h1>
    <a href="?C=M;O=A">Last modified</a>
    <a href="/Shows/">Parent Directory</a>
    <a href="/Shows/My%20Show%20S01/E01.mkv">E01.mkv</a>
    <a href="/Shows/My%20Show%20S01/E02.mkv">E02.mkv</a>
    <a href="/Shows/My%20Show%20S01/poster.jpg">poster.jpg</a>
    <a href="/Shows/My%20Show%20S01/E01.mkv">E01.mkv (again)</a>
  </body>
</html>
"#,
                ),
                _ => (404, "not found"),
            };

            let _ = request.respond(tiny_http::Response::from_string(body).with_status_code(status));
        }
    });

    (base_url, shutdown_tx, handle)
}

fn showshelf(root: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("showshelf");
    cmd.env_remove("SHOWSHELF_ROOT")
        .env_remove("SHOWSHELF_PLAYER")
        .arg("--root")
        .arg(root);
    cmd
}

#[test]
fn ingest_list_mark_and_show() -> anyhow::Result<()> {
    let (base_url, shutdown_tx, server_handle) = spawn_listing_server();
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("shows");
    let show_url = format!("{base_url}/Shows/My%20Show%20S01/");

    showshelf(&root)
        .args(["ingest", "--url", &show_url])
        .assert()
        .success()
        .stdout("ingested My Show S01: 2 links\n");

    let links = std::fs::read_to_string(root.join("My Show S01").join("extracted_links.txt"))?;
    assert_eq!(
        links,
        format!(
            "{base_url}/Shows/My%20Show%20S01/E01.mkv\n{base_url}/Shows/My%20Show%20S01/E02.mkv\n"
        )
    );

    showshelf(&root)
        .arg("list")
        .assert()
        .success()
        .stdout("My Show S01\n");

    showshelf(&root)
        .args(["mark", "--name", "My Show S01", "--index", "1"])
        .assert()
        .success();

    let output = showshelf(&root)
        .args(["show", "--name", "My Show S01"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let view: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(view["progress"], serde_json::json!({ "0": false, "1": true }));
    assert_eq!(view["links"].as_array().map(Vec::len), Some(2));

    let _ = shutdown_tx.send(());
    let _ = server_handle.join();
    Ok(())
}

#[test]
fn ingest_of_missing_page_fails() -> anyhow::Result<()> {
    let (base_url, shutdown_tx, server_handle) = spawn_listing_server();
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("shows");

    showshelf(&root)
        .args(["ingest", "--url", &format!("{base_url}/Shows/Gone/")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("404"));
    assert!(!root.exists());

    let _ = shutdown_tx.send(());
    let _ = server_handle.join();
    Ok(())
}

#[test]
fn mark_out_of_range_fails() -> anyhow::Result<()> {
    let (base_url, shutdown_tx, server_handle) = spawn_listing_server();
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("shows");
    let show_url = format!("{base_url}/Shows/My%20Show%20S01/");

    showshelf(&root)
        .args(["ingest", "--url", &show_url])
        .assert()
        .success();
    showshelf(&root)
        .args(["mark", "--name", "My Show S01", "--index", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    let _ = shutdown_tx.send(());
    let _ = server_handle.join();
    Ok(())
}

#[test]
fn show_unknown_name_fails() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    showshelf(temp.path())
        .args(["show", "--name", "Nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("collection not found"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn play_launches_configured_player() -> anyhow::Result<()> {
    let (base_url, shutdown_tx, server_handle) = spawn_listing_server();
    let temp = tempfile::TempDir::new()?;
    let root = temp.path().join("shows");
    let show_url = format!("{base_url}/Shows/My%20Show%20S01/");

    showshelf(&root)
        .args(["ingest", "--url", &show_url])
        .assert()
        .success();
    showshelf(&root)
        .args(["--player", "true", "play", "--name", "My Show S01", "--index", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("E01.mkv"));

    let _ = shutdown_tx.send(());
    let _ = server_handle.join();
    Ok(())
}

#[test]
fn rust_log_debug_emits_debug_line_to_stderr() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    showshelf(temp.path())
        .env("RUST_LOG", "debug")
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed cli"));
    Ok(())
}
