use std::process::{Command, Output};
use std::time::Duration;

use anyhow::Context as _;
use swarm_testserver::TestServer;

fn status_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

fn describe(out: &Output) -> String {
    format!(
        "exit code {}\nstdout:\n{}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    )
}

async fn run_swarm(args: Vec<String>) -> anyhow::Result<Output> {
    let exe = env!("CARGO_BIN_EXE_swarm");
    tokio::task::spawn_blocking(move || {
        Command::new(exe)
            .args(&args)
            .env_remove("SWARM_URL")
            .env_remove("SWARM_REQUESTS")
            .env_remove("SWARM_CONCURRENCY")
            .env_remove("RUST_LOG")
            .output()
    })
    .await
    .context("spawn_blocking join")?
    .context("run swarm binary")
}

fn args(url: &str, requests: u64, concurrency: u64, extra: &[&str]) -> Vec<String> {
    let mut v = vec![
        "--url".to_string(),
        url.to_string(),
        "-n".to_string(),
        requests.to_string(),
        "-c".to_string(),
        concurrency.to_string(),
    ];
    v.extend(extra.iter().map(|s| (*s).to_string()));
    v
}

fn summary_json(out: &Output) -> anyhow::Result<serde_json::Value> {
    let stdout = String::from_utf8_lossy(&out.stdout);
    let line = stdout
        .lines()
        .find(|l| !l.trim().is_empty())
        .with_context(|| format!("no summary line\n{}", describe(out)))?;
    serde_json::from_str(line).with_context(|| format!("invalid json line: {line}"))
}

#[test]
fn invalid_flags_exit_30() -> anyhow::Result<()> {
    let exe = env!("CARGO_BIN_EXE_swarm");

    let out = Command::new(exe)
        .args(["-u", "http://127.0.0.1:1/", "-n", "1", "-c", "1"])
        .arg("--timeout")
        .arg("10x")
        .output()
        .context("run swarm binary")?;

    anyhow::ensure!(status_code(out.status) == 30, "{}", describe(&out));
    Ok(())
}

#[tokio::test]
async fn zero_requests_exit_30_without_touching_the_target() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let url = server.urls().hello.clone();

    let out = run_swarm(args(&url, 0, 4, &[])).await?;
    let seen = server.stats().requests_total();
    server.shutdown().await;

    anyhow::ensure!(status_code(out.status) == 30, "{}", describe(&out));
    anyhow::ensure!(
        String::from_utf8_lossy(&out.stderr).contains("requests"),
        "{}",
        describe(&out)
    );
    anyhow::ensure!(seen == 0, "server saw {seen} requests");
    Ok(())
}

#[tokio::test]
async fn all_ok_run_exits_0_with_json_summary() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let url = server.urls().hello.clone();

    let out = run_swarm(args(&url, 10, 3, &["--output", "json"])).await?;
    server.shutdown().await;

    anyhow::ensure!(status_code(out.status) == 0, "{}", describe(&out));

    let v = summary_json(&out)?;
    anyhow::ensure!(v["kind"] == "summary", "{v}");
    anyhow::ensure!(v["total_requests"] == 10, "{v}");
    anyhow::ensure!(v["succeeded"] == 10, "{v}");
    anyhow::ensure!(v["failed"] == 0, "{v}");
    anyhow::ensure!(v["status_codes"]["200"] == 10, "{v}");
    Ok(())
}

#[tokio::test]
async fn server_errors_still_exit_0() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let url = server.urls().alternate.clone();

    let out = run_swarm(args(&url, 4, 2, &["--output", "json"])).await?;
    server.shutdown().await;

    anyhow::ensure!(status_code(out.status) == 0, "{}", describe(&out));
    let v = summary_json(&out)?;
    anyhow::ensure!(v["status_codes"]["200"] == 2, "{v}");
    anyhow::ensure!(v["status_codes"]["500"] == 2, "{v}");
    Ok(())
}

#[tokio::test]
async fn failed_attempts_exit_10() -> anyhow::Result<()> {
    let url = swarm_testserver::refused_url()
        .await
        .context("reserve a local port")?;

    let out = run_swarm(args(&url, 5, 2, &["--output", "json"])).await?;

    anyhow::ensure!(status_code(out.status) == 10, "{}", describe(&out));
    let v = summary_json(&out)?;
    anyhow::ensure!(v["total_requests"] == 5, "{v}");
    anyhow::ensure!(v["succeeded"] == 0, "{v}");
    anyhow::ensure!(v["failed"] == 5, "{v}");
    Ok(())
}

#[tokio::test]
async fn human_output_prints_the_summary_block() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let url = server.urls().status(204);

    let out = run_swarm(args(&url, 6, 2, &["--no-progress"])).await?;
    server.shutdown().await;

    anyhow::ensure!(status_code(out.status) == 0, "{}", describe(&out));
    let stdout = String::from_utf8_lossy(&out.stdout);
    for needle in [
        "Summary:",
        "Total Requests: 6",
        "Success:        6",
        "Failed:         0",
        "RPS:",
        "Mean Latency:",
        "Status codes:",
        "204: 6",
    ] {
        anyhow::ensure!(stdout.contains(needle), "missing {needle:?}\n{}", describe(&out));
    }
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn sigint_prints_summary_and_exits_130() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let url = server.urls().hang.clone();

    let exe = env!("CARGO_BIN_EXE_swarm");
    let child = Command::new(exe)
        .args(args(&url, 50, 4, &["--output", "json"]))
        .env_remove("RUST_LOG")
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .context("spawn swarm binary")?;

    tokio::time::sleep(Duration::from_millis(500)).await;

    let kill = Command::new("kill")
        .arg("-INT")
        .arg(child.id().to_string())
        .status()
        .context("send SIGINT")?;
    anyhow::ensure!(kill.success(), "kill -INT failed: {kill}");

    let out = tokio::time::timeout(
        Duration::from_secs(10),
        tokio::task::spawn_blocking(move || child.wait_with_output()),
    )
    .await
    .context("swarm did not exit after SIGINT")?
    .context("spawn_blocking join")?
    .context("wait for swarm")?;

    server.abort().await;

    anyhow::ensure!(status_code(out.status) == 130, "{}", describe(&out));
    anyhow::ensure!(
        String::from_utf8_lossy(&out.stderr).contains("shutting down gracefully"),
        "{}",
        describe(&out)
    );

    let v = summary_json(&out)?;
    anyhow::ensure!(v["cancelled"] == true, "{v}");
    anyhow::ensure!(v["succeeded"] == 0, "{v}");
    Ok(())
}
