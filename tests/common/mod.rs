#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

static SERVER: OnceLock<TestServer> = OnceLock::new();

const BIN: &str = env!("CARGO_BIN_EXE_starwars-blog-api");

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub database_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // One database file per test binary, under cargo's target tmp dir; reset on every run
        let db_path = database_path()?;
        remove_database_files(&db_path);
        let database_url = format!("sqlite://{}", db_path.display());

        let port_arg = port.to_string();
        let mut cmd = Command::new(BIN);
        cmd.args(["serve", "--port", port_arg.as_str()])
            .env("DATABASE_URL", &database_url)
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, database_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Users have no HTTP create route; seed them through the CLI against the same database.
    pub fn create_user(&self, email: &str) -> Result<i64> {
        let output = Command::new(BIN)
            .args(["--json", "user", "create", email])
            .env("DATABASE_URL", &self.database_url)
            .env("RUST_LOG", "warn")
            .output()
            .context("failed to run user create")?;
        if !output.status.success() {
            anyhow::bail!("user create failed: {}", String::from_utf8_lossy(&output.stderr));
        }
        let user: Value = serde_json::from_slice(&output.stdout).context("user create printed invalid JSON")?;
        user["id"].as_i64().context("user create output has no id")
    }
}

fn database_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate test binary")?;
    let stem = exe
        .file_stem()
        .and_then(|s| s.to_str())
        .context("test binary has no file name")?;
    Ok(PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(format!("starwars-blog-{}.db", stem)))
}

fn remove_database_files(db_path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = db_path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Unique email so tests sharing one server never collide.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@holonet.test", prefix, uuid::Uuid::new_v4().simple())
}
