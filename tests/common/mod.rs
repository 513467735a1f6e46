use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use lingo_api::auth::{issue_token, Claims};

pub const SESSION_SECRET: &str = "black-box-session-secret";

/// A `lingo-api` process owned by one test; killed when dropped
pub struct TestServer {
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Stripe is never reached: these tests stay on guard and public paths
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_lingo-api"));
        cmd.env("APP_ENV", "development")
            .env("LINGO_API_PORT", port.to_string())
            .env("HOST", "127.0.0.1")
            .env("SESSION_JWT_KEY", SESSION_SECRET)
            .env("SESSION_JWT_ALGORITHM", "HS256")
            .env("STRIPE_SECRET_KEY", "sk_test_black_box")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
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
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Spawn a fresh server and wait for `/health`; keep the guard alive for the test
pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Client that leaves redirects for the test to inspect
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}

#[allow(dead_code)]
pub fn session_token(role: Option<&str>, subscription: Option<&str>) -> String {
    let claims = Claims::new("black_box_user", role.map(str::to_string), subscription.map(str::to_string), 1);
    issue_token(&claims, SESSION_SECRET).expect("token")
}
