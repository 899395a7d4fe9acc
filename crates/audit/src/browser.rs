//! Browser process management - spawning and tearing down headless Chromium
//!
//! The browser is a scoped resource: `launch` hands back a session whose
//! `Drop` terminates the process, so release happens on every exit path.

use std::process::{Child, Command, Stdio};
use std::time::Duration;
use async_trait::async_trait;
use serde::Deserialize;
use tempfile::TempDir;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use sitepulse_common::{Error, Result};

/// A live browser process usable by the audit engine.
pub trait BrowserSession: Send {
    /// DevTools debugging port the engine should attach to
    fn port(&self) -> u16;
}

/// Acquires browser sessions. The production implementation spawns
/// headless Chromium; tests substitute stubs.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// Configuration for launching the browser
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Path to the Chromium/Chrome binary (None = use `chromium` from PATH)
    pub binary_path: Option<String>,

    /// Timeout for the DevTools endpoint to come up
    pub startup_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            binary_path: None,
            startup_timeout: Duration::from_secs(15),
        }
    }
}

/// Launches headless Chromium with a remote debugging port.
pub struct ChromeLauncher {
    config: BrowserConfig,
}

impl ChromeLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    fn chrome_path(&self) -> String {
        self.config
            .binary_path
            .clone()
            .unwrap_or_else(|| "chromium".to_string())
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let handle = BrowserHandle::spawn(&self.chrome_path(), self.config.startup_timeout).await?;
        Ok(Box::new(handle))
    }
}

/// Handle to a running headless Chromium process
pub struct BrowserHandle {
    child: Child,
    port: u16,
    // Held for the lifetime of the process; the profile dir is removed
    // when the handle drops.
    _user_data: TempDir,
}

/// Response shape of the DevTools /json/version endpoint
#[derive(Debug, Deserialize)]
struct DevToolsVersion {
    #[serde(rename = "Browser")]
    browser: Option<String>,
}

impl BrowserHandle {
    /// Spawn headless Chromium and wait until DevTools answers.
    pub async fn spawn(binary: &str, startup_timeout: Duration) -> Result<Self> {
        let port = find_free_port();
        let user_data = TempDir::new()?;

        info!("Spawning headless browser on port {}", port);

        let mut cmd = Command::new(binary);
        cmd.arg("--headless")
            .arg(format!("--remote-debugging-port={}", port))
            .arg(format!("--user-data-dir={}", user_data.path().display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-gpu")
            .arg("--mute-audio")
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().map_err(|e| {
            Error::BrowserStartup(format!("Failed to spawn {}: {}", binary, e))
        })?;

        let handle = BrowserHandle {
            child,
            port,
            _user_data: user_data,
        };

        handle.wait_for_devtools(startup_timeout).await?;

        info!("Browser ready on port {}", port);
        Ok(handle)
    }

    /// Poll the DevTools endpoint until the browser answers.
    async fn wait_for_devtools(&self, timeout_duration: Duration) -> Result<()> {
        let version_url = format!("http://127.0.0.1:{}/json/version", self.port);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout_duration {
            attempts += 1;

            match client.get(&version_url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    if let Ok(version) = resp.json::<DevToolsVersion>().await {
                        debug!(
                            "DevTools up: {}",
                            version.browser.as_deref().unwrap_or("unknown browser")
                        );
                    }
                    return Ok(());
                }
                Ok(resp) => {
                    warn!("DevTools endpoint returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for browser to start...");
                    }
                    // Connection refused is expected while the browser is starting
                    if !e.is_connect() {
                        warn!("DevTools check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(Error::BrowserHealthCheck(attempts))
    }

    /// Stop the browser process
    pub fn stop(&mut self) {
        info!("Stopping browser (pid: {})", self.child.id());

        // Try graceful shutdown first
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                // Give it a moment to shut down gracefully
                std::thread::sleep(Duration::from_millis(200));
            }
        }

        // Force kill if still running
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl BrowserSession for BrowserHandle {
    fn port(&self) -> u16 {
        self.port
    }
}

impl Drop for BrowserHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Find a free port to use for the debugging endpoint
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}
