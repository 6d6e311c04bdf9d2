use std::{net::TcpListener, path::Path, process::Stdio, time::Duration};

use anyhow::{bail, Context};
use async_trait::async_trait;
use thirtyfour::{prelude::*, ChromiumLikeCapabilities};
use tokio::process::{Child, Command};

use crate::configuration::ScraperSettings;

use super::{BrowserLauncher, MapsBrowser};

const CONNECT_ATTEMPTS: u32 = 10;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A Chrome session driven through a chromedriver child process.
pub struct Droid {
    pub driver: WebDriver,
    chromedriver: Child,
}

/// Spawns chromedriver from a located binary and opens a session on it.
pub struct ChromeLauncher {
    settings: ScraperSettings,
}

impl ChromeLauncher {
    pub fn new(settings: ScraperSettings) -> Self {
        ChromeLauncher { settings }
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self, driver_path: &Path) -> anyhow::Result<Box<dyn MapsBrowser>> {
        let droid = Droid::new(driver_path, &self.settings).await?;
        Ok(Box::new(droid))
    }
}

impl Droid {
    pub async fn new(driver_path: &Path, settings: &ScraperSettings) -> anyhow::Result<Self> {
        mark_executable(driver_path)?;

        let port = free_local_port().context("no free local port for chromedriver")?;
        let mut chromedriver = Command::new(driver_path)
            .arg(format!("--port={}", port))
            .stdout(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {}", driver_path.display()))?;

        match connect_with_retries(&mut chromedriver, port, settings).await {
            Ok(driver) => Ok(Droid {
                driver,
                chromedriver,
            }),
            Err(e) => {
                if let Ok(None) = chromedriver.try_wait() {
                    if let Err(kill_err) = chromedriver.kill().await {
                        log::error!("Failed to kill chromedriver: {:?}", kill_err);
                    }
                }
                Err(e)
            }
        }
    }
}

// The listener is dropped before chromedriver binds the port.
fn free_local_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}

/// Chromedriver needs a moment before it accepts sessions, so connecting is
/// retried until it answers, exits, or the attempts run out.
async fn connect_with_retries(
    chromedriver: &mut Child,
    port: u16,
    settings: &ScraperSettings,
) -> anyhow::Result<WebDriver> {
    let mut attempt = 1;

    loop {
        if let Some(status) = chromedriver.try_wait()? {
            bail!("chromedriver exited before accepting a session: {}", status);
        }

        match connect(port, settings).await {
            Ok(driver) => return Ok(driver),
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                log::debug!("Chromedriver not ready (attempt {}): {:?}", attempt, e);
                attempt += 1;
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
            }
            Err(e) => {
                return Err(e.context(format!(
                    "chromedriver did not accept a session after {} attempts",
                    CONNECT_ATTEMPTS
                )))
            }
        }
    }
}

async fn connect(port: u16, settings: &ScraperSettings) -> anyhow::Result<WebDriver> {
    let mut caps = DesiredCapabilities::chrome();
    caps.set_disable_gpu()?;
    caps.set_no_sandbox()?;
    caps.set_disable_dev_shm_usage()?;
    caps.add_arg(&format!(
        "--window-size={},{}",
        settings.window_width, settings.window_height
    ))?;
    if settings.headless {
        caps.set_headless()?;
    }

    let driver = WebDriver::new(&format!("http://localhost:{}", port), caps)
        .await
        .context("failed to connect to chromedriver")?;

    if let Err(e) = driver
        .set_page_load_timeout(settings.page_load_timeout())
        .await
    {
        _ = driver.quit().await;
        return Err(e.into());
    }

    Ok(driver)
}

/// Quotes `text` as an XPath string literal. XPath 1.0 has no escape
/// sequences, so text holding both quote kinds is spliced with `concat()`.
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{}'", text)
    } else if !text.contains('"') {
        format!("\"{}\"", text)
    } else {
        let pieces: Vec<String> = text.split('\'').map(|piece| format!("'{}'", piece)).collect();
        format!("concat({})", pieces.join(", \"'\", "))
    }
}

#[cfg(unix)]
fn mark_executable(driver_path: &Path) -> anyhow::Result<()> {
    use std::{fs, os::unix::fs::PermissionsExt};

    let mut perms = fs::metadata(driver_path)
        .with_context(|| format!("failed to read metadata of {}", driver_path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(driver_path, perms)
        .with_context(|| format!("failed to make {} executable", driver_path.display()))?;

    Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_driver_path: &Path) -> anyhow::Result<()> {
    Ok(())
}

#[async_trait]
impl MapsBrowser for Droid {
    async fn goto(&self, url: &str) -> anyhow::Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn click_button_labelled(&self, label: &str) -> anyhow::Result<()> {
        let xpath = format!("//button//span[contains(text(), {})]", xpath_literal(label));
        let button = self.driver.find(By::XPath(&xpath)).await?;

        button.scroll_into_view().await?;
        tokio::time::sleep(Duration::from_secs(1)).await;
        button.click().await?;

        Ok(())
    }

    async fn scroll_by(&self, pixels: i64) -> anyhow::Result<()> {
        self.driver
            .execute(format!("window.scrollBy(0, {});", pixels), Vec::new())
            .await?;
        Ok(())
    }

    async fn wait_for_class(&self, class_name: &str, timeout: Duration) -> anyhow::Result<()> {
        self.driver
            .query(By::ClassName(class_name))
            .wait(timeout, WAIT_POLL_INTERVAL)
            .first()
            .await?;
        Ok(())
    }

    async fn page_source(&self) -> anyhow::Result<String> {
        Ok(self.driver.source().await?)
    }

    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        let Droid {
            driver,
            mut chromedriver,
        } = *self;

        let quit_result = driver.quit().await.context("failed to quit browser session");
        chromedriver
            .kill()
            .await
            .context("failed to stop chromedriver")?;

        quit_result
    }
}
