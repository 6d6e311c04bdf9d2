use std::{path::Path, time::Duration};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::{
    configuration::ScraperSettings,
    domain::listing::{extract_listing_info, ListingInfo, BUSINESS_NAME_CLASS},
};

use super::DriverLocator;

/// The browser operations a Maps listing visit needs.
#[async_trait]
pub trait MapsBrowser: Send + Sync {
    async fn goto(&self, url: &str) -> anyhow::Result<()>;
    /// Finds a button containing `label`, scrolls it into view and clicks it.
    async fn click_button_labelled(&self, label: &str) -> anyhow::Result<()>;
    async fn scroll_by(&self, pixels: i64) -> anyhow::Result<()>;
    async fn wait_for_class(&self, class_name: &str, timeout: Duration) -> anyhow::Result<()>;
    async fn page_source(&self) -> anyhow::Result<String>;
    async fn close(self: Box<Self>) -> anyhow::Result<()>;
}

#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self, driver_path: &Path) -> anyhow::Result<Box<dyn MapsBrowser>>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Could not find ChromeDriver. Please ensure it's in the project root or chromedriver-mac-arm64 directory.")]
    DriverNotFound,
    #[error("Failed to launch browser: {0:?}")]
    Launch(anyhow::Error),
    #[error("Failed to navigate to {url}: {cause:?}")]
    Navigation { url: String, cause: anyhow::Error },
    #[error("Main content did not load: {0:?}")]
    ContentTimeout(anyhow::Error),
    #[error("An unexpected error occurred: {0:?}")]
    Browser(anyhow::Error),
}

/// Visits a Google Maps listing and extracts its name, address and phone.
///
/// The browser, once launched, is closed exactly once whatever the outcome.
pub async fn extract_google_maps_info(
    locator: &dyn DriverLocator,
    launcher: &dyn BrowserLauncher,
    maps_url: &str,
    settings: &ScraperSettings,
) -> Result<ListingInfo, ScrapeError> {
    let driver_path = locator.locate().ok_or(ScrapeError::DriverNotFound)?;

    let browser = launcher
        .launch(&driver_path)
        .await
        .map_err(ScrapeError::Launch)?;

    let result = visit_listing(browser.as_ref(), maps_url, settings).await;

    match browser.close().await {
        Ok(_) => log::info!("WebDriver closed successfully."),
        Err(e) => log::error!("Error closing WebDriver: {:?}", e),
    }

    result
}

async fn visit_listing(
    browser: &dyn MapsBrowser,
    maps_url: &str,
    settings: &ScraperSettings,
) -> Result<ListingInfo, ScrapeError> {
    log::info!("Navigating to URL: {}", maps_url);
    browser
        .goto(maps_url)
        .await
        .map_err(|cause| ScrapeError::Navigation {
            url: maps_url.to_string(),
            cause,
        })?;

    if !accept_cookie_consent(browser, settings).await {
        log::warn!("Could not accept cookies. Proceeding without it.");
    }

    log::info!("Waiting for main content to load...");
    browser
        .wait_for_class(BUSINESS_NAME_CLASS, settings.content_timeout())
        .await
        .map_err(ScrapeError::ContentTimeout)?;
    log::info!("Main content loaded successfully.");

    tokio::time::sleep(settings.settle_delay()).await;

    let page_source = browser.page_source().await.map_err(ScrapeError::Browser)?;

    Ok(extract_listing_info(&page_source))
}

/// Retries until the consent timeout elapses, scrolling between attempts.
pub async fn accept_cookie_consent(browser: &dyn MapsBrowser, settings: &ScraperSettings) -> bool {
    let start = Instant::now();

    while start.elapsed() < settings.consent_timeout() {
        match browser.click_button_labelled(&settings.consent_label).await {
            Ok(_) => {
                log::info!("Cookie consent accepted.");
                return true;
            }
            Err(e) => {
                log::debug!("Button not found yet. Scrolling... {:?}", e);
                if let Err(e) = browser.scroll_by(settings.scroll_step_px).await {
                    log::debug!("Scrolling failed: {:?}", e);
                }
                tokio::time::sleep(settings.consent_poll_interval()).await;
            }
        }
    }

    log::warn!(
        "Failed to find and click the '{}' button within timeout.",
        settings.consent_label
    );
    false
}
