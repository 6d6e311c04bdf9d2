use std::time::Duration;

use config::{Config, ConfigError};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub resolver: ResolverSettings,
    pub scraper: ScraperSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ResolverSettings {
    pub locatieserver_url: String,
    pub amsterdam_data_url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    pub consent_label: String,
    pub page_load_timeout_secs: u64,
    pub consent_timeout_secs: u64,
    pub consent_poll_interval_ms: u64,
    pub scroll_step_px: i64,
    pub content_timeout_secs: u64,
    pub settle_delay_secs: u64,
    pub window_width: u32,
    pub window_height: u32,
    pub headless: bool,
}

impl ScraperSettings {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn consent_timeout(&self) -> Duration {
        Duration::from_secs(self.consent_timeout_secs)
    }

    pub fn consent_poll_interval(&self) -> Duration {
        Duration::from_millis(self.consent_poll_interval_ms)
    }

    pub fn content_timeout(&self) -> Duration {
        Duration::from_secs(self.content_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }
}

impl Default for ScraperSettings {
    fn default() -> Self {
        ScraperSettings {
            consent_label: "Alle akzeptieren".to_string(),
            page_load_timeout_secs: 30,
            consent_timeout_secs: 30,
            consent_poll_interval_ms: 1000,
            scroll_step_px: 500,
            content_timeout_secs: 30,
            settle_delay_secs: 3,
            window_width: 1920,
            window_height: 1080,
            headless: false,
        }
    }
}

/// Both tools run on compiled-in settings only; nothing is read from
/// files or the environment.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let scraper = ScraperSettings::default();

    let settings = Config::builder()
        .set_default(
            "resolver.locatieserver_url",
            "https://api.pdok.nl/bzk/locatieserver/search/v3_1/suggest",
        )?
        .set_default(
            "resolver.amsterdam_data_url",
            "https://api.data.amsterdam.nl/bag/v1.1/nummeraanduiding/",
        )?
        .set_default("scraper.consent_label", scraper.consent_label)?
        .set_default("scraper.page_load_timeout_secs", scraper.page_load_timeout_secs)?
        .set_default("scraper.consent_timeout_secs", scraper.consent_timeout_secs)?
        .set_default("scraper.consent_poll_interval_ms", scraper.consent_poll_interval_ms)?
        .set_default("scraper.scroll_step_px", scraper.scroll_step_px)?
        .set_default("scraper.content_timeout_secs", scraper.content_timeout_secs)?
        .set_default("scraper.settle_delay_secs", scraper.settle_delay_secs)?
        .set_default("scraper.window_width", scraper.window_width)?
        .set_default("scraper.window_height", scraper.window_height)?
        .set_default("scraper.headless", scraper.headless)?
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::get_configuration;

    #[test]
    fn defaults_match_stock_behaviour() {
        let settings = get_configuration().unwrap();

        assert_eq!(
            settings.resolver.locatieserver_url,
            "https://api.pdok.nl/bzk/locatieserver/search/v3_1/suggest"
        );
        assert_eq!(settings.scraper.consent_label, "Alle akzeptieren");
        assert_eq!(settings.scraper.content_timeout_secs, 30);
        assert_eq!(settings.scraper.settle_delay_secs, 3);
        assert!(!settings.scraper.headless);
    }

    #[test]
    fn environment_does_not_override_settings() {
        std::env::set_var("LOKAAL_SCRAPER__CONTENT_TIMEOUT_SECS", "99");
        std::env::set_var("SCRAPER__HEADLESS", "true");
        std::env::set_var("RESOLVER__LOCATIESERVER_URL", "http://localhost:1");

        let settings = get_configuration().unwrap();

        assert_eq!(settings.scraper.content_timeout_secs, 30);
        assert!(!settings.scraper.headless);
        assert_eq!(
            settings.resolver.locatieserver_url,
            "https://api.pdok.nl/bzk/locatieserver/search/v3_1/suggest"
        );
    }
}
