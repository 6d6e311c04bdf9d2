use std::io::{self, BufRead, Write};

use url::Url;

use crate::{
    configuration::ScraperSettings,
    services::{extract_google_maps_info, BrowserLauncher, DriverLocator},
};

use super::prompt_line;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_NO_URL: u8 = 1;

/// Prompts for a Maps URL and prints what could be extracted from it.
/// Returns the process exit status.
pub async fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    locator: &dyn DriverLocator,
    launcher: &dyn BrowserLauncher,
    settings: &ScraperSettings,
) -> io::Result<u8> {
    let maps_url = prompt_line(input, output, "Please provide a Google Maps URL: ")?;
    if maps_url.is_empty() {
        writeln!(output, "No URL provided. Exiting.")?;
        return Ok(EXIT_NO_URL);
    }
    if let Err(e) = Url::parse(&maps_url) {
        writeln!(output, "Invalid URL provided ({}). Exiting.", e)?;
        return Ok(EXIT_NO_URL);
    }

    writeln!(output, "Processing URL: {}", maps_url)?;
    match extract_google_maps_info(locator, launcher, &maps_url, settings).await {
        Ok(info) => {
            writeln!(output, "\nExtracted Information:")?;
            writeln!(output, "{}", info)?;
        }
        Err(e) => {
            log::error!("Extraction failed: {:?}", e);
            writeln!(output, "{}", e)?;
            writeln!(output, "Failed to extract information from the URL.")?;
        }
    }

    Ok(EXIT_SUCCESS)
}
