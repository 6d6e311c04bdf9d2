use std::fmt;

use scraper::{ElementRef, Html, Selector};

pub const PLACEHOLDER: &str = "N/A";

/// Marker class carried by the business-name heading on a Maps listing.
pub const BUSINESS_NAME_CLASS: &str = "DUwDvf";

#[derive(Debug, Clone, PartialEq)]
pub struct ListingInfo {
    pub business_name: String,
    pub address: String,
    pub phone_number: String,
}

impl fmt::Display for ListingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Business Name: {}", self.business_name)?;
        writeln!(f, "Address: {}", self.address)?;
        write!(f, "Phone Number: {}", self.phone_number)
    }
}

pub fn extract_listing_info(page_source: &str) -> ListingInfo {
    let html_document = Html::parse_document(page_source);

    let name_selector = Selector::parse(&format!("h1.{}", BUSINESS_NAME_CLASS)).unwrap();
    let address_selector = Selector::parse(r#"button[data-item-id="address"]"#).unwrap();
    let phone_selector = Selector::parse(r#"button[data-item-id^="phone:"]"#).unwrap();

    let business_name = first_text(&html_document, &name_selector);
    log::info!("Business Name: {}", business_name);

    let address = first_text(&html_document, &address_selector);
    log::info!("Address: {}", address);

    let phone_number = first_text(&html_document, &phone_selector);
    log::info!("Phone Number: {}", phone_number);

    ListingInfo {
        business_name,
        address,
        phone_number,
    }
}

fn first_text(html_document: &Html, selector: &Selector) -> String {
    html_document
        .select(selector)
        .next()
        .map(stripped_text)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

// Each text node is trimmed and the pieces are joined without a separator.
fn stripped_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
