use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::{
    configuration::ResolverSettings,
    domain::address::{NummeraanduidingResponse, SuggestResponse},
};

const SUGGEST_FIELDS: &str = "id,weergavenaam,straatnaam,huis_nlt,postcode,woonplaatsnaam,centroide_ll,adresseerbaarobject_id,nummeraanduiding_id";
const SUGGEST_FILTERS: [&str; 4] = [
    "bron:BAG",
    "type:adres",
    "woonplaatsnaam:(amsterdam,weesp)",
    "gemeentenaam:amsterdam",
];

#[derive(Debug, thiserror::Error)]
pub enum GebiedError {
    #[error("Error querying Locatieserver: {0}")]
    SuggestStatus(u16),
    #[error("No address found for the given postcode.")]
    NoAddressFound,
    #[error("nummeraanduiding_id not found in Locatieserver response.")]
    MissingNummeraanduiding,
    #[error("Error querying Amsterdam Data API: {0}")]
    LookupStatus(u16),
    #[error("No data found in Amsterdam Data API response.")]
    NoLookupData,
    #[error("No gebied information found in Amsterdam Data API response.")]
    NoGebied,
    #[error("Gebied name not found in API response.")]
    GebiedNameMissing,
    #[error("An error occurred: {0}")]
    Unexpected(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct LookupQuery<'a> {
    landelijk_id: &'a str,
    detailed: u8,
}

pub struct GebiedResolver {
    client: Client,
    locatieserver_url: String,
    amsterdam_data_url: String,
}

impl GebiedResolver {
    pub fn new(settings: ResolverSettings) -> Self {
        GebiedResolver {
            client: Client::new(),
            locatieserver_url: settings.locatieserver_url,
            amsterdam_data_url: settings.amsterdam_data_url,
        }
    }

    /// Resolves a postcode to the display name of its Amsterdam gebied.
    ///
    /// Two requests are made in sequence: a Locatieserver suggest query for
    /// the address' nummeraanduiding id, then a BAG lookup of that id.
    pub async fn resolve(&self, postcode: &str) -> Result<String, GebiedError> {
        let nummeraanduiding_id = self.find_nummeraanduiding_id(postcode).await?;
        log::info!(
            "Postcode {} maps to nummeraanduiding {}",
            postcode,
            nummeraanduiding_id
        );

        self.find_gebied_name(&nummeraanduiding_id).await
    }

    async fn find_nummeraanduiding_id(&self, postcode: &str) -> Result<String, GebiedError> {
        let mut params = vec![("fl", SUGGEST_FIELDS)];
        params.extend(SUGGEST_FILTERS.iter().map(|filter| ("fq", *filter)));
        params.push(("q", postcode));

        let res = self
            .client
            .get(&self.locatieserver_url)
            .query(&params)
            .send()
            .await?;

        if res.status() != StatusCode::OK {
            log::error!("Locatieserver returned status {}", res.status());
            return Err(GebiedError::SuggestStatus(res.status().as_u16()));
        }

        let suggestions = res.json::<SuggestResponse>().await?;
        let top_match = suggestions.top_match().ok_or(GebiedError::NoAddressFound)?;

        top_match
            .nummeraanduiding()
            .map(|id| id.to_string())
            .ok_or(GebiedError::MissingNummeraanduiding)
    }

    async fn find_gebied_name(&self, nummeraanduiding_id: &str) -> Result<String, GebiedError> {
        let res = self
            .client
            .get(&self.amsterdam_data_url)
            .query(&LookupQuery {
                landelijk_id: nummeraanduiding_id,
                detailed: 1,
            })
            .send()
            .await?;

        if res.status() != StatusCode::OK {
            log::error!("Amsterdam Data API returned status {}", res.status());
            return Err(GebiedError::LookupStatus(res.status().as_u16()));
        }

        let details = res.json::<NummeraanduidingResponse>().await?;
        let detail = details.first_result().ok_or(GebiedError::NoLookupData)?;
        let gebied = detail
            .gebiedsgerichtwerken
            .as_ref()
            .filter(|gebied| !gebied.is_empty())
            .ok_or(GebiedError::NoGebied)?;

        gebied
            .display_name()
            .map(|name| name.to_string())
            .ok_or(GebiedError::GebiedNameMissing)
    }
}
