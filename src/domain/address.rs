use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SuggestResponse {
    pub response: SuggestDocs,
}

#[derive(Debug, Deserialize)]
pub struct SuggestDocs {
    pub docs: Option<Vec<AddressSuggestion>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressSuggestion {
    pub id: Option<String>,
    pub weergavenaam: Option<String>,
    pub postcode: Option<String>,
    pub nummeraanduiding_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NummeraanduidingResponse {
    pub results: Option<Vec<AddressDetail>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressDetail {
    pub gebiedsgerichtwerken: Option<Gebied>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Gebied {
    #[serde(rename = "_display")]
    pub display: Option<String>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl SuggestResponse {
    pub fn top_match(&self) -> Option<&AddressSuggestion> {
        self.response.docs.as_ref().and_then(|docs| docs.first())
    }
}

impl NummeraanduidingResponse {
    pub fn first_result(&self) -> Option<&AddressDetail> {
        self.results.as_ref().and_then(|results| results.first())
    }
}

impl AddressSuggestion {
    /// Empty identifiers are treated as absent.
    pub fn nummeraanduiding(&self) -> Option<&str> {
        self.nummeraanduiding_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}

impl Gebied {
    /// An empty object carries no gebied information at all.
    pub fn is_empty(&self) -> bool {
        self.display.is_none() && self.other.is_empty()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display.as_deref().filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::{NummeraanduidingResponse, SuggestResponse};

    #[test]
    fn parse_suggest_response() {
        let json = r#"{
            "response": {
                "numFound": 1,
                "docs": [{
                    "id": "adr-6b1e0dfcf5c5ef8c5e1b2f7c0e9f4a3d",
                    "weergavenaam": "Bijlmerplein 888, 1102MG Amsterdam",
                    "postcode": "1102MG",
                    "nummeraanduiding_id": "0363200000463617"
                }]
            }
        }"#;
        let parsed: SuggestResponse = serde_json::from_str(json).unwrap();

        let top = parsed.top_match().unwrap();
        assert_eq!(top.nummeraanduiding(), Some("0363200000463617"));
        assert_eq!(top.postcode.as_deref(), Some("1102MG"));
    }

    #[test]
    fn empty_nummeraanduiding_is_absent() {
        let json = r#"{"response": {"docs": [{"id": "adr-1", "nummeraanduiding_id": ""}]}}"#;
        let parsed: SuggestResponse = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.top_match().unwrap().nummeraanduiding(), None);
    }

    #[test]
    fn parse_nummeraanduiding_without_gebied() {
        let json = r#"{"count": 1, "results": [{"landelijk_id": "0363200000463617"}]}"#;
        let parsed: NummeraanduidingResponse = serde_json::from_str(json).unwrap();

        assert!(parsed.first_result().unwrap().gebiedsgerichtwerken.is_none());
    }

    #[test]
    fn empty_gebied_object_is_empty() {
        let json = r#"{"results": [{"gebiedsgerichtwerken": {}}]}"#;
        let parsed: NummeraanduidingResponse = serde_json::from_str(json).unwrap();
        let gebied = parsed.first_result().unwrap().gebiedsgerichtwerken.as_ref().unwrap();

        assert!(gebied.is_empty());
    }

    #[test]
    fn gebied_without_display_is_not_empty() {
        let json = r#"{"results": [{"gebiedsgerichtwerken": {"code": "DX20"}}]}"#;
        let parsed: NummeraanduidingResponse = serde_json::from_str(json).unwrap();
        let gebied = parsed.first_result().unwrap().gebiedsgerichtwerken.as_ref().unwrap();

        assert!(!gebied.is_empty());
        assert_eq!(gebied.display_name(), None);
    }

    #[test]
    fn null_results_has_no_first_result() {
        let parsed: NummeraanduidingResponse =
            serde_json::from_str(r#"{"count": 0, "results": null}"#).unwrap();

        assert!(parsed.first_result().is_none());
    }
}
