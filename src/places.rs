use serde::Deserialize;

use crate::cache::CacheStore;
use crate::error::{AppError, Result};
use crate::fetch::fetch_with_cache;
use crate::models::{NationalSite, PlaceRecord};

const RADIUS_URL: &str = "http://www.mapquestapi.com/search/v2/radius";

#[derive(Deserialize)]
struct RadiusResponse {
    // An API error response carries no searchResults; surface that as an
    // error instead of printing an empty listing.
    #[serde(rename = "searchResults")]
    search_results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    fields: SearchFields,
}

#[derive(Deserialize, Default)]
struct SearchFields {
    #[serde(default)]
    group_sic_code_name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    city: String,
}

fn field_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

impl From<SearchResult> for PlaceRecord {
    fn from(result: SearchResult) -> Self {
        PlaceRecord {
            name: field_or(result.name, "No name"),
            category: field_or(result.fields.group_sic_code_name, "No category"),
            address: field_or(result.fields.address, "No address"),
            city: field_or(result.fields.city, "No city"),
        }
    }
}

/// Lists attractions within a 10-mile radius of the site's zipcode.
pub fn nearby(cache: &mut CacheStore, api_key: &str, site: &NationalSite) -> Result<Vec<PlaceRecord>> {
    let params = [
        ("key", api_key),
        ("origin", site.zipcode.as_str()),
        ("radius", "10"),
        ("maxMatches", "10"),
        ("ambiguities", "ignore"),
        ("outFormat", "json"),
    ];
    let body = fetch_with_cache(cache, RADIUS_URL, &params)?;
    parse_search_results(&body)
}

/// Parses the radius-search response body. Each place field defaults
/// independently to its sentinel when missing or empty.
pub fn parse_search_results(body: &str) -> Result<Vec<PlaceRecord>> {
    let response: RadiusResponse = serde_json::from_str(body)
        .map_err(|err| AppError::Malformed(format!("places response: {err}")))?;
    Ok(response
        .search_results
        .into_iter()
        .map(PlaceRecord::from)
        .collect())
}
