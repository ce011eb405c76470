use anyhow::{Context, Result, bail};
use log::debug;
use serde::Deserialize;
use std::thread;
use std::time::Duration;

use crate::config::GeocoderConfig;
use crate::geometry::GeoPoint;

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

/// A geocoded place
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub center: GeoPoint,
}

/// Geocode a place name (farm, village, municipality) to a center point.
///
/// Used to position the capture surface when a record has no saved
/// boundary. Includes a 1 second delay for rate limiting (Nominatim ToS).
///
/// # Returns
/// * `Ok(Place)` - Best match with its display name
/// * `Err` - If nothing matched or the API failed
pub fn geocode_place(query: &str, config: &GeocoderConfig) -> Result<Place> {
    // Rate limiting - Nominatim requires max 1 request per second
    thread::sleep(Duration::from_secs(1));

    let client = reqwest::blocking::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    debug!("Geocoding {:?} via {}", query, config.url);

    let response = client
        .get(&config.url)
        .query(&[("q", query), ("format", "json"), ("limit", "1")])
        .send()
        .context("Failed to send request to Nominatim API")?;

    if !response.status().is_success() {
        bail!("Nominatim API returned error status: {}", response.status());
    }

    let body = response
        .text()
        .context("Failed to read Nominatim response")?;

    parse_response(query, &body)
}

fn parse_response(query: &str, body: &str) -> Result<Place> {
    let results: Vec<NominatimResult> =
        serde_json::from_str(body).context("Failed to parse Nominatim JSON response")?;

    let result = results
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Place not found: {}", query))?;

    let lat: f64 = result
        .lat
        .parse()
        .context("Failed to parse latitude from Nominatim response")?;
    let lon: f64 = result
        .lon
        .parse()
        .context("Failed to parse longitude from Nominatim response")?;

    let center = GeoPoint::try_new(lat, lon).context("Nominatim returned an invalid coordinate")?;

    Ok(Place {
        name: result.display_name,
        center,
    })
}
