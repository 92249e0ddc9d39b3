// src/maps/google.rs
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::maps::types::{DetailsResponse, GeocodeResponse, NearbyResponse};
use crate::maps::PlacesBackend;
use crate::models::{GeoPoint, PlaceDetails, PlaceSummary, Result};

const BASE_URL: &str = "https://maps.googleapis.com/maps/api";

pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    photo_max_width: u32,
}

impl GoogleMapsClient {
    // No request timeout here: only the email harvest carries one, the maps
    // calls block for as long as the upstream takes.
    pub fn new(api_key: String, photo_max_width: u32) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_key,
            photo_max_width,
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", BASE_URL, path))?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl PlacesBackend for GoogleMapsClient {
    async fn geocode(&self, city: &str) -> Result<GeoPoint> {
        debug!("Geocoding city: {}", city);

        let url = self.endpoint("geocode/json", &[("address", city)])?;
        let response: GeocodeResponse = self.client.get(url).send().await?.json().await?;

        if response.status != "OK" {
            warn!("Geocoding of {} returned status {}", city, response.status);
            return Err(response.status.into());
        }

        let first = response
            .results
            .into_iter()
            .next()
            .ok_or("geocoding returned OK without results")?;

        Ok(first.geometry.location.into())
    }

    async fn nearby_search(
        &self,
        location: GeoPoint,
        radius_meters: u32,
        keyword: &str,
    ) -> Result<Vec<PlaceSummary>> {
        debug!(
            "Nearby search for '{}' within {}m of ({}, {})",
            keyword, radius_meters, location.latitude, location.longitude
        );

        let location_param = format!("{},{}", location.latitude, location.longitude);
        let radius_param = radius_meters.to_string();
        let url = self.endpoint(
            "place/nearbysearch/json",
            &[
                ("location", location_param.as_str()),
                ("radius", radius_param.as_str()),
                ("keyword", keyword),
            ],
        )?;

        let response: NearbyResponse = self.client.get(url).send().await?.json().await?;

        if response.status != "OK" {
            warn!("Nearby search returned status {}", response.status);
            return Err(response.status.into());
        }

        Ok(response
            .results
            .into_iter()
            .map(|result| PlaceSummary {
                place_id: result.place_id,
            })
            .collect())
    }

    async fn place_details(&self, place: &PlaceSummary) -> Result<PlaceDetails> {
        debug!("Fetching details for place {}", place.place_id);

        let url = self.endpoint("place/details/json", &[("place_id", place.place_id.as_str())])?;
        let response: DetailsResponse = self.client.get(url).send().await?.json().await?;

        if response.status != "OK" {
            return Err(response.status.into());
        }

        let result = response
            .result
            .ok_or("details returned OK without a result object")?;

        Ok(PlaceDetails {
            name: result.name,
            address: result.vicinity,
            rating: result.rating,
            website_url: result.website,
            location: result.geometry.location.into(),
            photo_reference: result.photos.into_iter().next().map(|p| p.photo_reference),
        })
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        let width_param = self.photo_max_width.to_string();
        match self.endpoint(
            "place/photo",
            &[
                ("maxwidth", width_param.as_str()),
                ("photoreference", photo_reference),
            ],
        ) {
            Ok(url) => url.to_string(),
            Err(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_escapes_query_values_and_appends_key() {
        let client = GoogleMapsClient::new("secret-key".to_string(), 400).unwrap();
        let url = client
            .endpoint("geocode/json", &[("address", "San Sebastián, España")])
            .unwrap();

        let rendered = url.to_string();
        assert!(rendered.starts_with("https://maps.googleapis.com/maps/api/geocode/json?"));
        assert!(rendered.contains("address=San+Sebasti%C3%A1n%2C+Espa%C3%B1a"));
        assert!(rendered.ends_with("key=secret-key"));
    }

    #[test]
    fn photo_url_carries_reference_and_max_width() {
        let client = GoogleMapsClient::new("k".to_string(), 400).unwrap();
        let url = client.photo_url("photo-ref-1");

        assert!(url.contains("place/photo"));
        assert!(url.contains("maxwidth=400"));
        assert!(url.contains("photoreference=photo-ref-1"));
    }
}
